//! rxcheck — drug interaction checker CLI
//!
//! Looks up a pair of medications in the reference interaction table and
//! prints a severity/recommendation card.
//!
//! Usage:
//!   cargo run -p rxcheck -- check warfarin aspirin
//!   cargo run -p rxcheck -- check citalopram tramadol --json
//!   cargo run -p rxcheck -- suggest praz
//!   cargo run -p rxcheck -- list
//!   cargo run -p rxcheck -- examples

use std::{path::PathBuf, process::ExitCode, time::Instant};

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rxcheck_contracts::{
    error::{RxError, RxResult},
    interaction::{Severity, DISCLAIMER_TEXT, NO_INTERACTION_TEXT},
    search::SearchOutcome,
};
use rxcheck_core::InteractionTable;
use rxcheck_ref::{load_resolver, load_table, Formulary, EXAMPLE_PAIRS};
use rxcheck_session::{CheckerConfig, Field, SearchSession};

/// Width used when wrapping card text.
const CARD_WIDTH: usize = 72;

// ── CLI definition ────────────────────────────────────────────────────────────

/// rxcheck — check two medications for known interactions.
#[derive(Parser)]
#[command(
    name = "rxcheck",
    about = "Drug interaction checker",
    long_about = "Checks two medications against a reference interaction table and\n\
                  prints the severity, details, and a recommendation.\n\
                  For educational purposes only."
)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the simulated lookup delay, in milliseconds.
    #[arg(long, global = true, value_name = "MS")]
    delay_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check one pair of medications.
    Check {
        drug1: String,
        drug2: String,
        /// Print the result as JSON instead of a card.
        #[arg(long)]
        json: bool,
    },
    /// Suggest formulary names containing QUERY.
    Suggest { query: String },
    /// List every pair in the interaction table.
    List,
    /// Resolve the built-in example pairs.
    Examples,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> RxResult<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => CheckerConfig::from_file(path)?,
        None => CheckerConfig::default(),
    };
    if let Some(ms) = cli.delay_ms {
        config.search_delay_ms = ms;
        config.validate()?;
    }
    debug!(?config, "configuration loaded");

    match cli.command {
        Command::Check { drug1, drug2, json } => run_check(&config, &drug1, &drug2, json),
        Command::Suggest { query } => run_suggest(&config, &query),
        Command::List => run_list(&config),
        Command::Examples => run_examples(&config),
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_check(config: &CheckerConfig, drug1: &str, drug2: &str, json: bool) -> RxResult<ExitCode> {
    let resolver = load_resolver(config.interactions_file.as_deref())?;

    let mut session = SearchSession::new(config);
    session.set_input(Field::First, drug1);
    session.set_input(Field::Second, drug2);

    let Some(_ticket) = session.submit(Instant::now()) else {
        eprintln!(
            "Both medication names need at least {} characters.",
            config.min_query_len
        );
        return Ok(ExitCode::from(2));
    };

    if !json {
        println!("Analyzing interactions...");
    }

    // Single search, nothing else can supersede it: wait out the delay.
    while let Some(due) = session.due_at() {
        let now = Instant::now();
        if due > now {
            std::thread::sleep(due - now);
        }
        session.poll(Instant::now(), &resolver);
    }

    let Some(outcome) = session.status().outcome() else {
        return Ok(ExitCode::FAILURE);
    };

    if json {
        let text = serde_json::to_string_pretty(outcome).map_err(|e| RxError::Serialization {
            reason: e.to_string(),
        })?;
        println!("{}", text);
    } else {
        println!();
        print!("{}", render_card(outcome));
    }
    Ok(ExitCode::SUCCESS)
}

fn run_suggest(config: &CheckerConfig, query: &str) -> RxResult<ExitCode> {
    let formulary = Formulary::builtin()?;
    let matches = formulary.suggest(query, config.min_query_len, config.suggestion_limit);

    if matches.is_empty() {
        println!("No suggestions for '{}'.", query);
    }
    for name in matches {
        println!("  ● {}", name);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_list(config: &CheckerConfig) -> RxResult<ExitCode> {
    let table = load_table(config.interactions_file.as_deref())?;
    print!("{}", render_table(&table));
    Ok(ExitCode::SUCCESS)
}

fn run_examples(config: &CheckerConfig) -> RxResult<ExitCode> {
    let resolver = load_resolver(config.interactions_file.as_deref())?;

    println!("Try these examples:");
    for (a, b) in EXAMPLE_PAIRS {
        let severity = resolver
            .resolve(a, b)
            .map(|r| r.severity)
            .unwrap_or(Severity::None);
        println!("  {:<24} {} {}", format!("{} + {}", a, b), severity.icon(), severity.label());
    }
    Ok(ExitCode::SUCCESS)
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn render_card(outcome: &SearchOutcome) -> String {
    let severity = outcome.severity();
    let mut out = String::new();

    out.push_str(&format!(
        "{} {}  {}\n",
        severity.icon(),
        severity.label(),
        level_bars(severity)
    ));
    out.push_str(&format!("{} + {}\n\n", outcome.drug1, outcome.drug2));

    match &outcome.record {
        Some(record) => {
            out.push_str("INTERACTION DETAILS\n");
            push_wrapped(&mut out, &record.description);
            out.push('\n');
            out.push_str("RECOMMENDATION\n");
            push_wrapped(&mut out, &record.recommendation);
        }
        None => push_wrapped(&mut out, NO_INTERACTION_TEXT),
    }

    out.push('\n');
    push_wrapped(&mut out, &format!("ℹ {}", DISCLAIMER_TEXT));
    out
}

fn render_table(table: &InteractionTable) -> String {
    let mut out = String::new();
    for stored in table.iter() {
        out.push_str(&format!(
            "{:<32} {}\n",
            format!("{} + {}", stored.drug, stored.interacts_with),
            stored.record.severity
        ));
    }
    out.push_str(&format!(
        "\n{} pair(s), {} drug(s)\n",
        table.len(),
        table.drugs().len()
    ));
    out
}

/// "███" style indicator, filled up to the severity level.
fn level_bars(severity: Severity) -> String {
    let filled = severity.level() as usize;
    let empty = (Severity::MAX_LEVEL as usize).saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

/// Append `text` word-wrapped to `CARD_WIDTH`, indented by two spaces.
fn push_wrapped(out: &mut String, text: &str) {
    for line in wrap(text, CARD_WIDTH - 2) {
        out.push_str("  ");
        out.push_str(&line);
        out.push('\n');
    }
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
