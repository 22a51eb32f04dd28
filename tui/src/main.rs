//! rxcheck — interactive Ratatui TUI
//!
//! Layout:
//!   ┌─── header ──────────────────────────────────────────────────────────┐
//!   │  Drug Interaction Checker                                           │
//!   ├─── first medication ───────┬─ ◉ ─┬─── second medication ───────────┤
//!   │  warfarin▏                 │     │  aspirin                        │
//!   ├────────────────────────────┴─────┴─────────────────────────────────┤
//!   │  Suggestions for the focused field                                  │
//!   ├─────────────────────────────────────────────────────────────────────┤
//!   │  [Enter] Check Interactions                                         │
//!   ├─────────────────────────────────────────────────────────────────────┤
//!   │  Examples / Analyzing... / Result card                              │
//!   ├─────────────────────────────────────────────────────────────────────┤
//!   │  footer (key bindings)                                              │
//!   └─────────────────────────────────────────────────────────────────────┘

use std::{
    io,
    path::PathBuf,
    process::ExitCode,
    time::{Duration, Instant},
};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing_subscriber::EnvFilter;

use rxcheck_contracts::{
    drug::DrugName,
    error::{RxError, RxResult},
    interaction::{Severity, DISCLAIMER_TEXT, NO_INTERACTION_TEXT},
    search::{SearchOutcome, SearchStatus},
};
use rxcheck_core::Resolver;
use rxcheck_ref::{load_resolver, Formulary, EXAMPLE_PAIRS};
use rxcheck_session::{CheckerConfig, Field, SearchSession};

/// Spinner frame interval while a search is pending.
const TICK_MS: u64 = 100;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

#[derive(Parser)]
#[command(name = "rxcheck-tui", about = "Interactive drug interaction checker")]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ── App state ─────────────────────────────────────────────────────────────────

struct App {
    session: SearchSession,
    resolver: Resolver,
    formulary: Formulary,
    config: CheckerConfig,

    /// Input field receiving keystrokes.
    focus: Field,
    /// Highlighted suggestion, if the user has moved into the list.
    suggestion_cursor: Option<usize>,
    /// Spinner frame, advanced on each tick while searching.
    spinner: usize,
}

impl App {
    fn new(config: CheckerConfig, resolver: Resolver, formulary: Formulary) -> Self {
        Self {
            session: SearchSession::new(&config),
            resolver,
            formulary,
            config,
            focus: Field::First,
            suggestion_cursor: None,
            spinner: 0,
        }
    }

    /// Suggestions for the focused field.
    fn suggestions(&self) -> Vec<&DrugName> {
        self.formulary.suggest(
            self.session.input(self.focus),
            self.config.min_query_len,
            self.config.suggestion_limit,
        )
    }

    fn type_char(&mut self, c: char) {
        self.session.input_mut(self.focus).push(c);
        self.suggestion_cursor = None;
    }

    fn backspace(&mut self) {
        self.session.input_mut(self.focus).pop();
        self.suggestion_cursor = None;
    }

    fn clear_field(&mut self) {
        self.session.input_mut(self.focus).clear();
        self.suggestion_cursor = None;
    }

    fn switch_focus(&mut self) {
        self.focus = self.focus.other();
        self.suggestion_cursor = None;
    }

    fn move_cursor(&mut self, down: bool) {
        let count = self.suggestions().len();
        if count == 0 {
            self.suggestion_cursor = None;
            return;
        }
        self.suggestion_cursor = Some(match (self.suggestion_cursor, down) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        });
    }

    /// Replace the focused input with the highlighted (or first) suggestion.
    fn accept_suggestion(&mut self) -> bool {
        let index = self.suggestion_cursor.unwrap_or(0);
        let Some(name) = self.suggestions().get(index).map(|n| n.to_string()) else {
            return false;
        };
        self.session.set_input(self.focus, name);
        self.suggestion_cursor = None;
        true
    }

    fn load_example(&mut self, index: usize) {
        if let Some((a, b)) = EXAMPLE_PAIRS.get(index) {
            self.session.set_input(Field::First, *a);
            self.session.set_input(Field::Second, *b);
            self.suggestion_cursor = None;
        }
    }

    fn submit(&mut self, now: Instant) {
        self.suggestion_cursor = None;
        self.session.submit(now);
    }

    /// Advance time-driven state: spinner frame and the pending search.
    fn tick(&mut self, now: Instant) {
        if self.session.status().is_pending() {
            self.spinner = (self.spinner + 1) % SPINNER.len();
        }
        self.session.poll(now, &self.resolver);
    }

    /// Apply one key press. Returns false when the app should quit.
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return false,
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear_field()
            }

            KeyCode::Tab | KeyCode::BackTab => self.switch_focus(),
            KeyCode::Down => self.move_cursor(true),
            KeyCode::Up => self.move_cursor(false),
            KeyCode::Right => {
                self.accept_suggestion();
            }
            KeyCode::Enter => {
                if self.suggestion_cursor.is_some() {
                    self.accept_suggestion();
                } else {
                    self.submit(now);
                }
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::F(n @ 1..=4) => self.load_example(usize::from(n - 1)),
            // Unbound Ctrl/Alt chords are not text.
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.type_char(c)
            }
            _ => {}
        }
        true
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn ui(f: &mut Frame, app: &App) {
    let full = f.area();
    let suggestion_rows = app.config.suggestion_limit.min(8) as u16 + 2;

    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),               // header
            Constraint::Length(3),               // inputs
            Constraint::Length(suggestion_rows), // suggestions
            Constraint::Length(1),               // search button
            Constraint::Min(8),                  // result
            Constraint::Length(3),               // footer
        ])
        .split(full);

    render_header(f, outer_chunks[0]);
    render_inputs(f, outer_chunks[1], app);
    render_suggestions(f, outer_chunks[2], app);
    render_button(f, outer_chunks[3], app);
    render_result(f, outer_chunks[4], app);
    render_footer(f, outer_chunks[5]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            "Drug Interaction Checker    ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Enter two medications to check for interactions.",
            Style::default().fg(Color::Gray),
        ),
    ]);
    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(header, area);
}

fn render_inputs(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(46),
            Constraint::Percentage(8),
            Constraint::Percentage(46),
        ])
        .split(area);

    render_input(f, chunks[0], app, Field::First, " [1] First Medication ", "e.g., Citalopram");
    render_input(f, chunks[2], app, Field::Second, " [2] Second Medication ", "e.g., Naproxen");

    let (orb, orb_color) = if app.session.can_search() {
        ("◉", Color::Yellow)
    } else {
        ("○", Color::DarkGray)
    };
    let connector = Paragraph::new(Line::from(Span::styled(orb, Style::default().fg(orb_color))))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::TOP | Borders::BOTTOM).border_style(
            Style::default().fg(Color::DarkGray),
        ));
    f.render_widget(connector, chunks[1]);
}

fn render_input(
    f: &mut Frame,
    area: Rect,
    app: &App,
    field: Field,
    title: &str,
    placeholder: &str,
) {
    let focused = app.focus == field;
    let value = app.session.input(field);

    let border = if focused { Color::Yellow } else { Color::DarkGray };
    let mut spans = vec![Span::raw(" ")];
    if value.is_empty() && !focused {
        spans.push(Span::styled(placeholder, Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::styled(value, Style::default().fg(Color::White)));
    }
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
    }

    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(input, area);
}

fn render_suggestions(f: &mut Frame, area: Rect, app: &App) {
    let suggestions = app.suggestions();

    let items: Vec<ListItem> = if suggestions.is_empty() {
        vec![ListItem::new(Span::styled(
            "  Type at least two letters for suggestions",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        suggestions
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let selected = app.suggestion_cursor == Some(i);
                let style = if selected {
                    Style::default().fg(Color::Black).bg(Color::Yellow)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(vec![
                    Span::styled("  ● ", Style::default().fg(Color::Yellow)),
                    Span::styled(name.as_str(), style),
                ]))
            })
            .collect()
    };

    let title = match app.focus {
        Field::First => " Suggestions: first medication ",
        Field::Second => " Suggestions: second medication ",
    };
    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(list, area);
}

fn render_button(f: &mut Frame, area: Rect, app: &App) {
    let style = if app.session.can_search() {
        Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let button = Paragraph::new(Line::from(Span::styled(" [Enter] Check Interactions ", style)))
        .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(button, area);
}

fn render_result(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Result ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let lines = match app.session.status() {
        SearchStatus::NotSearched => example_lines(),
        SearchStatus::Pending(_) => vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    format!("  {} ", SPINNER[app.spinner % SPINNER.len()]),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled("Analyzing interactions...", Style::default().fg(Color::Gray)),
            ]),
        ],
        SearchStatus::Done(outcome) => card_lines(outcome),
    };

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn example_lines() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  TRY THESE EXAMPLES",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (i, (a, b)) in EXAMPLE_PAIRS.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  [F{}] ", i + 1), Style::default().fg(Color::Yellow)),
            Span::raw(format!("{} + {}", a, b)),
        ]));
    }
    lines
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Severe => Color::Red,
        Severity::Moderate => Color::Yellow,
        Severity::Mild => Color::LightYellow,
        Severity::None => Color::Green,
    }
}

fn card_lines(outcome: &SearchOutcome) -> Vec<Line<'static>> {
    let severity = outcome.severity();
    let color = severity_color(severity);
    let filled = severity.level() as usize;
    let empty = (Severity::MAX_LEVEL as usize).saturating_sub(filled);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("  {} ", severity.icon()), Style::default().fg(color)),
            Span::styled(
                severity.label(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("█".repeat(filled), Style::default().fg(color)),
            Span::styled("░".repeat(empty), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(
            format!("  {} + {}", outcome.drug1, outcome.drug2),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    match &outcome.record {
        Some(record) => {
            lines.push(Line::from(Span::styled(
                "  INTERACTION DETAILS",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(format!("  {}", record.description)));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "  RECOMMENDATION",
                Style::default().fg(Color::Yellow),
            )));
            lines.push(Line::from(Span::styled(
                format!("  {}", record.recommendation),
                Style::default().fg(Color::White),
            )));
        }
        None => {
            lines.push(Line::from(format!("  {}", NO_INTERACTION_TEXT)));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  ℹ {}", DISCLAIMER_TEXT),
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn render_footer(f: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Yellow);
    let spans = vec![
        Span::styled(" [Tab] ", key),
        Span::raw("Switch field  "),
        Span::styled("[↑↓→] ", key),
        Span::raw("Suggestions  "),
        Span::styled("[Enter] ", key),
        Span::raw("Check  "),
        Span::styled("[F1-F4] ", key),
        Span::raw("Examples  "),
        Span::styled("[Ctrl-U] ", key),
        Span::raw("Clear  "),
        Span::styled("[Esc] ", key),
        Span::raw("Quit"),
    ];

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(footer, area);
}

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn terminal_err(e: io::Error) -> RxError {
    RxError::Terminal {
        reason: e.to_string(),
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

// ── Main event loop ───────────────────────────────────────────────────────────

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        // Short ticks while a search is pending so the spinner moves and the
        // result lands on time; long ticks when idle.
        let timeout = match app.session.due_at() {
            Some(due) => due
                .saturating_duration_since(Instant::now())
                .min(Duration::from_millis(TICK_MS)),
            None => Duration::from_millis(200),
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !app.handle_key(key, Instant::now()) {
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());
    }
}

fn run(cli: Cli) -> RxResult<()> {
    let config = match &cli.config {
        Some(path) => CheckerConfig::from_file(path)?,
        None => CheckerConfig::default(),
    };
    let resolver = load_resolver(config.interactions_file.as_deref())?;
    let formulary = Formulary::builtin()?;
    let mut app = App::new(config, resolver, formulary);

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal().map_err(terminal_err)?;
    let result = event_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal).map_err(terminal_err)?;
    result.map_err(terminal_err)
}

fn main() -> ExitCode {
    // Logging would draw over the alternate screen, so only enable it on request.
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(false)
            .with_writer(io::stderr)
            .compact()
            .init();
    }

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
