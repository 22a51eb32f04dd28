//! The reference interaction table embedded in rxcheck.
//!
//! All data here is a simplified demonstration set, not a clinical source.

use std::path::Path;

use tracing::info;

use rxcheck_contracts::error::RxResult;
use rxcheck_core::{InteractionTable, Resolver};

/// Embedded reference interaction document.
pub const INTERACTIONS_TOML: &str = include_str!("../data/interactions.toml");

/// Example pairs offered to a user who has not searched yet.
pub const EXAMPLE_PAIRS: [(&str, &str); 4] = [
    ("Citalopram", "Tramadol"),
    ("Warfarin", "Aspirin"),
    ("Naproxen", "Lisinopril"),
    ("Alprazolam", "Oxycodone"),
];

/// Parse the embedded interaction document.
pub fn builtin_table() -> RxResult<InteractionTable> {
    InteractionTable::from_toml_str(INTERACTIONS_TOML)
}

/// A resolver over the embedded table.
pub fn builtin_resolver() -> RxResult<Resolver> {
    Ok(Resolver::new(Box::new(builtin_table()?)))
}

/// The table at `path` when given, otherwise the embedded table.
pub fn load_table(path: Option<&Path>) -> RxResult<InteractionTable> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading interaction table from file");
            InteractionTable::from_file(path)
        }
        None => builtin_table(),
    }
}

/// A resolver over [`load_table`]'s result.
pub fn load_resolver(path: Option<&Path>) -> RxResult<Resolver> {
    Ok(Resolver::new(Box::new(load_table(path)?)))
}
