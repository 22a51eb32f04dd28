//! # rxcheck-ref
//!
//! Reference data for the rxcheck interaction checker.
//!
//! - [`dataset`]: the embedded drug-pair interaction table and the example
//!   pairs shown before a first search
//! - [`formulary`]: the list of common medication names used for input
//!   suggestions
//!
//! All data is hardcoded, simplified, and for demonstration only. No
//! external sources are contacted.

pub mod dataset;
pub mod formulary;

pub use dataset::{builtin_resolver, builtin_table, load_resolver, load_table, EXAMPLE_PAIRS};
pub use formulary::Formulary;

// ── Tests ─────────────────────────────────────────────────────────────────────
