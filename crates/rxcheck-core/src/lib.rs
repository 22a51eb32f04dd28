//! # rxcheck-core
//!
//! Drug-pair interaction lookup for rxcheck.
//!
//! This crate provides:
//! - `canonicalize`, the name normalizer that makes matching case-insensitive
//! - `InteractionTable`, the immutable flat table keyed by unordered pairs
//! - the `InteractionSource` trait the resolver reads through
//! - `Resolver`, which turns two raw names into a record or `None`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rxcheck_core::{InteractionTable, Resolver};
//!
//! let table = InteractionTable::from_toml_str(DATA)?;
//! let resolver = Resolver::new(Box::new(table));
//! let record = resolver.resolve("warfarin", "ASPIRIN");
//! ```

pub mod canonical;
pub mod resolver;
pub mod table;
pub mod traits;

pub use canonical::{canonical_name, canonicalize};
pub use resolver::Resolver;
pub use table::{InteractionDocument, InteractionEntry, InteractionTable, PairKey};
pub use traits::InteractionSource;

// ── Tests ─────────────────────────────────────────────────────────────────────
