//! Error types for the rxcheck workspace.
//!
//! Lookups never fail: an unknown drug or pair resolves to "no known
//! interaction". Errors only arise at the edges, when loading configuration
//! or reference data and when driving the terminal.

use thiserror::Error;

/// The unified error type for rxcheck.
#[derive(Debug, Error)]
pub enum RxError {
    /// A configuration or data document is missing, unreadable, or malformed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The same unordered drug pair was declared more than once.
    ///
    /// Covers both an exact repeat and the reversed ordering (B, A) of an
    /// already-declared (A, B).
    #[error("duplicate interaction pair '{first}' + '{second}'")]
    DuplicatePair { first: String, second: String },

    /// A table entry is structurally invalid (empty name, self-interaction).
    #[error("invalid interaction entry: {reason}")]
    InvalidEntry { reason: String },

    /// A result could not be rendered as JSON.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    /// Terminal setup, drawing, or teardown failed.
    #[error("terminal error: {reason}")]
    Terminal { reason: String },
}

/// Convenience alias used throughout the rxcheck crates.
pub type RxResult<T> = Result<T, RxError>;
