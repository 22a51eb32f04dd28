//! Drug name identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A medication name as used for display and as a table key.
///
/// The wrapper does not enforce any casing by itself. Names stored in an
/// interaction table are always canonical (see `rxcheck_core::canonicalize`);
/// names typed by a user are raw until they pass through the canonicalizer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrugName(pub String);

impl DrugName {
    /// Construct a name from any string-like value, unchanged.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DrugName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DrugName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
