//! Medication formulary and input suggestions.
//!
//! The formulary is the list of medication names offered while the user is
//! typing. It is independent of the interaction table: most formulary drugs
//! have no recorded interactions, and some table entries (e.g. "Alcohol")
//! are not medications at all.

use serde::{Deserialize, Serialize};
use tracing::debug;

use rxcheck_contracts::{
    drug::DrugName,
    error::{RxError, RxResult},
};

/// Embedded formulary document.
const FORMULARY_TOML: &str = include_str!("../data/formulary.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FormularyDocument {
    drugs: Vec<String>,
}

/// An ordered list of known medication names.
#[derive(Debug, Clone, Default)]
pub struct Formulary {
    names: Vec<DrugName>,
}

impl Formulary {
    /// The formulary shipped with rxcheck.
    pub fn builtin() -> RxResult<Self> {
        Self::from_toml_str(FORMULARY_TOML)
    }

    /// Parse a `drugs = [...]` TOML document. Order is preserved.
    pub fn from_toml_str(s: &str) -> RxResult<Self> {
        let doc: FormularyDocument = toml::from_str(s).map_err(|e| RxError::ConfigError {
            reason: format!("failed to parse formulary TOML: {}", e),
        })?;
        Ok(Self {
            names: doc.drugs.into_iter().map(DrugName).collect(),
        })
    }

    pub fn names(&self) -> &[DrugName] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names containing `query` case-insensitively, in formulary order.
    ///
    /// Returns nothing until the trimmed query reaches `min_len` characters,
    /// and at most `limit` names after that.
    pub fn suggest(&self, query: &str, min_len: usize, limit: usize) -> Vec<&DrugName> {
        let query = query.trim();
        if query.chars().count() < min_len {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        let matches: Vec<&DrugName> = self
            .names
            .iter()
            .filter(|name| name.as_str().to_lowercase().contains(&needle))
            .take(limit)
            .collect();

        debug!(query = %query, matches = matches.len(), "formulary suggestions");
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: Vec<&DrugName>) -> Vec<&str> {
        v.into_iter().map(|n| n.as_str()).collect()
    }

    #[test]
    fn builtin_formulary_loads_in_order() {
        let formulary = Formulary::builtin().unwrap();
        assert_eq!(formulary.len(), 84);
        assert_eq!(formulary.names()[0].as_str(), "Acetaminophen");
        assert_eq!(formulary.names()[formulary.len() - 1].as_str(), "Zolpidem");
    }

    #[test]
    fn short_query_suggests_nothing() {
        let formulary = Formulary::builtin().unwrap();
        assert!(formulary.suggest("a", 2, 5).is_empty());
        assert!(formulary.suggest(" a ", 2, 5).is_empty());
        assert!(formulary.suggest("", 2, 5).is_empty());
    }

    #[test]
    fn matches_substring_case_insensitively() {
        let formulary = Formulary::builtin().unwrap();
        assert_eq!(
            names(formulary.suggest("PRAZOLE", 2, 5)),
            vec!["Esomeprazole", "Lansoprazole", "Omeprazole", "Pantoprazole"]
        );
    }

    #[test]
    fn respects_limit() {
        let formulary = Formulary::builtin().unwrap();
        let all = formulary.suggest("am", 2, usize::MAX);
        assert!(all.len() > 5);
        assert_eq!(formulary.suggest("am", 2, 5).len(), 5);
        assert_eq!(formulary.suggest("am", 2, 5), all[..5].to_vec());
    }

    #[test]
    fn no_match_is_empty() {
        let formulary = Formulary::builtin().unwrap();
        assert!(formulary.suggest("zzz", 2, 5).is_empty());
    }

    #[test]
    fn malformed_document_is_config_error() {
        let result = Formulary::from_toml_str("drugs = 12");
        assert!(matches!(result, Err(RxError::ConfigError { .. })));
    }
}
