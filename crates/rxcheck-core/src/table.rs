//! The immutable drug-pair interaction table.
//!
//! `InteractionTable` is built once from a list of [`InteractionEntry`]s,
//! usually deserialized from TOML, and never mutated afterwards.
//!
//! Load algorithm:
//!
//! 1. Trim and canonicalize both drug names of each entry.
//! 2. Reject empty names and entries naming the same drug twice.
//! 3. Key the entry by the sorted pair of canonical names (`PairKey`).
//! 4. Reject the entry if the key is already taken, whether the earlier
//!    entry was declared as (A, B) or (B, A).
//!
//! Because the key is sorted, a stored pair can only ever exist once and a
//! lookup in either order hits the same slot.

use std::{
    collections::{btree_map::Entry, BTreeMap, BTreeSet},
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use rxcheck_contracts::{
    drug::DrugName,
    error::{RxError, RxResult},
    interaction::{InteractionRecord, Severity},
};

use crate::{canonical::canonicalize, traits::InteractionSource};

/// One interaction as declared in a data document.
///
/// Example in TOML:
/// ```toml
/// [[interactions]]
/// drug = "Warfarin"
/// interacts_with = "Aspirin"
/// severity = "severe"
/// description = "Major increase in bleeding risk."
/// recommendation = "Avoid unless specifically indicated."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionEntry {
    /// The drug the entry is listed under.
    pub drug: String,
    /// The other drug of the pair.
    pub interacts_with: String,
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
}

/// Top-level structure deserialized from an interaction data document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionDocument {
    #[serde(default)]
    pub interactions: Vec<InteractionEntry>,
}

/// Unordered pair of canonical drug names, stored sorted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    low: DrugName,
    high: DrugName,
}

impl PairKey {
    pub fn new(a: DrugName, b: DrugName) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Both names in sorted order.
    pub fn names(&self) -> (&DrugName, &DrugName) {
        (&self.low, &self.high)
    }
}

/// A record together with the ordering it was declared under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredInteraction {
    pub drug: DrugName,
    pub interacts_with: DrugName,
    pub record: InteractionRecord,
}

/// The immutable interaction table.
#[derive(Debug, Clone, Default)]
pub struct InteractionTable {
    entries: BTreeMap<PairKey, StoredInteraction>,
}

impl InteractionTable {
    /// Build a table from declared entries, validating each one.
    ///
    /// Returns `RxError::InvalidEntry` for an empty or self-referencing entry
    /// and `RxError::DuplicatePair` when a pair is declared twice in any
    /// order.
    pub fn from_entries(entries: impl IntoIterator<Item = InteractionEntry>) -> RxResult<Self> {
        let mut table = BTreeMap::new();

        for entry in entries {
            let drug = DrugName(canonicalize(entry.drug.trim()));
            let interacts_with = DrugName(canonicalize(entry.interacts_with.trim()));

            if drug.as_str().is_empty() || interacts_with.as_str().is_empty() {
                return Err(RxError::InvalidEntry {
                    reason: format!(
                        "empty drug name in pair '{}' + '{}'",
                        entry.drug, entry.interacts_with
                    ),
                });
            }
            if drug == interacts_with {
                return Err(RxError::InvalidEntry {
                    reason: format!("'{}' is listed as interacting with itself", drug),
                });
            }
            if drug.as_str() != entry.drug || interacts_with.as_str() != entry.interacts_with {
                debug!(
                    declared_drug = %entry.drug,
                    declared_other = %entry.interacts_with,
                    drug = %drug,
                    interacts_with = %interacts_with,
                    "canonicalized declared pair"
                );
            }

            let key = PairKey::new(drug.clone(), interacts_with.clone());
            match table.entry(key) {
                Entry::Occupied(_) => {
                    return Err(RxError::DuplicatePair {
                        first: drug.0,
                        second: interacts_with.0,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(StoredInteraction {
                        drug,
                        interacts_with,
                        record: InteractionRecord {
                            severity: entry.severity,
                            description: entry.description,
                            recommendation: entry.recommendation,
                        },
                    });
                }
            }
        }

        info!(pairs = table.len(), "interaction table loaded");
        Ok(Self { entries: table })
    }

    /// Parse `s` as a TOML [`InteractionDocument`] and build the table.
    ///
    /// Returns `RxError::ConfigError` if the TOML is malformed, otherwise
    /// whatever [`InteractionTable::from_entries`] returns.
    pub fn from_toml_str(s: &str) -> RxResult<Self> {
        let doc: InteractionDocument = toml::from_str(s).map_err(|e| RxError::ConfigError {
            reason: format!("failed to parse interaction TOML: {}", e),
        })?;
        Self::from_entries(doc.interactions)
    }

    /// Read the file at `path` and parse it as an interaction document.
    pub fn from_file(path: &Path) -> RxResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| RxError::ConfigError {
            reason: format!("failed to read interaction file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the stored entry for the unordered pair `{a, b}`.
    pub fn get(&self, a: &DrugName, b: &DrugName) -> Option<&StoredInteraction> {
        self.entries.get(&PairKey::new(a.clone(), b.clone()))
    }

    /// All stored interactions, ordered by sorted pair key.
    pub fn iter(&self) -> impl Iterator<Item = &StoredInteraction> {
        self.entries.values()
    }

    /// Every distinct drug name that appears in at least one pair.
    pub fn drugs(&self) -> BTreeSet<&DrugName> {
        self.entries
            .keys()
            .flat_map(|k| {
                let (low, high) = k.names();
                [low, high]
            })
            .collect()
    }
}

impl InteractionSource for InteractionTable {
    fn lookup(&self, a: &DrugName, b: &DrugName) -> Option<&InteractionRecord> {
        self.get(a, b).map(|stored| &stored.record)
    }
}
