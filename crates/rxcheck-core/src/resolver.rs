//! The interaction resolver.
//!
//! Maps two raw, user-typed drug names to an interaction record:
//!
//!   raw names → canonicalize each → unordered lookup → record or `None`
//!
//! There are no error conditions. Unknown names, unknown pairs, and garbage
//! input all resolve to `None`, which callers present as "no known
//! interaction". Matching is exact on the canonical string; substring
//! matching belongs to the formulary's suggestion list, not here.

use tracing::debug;

use rxcheck_contracts::interaction::InteractionRecord;

use crate::{canonical::canonical_name, traits::InteractionSource};

/// Resolves raw drug-name pairs against an [`InteractionSource`].
pub struct Resolver {
    source: Box<dyn InteractionSource>,
}

impl Resolver {
    pub fn new(source: Box<dyn InteractionSource>) -> Self {
        Self { source }
    }

    /// Look up the interaction between `drug1` and `drug2`.
    ///
    /// Both names are canonicalized independently. Argument order does not
    /// matter: `resolve(a, b) == resolve(b, a)` for every input.
    pub fn resolve(&self, drug1: &str, drug2: &str) -> Option<InteractionRecord> {
        let a = canonical_name(drug1);
        let b = canonical_name(drug2);

        let record = self.source.lookup(&a, &b).cloned();

        debug!(
            drug1 = %a,
            drug2 = %b,
            found = record.is_some(),
            severity = record.as_ref().map(|r| r.severity.as_str()).unwrap_or("-"),
            "resolved interaction pair"
        );

        record
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}
