//! The lookup seam between the resolver and the data it reads.

use rxcheck_contracts::{drug::DrugName, interaction::InteractionRecord};

/// A read-only source of drug-pair interactions.
///
/// Implementations are immutable after construction and must be
/// order-independent: `lookup(a, b)` and `lookup(b, a)` return the same
/// record. Callers pass names that have already been canonicalized.
pub trait InteractionSource: Send + Sync {
    /// Return the record stored for the unordered pair `{a, b}`, if any.
    fn lookup(&self, a: &DrugName, b: &DrugName) -> Option<&InteractionRecord>;
}
