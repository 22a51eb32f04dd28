//! Search-flow types shared by the session state machine and front-ends.
//!
//! A search is identified by a [`SearchTicket`]. The session hands out
//! tickets in strictly increasing order, so a ticket that is not the
//! currently pending one belongs to a superseded search.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::interaction::{InteractionRecord, Severity};

/// Sequence id tagging one submitted search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SearchTicket(pub u64);

impl fmt::Display for SearchTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The result of one completed search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub ticket: SearchTicket,
    /// First drug exactly as the user entered it.
    pub drug1: String,
    /// Second drug exactly as the user entered it.
    pub drug2: String,
    /// `None` means the pair was searched and no interaction is known.
    pub record: Option<InteractionRecord>,
    pub completed_at: DateTime<Utc>,
}

impl SearchOutcome {
    /// Severity to display: the record's, or `Severity::None` when absent.
    pub fn severity(&self) -> Severity {
        self.record
            .as_ref()
            .map(|r| r.severity)
            .unwrap_or(Severity::None)
    }
}

/// Tri-state search result.
///
/// Keeps "not yet searched" distinct from "searched, nothing found"
/// (`Done` with `record: None`).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchStatus {
    #[default]
    NotSearched,
    Pending(SearchTicket),
    Done(SearchOutcome),
}

impl SearchStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, SearchStatus::Pending(_))
    }

    /// The completed outcome, if any.
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        match self {
            SearchStatus::Done(outcome) => Some(outcome),
            _ => None,
        }
    }
}
