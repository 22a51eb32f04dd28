//! The search-flow state machine.
//!
//! `SearchSession` is the single state container a front-end owns. It holds
//! the two input strings, the tri-state result, and at most one pending
//! search.
//!
//!   Idle ──submit──▶ Searching ──poll (delay elapsed)──▶ Resolved
//!                        ▲  │                              │
//!                        └──┘ submit (supersedes)          │
//!                        ▲                                 │
//!                        └────────────submit───────────────┘
//!
//! The session is driven by caller-supplied `Instant`s, so the simulated
//! delay needs no timer thread and tests can step time explicitly.
//!
//! Every accepted submit is tagged with a fresh [`SearchTicket`]. Submitting
//! while a search is pending supersedes it; a result delivered for any ticket
//! other than the pending one is discarded.

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, info, warn};

use rxcheck_contracts::{
    interaction::InteractionRecord,
    search::{SearchOutcome, SearchStatus, SearchTicket},
};
use rxcheck_core::Resolver;

use crate::config::{CheckerConfig, MAX_SEARCH_DELAY_MS};

/// Which of the two drug inputs an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    First,
    Second,
}

impl Field {
    pub fn other(self) -> Self {
        match self {
            Field::First => Field::Second,
            Field::Second => Field::First,
        }
    }
}

/// Coarse phase of the search flow, derived from [`SearchStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Searching,
    Resolved,
}

/// A submitted search waiting for its delay to elapse.
#[derive(Debug, Clone)]
struct PendingSearch {
    ticket: SearchTicket,
    /// Inputs captured at submit time; later edits do not affect them.
    drug1: String,
    drug2: String,
    due: Instant,
}

#[derive(Debug)]
pub struct SearchSession {
    drug1: String,
    drug2: String,
    status: SearchStatus,
    pending: Option<PendingSearch>,
    next_ticket: u64,
    delay: Duration,
    min_query_len: usize,
}

impl SearchSession {
    pub fn new(config: &CheckerConfig) -> Self {
        Self {
            drug1: String::new(),
            drug2: String::new(),
            status: SearchStatus::NotSearched,
            pending: None,
            next_ticket: 1,
            // Configs built in code skip `validate`; keep due times finite.
            delay: config
                .search_delay()
                .min(Duration::from_millis(MAX_SEARCH_DELAY_MS)),
            min_query_len: config.min_query_len,
        }
    }

    // ── Inputs ────────────────────────────────────────────────────────────────

    pub fn input(&self, field: Field) -> &str {
        match field {
            Field::First => &self.drug1,
            Field::Second => &self.drug2,
        }
    }

    /// Mutable access for character-level editing.
    pub fn input_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::First => &mut self.drug1,
            Field::Second => &mut self.drug2,
        }
    }

    pub fn set_input(&mut self, field: Field, value: impl Into<String>) {
        *self.input_mut(field) = value.into();
    }

    /// True when both trimmed inputs are at least `min_query_len` characters.
    pub fn can_search(&self) -> bool {
        qualifies(&self.drug1, self.min_query_len) && qualifies(&self.drug2, self.min_query_len)
    }

    // ── State ─────────────────────────────────────────────────────────────────

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn phase(&self) -> SearchPhase {
        match self.status {
            SearchStatus::NotSearched => SearchPhase::Idle,
            SearchStatus::Pending(_) => SearchPhase::Searching,
            SearchStatus::Done(_) => SearchPhase::Resolved,
        }
    }

    /// When the pending search becomes due, if one exists.
    pub fn due_at(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    // ── Transitions ───────────────────────────────────────────────────────────

    /// Start a search over the current inputs.
    ///
    /// Returns `None` without changing any state when [`can_search`] is
    /// false. Otherwise clears the previous result, supersedes any pending
    /// search, and returns the new ticket.
    ///
    /// [`can_search`]: SearchSession::can_search
    pub fn submit(&mut self, now: Instant) -> Option<SearchTicket> {
        if !self.can_search() {
            debug!(
                drug1 = %self.drug1,
                drug2 = %self.drug2,
                min_len = self.min_query_len,
                "search not started: input too short"
            );
            return None;
        }

        let ticket = SearchTicket(self.next_ticket);
        self.next_ticket += 1;

        if let Some(previous) = &self.pending {
            debug!(
                superseded = %previous.ticket,
                ticket = %ticket,
                "superseding pending search"
            );
        }

        self.pending = Some(PendingSearch {
            ticket,
            drug1: self.drug1.clone(),
            drug2: self.drug2.clone(),
            due: now + self.delay,
        });
        self.status = SearchStatus::Pending(ticket);

        info!(
            ticket = %ticket,
            drug1 = %self.drug1,
            drug2 = %self.drug2,
            delay_ms = self.delay.as_millis() as u64,
            "search started"
        );
        Some(ticket)
    }

    /// Resolve the pending search if its delay has elapsed by `now`.
    ///
    /// Returns the completed outcome when this call moved the session to
    /// Resolved, `None` otherwise.
    pub fn poll(&mut self, now: Instant, resolver: &Resolver) -> Option<&SearchOutcome> {
        let (ticket, record) = match &self.pending {
            Some(p) if now >= p.due => (p.ticket, resolver.resolve(&p.drug1, &p.drug2)),
            _ => return None,
        };

        if self.complete(ticket, record) {
            self.status.outcome()
        } else {
            None
        }
    }

    /// Deliver the result for `ticket`.
    ///
    /// Accepted only when `ticket` is the pending search; the session then
    /// moves to Resolved and this returns `true`. Results for superseded or
    /// unknown tickets are discarded and this returns `false`.
    pub fn complete(&mut self, ticket: SearchTicket, record: Option<InteractionRecord>) -> bool {
        let pending = match self.pending.take() {
            Some(p) if p.ticket == ticket => p,
            other => {
                warn!(
                    ticket = %ticket,
                    pending = ?other.as_ref().map(|p| p.ticket),
                    "discarding stale search result"
                );
                self.pending = other;
                return false;
            }
        };

        info!(
            ticket = %ticket,
            found = record.is_some(),
            "search resolved"
        );

        self.status = SearchStatus::Done(SearchOutcome {
            ticket,
            drug1: pending.drug1,
            drug2: pending.drug2,
            record,
            completed_at: Utc::now(),
        });
        true
    }
}

fn qualifies(input: &str, min_len: usize) -> bool {
    input.trim().chars().count() >= min_len
}

#[cfg(test)]
mod tests {
    use rxcheck_contracts::interaction::Severity;
    use rxcheck_core::{InteractionEntry, InteractionTable};

    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    const DELAY: Duration = Duration::from_millis(1500);

    fn session() -> SearchSession {
        SearchSession::new(&CheckerConfig::default())
    }

    fn resolver() -> Resolver {
        let table = InteractionTable::from_entries(vec![InteractionEntry {
            drug: "Warfarin".to_string(),
            interacts_with: "Aspirin".to_string(),
            severity: Severity::Severe,
            description: "Major increase in bleeding risk.".to_string(),
            recommendation: "Avoid unless specifically indicated.".to_string(),
        }])
        .unwrap();
        Resolver::new(Box::new(table))
    }

    fn filled(a: &str, b: &str) -> SearchSession {
        let mut s = session();
        s.set_input(Field::First, a);
        s.set_input(Field::Second, b);
        s
    }

    // ── Gating ────────────────────────────────────────────────────────────────

    #[test]
    fn new_session_is_idle() {
        let s = session();
        assert_eq!(s.phase(), SearchPhase::Idle);
        assert_eq!(s.status(), &SearchStatus::NotSearched);
        assert!(s.due_at().is_none());
        assert!(!s.can_search());
    }

    #[test]
    fn short_input_submit_is_noop() {
        let mut s = filled("W", "Aspirin");
        assert!(s.submit(Instant::now()).is_none());
        assert_eq!(s.phase(), SearchPhase::Idle);
        assert!(s.due_at().is_none());

        let mut s = filled("Warfarin", "");
        assert!(s.submit(Instant::now()).is_none());
        assert_eq!(s.phase(), SearchPhase::Idle);
    }

    #[test]
    fn whitespace_does_not_count_toward_length() {
        let s = filled("  w  ", "Aspirin");
        assert!(!s.can_search());
        let s = filled("wa", "as");
        assert!(s.can_search());
    }

    #[test]
    fn short_submit_after_result_keeps_result() {
        let r = resolver();
        let start = Instant::now();
        let mut s = filled("Warfarin", "Aspirin");
        s.submit(start).unwrap();
        s.poll(start + DELAY, &r).unwrap();

        s.set_input(Field::Second, "A");
        assert!(s.submit(start + DELAY).is_none());
        assert_eq!(s.phase(), SearchPhase::Resolved);
    }

    // ── Delay ─────────────────────────────────────────────────────────────────

    #[test]
    fn poll_before_delay_does_nothing() {
        let r = resolver();
        let start = Instant::now();
        let mut s = filled("warfarin", "aspirin");
        let ticket = s.submit(start).unwrap();

        assert!(s.poll(start + Duration::from_millis(1499), &r).is_none());
        assert_eq!(s.status(), &SearchStatus::Pending(ticket));
        assert_eq!(s.due_at(), Some(start + DELAY));
    }

    #[test]
    fn poll_after_delay_resolves() {
        let r = resolver();
        let start = Instant::now();
        let mut s = filled("warfarin", "ASPIRIN");
        let ticket = s.submit(start).unwrap();

        let outcome = s.poll(start + DELAY, &r).unwrap().clone();
        assert_eq!(outcome.ticket, ticket);
        assert_eq!(outcome.drug1, "warfarin");
        assert_eq!(outcome.drug2, "ASPIRIN");
        assert_eq!(outcome.severity(), Severity::Severe);
        assert_eq!(s.phase(), SearchPhase::Resolved);
        assert!(s.due_at().is_none());

        // Nothing left to resolve.
        assert!(s.poll(start + DELAY * 2, &r).is_none());
    }

    #[test]
    fn unknown_pair_resolves_to_done_without_record() {
        let r = resolver();
        let start = Instant::now();
        let mut s = filled("Aspirin", "Ibuprofen");
        s.submit(start).unwrap();

        let outcome = s.poll(start + DELAY, &r).unwrap();
        assert!(outcome.record.is_none());
        assert_eq!(s.phase(), SearchPhase::Resolved);
    }

    #[test]
    fn zero_delay_resolves_on_first_poll() {
        let r = resolver();
        let config = CheckerConfig {
            search_delay_ms: 0,
            ..CheckerConfig::default()
        };
        let mut s = SearchSession::new(&config);
        s.set_input(Field::First, "Warfarin");
        s.set_input(Field::Second, "Aspirin");

        let now = Instant::now();
        s.submit(now).unwrap();
        assert!(s.poll(now, &r).is_some());
    }

    #[test]
    fn edits_during_search_do_not_change_pending_names() {
        let r = resolver();
        let start = Instant::now();
        let mut s = filled("Warfarin", "Aspirin");
        s.submit(start).unwrap();

        s.set_input(Field::Second, "Ibuprofen");
        let outcome = s.poll(start + DELAY, &r).unwrap();
        assert_eq!(outcome.drug2, "Aspirin");
        assert!(outcome.record.is_some());
        assert_eq!(s.input(Field::Second), "Ibuprofen");
    }

    // ── Resolved → Searching ─────────────────────────────────────────────────

    #[test]
    fn new_search_clears_previous_result() {
        let r = resolver();
        let start = Instant::now();
        let mut s = filled("Warfarin", "Aspirin");
        s.submit(start).unwrap();
        s.poll(start + DELAY, &r).unwrap();

        let second = s.submit(start + DELAY).unwrap();
        assert_eq!(s.status(), &SearchStatus::Pending(second));
        assert!(s.status().outcome().is_none());
    }

    // ── Overlapping searches ──────────────────────────────────────────────────

    #[test]
    fn tickets_increase() {
        let mut s = filled("Warfarin", "Aspirin");
        let now = Instant::now();
        let a = s.submit(now).unwrap();
        let b = s.submit(now).unwrap();
        assert!(b > a);
    }

    #[test]
    fn resubmit_supersedes_pending_search() {
        let r = resolver();
        let start = Instant::now();
        let mut s = filled("Warfarin", "Aspirin");
        let first = s.submit(start).unwrap();

        s.set_input(Field::Second, "Ibuprofen");
        let second = s.submit(start + Duration::from_millis(1000)).unwrap();

        // The first search's due instant passes without producing a result.
        assert!(s.poll(start + DELAY, &r).is_none());
        assert_eq!(s.status(), &SearchStatus::Pending(second));

        let outcome = s.poll(start + Duration::from_millis(2500), &r).unwrap();
        assert_eq!(outcome.ticket, second);
        assert_ne!(outcome.ticket, first);
        assert!(outcome.record.is_none());
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut s = filled("Warfarin", "Aspirin");
        let now = Instant::now();
        let first = s.submit(now).unwrap();
        let second = s.submit(now).unwrap();

        assert!(!s.complete(first, None));
        assert_eq!(s.status(), &SearchStatus::Pending(second));
        assert_eq!(s.due_at(), Some(now + DELAY));

        assert!(s.complete(second, None));
        assert_eq!(s.phase(), SearchPhase::Resolved);
    }

    #[test]
    fn oversized_delay_is_clamped() {
        let config = CheckerConfig {
            search_delay_ms: u64::MAX,
            ..CheckerConfig::default()
        };
        let mut s = SearchSession::new(&config);
        s.set_input(Field::First, "Warfarin");
        s.set_input(Field::Second, "Aspirin");

        let now = Instant::now();
        assert!(s.submit(now).is_some());
        assert_eq!(
            s.due_at(),
            Some(now + Duration::from_millis(MAX_SEARCH_DELAY_MS))
        );
    }

    #[test]
    fn complete_without_pending_is_discarded() {
        let mut s = session();
        assert!(!s.complete(SearchTicket(1), None));
        assert_eq!(s.phase(), SearchPhase::Idle);
    }

    #[test]
    fn field_other_toggles() {
        assert_eq!(Field::First.other(), Field::Second);
        assert_eq!(Field::Second.other(), Field::First);
    }
}
