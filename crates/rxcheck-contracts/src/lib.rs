//! # rxcheck-contracts
//!
//! Shared types and error definitions for the rxcheck interaction checker.
//!
//! All crates in the workspace import from here. No lookup logic lives in
//! this crate, only data definitions and error types.

pub mod drug;
pub mod error;
pub mod interaction;
pub mod search;

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use drug::DrugName;
    use error::RxError;
    use interaction::{InteractionRecord, Severity};
    use search::{SearchOutcome, SearchStatus, SearchTicket};

    fn record(severity: Severity) -> InteractionRecord {
        InteractionRecord {
            severity,
            description: "Additive bleeding risk.".to_string(),
            recommendation: "Monitor INR.".to_string(),
        }
    }

    fn outcome(record: Option<InteractionRecord>) -> SearchOutcome {
        SearchOutcome {
            ticket: SearchTicket(1),
            drug1: "warfarin".to_string(),
            drug2: "aspirin".to_string(),
            record,
            completed_at: Utc::now(),
        }
    }

    // ── Severity ─────────────────────────────────────────────────────────────

    #[test]
    fn severity_orders_from_none_to_severe() {
        assert!(Severity::None < Severity::Mild);
        assert!(Severity::Mild < Severity::Moderate);
        assert!(Severity::Moderate < Severity::Severe);
    }

    #[test]
    fn severity_levels_match_card_bars() {
        assert_eq!(Severity::Severe.level(), 3);
        assert_eq!(Severity::Moderate.level(), 2);
        assert_eq!(Severity::Mild.level(), 1);
        assert_eq!(Severity::None.level(), 1);
        assert!(Severity::Severe.level() <= Severity::MAX_LEVEL);
    }

    #[test]
    fn severity_labels() {
        assert_eq!(Severity::Severe.label(), "SEVERE");
        assert_eq!(Severity::None.label(), "NO KNOWN INTERACTION");
    }

    #[test]
    fn severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Moderate).unwrap();
        assert_eq!(json, "\"moderate\"");

        let parsed: Severity = serde_json::from_str("\"severe\"").unwrap();
        assert_eq!(parsed, Severity::Severe);
    }

    #[test]
    fn severity_rejects_unknown_value() {
        let parsed: Result<Severity, _> = serde_json::from_str("\"catastrophic\"");
        assert!(parsed.is_err());
    }

    // ── DrugName ─────────────────────────────────────────────────────────────

    #[test]
    fn drug_name_is_transparent_in_json() {
        let name = DrugName::new("Warfarin");
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"Warfarin\"");
        assert_eq!(name.to_string(), "Warfarin");
    }

    // ── SearchStatus / SearchOutcome ─────────────────────────────────────────

    #[test]
    fn status_defaults_to_not_searched() {
        let status = SearchStatus::default();
        assert_eq!(status, SearchStatus::NotSearched);
        assert!(!status.is_pending());
        assert!(status.outcome().is_none());
    }

    #[test]
    fn done_without_record_is_distinct_from_not_searched() {
        let status = SearchStatus::Done(outcome(None));
        assert_ne!(status, SearchStatus::NotSearched);
        assert!(status.outcome().is_some());
        assert_eq!(status.outcome().unwrap().severity(), Severity::None);
    }

    #[test]
    fn outcome_severity_follows_record() {
        let o = outcome(Some(record(Severity::Severe)));
        assert_eq!(o.severity(), Severity::Severe);
    }

    #[test]
    fn ticket_display() {
        assert_eq!(SearchTicket(7).to_string(), "#7");
    }

    // ── RxError display messages ─────────────────────────────────────────────

    #[test]
    fn error_duplicate_pair_display() {
        let err = RxError::DuplicatePair {
            first: "Warfarin".to_string(),
            second: "Aspirin".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("duplicate interaction pair"));
        assert!(msg.contains("Warfarin"));
        assert!(msg.contains("Aspirin"));
    }

    #[test]
    fn error_config_error_display() {
        let err = RxError::ConfigError {
            reason: "expected an integer".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("expected an integer"));
    }

    #[test]
    fn error_invalid_entry_display() {
        let err = RxError::InvalidEntry {
            reason: "empty drug name".to_string(),
        };
        assert!(err.to_string().contains("empty drug name"));
    }

    #[test]
    fn error_serialization_display() {
        let err = RxError::Serialization {
            reason: "key must be a string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "serialization error: key must be a string"
        );
    }
}
