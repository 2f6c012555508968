//! Error types for PARLEY operations
//!
//! Parse uncertainty is deliberately NOT an error: the parser is total
//! and expresses uncertainty through `Ambiguous`/`General` plus a low
//! confidence score. The variants here cover genuine failures at the
//! edges: storage, collaborators, configuration.

use thiserror::Error;

/// Suggestion-history storage errors.
///
/// Callers in the suggestion engine treat these as degradable: a failed
/// read becomes an empty history, a failed write is logged and dropped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("History slot read failed: {reason}")]
    ReadFailed { reason: String },

    #[error("History slot write failed: {reason}")]
    WriteFailed { reason: String },

    #[error("History slot is corrupt: {reason}")]
    Corrupt { reason: String },
}

/// Scheduling collaborator errors (lead lookup, calendar, extraction).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Lead lookup failed: {reason}")]
    LeadLookupFailed { reason: String },

    #[error("Calendar operation '{operation}' failed: {reason}")]
    CalendarFailed { operation: String, reason: String },

    #[error("Date/lead extraction failed: {reason}")]
    ExtractionFailed { reason: String },

    #[error("Collaborator call '{operation}' timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },
}

/// Lexicon (keyword table) configuration errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LexiconError {
    #[error("Lexicon table '{table}' must not be empty")]
    EmptyTable { table: String },

    #[error("Invalid priority bonus {value} for intent '{intent}': must be in [0.0, 1.0]")]
    InvalidBonus { intent: String, value: f32 },
}

/// Master error type for all PARLEY errors.
#[derive(Debug, Clone, Error)]
pub enum ParleyError {
    #[error("History error: {0}")]
    History(#[from] HistoryError),

    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Lexicon error: {0}")]
    Lexicon(#[from] LexiconError),
}

/// Result type alias for PARLEY operations.
pub type ParleyResult<T> = Result<T, ParleyError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_error_display() {
        let err = HistoryError::Corrupt {
            reason: "not a JSON array".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("corrupt"));
        assert!(msg.contains("not a JSON array"));
    }

    #[test]
    fn test_schedule_error_display_timeout() {
        let err = ScheduleError::Timeout {
            operation: "create_event".to_string(),
            timeout_ms: 5000,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("create_event"));
        assert!(msg.contains("5000"));
    }

    #[test]
    fn test_parley_error_from_variants() {
        let history = ParleyError::from(HistoryError::ReadFailed {
            reason: "io".to_string(),
        });
        assert!(matches!(history, ParleyError::History(_)));

        let schedule = ParleyError::from(ScheduleError::LeadLookupFailed {
            reason: "db down".to_string(),
        });
        assert!(matches!(schedule, ParleyError::Schedule(_)));

        let lexicon = ParleyError::from(LexiconError::EmptyTable {
            table: "intents".to_string(),
        });
        assert!(matches!(lexicon, ParleyError::Lexicon(_)));
    }
}
