//! PARLEY Test Utilities
//!
//! Centralized test infrastructure for the PARLEY workspace:
//! - Proptest generators for the conversational vocabulary
//! - Fixtures for common parse shapes

// Re-export core types for convenience
pub use parley_core::{
    AmbiguityReason, AmountField, CommandOrigin, Comparator, ConversationalIntent, CrmEntity,
    DateRangeLabel, HistoryEntry, IntentFilters, Lead, NumericFilter, Ownership, ParsedIntent,
    StatusBucket, Suggestion, SuggestionContext, Timestamp,
};

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating PARLEY vocabulary types.

    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;
    use uuid::Uuid;

    /// Generate a random UUID.
    pub fn arb_uuid() -> impl Strategy<Value = Uuid> {
        any::<[u8; 16]>().prop_map(Uuid::from_bytes)
    }

    /// Generate a Timestamp within 2020-2030.
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        (1577836800i64..1893456000i64)
            .prop_map(|secs| chrono::DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now))
    }

    /// Generate any intent, including `Ambiguous`.
    pub fn arb_intent() -> impl Strategy<Value = ConversationalIntent> {
        prop_oneof![
            Just(ConversationalIntent::Query),
            Just(ConversationalIntent::Create),
            Just(ConversationalIntent::Update),
            Just(ConversationalIntent::Navigate),
            Just(ConversationalIntent::Analyze),
            Just(ConversationalIntent::Ambiguous),
        ]
    }

    /// Generate any entity, including `General`.
    pub fn arb_entity() -> impl Strategy<Value = CrmEntity> {
        prop_oneof![
            Just(CrmEntity::Leads),
            Just(CrmEntity::Accounts),
            Just(CrmEntity::Contacts),
            Just(CrmEntity::Opportunities),
            Just(CrmEntity::Activities),
            Just(CrmEntity::Dashboard),
            Just(CrmEntity::General),
        ]
    }

    /// Generate a command origin.
    pub fn arb_origin() -> impl Strategy<Value = CommandOrigin> {
        prop_oneof![Just(CommandOrigin::Text), Just(CommandOrigin::Voice)]
    }

    /// Generate a status bucket.
    pub fn arb_status_bucket() -> impl Strategy<Value = StatusBucket> {
        prop_oneof![
            Just(StatusBucket::Open),
            Just(StatusBucket::Won),
            Just(StatusBucket::Lost),
            Just(StatusBucket::Stalled),
            Just(StatusBucket::Pending),
            Just(StatusBucket::Overdue),
        ]
    }

    /// Generate a history entry with printable command text.
    pub fn arb_history_entry() -> impl Strategy<Value = HistoryEntry> {
        (
            arb_intent(),
            proptest::option::of(arb_entity()),
            "[a-z ]{1,40}",
            arb_timestamp(),
            arb_origin(),
        )
            .prop_map(|(intent, entity, raw_text, timestamp, origin)| HistoryEntry {
                intent,
                entity,
                raw_text,
                timestamp,
                origin,
            })
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    //! Hand-built parse shapes for unit tests.

    use super::*;

    /// A confident, unambiguous query parse.
    pub fn confident_query(entity: CrmEntity) -> ParsedIntent {
        ParsedIntent::new(
            &format!("show my {}", entity.label()),
            format!("show my {}", entity.label()),
            ConversationalIntent::Query,
            entity,
            IntentFilters::default(),
            0.75,
            false,
            false,
            false,
            vec!["show".to_string(), entity.label().to_string()],
        )
    }

    /// A committed but weak parse: intent and entity are resolved, yet the
    /// confidence score sits below the safety floor, so the resolver must
    /// still ask for confirmation.
    pub fn weak_query(entity: CrmEntity) -> ParsedIntent {
        ParsedIntent::new(
            &format!("show those {} sometime", entity.label()),
            format!("show those {} sometime", entity.label()),
            ConversationalIntent::Query,
            entity,
            IntentFilters::default(),
            0.30,
            false,
            false,
            false,
            vec!["show".to_string()],
        )
    }

    /// A parse where no intent evidence was found.
    pub fn ambiguous_parse(raw: &str) -> ParsedIntent {
        ParsedIntent::new(
            raw,
            raw.to_lowercase(),
            ConversationalIntent::Ambiguous,
            CrmEntity::General,
            IntentFilters::default(),
            0.15,
            true,
            false,
            false,
            vec![],
        )
    }

    /// A blocked destructive parse.
    pub fn destructive_parse(raw: &str) -> ParsedIntent {
        ParsedIntent::new(
            raw,
            raw.to_lowercase(),
            ConversationalIntent::Ambiguous,
            CrmEntity::Leads,
            IntentFilters::default(),
            0.35,
            true,
            false,
            true,
            vec!["delete".to_string()],
        )
    }
}
