//! PARLEY Core - Shared Data Types
//!
//! Pure data structures with no behavior beyond invariant enforcement.
//! All other crates depend on this. The conversational vocabulary
//! (intents, entities, filters) defined here is a closed contract shared
//! by the parser, the ambiguity resolver and the suggestion engine.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod clarification;
pub mod enums;
pub mod error;
pub mod intent;
pub mod scheduling;
pub mod suggestion;

pub use clarification::{ClarificationOption, ClarificationRequest};
pub use enums::{
    AmbiguityReason, AmountField, CommandOrigin, Comparator, ConversationalIntent, CrmEntity,
    DateRangeLabel, Ownership, StatusBucket,
};
pub use error::{
    HistoryError, LexiconError, ParleyError, ParleyResult, ScheduleError,
};
pub use intent::{
    clamp_confidence, IntentFilters, NumericFilter, ParsedIntent, CONFIDENCE_MAX, CONFIDENCE_MIN,
};
pub use scheduling::{Lead, PendingAction, PendingActionType, ScheduleExtraction};
pub use suggestion::{HistoryEntry, Suggestion, SuggestionContext, SuggestionSource};

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Tenant identifier. Every lead lookup and calendar call is tenant-scoped.
pub type TenantId = Uuid;

/// Conversation identifier, the key for pending multi-turn actions.
pub type ConversationId = Uuid;

/// Lead (CRM record) identifier.
pub type LeadId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 id (timestamp-sortable).
pub fn new_id() -> Uuid {
    Uuid::now_v7()
}
