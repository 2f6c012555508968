//! Suggestion and command-history data types.

use crate::enums::{CommandOrigin, ConversationalIntent, CrmEntity};
use crate::{TenantId, Timestamp};
use serde::{Deserialize, Serialize};

/// Where a suggestion came from. Used by the UI for badging and by the
/// engine for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    /// Derived from the user's own accepted command history.
    History,
    /// Pulled from the playbook for the entity currently on screen.
    Context,
    /// Generic fallback, independent of history and context.
    Playbook,
}

/// A single ranked next-action suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Command text submitted verbatim if the user picks this suggestion.
    pub command: String,
    pub source: SuggestionSource,
    pub intent: ConversationalIntent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<CrmEntity>,
    /// Ordering weight only; not a calibrated probability.
    pub confidence: f32,
}

/// UI context supplied on every suggestion request.
///
/// `tenant_id` and `route_name` are accepted for future extension but
/// unused in ranking today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SuggestionContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<CrmEntity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<CommandOrigin>,
}

/// One accepted command, as remembered by the suggestion engine.
///
/// Entries are deduplicated by exact `raw_text` (newest wins position)
/// and the log is truncated to the most recent
/// [`HistoryEntry::MAX_ENTRIES`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub intent: ConversationalIntent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<CrmEntity>,
    pub raw_text: String,
    pub timestamp: Timestamp,
    pub origin: CommandOrigin,
}

impl HistoryEntry {
    /// Cap on the persisted history log.
    pub const MAX_ENTRIES: usize = 20;
}
