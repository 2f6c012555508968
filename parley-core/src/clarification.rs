//! Clarification payloads shown to the user when a parse cannot be acted on.
//!
//! A `ClarificationRequest` is produced fresh per call and consumed
//! immediately by the calling UI turn; it has no persisted lifecycle.

use crate::enums::{AmbiguityReason, ConversationalIntent, CrmEntity};
use serde::{Deserialize, Serialize};

/// A selectable alternative offered alongside a clarification message.
/// Each option is a relabeled example command tied to a candidate
/// intent/entity pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClarificationOption {
    /// Short UI label, e.g. "Browse accounts".
    pub label: String,
    /// The full command text submitted if the option is chosen.
    pub command: String,
    pub intent: ConversationalIntent,
    pub entity: CrmEntity,
}

/// Structured clarification request. The `message` is never blank; every
/// ambiguity path must yield actionable copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClarificationRequest {
    pub reason: AmbiguityReason,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// At most 4 options; may be empty for terminal reasons.
    pub options: Vec<ClarificationOption>,
    /// Whether the UI should render canned example commands.
    pub show_examples: bool,
    /// Whether to offer switching from voice to typed input.
    pub offer_text_fallback: bool,
    /// False only for the destructive block: the UI must not re-execute
    /// the same phrasing through a retry path.
    pub can_retry: bool,
}

impl ClarificationRequest {
    pub const MAX_OPTIONS: usize = 4;
}
