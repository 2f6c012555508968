//! Parsed-intent value type and its invariants
//!
//! A `ParsedIntent` is immutable once produced. Three invariants hold for
//! every instance constructed through [`ParsedIntent::new`]:
//!
//! 1. `confidence` is clamped to `[0.10, 0.95]` and rounded to 2 decimals.
//! 2. `intent == Ambiguous` implies `is_ambiguous`.
//! 3. `is_potentially_destructive` forces `intent` to `Ambiguous`; a
//!    destructive command is never auto-classified as actionable.

use crate::enums::{
    AmountField, Comparator, ConversationalIntent, CrmEntity, DateRangeLabel, Ownership,
    StatusBucket,
};
use serde::{Deserialize, Serialize};

/// Lower confidence bound. Even garbage input scores at least this much.
pub const CONFIDENCE_MIN: f32 = 0.10;

/// Upper confidence bound. Keyword evidence is never certainty.
pub const CONFIDENCE_MAX: f32 = 0.95;

/// Clamp a raw confidence score into `[CONFIDENCE_MIN, CONFIDENCE_MAX]`
/// and round to 2 decimal places.
pub fn clamp_confidence(raw: f32) -> f32 {
    let clamped = raw.clamp(CONFIDENCE_MIN, CONFIDENCE_MAX);
    (clamped * 100.0).round() / 100.0
}

/// A single numeric comparison extracted from an utterance, e.g.
/// "over $50,000" or "revenue under 2 million".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericFilter {
    pub field: AmountField,
    pub comparator: Comparator,
    pub value: f64,
}

/// Filters extracted from an utterance. All families are independent and
/// additive; an empty struct means no filter evidence was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct IntentFilters {
    /// US state names, title-cased (e.g. "Florida").
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub states: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statuses: Vec<StatusBucket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Ownership>,
    /// Explicit assignee name captured from "assigned to <name>".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRangeLabel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub numeric: Vec<NumericFilter>,
}

impl IntentFilters {
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
            && self.statuses.is_empty()
            && self.owner.is_none()
            && self.assignee.is_none()
            && self.date_range.is_none()
            && self.numeric.is_empty()
    }

    /// Number of distinct filter families present. Feeds confidence scoring.
    pub fn family_count(&self) -> usize {
        usize::from(!self.states.is_empty())
            + usize::from(!self.statuses.is_empty())
            + usize::from(self.owner.is_some())
            + usize::from(self.date_range.is_some())
            + usize::from(!self.numeric.is_empty())
    }
}

/// Structured interpretation of a single free-text utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIntent {
    /// Verbatim input.
    pub raw_text: String,
    /// Lowercased, punctuation-stripped, whitespace-collapsed derivative
    /// of `raw_text` used for all keyword matching.
    pub normalized: String,
    pub intent: ConversationalIntent,
    pub entity: CrmEntity,
    pub filters: IntentFilters,
    pub confidence: f32,
    pub is_ambiguous: bool,
    pub is_multi_step: bool,
    pub is_potentially_destructive: bool,
    /// Deduplicated keyword hits, kept for explainability and testing.
    pub detected_phrases: Vec<String>,
}

impl ParsedIntent {
    /// Construct a parse result, enforcing the type invariants.
    ///
    /// Destructive detection overrides the scored intent, and an
    /// `Ambiguous` intent always marks the parse as ambiguous regardless
    /// of what the caller passed for `is_ambiguous`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        raw_text: impl Into<String>,
        normalized: impl Into<String>,
        intent: ConversationalIntent,
        entity: CrmEntity,
        filters: IntentFilters,
        confidence: f32,
        is_ambiguous: bool,
        is_multi_step: bool,
        is_potentially_destructive: bool,
        detected_phrases: Vec<String>,
    ) -> Self {
        let intent = if is_potentially_destructive {
            ConversationalIntent::Ambiguous
        } else {
            intent
        };
        let is_ambiguous = is_ambiguous || intent == ConversationalIntent::Ambiguous;
        Self {
            raw_text: raw_text.into(),
            normalized: normalized.into(),
            intent,
            entity,
            filters,
            confidence: clamp_confidence(confidence),
            is_ambiguous,
            is_multi_step,
            is_potentially_destructive,
            detected_phrases,
        }
    }

    /// True when the parse is strong enough to act on without clarification.
    pub fn is_actionable(&self) -> bool {
        !self.is_ambiguous && self.intent.is_actionable()
    }
}
