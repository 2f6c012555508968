//! Rule-based intent parser.
//!
//! `parse` is a total function: any input, including empty or garbage
//! text, yields a well-formed `ParsedIntent`. Overlapping keyword
//! membership across intents/entities is resolved purely by hit count
//! plus the fixed priority bonus.

use crate::lexicon::Lexicon;
use crate::normalize::{has_phrase, normalize};
use once_cell::sync::Lazy;
use parley_core::{
    AmountField, Comparator, ConversationalIntent, CrmEntity, IntentFilters, NumericFilter,
    Ownership, ParsedIntent,
};
use regex::Regex;

static OWNERSHIP_MINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bmy\b|\bfor me\b|\bassigned to me\b").unwrap());

static ASSIGNEE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"assigned to ([a-z ]+)").unwrap());

static NUMERIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(over|above|more than|greater than|at least|under|below|less than|fewer than|at most)\s+\$?(\d[\d,]*(?:\.\d+)?)\s*(k\b|thousand\b|m\b|million\b|b\b|billion\b)?",
    )
    .unwrap()
});

/// How far around a numeric match to look for a field hint.
const FIELD_HINT_WINDOW: usize = 30;

const REVENUE_HINTS: [&str; 3] = ["revenue", "arr", "annual recurring"];

/// Confidence scoring weights. Additive; the final value is clamped by
/// `ParsedIntent::new`.
const BASE_CONFIDENCE: f32 = 0.30;
const INTENT_BONUS: f32 = 0.25;
const ENTITY_BONUS: f32 = 0.20;
const FILTER_BONUS: f32 = 0.05;
const MULTI_STEP_BONUS: f32 = 0.05;
const AMBIGUITY_PENALTY: f32 = 0.15;
const DESTRUCTIVE_PENALTY: f32 = 0.05;

/// Threshold below which `enforce_safety` downgrades a parse.
pub const SAFETY_CONFIDENCE_FLOOR: f32 = 0.40;

/// Rule-based utterance parser over a [`Lexicon`].
#[derive(Debug, Clone, Default)]
pub struct IntentParser {
    lexicon: Lexicon,
}

impl IntentParser {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Parse a raw utterance into a structured intent. Never panics.
    pub fn parse(&self, raw_input: &str) -> ParsedIntent {
        let normalized = normalize(raw_input);
        let empty = normalized.is_empty();
        let mut phrases: Vec<String> = Vec::new();

        let destructive = self.detect_destructive(&normalized, &mut phrases);
        let scored_intent = self.score_intent(&normalized, &mut phrases);
        let entity = self.score_entity(&normalized, &mut phrases);
        let filters = self.extract_filters(&normalized, &mut phrases);
        let multi_step = self
            .lexicon
            .multi_step
            .iter()
            .any(|marker| has_phrase(&normalized, marker));
        let hedged = self
            .lexicon
            .hedging
            .iter()
            .any(|word| has_phrase(&normalized, word));

        // Destructive detection overrides all intent scoring.
        let intent = if destructive || empty {
            ConversationalIntent::Ambiguous
        } else {
            scored_intent
        };

        let is_ambiguous = empty
            || intent == ConversationalIntent::Ambiguous
            || entity == CrmEntity::General
            || destructive
            || hedged;

        let mut confidence = BASE_CONFIDENCE;
        if intent.is_actionable() {
            confidence += INTENT_BONUS;
        }
        if entity.is_concrete() {
            confidence += ENTITY_BONUS;
        }
        confidence += FILTER_BONUS * filters.family_count() as f32;
        if multi_step {
            confidence += MULTI_STEP_BONUS;
        }
        if is_ambiguous {
            confidence -= AMBIGUITY_PENALTY;
        }
        if destructive {
            confidence -= DESTRUCTIVE_PENALTY;
        }

        ParsedIntent::new(
            raw_input,
            normalized,
            intent,
            entity,
            filters,
            confidence,
            is_ambiguous,
            multi_step,
            destructive,
            phrases,
        )
    }

    fn detect_destructive(&self, text: &str, phrases: &mut Vec<String>) -> bool {
        let mut hit = false;
        for keyword in &self.lexicon.destructive {
            if has_phrase(text, keyword) {
                push_unique(phrases, keyword);
                hit = true;
            }
        }
        hit
    }

    fn score_intent(&self, text: &str, phrases: &mut Vec<String>) -> ConversationalIntent {
        let mut best = ConversationalIntent::Ambiguous;
        let mut best_score = 0.0f32;
        for rule in &self.lexicon.intents {
            let hits: Vec<&String> = rule
                .keywords
                .iter()
                .filter(|k| has_phrase(text, k))
                .collect();
            if hits.is_empty() {
                continue;
            }
            let score = hits.len() as f32 + rule.priority_bonus;
            for hit in &hits {
                push_unique(phrases, hit);
            }
            if score > best_score {
                best_score = score;
                best = rule.intent;
            }
        }
        best
    }

    fn score_entity(&self, text: &str, phrases: &mut Vec<String>) -> CrmEntity {
        let mut best = CrmEntity::General;
        let mut best_hits = 0usize;
        for rule in &self.lexicon.entities {
            let hits: Vec<&String> = rule
                .keywords
                .iter()
                .filter(|k| has_phrase(text, k))
                .collect();
            if hits.is_empty() {
                continue;
            }
            for hit in &hits {
                push_unique(phrases, hit);
            }
            if hits.len() > best_hits {
                best_hits = hits.len();
                best = rule.entity;
            }
        }
        best
    }

    fn extract_filters(&self, text: &str, phrases: &mut Vec<String>) -> IntentFilters {
        let mut filters = IntentFilters::default();

        for state in &self.lexicon.states {
            let lowered = state.to_lowercase();
            if has_phrase(text, &lowered) {
                push_unique(phrases, &lowered);
                filters.states.push(state.clone());
            }
        }

        for rule in &self.lexicon.statuses {
            for synonym in &rule.synonyms {
                if has_phrase(text, synonym) {
                    push_unique(phrases, synonym);
                    if !filters.statuses.contains(&rule.bucket) {
                        filters.statuses.push(rule.bucket);
                    }
                    break;
                }
            }
        }

        // First-person possessive wins over team wording; checked in order.
        if let Some(m) = OWNERSHIP_MINE_RE.find(text) {
            filters.owner = Some(Ownership::Mine);
            push_unique(phrases, m.as_str());
        } else if let Some(word) = self
            .lexicon
            .team_words
            .iter()
            .find(|w| has_phrase(text, w))
        {
            filters.owner = Some(Ownership::Team);
            push_unique(phrases, word);
        }

        if let Some(caps) = ASSIGNEE_RE.captures(text) {
            let name = caps[1].trim().to_string();
            // "assigned to me" is ownership, not an explicit assignee.
            if !name.is_empty() && name != "me" {
                filters.assignee = Some(name);
            }
        }

        // First matching synonym wins, scanned in declaration order.
        'date: for rule in &self.lexicon.date_ranges {
            for synonym in &rule.synonyms {
                if has_phrase(text, synonym) {
                    push_unique(phrases, synonym);
                    filters.date_range = Some(rule.label);
                    break 'date;
                }
            }
        }

        for caps in NUMERIC_RE.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let comparator = match &caps[1] {
                "over" | "above" | "more than" | "greater than" | "at least" => {
                    Comparator::GreaterThan
                }
                _ => Comparator::LessThan,
            };
            let digits: String = caps[2].chars().filter(|c| *c != ',').collect();
            let Ok(mut value) = digits.parse::<f64>() else {
                continue;
            };
            if let Some(unit) = caps.get(3) {
                value *= match unit.as_str() {
                    "k" | "thousand" => 1_000.0,
                    "m" | "million" => 1_000_000.0,
                    _ => 1_000_000_000.0,
                };
            }
            let field = field_hint(text, whole.start(), whole.end());
            push_unique(phrases, whole.as_str());
            filters.numeric.push(NumericFilter {
                field,
                comparator,
                value,
            });
        }

        filters
    }
}

/// Inspect a window of text around a numeric match for a field hint.
/// Defaults to `Amount` when no hint is present.
fn field_hint(text: &str, start: usize, end: usize) -> AmountField {
    let from = floor_char_boundary(text, start.saturating_sub(FIELD_HINT_WINDOW));
    let to = ceil_char_boundary(text, (end + FIELD_HINT_WINDOW).min(text.len()));
    let window = &text[from..to];
    if REVENUE_HINTS.iter().any(|h| window.contains(h)) {
        AmountField::Revenue
    } else {
        // "amount"/"deal" hints and the no-hint case resolve the same way.
        AmountField::Amount
    }
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

fn push_unique(phrases: &mut Vec<String>, phrase: &str) {
    if !phrases.iter().any(|p| p == phrase) {
        phrases.push(phrase.to_string());
    }
}

/// Defensive post-filter for callers that must never act on a weak
/// parse but still want a safe non-null intent to log or display.
/// Returns a downgraded clone; the input is never mutated.
pub fn enforce_safety(parsed: &ParsedIntent) -> ParsedIntent {
    let mut safe = parsed.clone();
    if safe.confidence < SAFETY_CONFIDENCE_FLOOR || safe.is_ambiguous {
        safe.intent = ConversationalIntent::Analyze;
        safe.entity = CrmEntity::General;
    }
    safe
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::{DateRangeLabel, StatusBucket};

    fn parser() -> IntentParser {
        IntentParser::default()
    }

    #[test]
    fn test_geographic_query_scenario() {
        let parsed = parser().parse("Show my leads in Florida created this month");
        assert_eq!(parsed.intent, ConversationalIntent::Query);
        assert_eq!(parsed.entity, CrmEntity::Leads);
        assert_eq!(parsed.filters.states, vec!["Florida".to_string()]);
        assert_eq!(parsed.filters.date_range, Some(DateRangeLabel::ThisMonth));
        assert_eq!(parsed.filters.owner, Some(Ownership::Mine));
        assert!(parsed.confidence > 0.5, "got {}", parsed.confidence);
        assert!(!parsed.is_ambiguous);
    }

    #[test]
    fn test_destructive_block_scenario() {
        let parsed = parser().parse("Delete all my leads");
        assert_eq!(parsed.intent, ConversationalIntent::Ambiguous);
        assert!(parsed.is_potentially_destructive);
        assert!(parsed.is_ambiguous);
        assert!(parsed.confidence < 0.5, "got {}", parsed.confidence);
    }

    #[test]
    fn test_navigation_scenario() {
        let parsed = parser().parse("Go to dashboard");
        assert_eq!(parsed.intent, ConversationalIntent::Navigate);
        assert_eq!(parsed.entity, CrmEntity::Dashboard);
    }

    #[test]
    fn test_empty_input_is_ambiguous() {
        let parsed = parser().parse("   ");
        assert_eq!(parsed.intent, ConversationalIntent::Ambiguous);
        assert_eq!(parsed.entity, CrmEntity::General);
        assert!(parsed.is_ambiguous);
        assert!(parsed.confidence < 0.4);
    }

    #[test]
    fn test_status_bucket_synonyms() {
        let parsed = parser().parse("List stuck deals");
        assert_eq!(parsed.entity, CrmEntity::Opportunities);
        assert_eq!(parsed.filters.statuses, vec![StatusBucket::Stalled]);
    }

    #[test]
    fn test_numeric_filter_with_unit_and_hint() {
        let parsed = parser().parse("Find accounts with revenue over $2 million");
        assert_eq!(parsed.filters.numeric.len(), 1);
        let filter = &parsed.filters.numeric[0];
        assert_eq!(filter.comparator, Comparator::GreaterThan);
        assert_eq!(filter.field, AmountField::Revenue);
        assert!((filter.value - 2_000_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_numeric_filter_comma_grouping_defaults_to_amount() {
        let parsed = parser().parse("Show deals under $50,000");
        assert_eq!(parsed.filters.numeric.len(), 1);
        let filter = &parsed.filters.numeric[0];
        assert_eq!(filter.comparator, Comparator::LessThan);
        assert_eq!(filter.field, AmountField::Amount);
        assert!((filter.value - 50_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_multiple_numeric_filters_coexist() {
        let parsed = parser().parse("accounts with revenue over 1m and deals under 50k");
        assert_eq!(parsed.filters.numeric.len(), 2);
    }

    #[test]
    fn test_assignee_capture_excludes_me() {
        let parsed = parser().parse("show leads assigned to dana reyes");
        assert_eq!(parsed.filters.assignee.as_deref(), Some("dana reyes"));

        let mine = parser().parse("show leads assigned to me");
        assert_eq!(mine.filters.assignee, None);
        assert_eq!(mine.filters.owner, Some(Ownership::Mine));
    }

    #[test]
    fn test_team_ownership() {
        let parsed = parser().parse("show the team pipeline");
        assert_eq!(parsed.filters.owner, Some(Ownership::Team));
    }

    #[test]
    fn test_multi_step_detection() {
        let parsed = parser().parse("show my leads then create a task");
        assert!(parsed.is_multi_step);
    }

    #[test]
    fn test_hedging_marks_ambiguous() {
        let parsed = parser().parse("maybe show my leads");
        assert!(parsed.is_ambiguous);
    }

    #[test]
    fn test_detected_phrases_deduplicated() {
        let parsed = parser().parse("show show show my leads");
        let hits: Vec<_> = parsed
            .detected_phrases
            .iter()
            .filter(|p| p.as_str() == "show")
            .collect();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_enforce_safety_downgrades_weak_parse() {
        let weak = parser().parse("hmm");
        let safe = enforce_safety(&weak);
        assert_eq!(safe.intent, ConversationalIntent::Analyze);
        assert_eq!(safe.entity, CrmEntity::General);
        // Input is untouched.
        assert_eq!(weak.entity, CrmEntity::General);
    }

    #[test]
    fn test_enforce_safety_passes_strong_parse() {
        let strong = parser().parse("Show my leads in Texas");
        let safe = enforce_safety(&strong);
        assert_eq!(safe.intent, strong.intent);
        assert_eq!(safe.entity, strong.entity);
    }

    #[test]
    fn test_destructive_overrides_other_keywords() {
        let parsed = parser().parse("show and then delete the old contacts");
        assert!(parsed.is_potentially_destructive);
        assert_eq!(parsed.intent, ConversationalIntent::Ambiguous);
    }

    #[test]
    fn test_multi_word_state_matched() {
        let parsed = parser().parse("accounts in New York and Texas");
        assert_eq!(
            parsed.filters.states,
            vec!["New York".to_string(), "Texas".to_string()]
        );
    }
}
