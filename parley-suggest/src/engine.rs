//! Suggestion ranking over history, playbooks and generic fallbacks.

use crate::playbook::playbook_for;
use crate::store::HistoryStore;
use chrono::Utc;
use parley_core::{
    CommandOrigin, ConversationalIntent, CrmEntity, HistoryEntry, Suggestion, SuggestionContext,
    SuggestionSource,
};
use std::sync::Arc;
use tracing::warn;

/// Hard cap on the returned suggestion list.
pub const MAX_SUGGESTIONS: usize = 6;

/// At most this many suggestions per source.
const PER_SOURCE_CAP: usize = 3;

/// Per-rank confidence schedule: history outranks playbook, playbook
/// outranks fallback, and each decays with position.
const HISTORY_BASE: f32 = 0.85;
const HISTORY_DECAY: f32 = 0.10;
const PLAYBOOK_BASE: f32 = 0.70;
const PLAYBOOK_DECAY: f32 = 0.05;
const FALLBACK_CONFIDENCE: f32 = 0.50;

/// Threshold below which generic fallbacks are appended.
const MIN_BEFORE_FALLBACK: usize = 2;

/// Ranks next-command suggestions and maintains the history log behind
/// them.
///
/// Storage failures never surface to callers: reads degrade to an empty
/// log and writes are logged and dropped.
#[derive(Clone)]
pub struct SuggestionEngine {
    store: Arc<dyn HistoryStore>,
}

impl SuggestionEngine {
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self { store }
    }

    /// Record an accepted command. Entries are deduplicated by exact
    /// `raw_text` (the new entry takes the front position) and the log
    /// is truncated to [`HistoryEntry::MAX_ENTRIES`], newest first.
    pub fn record_command(
        &self,
        raw_text: &str,
        intent: ConversationalIntent,
        entity: Option<CrmEntity>,
        origin: CommandOrigin,
    ) {
        let mut entries = self.load_degraded();
        entries.retain(|e| e.raw_text != raw_text);
        entries.insert(
            0,
            HistoryEntry {
                intent,
                entity,
                raw_text: raw_text.to_string(),
                timestamp: Utc::now(),
                origin,
            },
        );
        entries.truncate(HistoryEntry::MAX_ENTRIES);
        if let Err(e) = self.store.save(&entries) {
            warn!(error = %e, "dropping history write");
        }
    }

    /// The most recent accepted commands, newest first.
    pub fn recent_history(&self, limit: usize) -> Vec<HistoryEntry> {
        let mut entries = self.load_degraded();
        entries.truncate(limit);
        entries
    }

    pub fn clear_history(&self) {
        if let Err(e) = self.store.save(&[]) {
            warn!(error = %e, "history clear failed");
        }
    }

    /// Ranked suggestions for the current UI context. Always returns at
    /// least the generic fallbacks; never an empty list.
    pub fn suggestions(&self, context: &SuggestionContext) -> Vec<Suggestion> {
        let mut out: Vec<Suggestion> = Vec::new();
        let context_entity = context.entity.filter(|e| e.is_concrete());

        // History entries only surface when they match the entity on
        // screen; entries with no recorded entity always pass.
        let relevant = self
            .load_degraded()
            .into_iter()
            .filter(|e| match (context_entity, e.entity) {
                (Some(ctx), Some(entity)) => ctx == entity,
                _ => true,
            });
        for (rank, entry) in relevant.take(PER_SOURCE_CAP).enumerate() {
            push_deduped(
                &mut out,
                Suggestion {
                    command: relabel(&entry),
                    source: SuggestionSource::History,
                    intent: entry.intent,
                    entity: entry.entity,
                    confidence: HISTORY_BASE - HISTORY_DECAY * rank as f32,
                },
            );
        }

        let playbook_entity = context_entity.unwrap_or(CrmEntity::General);
        for (rank, item) in playbook_for(playbook_entity)
            .iter()
            .take(PER_SOURCE_CAP)
            .enumerate()
        {
            push_deduped(
                &mut out,
                Suggestion {
                    command: item.command.to_string(),
                    source: SuggestionSource::Context,
                    intent: item.intent,
                    entity: context_entity,
                    confidence: PLAYBOOK_BASE - PLAYBOOK_DECAY * rank as f32,
                },
            );
        }

        if out.len() < MIN_BEFORE_FALLBACK {
            for fallback in generic_fallbacks() {
                push_deduped(&mut out, fallback);
            }
        }

        // Stable sort: equal confidence keeps source order (history first).
        out.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        out.truncate(MAX_SUGGESTIONS);
        out
    }

    fn load_degraded(&self) -> Vec<HistoryEntry> {
        match self.store.load() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "serving empty history");
                Vec::new()
            }
        }
    }
}

/// Rephrase a history entry as a human suggestion. Entries with no
/// recorded entity keep their original text.
fn relabel(entry: &HistoryEntry) -> String {
    let Some(entity) = entry.entity else {
        return entry.raw_text.clone();
    };
    match entry.intent {
        ConversationalIntent::Query => format!("Show {}", entity.label()),
        ConversationalIntent::Create => format!("Create a new entry in {}", entity.label()),
        ConversationalIntent::Update => format!("Update {}", entity.label()),
        ConversationalIntent::Navigate => format!("Go to {}", entity.label()),
        ConversationalIntent::Analyze => format!("Summarize {}", entity.label()),
        ConversationalIntent::Ambiguous => entry.raw_text.clone(),
    }
}

fn generic_fallbacks() -> [Suggestion; 2] {
    [
        Suggestion {
            command: "Summarize my pipeline".to_string(),
            source: SuggestionSource::Playbook,
            intent: ConversationalIntent::Analyze,
            entity: Some(CrmEntity::Opportunities),
            confidence: FALLBACK_CONFIDENCE,
        },
        Suggestion {
            command: "Show today's tasks".to_string(),
            source: SuggestionSource::Playbook,
            intent: ConversationalIntent::Query,
            entity: Some(CrmEntity::Activities),
            confidence: FALLBACK_CONFIDENCE,
        },
    ]
}

/// Append unless an equal command (case-insensitive) is already listed.
fn push_deduped(out: &mut Vec<Suggestion>, candidate: Suggestion) {
    let lowered = candidate.command.to_lowercase();
    if !out.iter().any(|s| s.command.to_lowercase() == lowered) {
        out.push(candidate);
    }
}
