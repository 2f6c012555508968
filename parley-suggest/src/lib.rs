//! PARLEY SUGGEST - Command History and Next-Action Suggestions
//!
//! Keeps a small per-user log of accepted commands and ranks candidate
//! next commands from three sources: the user's own history, a playbook
//! keyed to the entity on screen, and generic fallbacks. Ranking is a
//! fixed source order with decaying per-rank weights; no learning, no
//! calibration.
//!
//! Storage is degradable by design: a failed history read is served as
//! an empty log and a failed write is logged and dropped. Suggestions
//! must never take the UI down.

pub mod engine;
pub mod playbook;
pub mod store;

pub use engine::{SuggestionEngine, MAX_SUGGESTIONS};
pub use playbook::playbook_for;
pub use store::{HistoryStore, InMemoryHistoryStore, JsonFileHistoryStore};
