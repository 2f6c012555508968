//! Pluggable persistence for the accepted-command history log.

use parley_core::{HistoryEntry, HistoryError};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage seam for the history log. The engine owns truncation and
/// deduplication; stores persist whatever slice they are handed.
pub trait HistoryStore: Send + Sync {
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError>;
    fn save(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError>;
}

/// History log persisted as a pretty-printed JSON array in a single file.
///
/// A missing file is an empty log, not an error. A file that exists but
/// does not parse is reported as `Corrupt` so the engine can decide to
/// start fresh.
#[derive(Debug, Clone)]
pub struct JsonFileHistoryStore {
    path: PathBuf,
}

impl JsonFileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonFileHistoryStore {
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            HistoryError::ReadFailed {
                reason: e.to_string(),
            }
        })?;
        serde_json::from_str(&contents).map_err(|e| HistoryError::Corrupt {
            reason: e.to_string(),
        })
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| HistoryError::WriteFailed {
                reason: e.to_string(),
            })?;
        }
        let contents =
            serde_json::to_string_pretty(entries).map_err(|e| HistoryError::WriteFailed {
                reason: e.to_string(),
            })?;
        std::fs::write(&self.path, contents).map_err(|e| HistoryError::WriteFailed {
            reason: e.to_string(),
        })
    }
}

/// In-process store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let entries = self.entries.lock().map_err(|_| HistoryError::ReadFailed {
            reason: "history mutex poisoned".to_string(),
        })?;
        Ok(entries.clone())
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        let mut slot = self.entries.lock().map_err(|_| HistoryError::WriteFailed {
            reason: "history mutex poisoned".to_string(),
        })?;
        *slot = entries.to_vec();
        Ok(())
    }
}
