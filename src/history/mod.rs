//! Persistent storage for the history list.
//!
//! Storage holds exactly one logical key: the whole list serialized as a
//! JSON array, newest first. Every change rewrites the full value.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;

use crate::domain::HistoryList;
use crate::error::HistoryError;

/// Name of the logical storage key.
pub const HISTORY_KEY: &str = "editor_history";

pub trait HistoryStorage: Send + Sync {
    /// Read the stored list. Absent or unreadable data yields an empty list.
    fn load(&self) -> HistoryList;

    /// Replace the stored list wholesale.
    fn save(&self, history: &HistoryList) -> Result<(), HistoryError>;

    /// Drop the stored key entirely.
    fn clear(&self) -> Result<(), HistoryError>;
}

impl<S: HistoryStorage + ?Sized> HistoryStorage for std::sync::Arc<S> {
    fn load(&self) -> HistoryList {
        (**self).load()
    }

    fn save(&self, history: &HistoryList) -> Result<(), HistoryError> {
        (**self).save(history)
    }

    fn clear(&self) -> Result<(), HistoryError> {
        (**self).clear()
    }
}

/// Decode a stored value, tolerating corruption.
pub(crate) fn decode(raw: &str, origin: &str) -> HistoryList {
    if raw.trim().is_empty() {
        return HistoryList::new();
    }
    match serde_json::from_str::<HistoryList>(raw) {
        Ok(list) => list,
        Err(e) => {
            tracing::warn!(origin, error = %e, "stored history is corrupt, starting empty");
            HistoryList::new()
        }
    }
}
