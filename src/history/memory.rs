use std::sync::Mutex;

use super::{HISTORY_KEY, HistoryStorage, decode};
use crate::domain::HistoryList;
use crate::error::HistoryError;

/// Session-only history. The value is still kept serialized so it behaves
/// exactly like the file store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    value: Mutex<Option<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with a raw stored value, as if read from a previous session.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(raw.into())),
        }
    }

    /// The raw stored value, `None` when the key is absent.
    pub fn raw(&self) -> Option<String> {
        self.value.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl HistoryStorage for InMemoryStore {
    fn load(&self) -> HistoryList {
        match self.raw() {
            Some(raw) => decode(&raw, HISTORY_KEY),
            None => HistoryList::new(),
        }
    }

    fn save(&self, history: &HistoryList) -> Result<(), HistoryError> {
        let json = serde_json::to_string(history)?;
        *self.value.lock().map_err(|_| HistoryError::Poisoned)? = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        *self.value.lock().map_err(|_| HistoryError::Poisoned)? = None;
        Ok(())
    }
}
