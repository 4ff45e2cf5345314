use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use super::{RewriteResult, Tone};

/// Upper bound on retained history entries; the oldest fall off first.
pub const MAX_HISTORY_ENTRIES: usize = 20;

/// One past rewrite exchange, persisted as part of the history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub original: String,
    pub polished: String,
    pub summary: Vec<String>,
    pub tone: Tone,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
}

impl HistoryEntry {
    pub fn new(original: String, result: &RewriteResult, tone: Tone, timestamp: i64) -> Self {
        Self {
            id: timestamp.to_string(),
            original,
            polished: result.polished_text.clone(),
            summary: result.summary_of_changes.clone(),
            tone,
            timestamp,
        }
    }

    pub fn result(&self) -> RewriteResult {
        RewriteResult::new(self.polished.clone(), self.summary.clone())
    }

    /// Creation time as local `HH:MM`.
    pub fn local_time(&self) -> String {
        Local
            .timestamp_millis_opt(self.timestamp)
            .single()
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default()
    }
}

/// Newest-first list of history entries, never longer than
/// [`MAX_HISTORY_ENTRIES`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<HistoryEntry>", into = "Vec<HistoryEntry>")]
pub struct HistoryList {
    entries: Vec<HistoryEntry>,
}

impl From<Vec<HistoryEntry>> for HistoryList {
    fn from(entries: Vec<HistoryEntry>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<HistoryList> for Vec<HistoryEntry> {
    fn from(list: HistoryList) -> Self {
        list.entries
    }
}

impl HistoryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from stored entries, enforcing the cap.
    pub fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        entries.truncate(MAX_HISTORY_ENTRIES);
        Self { entries }
    }

    /// Insert at the front. If the entry's id is already taken its timestamp
    /// is bumped one millisecond at a time until the id is free. Returns the
    /// id actually used.
    pub fn prepend(&mut self, mut entry: HistoryEntry) -> String {
        while self.contains(&entry.id) {
            entry.timestamp += 1;
            entry.id = entry.timestamp.to_string();
        }
        let id = entry.id.clone();
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY_ENTRIES);
        id
    }

    /// Remove the entry with `id`, keeping the order of the rest.
    pub fn remove(&mut self, id: &str) -> Option<HistoryEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a HistoryList {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
