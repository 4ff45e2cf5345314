use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

use super::{HISTORY_KEY, HistoryStorage, decode};
use crate::domain::HistoryList;
use crate::error::HistoryError;

/// History kept in a JSON file, written atomically via a sibling temp file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/editor_history.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(format!("{HISTORY_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_raw(&self) -> anyhow::Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read history: {}", self.path.display()))?;
        Ok(Some(raw))
    }

    fn write_error(&self, source: std::io::Error) -> HistoryError {
        HistoryError::Write {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl HistoryStorage for JsonFileStore {
    fn load(&self) -> HistoryList {
        match self.read_raw() {
            Ok(Some(raw)) => decode(&raw, &self.path.display().to_string()),
            Ok(None) => HistoryList::new(),
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "history unreadable, starting empty");
                HistoryList::new()
            }
        }
    }

    fn save(&self, history: &HistoryList) -> Result<(), HistoryError> {
        let json = serde_json::to_string_pretty(history)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.write_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.write_error(e))?;

        tracing::debug!(path = %self.path.display(), entries = history.len(), "history saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), HistoryError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(HistoryError::Remove {
                path: self.path.display().to_string(),
                source,
            }),
        }
    }
}
