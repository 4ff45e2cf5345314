use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// When false, history lives only for the current session.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Storage file; defaults to `editor_history.json` next to the config.
    #[serde(default)]
    pub path: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}
