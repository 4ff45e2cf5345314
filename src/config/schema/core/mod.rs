mod env_overrides;
mod loader;
#[cfg(test)]
mod test_env;

use super::{GeminiConfig, HistoryConfig, ObservabilityConfig};
use crate::domain::Tone;
use crate::error::ConfigError;
use crate::history::HISTORY_KEY;
use crate::providers::gemini::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub(crate) const APP_DIR_NAME: &str = ".elite-editor";
pub(crate) const LOG_FILE_NAME: &str = "elite-editor.log";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding config, history and logs - computed, not serialized
    #[serde(skip)]
    pub config_dir: PathBuf,
    /// Path to config.toml - computed, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature; the service default applies when unset.
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub default_tone: Tone,

    #[serde(default)]
    pub gemini: GeminiConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

fn default_model() -> String {
    DEFAULT_MODEL.into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::new(),
            config_path: PathBuf::new(),
            api_key: None,
            model: default_model(),
            temperature: None,
            default_tone: Tone::default(),
            gemini: GeminiConfig::default(),
            history: HistoryConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    /// Resolved history file, with `~` expanded.
    pub fn history_path(&self) -> PathBuf {
        match self.history.path.as_deref().filter(|p| !p.trim().is_empty()) {
            Some(path) => PathBuf::from(shellexpand::tilde(path).into_owned()),
            None => self.config_dir.join(format!("{HISTORY_KEY}.json")),
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.config_dir.join(LOG_FILE_NAME)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(temp) = self.temperature
            && !(0.0..=2.0).contains(&temp)
        {
            return Err(ConfigError::Validation(format!(
                "temperature must be between 0.0 and 2.0, got {temp}"
            )));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::Validation("model must not be empty".into()));
        }
        if self.gemini.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "gemini.timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
