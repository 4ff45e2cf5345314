//! Wiring from [`Config`] to the running pieces.

use std::sync::Arc;

use crate::config::Config;
use crate::controller::Controller;
use crate::history::{HistoryStorage, InMemoryStore, JsonFileStore};
use crate::providers::{GeminiBackend, build_http_client_with_timeout};
use crate::rewrite::RewriteClient;

pub fn create_rewrite_client(config: &Config) -> Arc<RewriteClient> {
    let backend = GeminiBackend::new(config.api_key.as_deref())
        .with_base_url(&config.gemini.base_url)
        .with_client(build_http_client_with_timeout(config.gemini.timeout_secs));
    tracing::debug!(auth = backend.auth_source(), model = %config.model, "gemini backend ready");

    Arc::new(
        RewriteClient::new(Arc::new(backend), config.model.clone())
            .with_temperature(config.temperature),
    )
}

/// File-backed history, or session-only storage when history is disabled.
pub fn create_history_store(config: &Config) -> Arc<dyn HistoryStorage> {
    if config.history.enabled {
        Arc::new(JsonFileStore::new(config.history_path()))
    } else {
        tracing::info!("history persistence disabled, keeping this session only");
        Arc::new(InMemoryStore::new())
    }
}

/// Warn when rewrites cannot authenticate. Only surfaces that submit drafts
/// call this; history commands work without a key.
pub fn warn_if_unauthenticated(config: &Config) -> bool {
    let missing = config
        .api_key
        .as_deref()
        .is_none_or(|key| key.trim().is_empty());
    if missing {
        tracing::warn!("no Gemini API key configured; rewrites will fail");
    }
    missing
}

pub fn create_controller(config: &Config) -> Controller {
    Controller::new(create_rewrite_client(config), create_history_store(config))
        .with_default_tone(config.default_tone)
}
