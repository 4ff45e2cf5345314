//! Turns a draft plus a tone into a [`RewriteResult`] via a generative backend.

pub mod prompt;

use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::{RewriteResult, Tone, markup};
use crate::error::RewriteFailure;
use crate::providers::{GenerateRequest, GenerativeBackend, scrub_secret_patterns};

/// Reply shape the backend is instructed to produce. Both fields are
/// required; a reply missing either is a failure, not a partial success.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RewriteReply {
    polished_text: String,
    summary_of_changes: Vec<String>,
}

pub struct RewriteClient {
    backend: Arc<dyn GenerativeBackend>,
    model: String,
    temperature: Option<f64>,
    schema: Value,
}

impl RewriteClient {
    pub fn new(backend: Arc<dyn GenerativeBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
            temperature: None,
            schema: prompt::response_schema(),
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Open the backend connection ahead of the first rewrite. Failures are
    /// logged and otherwise ignored.
    pub async fn warmup(&self) {
        if let Err(e) = self.backend.warmup().await {
            tracing::debug!(
                backend = self.backend.name(),
                error = %scrub_secret_patterns(&format!("{e:#}")),
                "warmup failed"
            );
        }
    }

    /// Rewrite `draft` in the requested tone.
    ///
    /// Every failure (transport, HTTP status, absent payload, malformed or
    /// non-conforming JSON) is logged and reported as [`RewriteFailure`].
    pub async fn polish(&self, draft: &str, tone: Tone) -> Result<RewriteResult, RewriteFailure> {
        if markup::is_blank_draft(draft) {
            tracing::warn!("refusing to send a blank draft");
            return Err(RewriteFailure);
        }

        let instruction = prompt::system_instruction(tone);
        let request = GenerateRequest {
            content: draft,
            system_instruction: &instruction,
            response_schema: &self.schema,
            model: &self.model,
            temperature: self.temperature,
        };

        let payload = match self.backend.generate(request).await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(
                    backend = self.backend.name(),
                    error = %scrub_secret_patterns(&format!("{e:#}")),
                    "rewrite request failed"
                );
                return Err(RewriteFailure);
            }
        };

        let result = parse_reply(payload.as_deref()).map_err(|reason| {
            tracing::error!(backend = self.backend.name(), %reason, "rewrite reply rejected");
            RewriteFailure
        })?;

        tracing::info!(
            %tone,
            changes = result.summary_of_changes.len(),
            "draft polished"
        );
        Ok(result)
    }
}

/// Parse the backend's text payload into a typed result.
fn parse_reply(payload: Option<&str>) -> Result<RewriteResult, String> {
    let text = payload
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| "empty payload".to_string())?;

    let reply: RewriteReply =
        serde_json::from_str(text).map_err(|e| format!("payload does not match schema: {e}"))?;

    Ok(RewriteResult::new(reply.polished_text, reply.summary_of_changes))
}
