//! Google Gemini backend for structured (JSON-schema constrained) generation.
//!
//! Authentication priority:
//! 1. Explicit API key passed in (config or `ELITE_EDITOR_API_KEY`)
//! 2. `GEMINI_API_KEY` environment variable
//! 3. `GOOGLE_API_KEY` environment variable

use super::gemini_types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use super::http_client::build_http_client;
use super::scrub::{api_error, scrub_secret_patterns};
use super::traits::{GenerateFuture, GenerateRequest, GenerativeBackend};
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

const JSON_MIME_TYPE: &str = "application/json";

pub struct GeminiBackend {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl GeminiBackend {
    pub fn new(api_key: Option<&str>) -> Self {
        let resolved_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok());

        Self {
            api_key: resolved_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: build_http_client(),
        }
    }

    /// Point the backend at a different host (proxies, tests).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Get authentication source description for diagnostics
    pub fn auth_source(&self) -> &'static str {
        if self.api_key.is_none() {
            return "none";
        }
        if std::env::var("GEMINI_API_KEY").is_ok() {
            return "GEMINI_API_KEY env var";
        }
        if std::env::var("GOOGLE_API_KEY").is_ok() {
            return "GOOGLE_API_KEY env var";
        }
        "config"
    }

    fn model_name(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    fn build_request(request: &GenerateRequest<'_>) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: request.content.to_string(),
                }],
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part {
                    text: request.system_instruction.to_string(),
                }],
            }),
            generation_config: GenerationConfig {
                temperature: request.temperature,
                response_mime_type: JSON_MIME_TYPE.to_string(),
                response_schema: request.response_schema.clone(),
            },
        }
    }

    /// Concatenate the text parts of the first candidate. `None` when the
    /// reply carries no text at all.
    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        let text = response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    async fn call_api(&self, request: GenerateRequest<'_>) -> anyhow::Result<Option<String>> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            anyhow::anyhow!(
                "Gemini API key not found. Options:\n\
                 1. Set GEMINI_API_KEY env var\n\
                 2. Set api_key in ~/.elite-editor/config.toml\n\
                 3. Get an API key from https://aistudio.google.com/app/apikey"
            )
        })?;

        let url = format!(
            "{}/v1beta/{}:generateContent",
            self.base_url,
            Self::model_name(request.model)
        );
        let body = Self::build_request(&request);

        tracing::debug!(model = request.model, chars = request.content.len(), "sending Gemini request");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(self.name(), response).await);
        }

        let result: GenerateContentResponse = response.json().await?;

        if let Some(err) = result.error.as_ref() {
            anyhow::bail!("Gemini API error: {}", scrub_secret_patterns(&err.message));
        }

        if let Some(usage) = result.usage_metadata.as_ref() {
            tracing::debug!(
                model_version = result.model_version.as_deref().unwrap_or("unknown"),
                input_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "Gemini request completed"
            );
        }
        if let Some(reason) = result
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.finish_reason.as_deref())
            .filter(|reason| *reason != "STOP")
        {
            tracing::warn!(finish_reason = reason, "Gemini stopped early");
        }

        Ok(Self::extract_text(&result))
    }
}

impl GenerativeBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    fn generate<'a>(&'a self, request: GenerateRequest<'a>) -> GenerateFuture<'a> {
        Box::pin(self.call_api(request))
    }

    fn warmup(&self) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + '_>> {
        Box::pin(async move {
            // Listing models is cheap and opens the TLS connection the first
            // rewrite will reuse.
            if let Some(api_key) = self.api_key.as_ref() {
                self.client
                    .get(format!("{}/v1beta/models?pageSize=1", self.base_url))
                    .header("x-goog-api-key", api_key)
                    .send()
                    .await?
                    .error_for_status()?;
            }
            Ok(())
        })
    }
}
