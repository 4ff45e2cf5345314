use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// One structured-output generation call.
#[derive(Debug, Clone, Copy)]
pub struct GenerateRequest<'a> {
    /// Raw user content (the draft markup).
    pub content: &'a str,
    pub system_instruction: &'a str,
    /// JSON schema the reply must conform to.
    pub response_schema: &'a Value,
    pub model: &'a str,
    pub temperature: Option<f64>,
}

pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = anyhow::Result<Option<String>>> + Send + 'a>>;

/// A hosted text-generation service.
///
/// `generate` resolves to the raw text payload of the reply, `None` when the
/// service answered without any text.
pub trait GenerativeBackend: Send + Sync {
    /// Backend identifier (e.g. "gemini").
    fn name(&self) -> &str;

    fn generate<'a>(&'a self, request: GenerateRequest<'a>) -> GenerateFuture<'a>;

    /// Warm up the HTTP connection pool.
    fn warmup(&self) -> Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + '_>> {
        Box::pin(async move { Ok(()) })
    }
}
