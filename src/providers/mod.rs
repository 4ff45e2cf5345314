pub mod gemini;
mod gemini_types;
pub mod http_client;
pub mod scrub;
#[cfg(test)]
pub(crate) mod testing;
pub mod traits;

pub use gemini::GeminiBackend;
pub use http_client::{build_http_client, build_http_client_with_timeout};
pub use scrub::{api_error, sanitize_api_error, scrub_secret_patterns};
pub use traits::{GenerateFuture, GenerateRequest, GenerativeBackend};
