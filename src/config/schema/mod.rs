mod core;
mod gemini;
mod history;
mod observability;

pub use core::Config;
pub use gemini::GeminiConfig;
pub use history::HistoryConfig;
pub use observability::ObservabilityConfig;
