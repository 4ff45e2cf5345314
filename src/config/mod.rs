pub mod schema;

pub use schema::{Config, GeminiConfig, HistoryConfig, ObservabilityConfig};
