use reqwest::Client;
use std::time::Duration;

/// Whole-request timeout for a rewrite; structured generation on large
/// drafts can take a while.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

const USER_AGENT: &str = concat!("elite-editor/", env!("CARGO_PKG_VERSION"));

pub fn build_http_client() -> Client {
    build_http_client_with_timeout(DEFAULT_TIMEOUT_SECS)
}

/// Rewrites come one at a time, so a small idle pool is enough.
pub fn build_http_client_with_timeout(timeout_secs: u64) -> Client {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "custom HTTP client unavailable, using defaults");
            Client::new()
        })
}
