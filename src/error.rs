use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for Elite Editor.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide what to show the user; application glue keeps using
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum EditorError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Rewrite ─────────────────────────────────────────────────────────
    #[error(transparent)]
    Rewrite(#[from] RewriteFailure),

    // ── History persistence ─────────────────────────────────────────────
    #[error("history: {0}")]
    History(#[from] HistoryError),

    // ── Clipboard ───────────────────────────────────────────────────────
    #[error("clipboard: {0}")]
    Clipboard(#[from] ClipboardError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── Rewrite errors ──────────────────────────────────────────────────────────

/// The single user-facing failure of a rewrite exchange.
///
/// Transport errors, HTTP errors, absent payloads and schema violations all
/// collapse into this value. The underlying cause is logged, never displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Failed to polish text. Please try again.")]
pub struct RewriteFailure;

// ─── History errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove {path}: {source}")]
    Remove {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialize: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("entry {0} not found")]
    NotFound(String),

    #[error("history store is unusable after a panic")]
    Poisoned,
}

// ─── Clipboard errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("write failed: {0}")]
    Write(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, EditorError>;
