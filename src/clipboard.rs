use crate::domain::markup;
use crate::error::ClipboardError;

/// What a copy places on the clipboard: the HTML result plus a tag-stripped
/// fallback, so the receiving application can pick either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyPayload {
    pub html: String,
    pub plain: String,
}

impl CopyPayload {
    pub fn from_markup(html: &str) -> Self {
        Self {
            html: html.to_string(),
            plain: markup::plain_text(html),
        }
    }
}

pub trait ClipboardSink: Send {
    fn write(&mut self, payload: &CopyPayload) -> Result<(), ClipboardError>;
}

/// The operating system clipboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl ClipboardSink for SystemClipboard {
    fn write(&mut self, payload: &CopyPayload) -> Result<(), ClipboardError> {
        self.inner
            .set_html(payload.html.as_str(), Some(payload.plain.as_str()))
            .map_err(|e| ClipboardError::Write(e.to_string()))?;
        tracing::debug!(chars = payload.plain.len(), "result copied to clipboard");
        Ok(())
    }
}

/// Clipboard that keeps the last payload, for headless sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub last: Option<CopyPayload>,
}

impl ClipboardSink for MemoryClipboard {
    fn write(&mut self, payload: &CopyPayload) -> Result<(), ClipboardError> {
        self.last = Some(payload.clone());
        Ok(())
    }
}

/// System clipboard when one is reachable, otherwise an in-memory stand-in.
pub fn default_sink() -> Box<dyn ClipboardSink> {
    match SystemClipboard::new() {
        Ok(clipboard) => Box::new(clipboard),
        Err(e) => {
            tracing::warn!(error = %e, "system clipboard unavailable, copies stay in-process");
            Box::new(MemoryClipboard::default())
        }
    }
}
