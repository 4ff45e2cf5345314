use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::traits::{GenerateFuture, GenerateRequest, GenerativeBackend};

/// Backend that always answers with the same payload and counts calls.
pub(crate) struct StubBackend {
    payload: Option<String>,
    calls: AtomicUsize,
    last_content: Mutex<Option<String>>,
}

impl StubBackend {
    pub(crate) fn replying(payload: Option<&str>) -> Self {
        Self {
            payload: payload.map(str::to_string),
            calls: AtomicUsize::new(0),
            last_content: Mutex::new(None),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_content(&self) -> Option<String> {
        self.last_content.lock().ok().and_then(|c| c.clone())
    }
}

impl GenerativeBackend for StubBackend {
    fn name(&self) -> &str {
        "stub"
    }

    fn generate<'a>(&'a self, request: GenerateRequest<'a>) -> GenerateFuture<'a> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_content.lock() {
            *last = Some(request.content.to_string());
        }
        let payload = self.payload.clone();
        Box::pin(async move { Ok(payload) })
    }
}
