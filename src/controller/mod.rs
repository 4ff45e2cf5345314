//! Application state machine.
//!
//! [`reduce`] is the pure transition function. [`Controller`] owns the state
//! together with the history store and the rewrite client, executes storage
//! effects itself, and hands the remaining effects back to the presentation
//! layer.

mod action;
mod reducer;
mod state;

pub use action::{Action, Effect, RewriteJob};
pub use reducer::reduce;
pub use state::{AppState, SubmissionStatus};

use std::sync::Arc;

use crate::domain::{HistoryList, Tone};
use crate::editor::RichTextSurface;
use crate::history::HistoryStorage;
use crate::rewrite::RewriteClient;

/// Banner shown when history could not be written.
pub const PERSIST_FAILURE_MESSAGE: &str = "Could not save history. Recent changes may not persist.";

/// How a call to [`Controller::submit`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank draft or a submission already in flight; nothing was sent.
    Rejected,
    Polished,
    Failed,
}

pub struct Controller {
    state: AppState,
    store: Arc<dyn HistoryStorage>,
    client: Arc<RewriteClient>,
    clock: fn() -> i64,
}

impl Controller {
    /// Build a controller, loading history from `store`.
    pub fn new(client: Arc<RewriteClient>, store: Arc<dyn HistoryStorage>) -> Self {
        let history = store.load();
        tracing::debug!(entries = history.len(), "history loaded");
        Self {
            state: AppState::new(history, Tone::default()),
            store,
            client,
            clock: now_ms,
        }
    }

    /// Start from `tone` and return to it on reset.
    pub fn with_default_tone(mut self, tone: Tone) -> Self {
        self.state.default_tone = tone;
        self.state.tone = tone;
        self
    }

    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn history(&self) -> &HistoryList {
        &self.state.history
    }

    pub fn client(&self) -> Arc<RewriteClient> {
        Arc::clone(&self.client)
    }

    /// Apply `action`, run any storage effects, and return the effects the
    /// caller must handle ([`Effect::Rewrite`] and [`Effect::ReplaceEditor`]).
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        let effects = reduce(&mut self.state, action, (self.clock)());
        let mut remaining = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                Effect::PersistHistory | Effect::ClearStorage => self.run_storage(&effect),
                other => remaining.push(other),
            }
        }
        remaining
    }

    /// Submit the current draft and wait for the rewrite to finish.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let job = self
            .dispatch(Action::SubmitRequested)
            .into_iter()
            .find_map(|effect| match effect {
                Effect::Rewrite(job) => Some(job),
                _ => None,
            });
        let Some(job) = job else {
            return SubmitOutcome::Rejected;
        };

        let follow_up = job.run(self.client()).await;
        let outcome = match follow_up {
            Action::SubmitSucceeded(_) => SubmitOutcome::Polished,
            _ => SubmitOutcome::Failed,
        };
        self.dispatch(follow_up);
        outcome
    }

    fn run_storage(&mut self, effect: &Effect) {
        let outcome = match effect {
            Effect::PersistHistory => self.store.save(&self.state.history),
            Effect::ClearStorage => self.store.clear(),
            _ => return,
        };
        if let Err(e) = outcome {
            tracing::error!(error = %e, "history persistence failed");
            reduce(
                &mut self.state,
                Action::PersistFailed(PERSIST_FAILURE_MESSAGE.to_string()),
                (self.clock)(),
            );
        }
    }
}

/// Push any editor replacement in `effects` onto `surface`.
///
/// Programmatic replacement does not fire the surface's change listener,
/// so the draft in state was already updated by the reducer.
pub fn apply_to_surface(surface: &mut dyn RichTextSurface, effects: &[Effect]) {
    for effect in effects {
        if let Effect::ReplaceEditor(markup) = effect {
            surface.set_content(markup);
        }
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RewriteResult;
    use crate::error::HistoryError;
    use crate::history::InMemoryStore;
    use crate::providers::testing::StubBackend;

    struct BrokenStore;

    impl HistoryStorage for BrokenStore {
        fn load(&self) -> HistoryList {
            HistoryList::new()
        }

        fn save(&self, _history: &HistoryList) -> Result<(), HistoryError> {
            Err(HistoryError::Write {
                path: "quota".into(),
                source: std::io::Error::other("quota exceeded"),
            })
        }

        fn clear(&self) -> Result<(), HistoryError> {
            Ok(())
        }
    }

    fn backend(payload: Option<&str>) -> Arc<StubBackend> {
        Arc::new(StubBackend::replying(payload))
    }

    fn controller(backend: Arc<StubBackend>, store: Arc<dyn HistoryStorage>) -> Controller {
        let client = Arc::new(RewriteClient::new(backend, "test-model"));
        Controller::new(client, store).with_clock(|| 1_000)
    }

    const GOOD: &str = r#"{"polishedText":"<p>Hi there.</p>","summaryOfChanges":["Punctuation"]}"#;

    #[tokio::test]
    async fn blank_draft_makes_no_call() {
        let backend = backend(Some(GOOD));
        let mut ctl = controller(backend.clone(), Arc::new(InMemoryStore::new()));
        ctl.dispatch(Action::DraftChanged("   ".into()));
        assert_eq!(ctl.submit().await, SubmitOutcome::Rejected);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn success_is_persisted() {
        let store = Arc::new(InMemoryStore::new());
        let mut ctl = controller(backend(Some(GOOD)), store.clone());
        ctl.dispatch(Action::DraftChanged("hi there".into()));
        assert_eq!(ctl.submit().await, SubmitOutcome::Polished);

        let reloaded = store.load();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.entries()[0].original, "hi there");
        assert_eq!(
            ctl.state().result,
            Some(RewriteResult::new("<p>Hi there.</p>", vec!["Punctuation".into()]))
        );
    }

    #[tokio::test]
    async fn rejected_reply_keeps_previous_state() {
        let store = Arc::new(InMemoryStore::new());
        let mut ctl = controller(backend(Some("{}")), store.clone());
        ctl.dispatch(Action::DraftChanged("hi".into()));
        assert_eq!(ctl.submit().await, SubmitOutcome::Failed);
        assert_eq!(
            ctl.state().error.as_deref(),
            Some("Failed to polish text. Please try again.")
        );
        assert!(ctl.history().is_empty());
        assert!(store.raw().is_none());
    }

    #[tokio::test]
    async fn write_failure_surfaces_banner_but_keeps_memory_state() {
        let mut ctl = controller(backend(Some(GOOD)), Arc::new(BrokenStore));
        ctl.dispatch(Action::DraftChanged("hi".into()));
        assert_eq!(ctl.submit().await, SubmitOutcome::Polished);
        assert_eq!(ctl.state().error.as_deref(), Some(PERSIST_FAILURE_MESSAGE));
        assert_eq!(ctl.history().len(), 1);
        assert!(ctl.state().result.is_some());
    }

    #[test]
    fn clear_removes_stored_key() {
        let store = Arc::new(InMemoryStore::with_raw("[]"));
        let mut ctl = controller(backend(None), store.clone());
        assert!(ctl.dispatch(Action::HistoryCleared).is_empty());
        assert!(store.raw().is_none());
    }

    #[test]
    fn default_tone_is_restored_on_reset() {
        let mut ctl = controller(backend(None), Arc::new(InMemoryStore::new()))
            .with_default_tone(Tone::Diplomatic);
        ctl.dispatch(Action::ToneChanged(Tone::Casual));
        let effects = ctl.dispatch(Action::Reset);
        assert_eq!(ctl.state().tone, Tone::Diplomatic);
        assert_eq!(effects, vec![Effect::ReplaceEditor(String::new())]);
    }
}
