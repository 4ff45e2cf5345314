use super::action::{Action, Effect, RewriteJob};
use super::state::{AppState, PendingSubmission, SubmissionStatus};
use crate::domain::HistoryEntry;

/// Apply `action` to `state`, returning the effects it asks for.
///
/// Pure apart from `now_ms`, which stamps new history entries.
pub fn reduce(state: &mut AppState, action: Action, now_ms: i64) -> Vec<Effect> {
    match action {
        Action::DraftChanged(markup) => {
            state.draft = markup;
            Vec::new()
        }
        Action::ToneChanged(tone) => {
            state.tone = tone;
            Vec::new()
        }
        Action::SubmitRequested => {
            if !state.can_submit() {
                return Vec::new();
            }
            let content = state.draft.trim().to_string();
            state.pending = Some(PendingSubmission {
                original: content.clone(),
                tone: state.tone,
            });
            state.status = SubmissionStatus::Submitting;
            state.error = None;
            vec![Effect::Rewrite(RewriteJob {
                content,
                tone: state.tone,
            })]
        }
        Action::SubmitSucceeded(result) => {
            state.status = SubmissionStatus::Idle;
            let Some(pending) = state.pending.take() else {
                tracing::warn!("rewrite result arrived with no submission in flight");
                return Vec::new();
            };
            let entry = HistoryEntry::new(pending.original, &result, pending.tone, now_ms);
            let id = state.history.prepend(entry);
            tracing::debug!(%id, entries = state.history.len(), "history entry added");
            state.result = Some(result);
            state.error = None;
            vec![Effect::PersistHistory]
        }
        Action::SubmitFailed(message) => {
            state.status = SubmissionStatus::Idle;
            state.pending = None;
            state.error = Some(message);
            Vec::new()
        }
        Action::HistoryEntryLoaded(id) => {
            let Some(entry) = state.history.get(&id).cloned() else {
                return Vec::new();
            };
            state.draft.clone_from(&entry.original);
            state.tone = entry.tone;
            state.result = Some(entry.result());
            vec![Effect::ReplaceEditor(entry.original)]
        }
        Action::HistoryCleared => {
            state.history.clear();
            vec![Effect::ClearStorage]
        }
        Action::HistoryEntryDeleted(id) => {
            if state.history.remove(&id).is_some() {
                vec![Effect::PersistHistory]
            } else {
                Vec::new()
            }
        }
        Action::Reset => {
            state.draft.clear();
            state.tone = state.default_tone;
            state.result = None;
            vec![Effect::ReplaceEditor(String::new())]
        }
        Action::PersistFailed(message) => {
            state.error = Some(message);
            Vec::new()
        }
    }
}
