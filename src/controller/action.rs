use std::sync::Arc;

use crate::domain::{RewriteResult, Tone};
use crate::rewrite::RewriteClient;

/// Everything that can happen to the application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    DraftChanged(String),
    ToneChanged(Tone),
    SubmitRequested,
    SubmitSucceeded(RewriteResult),
    SubmitFailed(String),
    HistoryEntryLoaded(String),
    HistoryCleared,
    HistoryEntryDeleted(String),
    Reset,
    PersistFailed(String),
}

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the captured draft to the rewrite service.
    Rewrite(RewriteJob),
    /// Overwrite the editing surface with this markup.
    ReplaceEditor(String),
    /// Write the full history list to storage.
    PersistHistory,
    /// Remove the stored history key.
    ClearStorage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteJob {
    pub content: String,
    pub tone: Tone,
}

impl RewriteJob {
    /// Run the rewrite and turn the outcome into the follow-up action.
    pub async fn run(self, client: Arc<RewriteClient>) -> Action {
        match client.polish(&self.content, self.tone).await {
            Ok(result) => Action::SubmitSucceeded(result),
            Err(failure) => Action::SubmitFailed(failure.to_string()),
        }
    }
}
