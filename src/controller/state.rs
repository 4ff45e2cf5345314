use crate::domain::{HistoryList, RewriteResult, Tone, markup};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
}

/// Draft and tone captured when a submission starts; the history entry
/// written on success uses these, not whatever the editor holds by then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingSubmission {
    pub(crate) original: String,
    pub(crate) tone: Tone,
}

/// Every piece of transient application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub draft: String,
    pub tone: Tone,
    /// Tone restored by a reset.
    pub default_tone: Tone,
    pub status: SubmissionStatus,
    pub result: Option<RewriteResult>,
    pub error: Option<String>,
    pub history: HistoryList,
    pub(crate) pending: Option<PendingSubmission>,
}

impl AppState {
    pub fn new(history: HistoryList, default_tone: Tone) -> Self {
        Self {
            tone: default_tone,
            default_tone,
            history,
            ..Self::default()
        }
    }

    pub fn word_count(&self) -> usize {
        markup::word_count(&self.draft)
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    /// Submit is enabled only for a non-blank draft with nothing in flight.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && !markup::is_blank_draft(&self.draft)
    }
}
