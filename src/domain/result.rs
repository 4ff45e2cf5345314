use serde::{Deserialize, Serialize};

/// A rewritten draft plus the notes describing what changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteResult {
    pub polished_text: String,
    pub summary_of_changes: Vec<String>,
}

impl RewriteResult {
    pub fn new(polished_text: impl Into<String>, summary_of_changes: Vec<String>) -> Self {
        Self {
            polished_text: polished_text.into(),
            summary_of_changes,
        }
    }
}
