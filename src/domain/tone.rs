use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// The fixed set of rewrite styles.
///
/// The display name doubles as the persisted form and as the label shown in
/// the tone picker, so renaming a variant breaks stored history.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Tone {
    #[default]
    Professional,
    Formal,
    Casual,
    Assertive,
    Friendly,
    Diplomatic,
}

impl Tone {
    pub const ALL: [Tone; 6] = [
        Self::Professional,
        Self::Formal,
        Self::Casual,
        Self::Assertive,
        Self::Friendly,
        Self::Diplomatic,
    ];

    pub fn label(self) -> &'static str {
        self.into()
    }

    /// Short description shown under the tone in the picker.
    pub fn description(self) -> &'static str {
        match self {
            Self::Professional => "Balanced & Expert",
            Self::Formal => "Traditional & Respectful",
            Self::Casual => "Friendly & Relaxed",
            Self::Assertive => "Direct & Decisive",
            Self::Friendly => "Warm & Approachable",
            Self::Diplomatic => "Tactful & Sensitive",
        }
    }

    /// The character the rewrite service is asked to hit for this tone.
    pub fn character(self) -> &'static str {
        match self {
            Self::Professional => "Balanced, confident, and polite.",
            Self::Formal => "Highly respectful, structured, and traditional.",
            Self::Casual => "Relaxed, approachable, and conversational (but still polished).",
            Self::Assertive => "Direct, firm, and decisive without being rude.",
            Self::Friendly => "Warm, inclusive, and enthusiastic.",
            Self::Diplomatic => "Highly tactful, cautious, and sensitive to interpersonal dynamics.",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Next tone in picker order, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous tone in picker order, wrapping around.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}
