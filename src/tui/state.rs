use std::cell::Cell;
use std::time::{Duration, Instant};

/// How long the copy control reads "Copied".
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    Tones,
    #[default]
    Editor,
    History,
}

impl Focus {
    pub const ALL: [Self; 3] = [Self::Tones, Self::Editor, Self::History];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Presentation-only state; everything else lives in the controller.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub focus: Focus,
    pub history_cursor: usize,
    /// The "Clear all history?" confirmation is open.
    pub confirm_clear: bool,
    pub copied_at: Option<Instant>,
    pub should_quit: bool,
    /// Rows of polished text scrolled off the top of the result panel.
    pub result_scroll: u16,
    /// Largest useful `result_scroll`, recorded by the last draw.
    pub result_scroll_max: Cell<u16>,
}

impl UiState {
    pub fn copy_label(&self, now: Instant) -> &'static str {
        match self.copied_at {
            Some(at) if now.duration_since(at) < COPY_FEEDBACK => "Copied",
            _ => "Copy",
        }
    }

    pub fn scroll_result_down(&mut self, rows: u16) {
        self.result_scroll = self
            .result_scroll
            .saturating_add(rows)
            .min(self.result_scroll_max.get());
    }

    pub fn scroll_result_up(&mut self, rows: u16) {
        self.result_scroll = self.result_scroll.saturating_sub(rows);
    }

    /// Keep the history cursor on an existing row.
    pub fn clamp_history_cursor(&mut self, len: usize) {
        self.history_cursor = self.history_cursor.min(len.saturating_sub(1));
    }
}

pub fn word_count_label(count: usize) -> String {
    if count == 1 {
        "1 Word".to_string()
    } else {
        format!("{count} Words")
    }
}
