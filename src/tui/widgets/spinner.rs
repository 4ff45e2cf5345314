use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::tui::theme;

const FRAMES: [char; 8] = ['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];

/// Frame counter for the busy indicator; advanced once per redraw while a
/// rewrite is in flight.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spinner {
    tick: usize,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self) {
        self.tick = (self.tick + 1) % FRAMES.len();
    }

    pub fn frame(self) -> char {
        FRAMES[self.tick]
    }
}

/// Busy line shown in place of the submit button.
pub struct SpinnerWidget<'a> {
    spinner: Spinner,
    label: &'a str,
}

impl<'a> SpinnerWidget<'a> {
    pub fn new(spinner: &Spinner, label: &'a str) -> Self {
        Self {
            spinner: *spinner,
            label,
        }
    }
}

impl Widget for SpinnerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        Line::from(vec![
            Span::styled(format!("  [ {} ", self.spinner.frame()), theme::title_style()),
            Span::styled(self.label, theme::input_style()),
            Span::styled(" ]", theme::title_style()),
        ])
        .render(area, buf);
    }
}
