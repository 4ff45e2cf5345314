use ratatui::style::{Color, Modifier, Style};

use crate::editor::InlineStyle;

pub const PRIMARY: Color = Color::Cyan;
pub const ACCENT: Color = Color::Green;
pub const WARNING: Color = Color::Yellow;
pub const ERROR: Color = Color::Red;
pub const DIM: Color = Color::DarkGray;
pub const TEXT: Color = Color::White;

pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn heading_style() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn unselected_style() -> Style {
    Style::default().fg(DIM)
}

pub fn success_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR).add_modifier(Modifier::BOLD)
}

pub fn warning_style() -> Style {
    Style::default().fg(WARNING)
}

pub fn dim_style() -> Style {
    Style::default().fg(DIM)
}

pub fn input_style() -> Style {
    Style::default().fg(TEXT)
}

pub fn cursor_style() -> Style {
    Style::default().fg(Color::Black).bg(TEXT)
}

pub fn keybinding_style() -> Style {
    Style::default().fg(DIM)
}

/// Border of a panel, brighter when it has focus.
pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(DIM)
    }
}

/// Tone badge in the history list.
pub fn badge_style() -> Style {
    Style::default().fg(Color::Black).bg(PRIMARY)
}

/// Layer inline formatting from the document onto `base`.
pub fn inline_style(style: InlineStyle, base: Style) -> Style {
    let mut out = base;
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.italic {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.underline {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    out
}
