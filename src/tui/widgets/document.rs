//! Styled terminal rendering of rich-text documents.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget, Wrap};

use super::super::theme;
use crate::editor::{BlockKind, EditorBuffer, EditorDocument, Position};

const BULLET: &str = "• ";

/// Read-only view of a document, e.g. a polished result.
pub struct DocumentView<'a> {
    pub doc: &'a EditorDocument,
    pub base: Style,
}

impl<'a> DocumentView<'a> {
    pub fn new(doc: &'a EditorDocument) -> Self {
        Self {
            doc,
            base: theme::input_style(),
        }
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        self.doc
            .blocks()
            .iter()
            .map(|block| {
                let mut spans = Vec::new();
                if block.kind == BlockKind::Bullet {
                    spans.push(Span::styled(BULLET, theme::success_style()));
                }
                for run in block.chars.chunk_by(|a, b| a.style == b.style) {
                    let text: String = run.iter().map(|c| c.ch).collect();
                    spans.push(Span::styled(text, theme::inline_style(run[0].style, self.base)));
                }
                Line::from(spans)
            })
            .collect()
    }
}

impl Widget for DocumentView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.lines())
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

/// Lines for the live editor, with selection and (when focused) cursor.
pub fn editor_lines(buffer: &EditorBuffer, focused: bool) -> Vec<Line<'static>> {
    let cursor = buffer.cursor();
    buffer
        .document()
        .blocks()
        .iter()
        .enumerate()
        .map(|(b, block)| {
            let mut spans = Vec::with_capacity(block.len() + 2);
            if block.kind == BlockKind::Bullet {
                spans.push(Span::styled(BULLET, theme::success_style()));
            }
            for (col, styled) in block.chars.iter().enumerate() {
                let mut style = theme::inline_style(styled.style, theme::input_style());
                if focused && cursor == Position::new(b, col) {
                    style = theme::cursor_style();
                } else if buffer.is_selected(b, col) {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(styled.ch.to_string(), style));
            }
            if focused && cursor == Position::new(b, block.len()) {
                spans.push(Span::styled(" ", theme::cursor_style()));
            }
            Line::from(spans)
        })
        .collect()
}

/// Editor lines wrapped to `width` columns, plus the visual row holding the
/// cursor. Rows break after the last space that fits; a word wider than the
/// panel is split.
pub fn wrapped_editor_lines(
    buffer: &EditorBuffer,
    focused: bool,
    width: u16,
) -> (Vec<Line<'static>>, usize) {
    let width = usize::from(width.max(1));
    let cursor = buffer.cursor();
    let blocks = buffer.document().blocks();
    let mut rows = Vec::new();
    let mut cursor_row = 0;

    for (b, line) in editor_lines(buffer, focused).into_iter().enumerate() {
        let wrapped = wrap_spans(line.spans, width);
        if b == cursor.block {
            let marker = usize::from(blocks.get(b).is_some_and(|bl| bl.kind == BlockKind::Bullet));
            let target = cursor.col + marker;
            let mut seen = 0;
            let mut within = wrapped.len() - 1;
            for (r, row) in wrapped.iter().enumerate() {
                seen += row.len();
                if target < seen {
                    within = r;
                    break;
                }
            }
            cursor_row = rows.len() + within;
        }
        rows.extend(wrapped.into_iter().map(Line::from));
    }
    (rows, cursor_row)
}

/// Wraps styled lines to `width` columns, one output line per screen row.
pub fn wrap_lines(lines: Vec<Line<'static>>, width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width.max(1));
    lines
        .into_iter()
        .flat_map(|line| {
            let cells: Vec<Span<'static>> = line
                .spans
                .into_iter()
                .flat_map(|span| {
                    let style = span.style;
                    span.content
                        .chars()
                        .map(|c| Span::styled(c.to_string(), style))
                        .collect::<Vec<_>>()
                })
                .collect();
            wrap_spans(cells, width).into_iter().map(Line::from)
        })
        .collect()
}

fn wrap_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Vec<Span<'static>>> {
    let mut rows = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;
    // Index in `current` just past the last space.
    let mut break_at: Option<usize> = None;

    for span in spans {
        let w = span.width();
        while used + w > width && !current.is_empty() {
            let split = match break_at {
                Some(k) if k < current.len() => k,
                _ => current.len(),
            };
            let rest = current.split_off(split);
            rows.push(std::mem::replace(&mut current, rest));
            used = current.iter().map(Span::width).sum();
            break_at = None;
        }
        let is_space = !span.content.is_empty() && span.content.chars().all(char::is_whitespace);
        used += w;
        current.push(span);
        if is_space {
            break_at = Some(current.len());
        }
    }
    rows.push(current);
    rows
}
