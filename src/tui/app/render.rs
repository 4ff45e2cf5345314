use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::domain::{Tone, markup};
use crate::editor::{BlockKind, EditorDocument};
use crate::tui::session::Session;
use crate::tui::state::{Focus, word_count_label};
use crate::tui::theme;
use crate::tui::widgets::{
    DocumentView, Spinner, SpinnerWidget, wrap_lines, wrapped_editor_lines,
};

const PLACEHOLDER: &str = "Start typing or paste your draft here...";
const HISTORY_HEIGHT: u16 = 12;
const TONE_LABEL_WIDTH: usize = 13;

pub(crate) fn draw_ui(area: Rect, buf: &mut Buffer, session: &Session, spinner: &Spinner) {
    // Layout: header (2) + body + bottom keybindings (1)
    let vertical = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(10),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(vertical[0], buf);

    let columns = Layout::horizontal([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(vertical[1]);
    render_compose(columns[0], buf, session, spinner);

    let right = Layout::vertical([Constraint::Min(8), Constraint::Length(HISTORY_HEIGHT)])
        .split(columns[1]);
    render_result(right[0], buf, session);
    render_history(right[1], buf, session);

    let keys = Line::from(Span::styled(
        format!("  {}", keybinding_text(session.ui.focus)),
        theme::keybinding_style(),
    ));
    keys.render(vertical[2], buf);

    if session.ui.confirm_clear {
        render_confirm(area, buf);
    }
}

fn render_header(area: Rect, buf: &mut Buffer) {
    let title = Line::from(vec![
        Span::styled("  Elite Editor", theme::title_style()),
        Span::styled("  PROFESSIONAL COMMUNICATION COACH", theme::dim_style()),
    ]);
    title.render(Rect::new(area.x, area.y, area.width, 1), buf);

    Line::from(Span::styled("^R Reset  ", theme::keybinding_style()))
        .right_aligned()
        .render(Rect::new(area.x, area.y, area.width, 1), buf);

    if area.height > 1 {
        let sep = Line::from(Span::styled(
            format!("  {}", "─".repeat(area.width.saturating_sub(4) as usize)),
            theme::dim_style(),
        ));
        sep.render(Rect::new(area.x, area.y + 1, area.width, 1), buf);
    }
}

fn render_compose(area: Rect, buf: &mut Buffer, session: &Session, spinner: &Spinner) {
    let state = session.state();
    let rows = Layout::vertical([
        Constraint::Length(8),
        Constraint::Length(1),
        Constraint::Min(4),
        Constraint::Length(1),
        Constraint::Length(u16::from(state.error.is_some())),
    ])
    .split(area);

    render_tones(rows[0], buf, state.tone, session.ui.focus == Focus::Tones);
    render_toolbar(rows[1], buf, session);
    render_editor(rows[2], buf, session);

    if state.is_submitting() {
        SpinnerWidget::new(spinner, "Analyzing Context...").render(rows[3], buf);
    } else {
        let style = if state.can_submit() {
            theme::selected_style()
        } else {
            theme::dim_style()
        };
        Line::from(vec![
            Span::styled("  [ Polish Draft ]", style),
            Span::styled("  ^S", theme::keybinding_style()),
        ])
        .render(rows[3], buf);
    }

    if let Some(error) = &state.error {
        Line::from(Span::styled(format!("  ! {error}"), theme::error_style())).render(rows[4], buf);
    }
}

fn render_tones(area: Rect, buf: &mut Buffer, selected: Tone, focused: bool) {
    let block = Block::bordered()
        .title(" Tone ")
        .border_style(theme::border_style(focused));
    let inner = block.inner(area);
    block.render(area, buf);

    for (row, tone) in Tone::ALL.iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let y = inner.y + row as u16;
        if y >= inner.y + inner.height {
            break;
        }
        let is_selected = *tone == selected;
        let (indicator, style) = if is_selected {
            ("> ", theme::selected_style())
        } else {
            ("  ", theme::unselected_style())
        };
        let line = Line::from(vec![
            Span::styled(indicator, style),
            Span::styled(format!("{:<TONE_LABEL_WIDTH$}", tone.label()), style),
            Span::styled(tone.description(), theme::dim_style()),
        ]);
        line.render(Rect::new(inner.x, y, inner.width, 1), buf);
    }
}

fn render_toolbar(area: Rect, buf: &mut Buffer, session: &Session) {
    let typing = session.editor.typing_style();
    let mark = |label: &'static str, active: bool| {
        Span::styled(
            label,
            if active {
                theme::selected_style()
            } else {
                theme::dim_style()
            },
        )
    };
    let cursor = session.editor.cursor();
    let in_list = session
        .editor
        .document()
        .blocks()
        .get(cursor.block)
        .is_some_and(|block| block.kind == BlockKind::Bullet);
    let state = session.state();
    Line::from(vec![
        Span::raw("  "),
        mark("B", typing.bold),
        Span::raw(" "),
        mark("I", typing.italic),
        Span::raw(" "),
        mark("U", typing.underline),
        Span::raw(" "),
        mark("•", in_list),
        Span::styled("  │  ", theme::dim_style()),
        Span::styled(word_count_label(state.word_count()), theme::dim_style()),
        Span::styled("  │  ", theme::dim_style()),
        Span::styled("Targeting: ", theme::dim_style()),
        Span::styled(state.tone.label(), theme::selected_style()),
    ])
    .render(area, buf);
}

fn render_editor(area: Rect, buf: &mut Buffer, session: &Session) {
    let focused = session.ui.focus == Focus::Editor;
    let block = Block::bordered()
        .title(" Draft ")
        .border_style(theme::border_style(focused));
    let inner = block.inner(area);
    block.render(area, buf);

    if session.editor.is_empty() {
        let mut spans = Vec::new();
        if focused {
            spans.push(Span::styled(" ", theme::cursor_style()));
        }
        spans.push(Span::styled(PLACEHOLDER, theme::dim_style()));
        Line::from(spans).render(inner, buf);
        return;
    }

    let (rows, cursor_row) = wrapped_editor_lines(&session.editor, focused, inner.width);
    let visible = usize::from(inner.height.max(1));
    let offset = u16::try_from(cursor_row.saturating_sub(visible - 1)).unwrap_or(u16::MAX);
    Paragraph::new(rows).scroll((offset, 0)).render(inner, buf);
}

fn render_result(area: Rect, buf: &mut Buffer, session: &Session) {
    let state = session.state();
    let mut block = Block::bordered()
        .title(format!(" {} Polish ", state.tone))
        .border_style(theme::border_style(false));

    let Some(result) = &state.result else {
        session.ui.result_scroll_max.set(0);
        let inner = block.inner(area);
        block.render(area, buf);
        let top = inner.y + inner.height.saturating_sub(2) / 2;
        let lines = vec![
            Line::from(Span::styled("Elite Analysis Waiting", theme::heading_style())).centered(),
            Line::from(Span::styled(
                "Pick a tone, write a draft, then press ^S.",
                theme::dim_style(),
            ))
            .centered(),
        ];
        Paragraph::new(lines).render(
            Rect::new(inner.x, top, inner.width, inner.height.min(2)),
            buf,
        );
        return;
    };

    let copy_label = session.ui.copy_label(Instant::now());
    let copy_style = if copy_label == "Copied" {
        theme::success_style()
    } else {
        theme::keybinding_style()
    };
    block = block.title_top(
        Line::from(Span::styled(format!(" ^Y {copy_label} "), copy_style)).right_aligned(),
    );
    let inner = block.inner(area);

    let mut summary = vec![
        Line::default(),
        Line::from(Span::styled("Coach's Improvements", theme::heading_style())),
    ];
    for change in &result.summary_of_changes {
        summary.push(Line::from(vec![
            Span::styled("✓ ", theme::success_style()),
            Span::styled(change.clone(), theme::input_style()),
        ]));
    }
    // The improvements keep up to two thirds of the panel; the polished text
    // scrolls in what is left.
    let summary = wrap_lines(summary, inner.width);
    let summary_rows = summary.len().min(usize::from(inner.height) * 2 / 3);
    let parts = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(summary_rows).unwrap_or(u16::MAX)),
    ])
    .split(inner);

    let doc = EditorDocument::parse(&result.polished_text);
    let body = wrap_lines(DocumentView::new(&doc).lines(), parts[0].width);
    let overflow = body.len().saturating_sub(usize::from(parts[0].height));
    let max_scroll = u16::try_from(overflow).unwrap_or(u16::MAX);
    session.ui.result_scroll_max.set(max_scroll);
    if max_scroll > 0 {
        block = block.title_bottom(
            Line::from(Span::styled(" PgUp/PgDn ", theme::keybinding_style())).right_aligned(),
        );
    }
    block.render(area, buf);

    Paragraph::new(body)
        .scroll((session.ui.result_scroll.min(max_scroll), 0))
        .render(parts[0], buf);
    Paragraph::new(summary).render(parts[1], buf);
}

fn render_history(area: Rect, buf: &mut Buffer, session: &Session) {
    let focused = session.ui.focus == Focus::History;
    let history = session.controller.history();
    let mut block = Block::bordered()
        .title(" Recent History ")
        .border_style(theme::border_style(focused));
    if !history.is_empty() {
        block = block.title_top(
            Line::from(Span::styled(" c Clear all ", theme::keybinding_style())).right_aligned(),
        );
    }
    let inner = block.inner(area);
    block.render(area, buf);

    if history.is_empty() {
        Line::from(Span::styled("No previous drafts", theme::dim_style()))
            .centered()
            .render(inner, buf);
        return;
    }

    let available = inner.height as usize;
    if available == 0 {
        return;
    }
    // Scroll window: keep the cursor row visible
    let cursor = session.ui.history_cursor;
    let start = if cursor >= available {
        cursor - available + 1
    } else {
        0
    };

    for (row, (idx, entry)) in history.iter().enumerate().skip(start).take(available).enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let y = inner.y + row as u16;
        let is_selected = idx == cursor;
        let indicator = if is_selected && focused { "> " } else { "  " };
        let badge = format!(" {} ", entry.tone);
        let time = entry.local_time();
        let used = indicator.len() + badge.chars().count() + time.len() + 2;
        let preview = markup::preview(
            &entry.original,
            (inner.width as usize).saturating_sub(used + 3),
        );
        let text_style = if is_selected && focused {
            theme::selected_style()
        } else {
            theme::input_style()
        };
        Line::from(vec![
            Span::styled(indicator, theme::selected_style()),
            Span::styled(badge, theme::badge_style()),
            Span::raw(" "),
            Span::styled(time, theme::dim_style()),
            Span::raw(" "),
            Span::styled(preview, text_style),
        ])
        .render(Rect::new(inner.x, y, inner.width, 1), buf);
    }
}

fn render_confirm(area: Rect, buf: &mut Buffer) {
    let popup = centered(area, 40, 5);
    Clear.render(popup, buf);
    let block = Block::bordered()
        .title(" Clear all history? ")
        .border_style(theme::warning_style());
    let inner = block.inner(popup);
    block.render(popup, buf);
    Paragraph::new(vec![
        Line::from(Span::styled("This cannot be undone.", theme::dim_style())),
        Line::default(),
        Line::from(Span::styled("y Confirm   n Cancel", theme::keybinding_style())),
    ])
    .render(inner, buf);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn keybinding_text(focus: Focus) -> String {
    let mut keys = match focus {
        Focus::Tones => vec!["↑↓ Tone", "1-6 Pick"],
        Focus::Editor => vec!["^B Bold", "^E Italic", "^U Underline", "^L List", "^A Select all"],
        Focus::History => vec!["↑↓ Select", "Enter Load", "d Delete", "c Clear all"],
    };
    keys.extend(["Tab Focus", "^S Polish", "^Y Copy", "PgUp/PgDn Result", "^Q Quit"]);
    keys.join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Action;
    use crate::editor::{FormatCommand, RichTextSurface};
    use crate::providers::testing::StubBackend;
    use crate::tui::session::tests::{GOOD, session, settle};
    use std::sync::Arc;

    fn screen(session: &Session) -> String {
        let area = Rect::new(0, 0, 120, 40);
        let mut buf = Buffer::empty(area);
        draw_ui(area, &mut buf, session, &Spinner::new());
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn empty_session_shows_placeholders() {
        let s = session(Arc::new(StubBackend::replying(None)));
        let out = screen(&s);
        assert!(out.contains("Elite Editor"));
        assert!(out.contains("PROFESSIONAL COMMUNICATION COACH"));
        assert!(out.contains(PLACEHOLDER));
        assert!(out.contains("0 Words"));
        assert!(out.contains("Targeting: Professional"));
        assert!(out.contains("Elite Analysis Waiting"));
        assert!(out.contains("No previous drafts"));
        assert!(out.contains("Polish Draft"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn toolbar_marks_list_blocks() {
        let mut s = session(Arc::new(StubBackend::replying(None)));
        s.editor.insert_str("item");
        s.editor.apply_format(FormatCommand::BulletList);
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        render_toolbar(area, &mut buf, &s);
        let bullet = (0..area.width)
            .map(|x| &buf[(x, 0)])
            .find(|cell| cell.symbol() == "•")
            .unwrap();
        assert_eq!(bullet.style().fg, theme::selected_style().fg);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn result_and_history_render_after_success() {
        let mut s = session(Arc::new(StubBackend::replying(Some(GOOD))));
        s.editor.insert_str("hey team");
        s.pump();
        s.dispatch(Action::ToneChanged(Tone::Formal));
        s.dispatch(Action::SubmitRequested);
        settle(&mut s);

        let out = screen(&s);
        assert!(out.contains("Formal Polish"));
        assert!(out.contains("Dear team,"));
        assert!(out.contains("Coach's Improvements"));
        assert!(out.contains("Formal greeting"));
        assert!(out.contains("hey team"));
        assert!(out.contains("^Y Copy"));
        assert!(out.contains("2 Words"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn confirm_dialog_and_error_banner() {
        let mut s = session(Arc::new(StubBackend::replying(Some("{}"))));
        s.editor.insert_str("draft");
        s.pump();
        s.dispatch(Action::SubmitRequested);
        settle(&mut s);
        s.ui.confirm_clear = true;

        let out = screen(&s);
        assert!(out.contains("Failed to polish text. Please try again."));
        assert!(out.contains("Clear all history?"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn long_draft_keeps_the_cursor_in_view() {
        let mut s = session(Arc::new(StubBackend::replying(None)));
        let words: Vec<String> = (0..600).map(|i| format!("w{i}")).collect();
        s.editor.insert_str(&format!("{} ENDMARK", words.join(" ")));
        s.pump();
        assert_eq!(s.editor.document().blocks().len(), 1);

        let out = screen(&s);
        assert!(out.contains("ENDMARK"));
        assert!(!out.contains("w0 w1 w2"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn long_result_keeps_improvements_visible() {
        let words: Vec<String> = (0..400).map(|i| format!("p{i}")).collect();
        let reply = serde_json::json!({
            "polishedText": format!("<p>{}</p>", words.join(" ")),
            "summaryOfChanges": ["LASTCHANGE"],
        })
        .to_string();
        let mut s = session(Arc::new(StubBackend::replying(Some(&reply))));
        s.editor.insert_str("draft");
        s.pump();
        s.dispatch(Action::SubmitRequested);
        settle(&mut s);

        let out = screen(&s);
        assert!(out.contains("Coach's Improvements"));
        assert!(out.contains("LASTCHANGE"));
        assert!(out.contains("PgUp/PgDn"));
        assert!(out.contains("p0 p1"));
        assert!(s.ui.result_scroll_max.get() > 0);

        s.ui.scroll_result_down(u16::MAX);
        let scrolled = screen(&s);
        assert!(scrolled.contains("p399"));
        assert!(!scrolled.contains("p0 p1"));
    }

    #[test]
    fn keybindings_follow_focus() {
        assert!(keybinding_text(Focus::History).contains("d Delete"));
        assert!(keybinding_text(Focus::Editor).contains("^B Bold"));
        assert!(keybinding_text(Focus::Tones).starts_with("↑↓ Tone"));
    }
}
