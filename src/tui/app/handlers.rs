use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::Action;
use crate::domain::Tone;
use crate::editor::{FormatCommand, RichTextSurface};
use crate::tui::session::Session;
use crate::tui::state::Focus;

const RESULT_PAGE: u16 = 5;

pub(crate) fn handle_key(session: &mut Session, key: KeyEvent) {
    if session.ui.confirm_clear {
        handle_confirm_key(session, key.code);
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl {
        match key.code {
            KeyCode::Char('c' | 'q') => session.ui.should_quit = true,
            KeyCode::Char('s') => session.dispatch(Action::SubmitRequested),
            KeyCode::Char('y') => session.copy_result(),
            KeyCode::Char('r') => session.dispatch(Action::Reset),
            _ if session.ui.focus == Focus::Editor => handle_editor_key(session, key),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Tab => session.ui.focus = session.ui.focus.next(),
        KeyCode::BackTab => session.ui.focus = session.ui.focus.prev(),
        KeyCode::PageDown => session.ui.scroll_result_down(RESULT_PAGE),
        KeyCode::PageUp => session.ui.scroll_result_up(RESULT_PAGE),
        _ => match session.ui.focus {
            Focus::Tones => handle_tones_key(session, key.code),
            Focus::Editor => handle_editor_key(session, key),
            Focus::History => handle_history_key(session, key.code),
        },
    }
}

pub(crate) fn handle_paste(session: &mut Session, text: &str) {
    if session.ui.focus == Focus::Editor && !session.ui.confirm_clear {
        session.editor.insert_str(text);
    }
}

fn handle_confirm_key(session: &mut Session, key: KeyCode) {
    match key {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
            session.ui.confirm_clear = false;
            session.dispatch(Action::HistoryCleared);
        }
        KeyCode::Char('n' | 'N') | KeyCode::Esc => session.ui.confirm_clear = false,
        _ => {}
    }
}

fn handle_tones_key(session: &mut Session, key: KeyCode) {
    let current = session.state().tone;
    let tone = match key {
        KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => current.prev(),
        KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => current.next(),
        KeyCode::Char(c @ '1'..='6') => {
            let idx = c as usize - '1' as usize;
            Tone::ALL[idx]
        }
        KeyCode::Enter => {
            session.ui.focus = Focus::Editor;
            return;
        }
        _ => return,
    };
    if tone != current {
        session.dispatch(Action::ToneChanged(tone));
    }
}

fn handle_editor_key(session: &mut Session, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let editor = &mut session.editor;

    if ctrl {
        match key.code {
            KeyCode::Char('a') => editor.select_all(),
            KeyCode::Char('b') => editor.apply_format(FormatCommand::Bold),
            KeyCode::Char('e') => editor.apply_format(FormatCommand::Italic),
            KeyCode::Char('u') => editor.apply_format(FormatCommand::Underline),
            KeyCode::Char('l') => editor.apply_format(FormatCommand::BulletList),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => editor.insert_char(c),
        KeyCode::Enter => editor.newline(),
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Delete => editor.delete(),
        KeyCode::Left => editor.move_left(shift),
        KeyCode::Right => editor.move_right(shift),
        KeyCode::Up => editor.move_up(shift),
        KeyCode::Down => editor.move_down(shift),
        KeyCode::Home => editor.move_home(shift),
        KeyCode::End => editor.move_end(shift),
        _ => {}
    }
}

fn handle_history_key(session: &mut Session, key: KeyCode) {
    let len = session.controller.history().len();
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            session.ui.history_cursor = session.ui.history_cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if session.ui.history_cursor + 1 < len {
                session.ui.history_cursor += 1;
            }
        }
        KeyCode::Enter => {
            if let Some(id) = session.selected_history_id() {
                session.dispatch(Action::HistoryEntryLoaded(id));
                session.ui.focus = Focus::Editor;
            }
        }
        KeyCode::Delete | KeyCode::Char('d') => {
            if let Some(id) = session.selected_history_id() {
                session.dispatch(Action::HistoryEntryDeleted(id));
            }
        }
        KeyCode::Char('c') if len > 0 => session.ui.confirm_clear = true,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::testing::StubBackend;
    use crate::tui::session::tests::{GOOD, session, settle};
    use std::sync::Arc;

    fn press(session: &mut Session, code: KeyCode) {
        handle_key(session, KeyEvent::new(code, KeyModifiers::NONE));
        session.pump();
    }

    fn ctrl(session: &mut Session, c: char) {
        handle_key(session, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
        session.pump();
    }

    fn type_text(session: &mut Session, text: &str) {
        for c in text.chars() {
            press(session, KeyCode::Char(c));
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn tab_cycles_focus() {
        let mut s = session(Arc::new(StubBackend::replying(None)));
        assert_eq!(s.ui.focus, Focus::Editor);
        press(&mut s, KeyCode::Tab);
        assert_eq!(s.ui.focus, Focus::History);
        press(&mut s, KeyCode::Tab);
        assert_eq!(s.ui.focus, Focus::Tones);
        press(&mut s, KeyCode::BackTab);
        assert_eq!(s.ui.focus, Focus::History);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn tone_picker_selects_by_arrow_and_number() {
        let mut s = session(Arc::new(StubBackend::replying(None)));
        s.ui.focus = Focus::Tones;
        press(&mut s, KeyCode::Down);
        assert_eq!(s.state().tone, Tone::Formal);
        press(&mut s, KeyCode::Char('6'));
        assert_eq!(s.state().tone, Tone::Diplomatic);
        press(&mut s, KeyCode::Up);
        assert_eq!(s.state().tone, Tone::Friendly);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn ctrl_s_on_blank_draft_sends_nothing() {
        let backend = Arc::new(StubBackend::replying(Some(GOOD)));
        let mut s = session(Arc::clone(&backend));
        ctrl(&mut s, 's');
        type_text(&mut s, "ab");
        press(&mut s, KeyCode::Backspace);
        press(&mut s, KeyCode::Backspace);
        assert!(s.state().draft.is_empty());
        ctrl(&mut s, 's');
        assert!(!s.state().is_submitting());
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn formatting_shortcuts_reach_the_draft() {
        let mut s = session(Arc::new(StubBackend::replying(None)));
        type_text(&mut s, "hi");
        ctrl(&mut s, 'a');
        ctrl(&mut s, 'b');
        assert_eq!(s.state().draft, "<div><b>hi</b></div>");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn history_delete_and_guarded_clear() {
        let mut s = session(Arc::new(StubBackend::replying(Some(GOOD))));
        for draft in ["one", "two"] {
            ctrl(&mut s, 'r');
            type_text(&mut s, draft);
            ctrl(&mut s, 's');
            settle(&mut s);
        }
        assert_eq!(s.controller.history().len(), 2);

        s.ui.focus = Focus::History;
        press(&mut s, KeyCode::Char('d'));
        assert_eq!(s.controller.history().len(), 1);
        assert_eq!(s.controller.history().entries()[0].original, "<div>one</div>");

        press(&mut s, KeyCode::Char('c'));
        assert!(s.ui.confirm_clear);
        press(&mut s, KeyCode::Esc);
        assert_eq!(s.controller.history().len(), 1);

        press(&mut s, KeyCode::Char('c'));
        press(&mut s, KeyCode::Char('y'));
        assert!(s.controller.history().is_empty());
        assert!(!s.ui.confirm_clear);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn page_keys_scroll_the_result() {
        let mut s = session(Arc::new(StubBackend::replying(Some(GOOD))));
        s.ui.result_scroll_max.set(7);
        press(&mut s, KeyCode::PageDown);
        assert_eq!(s.ui.result_scroll, 5);
        press(&mut s, KeyCode::PageDown);
        assert_eq!(s.ui.result_scroll, 7);
        press(&mut s, KeyCode::PageUp);
        assert_eq!(s.ui.result_scroll, 2);

        type_text(&mut s, "hi");
        ctrl(&mut s, 's');
        settle(&mut s);
        assert_eq!(s.ui.result_scroll, 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn ctrl_q_quits() {
        let mut s = session(Arc::new(StubBackend::replying(None)));
        ctrl(&mut s, 'q');
        assert!(s.ui.should_quit);
    }
}
