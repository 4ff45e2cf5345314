mod handlers;
mod render;

use anyhow::Result;
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::time::Duration;

use super::session::Session;
use super::widgets::Spinner;

pub(super) fn run_app(mut session: Session) -> Result<()> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut spinner = Spinner::new();
    let result = main_loop(&mut terminal, &mut session, &mut spinner);

    terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut Session,
    spinner: &mut Spinner,
) -> Result<()> {
    loop {
        session.pump();
        terminal.draw(|frame| {
            let area = frame.area();
            render::draw_ui(area, frame.buffer_mut(), session, spinner);
        })?;

        if session.ui.should_quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handlers::handle_key(session, key);
                }
                Event::Paste(text) => handlers::handle_paste(session, &text),
                _ => {}
            }
        } else {
            spinner.advance();
        }
    }
}
