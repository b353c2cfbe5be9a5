use crate::app::Notepad;
use crate::error::{NotepadError, Result, UiError};
use crate::frontend::Session;
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

pub struct TuiApplication {
    session: Session,
}

impl TuiApplication {
    pub fn new() -> Result<Self> {
        let start_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let notepad = Notepad::new();
        log::info!(
            "starting in {} (system clipboard: {})",
            start_dir.display(),
            notepad.clipboard().is_system_backed()
        );
        Ok(Self {
            session: Session::new(notepad, start_dir),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        enter_terminal()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = leave_terminal();
                return Err(terminal_init_error(err));
            }
        };

        let loop_result = self.event_loop(&mut terminal);
        let show_cursor_result = terminal.show_cursor().map_err(|err| terminal_error("show cursor", err));
        drop(terminal);
        let cleanup_result = leave_terminal();

        loop_result.and(show_cursor_result).and(cleanup_result)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.session.is_running() {
            if let Some(title) = self.session.take_title() {
                execute!(stdout(), SetTitle(&title)).map_err(|err| terminal_error("set title", err))?;
            }
            self.session
                .render(terminal)
                .map_err(|err| terminal_error("render", err))?;

            if event::poll(Duration::from_millis(100)).map_err(|err| terminal_error("event poll", err))? {
                match event::read().map_err(|err| terminal_error("event read", err))? {
                    Event::Key(key_event) => self.session.handle_key(key_event),
                    Event::Paste(text) => self.session.handle_paste(&text),
                    Event::Resize(_, _) => {}
                    Event::Mouse(_) | Event::FocusGained | Event::FocusLost => {}
                }
            }
        }

        log::info!("event loop finished");
        Ok(())
    }
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode().map_err(terminal_init_error)?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableBracketedPaste).map_err(terminal_init_error)?;
    Ok(())
}

fn leave_terminal() -> Result<()> {
    let mut out = stdout();
    execute!(out, DisableBracketedPaste, LeaveAlternateScreen)
        .map_err(|err| terminal_error("leave alternate screen", err))?;
    disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err))?;
    Ok(())
}

fn terminal_init_error(err: impl std::fmt::Display) -> NotepadError {
    NotepadError::Ui(UiError::TerminalInit {
        message: err.to_string(),
    })
}

fn terminal_error(context: &str, err: impl std::fmt::Display) -> NotepadError {
    NotepadError::Ui(UiError::RenderingFailed {
        component: format!("{}: {}", context, err),
    })
}
