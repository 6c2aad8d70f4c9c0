use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Raw mode + alternate screen for the lifetime of the value.
///
/// On drop, this type restores terminal state best-effort.
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    /// Enters raw mode and switches to the alternate screen.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        Ok(Self { _private: () })
    }

    /// Creates a ratatui terminal drawing to stdout.
    pub fn terminal(&self) -> io::Result<AppTerminal> {
        Terminal::new(CrosstermBackend::new(io::stdout()))
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(error) = restore_terminal() {
            tracing::error!(%error, "failed to restore terminal");
        }
    }
}

/// Leaves raw mode and the alternate screen; safe to call more than once.
pub fn restore_terminal() -> io::Result<()> {
    let raw_mode = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)?;
    raw_mode
}
