use std::io::Stdout;
use std::io::stdout;
use std::ops::Deref;
use std::ops::DerefMut;

use crossterm::event::DisableBracketedPaste;
use crossterm::event::EnableBracketedPaste;
use crossterm::execute;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Terminal in raw mode on the alternate screen; restored on drop, including
/// when the event loop returns early with an error.
pub(crate) struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

pub(crate) fn init() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    if let Err(e) = execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(Tui { terminal })
}

impl Deref for Tui {
    type Target = Terminal<CrosstermBackend<Stdout>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for Tui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = execute!(
            self.terminal.backend_mut(),
            DisableBracketedPaste,
            LeaveAlternateScreen
        ) {
            tracing::warn!(error = %e, "failed to leave alternate screen");
        }
        if let Err(e) = disable_raw_mode() {
            tracing::warn!(error = %e, "failed to disable raw mode");
        }
        let _ = self.terminal.show_cursor();
    }
}
