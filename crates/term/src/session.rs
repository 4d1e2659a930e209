//! Raw-mode terminal session guard.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{cursor, terminal, QueueableCommand};

/// Owns the terminal mode for the duration of a game. `enter` switches to
/// the alternate screen in raw mode, `exit` restores everything. Drivers
/// call `exit` on every path out; `Drop` is a backstop for panics.
pub struct TerminalSession {
    stdout: io::Stdout,
    active: bool,
}

impl TerminalSession {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            active: false,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?;
        self.stdout.flush()?;
        self.active = true;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.stdout
            .queue(crossterm::style::ResetColor)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn stdout(&mut self) -> &mut io::Stdout {
        &mut self.stdout
    }
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
