//! Terminal setup and teardown.

use std::io::{self, Stdout, Write};
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

/// Puts the terminal into raw mode on the alternate screen and restores it
/// when dropped, so every exit path leaves a usable shell behind.
pub struct TerminalGuard<W: Write> {
    writer: W,
    raw_mode: bool,
    restored: bool,
}

impl TerminalGuard<Stdout> {
    /// Enables raw mode and switches stdout to the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the terminal cannot be configured. Any part of
    /// the setup that already succeeded is undone before returning.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut guard = TerminalGuard {
            writer: io::stdout(),
            raw_mode: true,
            restored: false,
        };
        execute!(guard.writer, EnterAlternateScreen, EnableMouseCapture)?;
        Ok(guard)
    }
}

impl<W: Write> TerminalGuard<W> {
    /// Wraps a writer without touching raw mode.
    pub fn with_writer(writer: W) -> Self {
        TerminalGuard {
            writer,
            raw_mode: false,
            restored: false,
        }
    }

    /// Leaves the alternate screen and disables raw mode. Calling it again
    /// does nothing.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        let raw = if self.raw_mode { disable_raw_mode() } else { Ok(()) };
        execute!(self.writer, LeaveAlternateScreen, DisableMouseCapture, Show)?;
        raw
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            tracing::warn!(%err, "terminal restore failed");
        }
    }
}
