//! jobform - Terminal Job Application Form
//!
//! Fill in a job application in the terminal. Position-specific fields
//! appear as the position changes, validation runs on submit, and a
//! submitted application can be saved as JSON, exported as CSV or copied.

use std::io;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use jobform::application::{App, Config};
use jobform::domain::ApplicationDraft;
use jobform::infrastructure::{telemetry, FileRepository};
use jobform::presentation::{is_quit_key, render_ui, InputHandler, TerminalGuard};

/// Entry point for the jobform terminal application.
///
/// Reads configuration, starts file logging, optionally pre-fills the form
/// from a draft file, then runs the event loop until the user quits.
///
/// # Errors
///
/// Returns an error if logging cannot be set up, the draft file cannot be
/// read, or the terminal interface fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    let _log_guard = telemetry::init(&config.log_dir, &config.log_level)?;

    let draft = match &config.draft {
        Some(path) => FileRepository::load_draft(path)?,
        None => ApplicationDraft::default(),
    };
    tracing::info!(skills = ?config.skills(), output_dir = %config.output_dir.display(), "starting form");

    let mut guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(&config, draft);
    let res = run_app(&mut terminal, &mut app);

    guard.restore()?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(%err, "terminal failure");
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// Renders the form and dispatches key presses until a quit key is pressed.
///
/// # Errors
///
/// Returns an IO error if terminal operations fail.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                if is_quit_key(app, key.code, key.modifiers) {
                    tracing::info!(submitted = app.phase.is_submitted(), "quitting");
                    return Ok(());
                }
                InputHandler::handle_key_event(app, key.code, key.modifiers);
            }
        }
    }
}
