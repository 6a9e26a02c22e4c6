use crate::application::{App, AppMode, FocusTarget};
use crate::infrastructure::{FileRepository, SummaryExporter, copy_summary};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal if app.phase.is_submitted() => {
                Self::handle_summary_mode(app, key, modifiers)
            }
            AppMode::Normal => Self::handle_form_mode(app, key),
            AppMode::Editing => Self::handle_editing_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_form_mode(app: &mut App, key: KeyCode) {
        app.status_message = None;

        match key {
            KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => app.focus_previous(),
            KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => app.focus_next(),
            KeyCode::Left => app.cycle_position(false),
            KeyCode::Right => app.cycle_position(true),
            KeyCode::Enter | KeyCode::F(2) => app.activate(),
            KeyCode::Char(' ') => {
                if matches!(app.focused(), Some(FocusTarget::Skill(_))) {
                    app.toggle_focused_skill();
                } else {
                    app.activate();
                }
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_summary_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            let Some(application) = app.phase.submitted() else {
                return;
            };
            match key {
                KeyCode::Char('s') => {
                    let result = FileRepository::save_application(application, &app.json_path);
                    app.set_save_result(result);
                }
                KeyCode::Char('e') => {
                    let result = SummaryExporter::export_csv(application.summary(), &app.csv_path);
                    app.set_csv_export_result(result);
                }
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Char('y') => {
                if let Some(application) = app.phase.submitted() {
                    let result = copy_summary(application.summary());
                    app.set_clipboard_result(result);
                }
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.mode = AppMode::Help;
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_editing_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => app.finish_editing(),
            KeyCode::Esc => app.cancel_editing(),
            KeyCode::Backspace => app.delete_before_cursor(),
            KeyCode::Delete => app.delete_at_cursor(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            KeyCode::Home => app.move_cursor_home(),
            KeyCode::End => app.move_cursor_end(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}

/// Whether a key press should end the event loop.
pub fn is_quit_key(app: &App, key: KeyCode, modifiers: KeyModifiers) -> bool {
    if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
        return true;
    }
    key == KeyCode::Char('q') && app.mode == AppMode::Normal
}
