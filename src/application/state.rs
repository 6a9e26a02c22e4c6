//! Application state management for the job application form.
//!
//! This module contains the form lifecycle, focus handling and mode
//! management for the terminal user interface.

use super::config::Config;
use crate::domain::{
    validate, ApplicationDraft, DomainResult, FieldId, FieldUpdate, Position, Summary,
    ValidationErrors,
};
use crate::infrastructure::{ClipboardError, PersistenceError};
use std::path::PathBuf;

/// Represents the current mode of the application.
///
/// The mode determines how key presses are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Navigation between form elements
    Normal,
    /// Typing into the focused text field
    Editing,
    /// Help screen is displayed
    Help,
}

/// An application that passed validation. The draft can no longer change.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedApplication {
    draft: ApplicationDraft,
    summary: Summary,
}

impl SubmittedApplication {
    fn new(draft: ApplicationDraft) -> Self {
        let summary = Summary::from_draft(&draft);
        Self { draft, summary }
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}

/// Result of a submit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected { error_count: usize },
    AlreadySubmitted,
}

/// Lifecycle of the form: editable with the last error set, or submitted.
///
/// # Examples
///
/// ```
/// use jobform::application::{FormPhase, SubmitOutcome};
/// use jobform::domain::ApplicationDraft;
///
/// let mut phase = FormPhase::new(ApplicationDraft::default());
/// assert_eq!(phase.submit(), SubmitOutcome::Rejected { error_count: 5 });
/// assert!(!phase.is_submitted());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FormPhase {
    Editing {
        draft: ApplicationDraft,
        errors: ValidationErrors,
    },
    Submitted(SubmittedApplication),
}

impl Default for FormPhase {
    fn default() -> Self {
        FormPhase::new(ApplicationDraft::default())
    }
}

impl FormPhase {
    pub fn new(draft: ApplicationDraft) -> Self {
        FormPhase::Editing {
            draft,
            errors: ValidationErrors::default(),
        }
    }

    pub fn draft(&self) -> &ApplicationDraft {
        match self {
            FormPhase::Editing { draft, .. } => draft,
            FormPhase::Submitted(application) => application.draft(),
        }
    }

    /// Errors from the last submit attempt; `None` once submitted.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            FormPhase::Editing { errors, .. } => Some(errors),
            FormPhase::Submitted(_) => None,
        }
    }

    pub fn submitted(&self) -> Option<&SubmittedApplication> {
        match self {
            FormPhase::Submitted(application) => Some(application),
            FormPhase::Editing { .. } => None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, FormPhase::Submitted(_))
    }

    /// Applies a field update while the form is editable.
    ///
    /// Returns `Ok(false)` when the form is already submitted and the update
    /// was ignored. Errors from the previous submit stay until the next one.
    pub fn apply(&mut self, update: FieldUpdate) -> DomainResult<bool> {
        match self {
            FormPhase::Editing { draft, .. } => {
                tracing::debug!(?update, "field update");
                draft.apply(update)?;
                Ok(true)
            }
            FormPhase::Submitted(_) => {
                tracing::warn!(?update, "update ignored after submission");
                Ok(false)
            }
        }
    }

    /// Validates the draft, storing the errors, and freezes it when there are none.
    pub fn submit(&mut self) -> SubmitOutcome {
        let FormPhase::Editing { draft, errors } = self else {
            return SubmitOutcome::AlreadySubmitted;
        };

        let found = validate(draft);
        if found.is_empty() {
            let draft = std::mem::take(draft);
            *self = FormPhase::Submitted(SubmittedApplication::new(draft));
            tracing::info!("application submitted");
            SubmitOutcome::Accepted
        } else {
            let error_count = found.len();
            tracing::info!(
                error_count,
                fields = ?found.fields().collect::<Vec<_>>(),
                "submission rejected"
            );
            *errors = found;
            SubmitOutcome::Rejected { error_count }
        }
    }
}

/// A focusable element of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Field(FieldId),
    /// Index into [`App::skills`]
    Skill(usize),
    Submit,
}

/// Main application state containing the form and UI state.
///
/// # Examples
///
/// ```
/// use jobform::application::{App, AppMode};
///
/// let app = App::default();
/// assert_eq!(app.focus, 0);
/// assert_eq!(app.mode, AppMode::Normal);
/// ```
#[derive(Debug)]
pub struct App {
    /// Form lifecycle and data
    pub phase: FormPhase,
    /// Current application mode
    pub mode: AppMode,
    /// Skill labels offered as checkboxes
    pub skills: Vec<String>,
    /// Index of the focused element in [`App::focus_targets`]
    pub focus: usize,
    /// Input buffer for editing mode
    pub input: String,
    /// Cursor position within the input buffer, in characters
    pub cursor_position: usize,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Where exports are written
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
}

impl Default for App {
    fn default() -> Self {
        App::new(&Config::default(), ApplicationDraft::default())
    }
}

impl App {
    pub fn new(config: &Config, draft: ApplicationDraft) -> Self {
        Self {
            phase: FormPhase::new(draft),
            mode: AppMode::Normal,
            skills: config.skills(),
            focus: 0,
            input: String::new(),
            cursor_position: 0,
            help_scroll: 0,
            status_message: None,
            json_path: config.json_path(),
            csv_path: config.csv_path(),
        }
    }

    pub fn draft(&self) -> &ApplicationDraft {
        self.phase.draft()
    }

    /// Elements that can take focus, in display order. Empty after submission.
    pub fn focus_targets(&self) -> Vec<FocusTarget> {
        if self.phase.is_submitted() {
            return Vec::new();
        }

        let mut targets = Vec::new();
        for field in self.draft().visible_fields() {
            if field == FieldId::AdditionalSkills {
                targets.extend((0..self.skills.len()).map(FocusTarget::Skill));
            } else {
                targets.push(FocusTarget::Field(field));
            }
        }
        targets.push(FocusTarget::Submit);
        targets
    }

    pub fn focused(&self) -> Option<FocusTarget> {
        self.focus_targets().get(self.focus).copied()
    }

    pub fn focus_next(&mut self) {
        let count = self.focus_targets().len();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    pub fn focus_previous(&mut self) {
        let count = self.focus_targets().len();
        if count > 0 {
            self.focus = (self.focus + count - 1) % count;
        }
    }

    fn focus_on(&mut self, target: FocusTarget) {
        if let Some(index) = self.focus_targets().iter().position(|t| *t == target) {
            self.focus = index;
        } else {
            self.clamp_focus();
        }
    }

    fn clamp_focus(&mut self) {
        let count = self.focus_targets().len();
        self.focus = self.focus.min(count.saturating_sub(1));
    }

    /// Applies an update and keeps focus on the same element when the set of
    /// visible elements changes.
    pub fn apply_update(&mut self, update: FieldUpdate) {
        let focused = self.focused();
        match self.phase.apply(update) {
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(%err, "rejected field update");
                self.status_message = Some(err.to_string());
            }
        }
        match focused {
            Some(target) => self.focus_on(target),
            None => self.clamp_focus(),
        }
    }

    /// Performs the primary action of the focused element.
    pub fn activate(&mut self) {
        match self.focused() {
            Some(FocusTarget::Field(FieldId::Position)) => self.cycle_position(true),
            Some(FocusTarget::Field(field)) if field.is_text() => self.start_editing(),
            Some(FocusTarget::Skill(_)) => self.toggle_focused_skill(),
            Some(FocusTarget::Submit) => self.submit(),
            _ => {}
        }
    }

    pub fn cycle_position(&mut self, forward: bool) {
        if self.focused() != Some(FocusTarget::Field(FieldId::Position)) {
            return;
        }
        let current = self.draft().position;
        let next = if forward {
            Position::cycle_next(current)
        } else {
            Position::cycle_previous(current)
        };
        self.apply_update(FieldUpdate::Position(next));
    }

    pub fn toggle_focused_skill(&mut self) {
        let Some(FocusTarget::Skill(index)) = self.focused() else {
            return;
        };
        let Some(label) = self.skills.get(index).cloned() else {
            return;
        };
        let checked = !self.draft().has_skill(&label);
        self.apply_update(FieldUpdate::Skill { label, checked });
    }

    /// Switches to editing mode for the focused text field.
    ///
    /// Loads the field's value into the input buffer and positions the cursor
    /// at the end.
    pub fn start_editing(&mut self) {
        let Some(FocusTarget::Field(field)) = self.focused() else {
            return;
        };
        let Some(value) = self.draft().text(field) else {
            return;
        };
        self.input = value.to_string();
        self.cursor_position = self.input.chars().count();
        self.mode = AppMode::Editing;
        self.status_message = None;
    }

    /// Commits the input buffer to the focused field and moves focus down.
    pub fn finish_editing(&mut self) {
        if let Some(FocusTarget::Field(field)) = self.focused() {
            let value = std::mem::take(&mut self.input);
            self.apply_update(FieldUpdate::Text { field, value });
            self.focus_next();
        }
        self.cancel_editing();
    }

    /// Leaves editing mode without changing the draft.
    pub fn cancel_editing(&mut self) {
        self.mode = AppMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    fn editing_field(&self) -> Option<FieldId> {
        match self.focused() {
            Some(FocusTarget::Field(field)) if self.mode == AppMode::Editing => Some(field),
            _ => None,
        }
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.input
            .char_indices()
            .nth(chars)
            .map(|(offset, _)| offset)
            .unwrap_or(self.input.len())
    }

    /// Inserts a typed character when the focused field's widget accepts it.
    pub fn insert_char(&mut self, ch: char) {
        let Some(field) = self.editing_field() else {
            return;
        };
        if !field.accepts_char(ch) {
            return;
        }
        let offset = self.byte_offset(self.cursor_position);
        self.input.insert(offset, ch);
        self.cursor_position += 1;
    }

    pub fn delete_before_cursor(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let offset = self.byte_offset(self.cursor_position);
            self.input.remove(offset);
        }
    }

    pub fn delete_at_cursor(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            let offset = self.byte_offset(self.cursor_position);
            self.input.remove(offset);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.input.chars().count();
    }

    /// Runs validation. On failure focus jumps to the first failing field.
    pub fn submit(&mut self) {
        match self.phase.submit() {
            SubmitOutcome::Accepted => {
                self.mode = AppMode::Normal;
                self.focus = 0;
                self.status_message = Some("Application submitted".to_string());
            }
            SubmitOutcome::Rejected { error_count } => {
                let first = self
                    .phase
                    .errors()
                    .and_then(|errors| errors.fields().next());
                if let Some(field) = first {
                    let target = if field == FieldId::AdditionalSkills {
                        FocusTarget::Skill(0)
                    } else {
                        FocusTarget::Field(field)
                    };
                    self.focus_on(target);
                }
                let noun = if error_count == 1 { "field needs" } else { "fields need" };
                self.status_message = Some(format!("{error_count} {noun} attention"));
            }
            SubmitOutcome::AlreadySubmitted => {}
        }
    }

    /// Processes the result of saving the application as JSON.
    pub fn set_save_result(&mut self, result: Result<PathBuf, PersistenceError>) {
        self.status_message = Some(match result {
            Ok(path) => format!("Saved to {}", path.display()),
            Err(error) => {
                tracing::warn!(%error, "save failed");
                format!("Save failed: {error}")
            }
        });
    }

    /// Processes the result of exporting the summary as CSV.
    pub fn set_csv_export_result(&mut self, result: Result<PathBuf, PersistenceError>) {
        self.status_message = Some(match result {
            Ok(path) => format!("Exported to {}", path.display()),
            Err(error) => {
                tracing::warn!(%error, "export failed");
                format!("Export failed: {error}")
            }
        });
    }

    pub fn set_clipboard_result(&mut self, result: Result<(), ClipboardError>) {
        self.status_message = Some(match result {
            Ok(()) => "Summary copied to clipboard".to_string(),
            Err(error) => {
                tracing::warn!(%error, "clipboard copy failed");
                format!("Copy failed: {error}")
            }
        });
    }
}
