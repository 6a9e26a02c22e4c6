use crate::application::{App, AppMode, FocusTarget, SubmittedApplication};
use crate::domain::{FieldId, FieldKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.phase.submitted() {
        Some(application) => render_summary(f, application, chunks[1]),
        None => render_form(f, app, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);

    if app.mode == AppMode::Help {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let state = if app.phase.is_submitted() { "Submitted" } else { "Editing" };
    let header = Paragraph::new(format!("Job Application Form | {state}"))
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().bg(Color::Blue).fg(Color::White)
    } else {
        Style::default()
    }
}

/// Builds the form lines and returns them with the index of the focused line.
fn form_lines(app: &App) -> (Vec<Line<'static>>, usize) {
    let draft = app.draft();
    let errors = app.phase.errors();
    let focused = app.focused();
    let mut lines = Vec::new();
    let mut focused_line = 0;

    for field in draft.visible_fields() {
        let is_focused = focused == Some(FocusTarget::Field(field));
        if is_focused {
            focused_line = lines.len();
        }
        let label = Span::styled(
            format!("{}: ", field.label()),
            Style::default().fg(Color::Yellow),
        );

        match field.kind() {
            FieldKind::Select => {
                let value = draft
                    .position
                    .map(|position| position.label())
                    .unwrap_or("Select a position");
                lines.push(Line::from(vec![
                    label,
                    Span::styled(format!("< {value} >"), focus_style(is_focused)),
                ]));
            }
            FieldKind::Checkboxes => {
                lines.push(Line::from(label));
                for (index, skill) in app.skills.iter().enumerate() {
                    let skill_focused = focused == Some(FocusTarget::Skill(index));
                    if skill_focused {
                        focused_line = lines.len();
                    }
                    let mark = if draft.has_skill(skill) { "x" } else { " " };
                    lines.push(Line::from(vec![
                        Span::raw("  "),
                        Span::styled(format!("[{mark}] {skill}"), focus_style(skill_focused)),
                    ]));
                }
            }
            _ => {
                let editing = is_focused && app.mode == AppMode::Editing;
                let value = if editing {
                    app.input.clone()
                } else {
                    draft.text(field).unwrap_or_default().to_string()
                };
                let shown = if value.is_empty() && !editing {
                    placeholder(field).to_string()
                } else {
                    value
                };
                let style = if editing {
                    Style::default().fg(Color::Green).add_modifier(Modifier::UNDERLINED)
                } else if draft.text(field).is_some_and(str::is_empty) {
                    focus_style(is_focused).add_modifier(Modifier::DIM)
                } else {
                    focus_style(is_focused)
                };
                lines.push(Line::from(vec![label, Span::styled(shown, style)]));
            }
        }

        if let Some(message) = errors.and_then(|errors| errors.get(field)) {
            lines.push(Line::from(Span::styled(
                format!("  {message}"),
                Style::default().fg(Color::Red),
            )));
        }
    }

    lines.push(Line::raw(""));
    let submit_focused = focused == Some(FocusTarget::Submit);
    if submit_focused {
        focused_line = lines.len();
    }
    lines.push(Line::from(Span::styled(
        "[ Submit ]",
        focus_style(submit_focused).add_modifier(Modifier::BOLD),
    )));

    (lines, focused_line)
}

fn placeholder(field: FieldId) -> &'static str {
    match field.kind() {
        FieldKind::DateTime => "YYYY-MM-DDTHH:MM",
        FieldKind::Phone => "10 digits",
        FieldKind::Number => "years",
        _ => "",
    }
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let (lines, focused_line) = form_lines(app);
    let visible_rows = area.height.saturating_sub(2) as usize;
    let scroll = (focused_line + 1).saturating_sub(visible_rows);

    let form = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Application"))
        .scroll((scroll as u16, 0));
    f.render_widget(form, area);
}

fn render_summary(f: &mut Frame, application: &SubmittedApplication, area: Rect) {
    let lines: Vec<Line> = application
        .summary()
        .lines
        .iter()
        .map(|line| {
            Line::from(vec![
                Span::raw(format!("{}: ", line.label)),
                Span::styled(
                    line.value.clone(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();

    let summary = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Summary"));
    f.render_widget(summary, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else if app.phase.is_submitted() {
                "Ctrl+S: save JSON | Ctrl+E: export CSV | y: copy | F1/?: help | q: quit".to_string()
            } else {
                "↑↓/Tab: move | Enter: edit/select | ←→: position | Space: toggle | F1/?: help | q: quit".to_string()
            }
        }
        AppMode::Editing => format!("Editing: {} (Enter to save, Esc to cancel)", app.input),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Editing => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(input, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("jobform Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"JOB APPLICATION FORM

=== FILLING IN THE FORM ===
↑↓ / Tab / Shift+Tab   Move between fields (j/k also work)
Enter / F2             Edit the focused text field
Enter (while editing)  Keep the new value
Esc (while editing)    Discard the change
←→ or Enter            Change the position on the position selector
Space / Enter          Tick or untick the focused skill
Enter on [ Submit ]    Validate and submit the application

=== POSITIONS ===
Developer       Also asks for relevant experience (years, > 0)
Designer        Also asks for relevant experience and a portfolio URL
Manager         Also asks for management experience

=== REQUIRED FIELDS ===
Full Name, Email, Phone Number (10 digits), at least one skill
and a preferred interview time are always required.
Errors appear under each field after a submit attempt and are
refreshed on the next submit.

=== AFTER SUBMITTING ===
Ctrl+S          Save the application as JSON (application.json)
Ctrl+E          Export the summary as CSV (application.csv)
y               Copy the summary to the clipboard
                Files go to the directory given by --output-dir

=== GENERAL ===
F1 or ?         Show this help
q / Ctrl+C      Quit"#;
