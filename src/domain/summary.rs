use super::models::{ApplicationDraft, FieldId};
use serde::Serialize;

/// One labelled value of the post-submission summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

/// Read-only view of a submitted application.
///
/// Position-gated lines only appear for the position that requires them.
///
/// # Examples
///
/// ```
/// use jobform::domain::{ApplicationDraft, Position, Summary};
///
/// let draft = ApplicationDraft {
///     position: Some(Position::Developer),
///     relevant_experience: "4".to_string(),
///     ..ApplicationDraft::default()
/// };
/// let summary = Summary::from_draft(&draft);
/// assert_eq!(summary.value_of("Relevant Experience"), Some("4 years"));
/// assert_eq!(summary.value_of("Portfolio URL"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub lines: Vec<SummaryLine>,
}

impl Summary {
    pub fn from_draft(draft: &ApplicationDraft) -> Self {
        let lines = draft
            .visible_fields()
            .into_iter()
            .map(|field| SummaryLine {
                label: summary_label(field),
                value: summary_value(draft, field),
            })
            .collect();
        Self { lines }
    }

    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.value.as_str())
    }

    /// Plain-text rendering, one `Label: value` pair per line.
    pub fn to_text(&self) -> String {
        let mut text = String::from("Summary\n");
        for line in &self.lines {
            text.push_str(line.label);
            text.push_str(": ");
            text.push_str(&line.value);
            text.push('\n');
        }
        text
    }
}

fn summary_label(field: FieldId) -> &'static str {
    match field {
        FieldId::Position => "Position",
        FieldId::RelevantExperience => "Relevant Experience",
        other => other.label(),
    }
}

fn summary_value(draft: &ApplicationDraft, field: FieldId) -> String {
    match field {
        FieldId::Position => draft
            .position
            .map(|position| position.label().to_string())
            .unwrap_or_default(),
        FieldId::RelevantExperience => format!("{} years", draft.relevant_experience),
        FieldId::AdditionalSkills => draft.additional_skills.join(", "),
        other => draft.text(other).unwrap_or_default().to_string(),
    }
}
