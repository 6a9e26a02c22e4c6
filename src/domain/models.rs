use super::errors::{DomainError, DomainResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Skill labels offered as checkboxes when no extra labels are configured.
pub const DEFAULT_SKILLS: [&str; 3] = ["JavaScript", "CSS", "Python"];

/// Identifies one field of the application form.
///
/// Variants are declared in form order, so sorting by `FieldId` yields the
/// order in which fields are rendered and errors are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldId {
    #[serde(rename = "fullName")]
    FullName,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "phoneNumber")]
    PhoneNumber,
    #[serde(rename = "position")]
    Position,
    #[serde(rename = "relevantExperience")]
    RelevantExperience,
    #[serde(rename = "portfolioURL")]
    PortfolioUrl,
    #[serde(rename = "managementExperience")]
    ManagementExperience,
    #[serde(rename = "additionalSkills")]
    AdditionalSkills,
    #[serde(rename = "interviewTime")]
    InterviewTime,
}

/// The kind of input widget a field is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    Number,
    DateTime,
    Select,
    Checkboxes,
}

impl FieldId {
    pub const ALL: [FieldId; 9] = [
        FieldId::FullName,
        FieldId::Email,
        FieldId::PhoneNumber,
        FieldId::Position,
        FieldId::RelevantExperience,
        FieldId::PortfolioUrl,
        FieldId::ManagementExperience,
        FieldId::AdditionalSkills,
        FieldId::InterviewTime,
    ];

    /// The camelCase name the field is addressed by.
    pub fn name(self) -> &'static str {
        match self {
            FieldId::FullName => "fullName",
            FieldId::Email => "email",
            FieldId::PhoneNumber => "phoneNumber",
            FieldId::Position => "position",
            FieldId::RelevantExperience => "relevantExperience",
            FieldId::PortfolioUrl => "portfolioURL",
            FieldId::ManagementExperience => "managementExperience",
            FieldId::AdditionalSkills => "additionalSkills",
            FieldId::InterviewTime => "interviewTime",
        }
    }

    /// Human-readable label shown next to the input and in the summary.
    pub fn label(self) -> &'static str {
        match self {
            FieldId::FullName => "Full Name",
            FieldId::Email => "Email",
            FieldId::PhoneNumber => "Phone Number",
            FieldId::Position => "Applying for Position",
            FieldId::RelevantExperience => "Relevant Experience (years)",
            FieldId::PortfolioUrl => "Portfolio URL",
            FieldId::ManagementExperience => "Management Experience",
            FieldId::AdditionalSkills => "Additional Skills",
            FieldId::InterviewTime => "Preferred Interview Time",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FieldId::FullName | FieldId::PortfolioUrl | FieldId::ManagementExperience => {
                FieldKind::Text
            }
            FieldId::Email => FieldKind::Email,
            FieldId::PhoneNumber => FieldKind::Phone,
            FieldId::RelevantExperience => FieldKind::Number,
            FieldId::InterviewTime => FieldKind::DateTime,
            FieldId::Position => FieldKind::Select,
            FieldId::AdditionalSkills => FieldKind::Checkboxes,
        }
    }

    /// Whether the field holds free text that is edited through an input buffer.
    pub fn is_text(self) -> bool {
        !matches!(self.kind(), FieldKind::Select | FieldKind::Checkboxes)
    }

    /// Whether the field's presence depends on the selected position.
    pub fn is_conditional(self) -> bool {
        Position::ALL
            .iter()
            .any(|position| position.conditional_fields().contains(&self))
    }

    /// Whether a typed character is acceptable for this field's widget.
    pub fn accepts_char(self, ch: char) -> bool {
        match self.kind() {
            FieldKind::Phone => ch.is_ascii_digit(),
            FieldKind::Number => ch.is_ascii_digit() || ch == '.',
            _ => !ch.is_control(),
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldId {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        FieldId::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| DomainError::UnknownField(s.to_string()))
    }
}

/// The job role an applicant is applying for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Developer,
    Designer,
    Manager,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Developer, Position::Designer, Position::Manager];

    pub fn label(self) -> &'static str {
        match self {
            Position::Developer => "Developer",
            Position::Designer => "Designer",
            Position::Manager => "Manager",
        }
    }

    /// Fields that become required, and visible, when this position is selected.
    pub fn conditional_fields(self) -> &'static [FieldId] {
        match self {
            Position::Developer => &[FieldId::RelevantExperience],
            Position::Designer => &[FieldId::RelevantExperience, FieldId::PortfolioUrl],
            Position::Manager => &[FieldId::ManagementExperience],
        }
    }

    /// Parses a selector value where the empty string means "no position".
    /// Labels must match exactly.
    pub fn parse_choice(value: &str) -> DomainResult<Option<Position>> {
        if value.is_empty() {
            Ok(None)
        } else {
            value.parse().map(Some)
        }
    }

    /// Cycles the selector forward: unset, Developer, Designer, Manager, unset.
    pub fn cycle_next(current: Option<Position>) -> Option<Position> {
        match current {
            None => Some(Position::Developer),
            Some(Position::Developer) => Some(Position::Designer),
            Some(Position::Designer) => Some(Position::Manager),
            Some(Position::Manager) => None,
        }
    }

    pub fn cycle_previous(current: Option<Position>) -> Option<Position> {
        match current {
            None => Some(Position::Manager),
            Some(Position::Manager) => Some(Position::Designer),
            Some(Position::Designer) => Some(Position::Developer),
            Some(Position::Developer) => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Position {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        Position::ALL
            .into_iter()
            .find(|position| position.label() == s)
            .ok_or_else(|| DomainError::UnknownPosition(s.to_string()))
    }
}

/// A single change to the draft, as produced by one input event.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Text { field: FieldId, value: String },
    Position(Option<Position>),
    Skill { label: String, checked: bool },
}

impl FieldUpdate {
    /// Builds an update from a field name and its new raw value.
    ///
    /// `position` values are parsed as selector labels; skills cannot be set
    /// from a single text value and must be toggled instead.
    pub fn parse(name: &str, value: &str) -> DomainResult<FieldUpdate> {
        let field: FieldId = name.parse()?;
        match field {
            FieldId::Position => Ok(FieldUpdate::Position(Position::parse_choice(value)?)),
            FieldId::AdditionalSkills => Err(DomainError::NotATextField(field.to_string())),
            _ => Ok(FieldUpdate::Text {
                field,
                value: value.to_string(),
            }),
        }
    }
}

/// The current, possibly invalid, set of form values.
///
/// # Examples
///
/// ```
/// use jobform::domain::{ApplicationDraft, FieldUpdate, Position};
///
/// let mut draft = ApplicationDraft::default();
/// draft.apply(FieldUpdate::parse("position", "Designer").unwrap()).unwrap();
/// assert_eq!(draft.position, Some(Position::Designer));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationDraft {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(deserialize_with = "deserialize_position")]
    pub position: Option<Position>,
    pub relevant_experience: String,
    #[serde(rename = "portfolioURL")]
    pub portfolio_url: String,
    pub management_experience: String,
    #[serde(deserialize_with = "deserialize_skills")]
    pub additional_skills: Vec<String>,
    pub interview_time: String,
}

impl ApplicationDraft {
    /// Returns the value of a text field, or `None` for the selector and checkboxes.
    pub fn text(&self, field: FieldId) -> Option<&str> {
        let value = match field {
            FieldId::FullName => &self.full_name,
            FieldId::Email => &self.email,
            FieldId::PhoneNumber => &self.phone_number,
            FieldId::RelevantExperience => &self.relevant_experience,
            FieldId::PortfolioUrl => &self.portfolio_url,
            FieldId::ManagementExperience => &self.management_experience,
            FieldId::InterviewTime => &self.interview_time,
            FieldId::Position | FieldId::AdditionalSkills => return None,
        };
        Some(value.as_str())
    }

    fn text_mut(&mut self, field: FieldId) -> Option<&mut String> {
        let value = match field {
            FieldId::FullName => &mut self.full_name,
            FieldId::Email => &mut self.email,
            FieldId::PhoneNumber => &mut self.phone_number,
            FieldId::RelevantExperience => &mut self.relevant_experience,
            FieldId::PortfolioUrl => &mut self.portfolio_url,
            FieldId::ManagementExperience => &mut self.management_experience,
            FieldId::InterviewTime => &mut self.interview_time,
            FieldId::Position | FieldId::AdditionalSkills => return None,
        };
        Some(value)
    }

    /// Replaces one text field, leaving every other field untouched.
    pub fn set_text(&mut self, field: FieldId, value: impl Into<String>) -> DomainResult<()> {
        let slot = self
            .text_mut(field)
            .ok_or_else(|| DomainError::NotATextField(field.to_string()))?;
        *slot = value.into();
        Ok(())
    }

    /// Adds or removes a skill label. Insertion order is preserved and a
    /// label is never stored twice.
    pub fn toggle_skill(&mut self, label: &str, checked: bool) {
        if checked {
            if !self.has_skill(label) {
                self.additional_skills.push(label.to_string());
            }
        } else {
            self.additional_skills.retain(|skill| skill != label);
        }
    }

    pub fn has_skill(&self, label: &str) -> bool {
        self.additional_skills.iter().any(|skill| skill == label)
    }

    pub fn apply(&mut self, update: FieldUpdate) -> DomainResult<()> {
        match update {
            FieldUpdate::Text { field, value } => self.set_text(field, value),
            FieldUpdate::Position(position) => {
                self.position = position;
                Ok(())
            }
            FieldUpdate::Skill { label, checked } => {
                self.toggle_skill(&label, checked);
                Ok(())
            }
        }
    }

    /// Whether a position-gated field applies to the current position.
    pub fn is_field_active(&self, field: FieldId) -> bool {
        if !field.is_conditional() {
            return true;
        }
        self.position
            .is_some_and(|position| position.conditional_fields().contains(&field))
    }

    /// Fields shown on the form for the current position, in form order.
    pub fn visible_fields(&self) -> Vec<FieldId> {
        FieldId::ALL
            .into_iter()
            .filter(|field| self.is_field_active(*field))
            .collect()
    }
}

/// Accepts a label, `""` or `null` for the position selector.
fn deserialize_position<'de, D>(deserializer: D) -> Result<Option<Position>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value {
        Some(label) => Position::parse_choice(&label).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Keeps the first occurrence of each skill label.
fn deserialize_skills<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let labels = Vec::<String>::deserialize(deserializer)?;
    let mut draft = ApplicationDraft::default();
    for label in &labels {
        draft.toggle_skill(label, true);
    }
    Ok(draft.additional_skills)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_round_trip_through_from_str() {
        for field in FieldId::ALL {
            assert_eq!(field.name().parse::<FieldId>(), Ok(field));
        }
        assert_eq!(
            "salary".parse::<FieldId>(),
            Err(DomainError::UnknownField("salary".to_string()))
        );
    }

    #[test]
    fn test_position_parse_choice() {
        assert_eq!(Position::parse_choice(""), Ok(None));
        assert_eq!(Position::parse_choice("Manager"), Ok(Some(Position::Manager)));
        assert!(Position::parse_choice("Intern").is_err());
    }

    #[test]
    fn test_position_labels_match_exactly() {
        assert_eq!(
            Position::parse_choice("designer"),
            Err(DomainError::UnknownPosition("designer".to_string()))
        );
        assert!(Position::parse_choice(" Designer").is_err());
        assert!(FieldUpdate::parse("position", " designer").is_err());
        assert_eq!("Designer".parse::<Position>(), Ok(Position::Designer));
    }

    #[test]
    fn test_position_cycle_visits_every_choice() {
        let mut current = None;
        let mut seen = Vec::new();
        for _ in 0..4 {
            current = Position::cycle_next(current);
            seen.push(current);
        }
        assert_eq!(
            seen,
            vec![
                Some(Position::Developer),
                Some(Position::Designer),
                Some(Position::Manager),
                None
            ]
        );
        assert_eq!(Position::cycle_previous(None), Some(Position::Manager));
        assert_eq!(Position::cycle_previous(Some(Position::Developer)), None);
    }

    #[test]
    fn test_set_text_leaves_other_fields_untouched() {
        let mut draft = ApplicationDraft {
            email: "a@b.c".to_string(),
            ..ApplicationDraft::default()
        };
        draft.set_text(FieldId::FullName, "Ada Lovelace").unwrap();

        assert_eq!(draft.full_name, "Ada Lovelace");
        assert_eq!(draft.email, "a@b.c");
        assert!(draft.phone_number.is_empty());
    }

    #[test]
    fn test_set_text_rejects_non_text_fields() {
        let mut draft = ApplicationDraft::default();
        assert!(draft.set_text(FieldId::Position, "Developer").is_err());
        assert!(draft.set_text(FieldId::AdditionalSkills, "CSS").is_err());
    }

    #[test]
    fn test_field_update_parse() {
        assert_eq!(
            FieldUpdate::parse("portfolioURL", "https://a.io"),
            Ok(FieldUpdate::Text {
                field: FieldId::PortfolioUrl,
                value: "https://a.io".to_string()
            })
        );
        assert_eq!(
            FieldUpdate::parse("position", "Developer"),
            Ok(FieldUpdate::Position(Some(Position::Developer)))
        );
        assert!(FieldUpdate::parse("additionalSkills", "CSS").is_err());
    }

    #[test]
    fn test_toggle_skill_round_trip() {
        let mut draft = ApplicationDraft::default();
        draft.toggle_skill("Python", true);
        let before = draft.additional_skills.clone();

        draft.toggle_skill("CSS", true);
        draft.toggle_skill("CSS", false);

        assert_eq!(draft.additional_skills, before);
    }

    #[test]
    fn test_toggle_skill_preserves_insertion_order_without_duplicates() {
        let mut draft = ApplicationDraft::default();
        draft.toggle_skill("Python", true);
        draft.toggle_skill("JavaScript", true);
        draft.toggle_skill("Python", true);

        assert_eq!(draft.additional_skills, vec!["Python", "JavaScript"]);
    }

    #[test]
    fn test_visible_fields_follow_position() {
        let mut draft = ApplicationDraft::default();
        assert!(!draft.visible_fields().contains(&FieldId::RelevantExperience));

        draft.position = Some(Position::Designer);
        let visible = draft.visible_fields();
        assert!(visible.contains(&FieldId::RelevantExperience));
        assert!(visible.contains(&FieldId::PortfolioUrl));
        assert!(!visible.contains(&FieldId::ManagementExperience));

        draft.position = Some(Position::Manager);
        let visible = draft.visible_fields();
        assert!(visible.contains(&FieldId::ManagementExperience));
        assert!(!visible.contains(&FieldId::PortfolioUrl));
    }

    #[test]
    fn test_draft_json_uses_form_field_names() {
        let draft = ApplicationDraft {
            portfolio_url: "https://a.io".to_string(),
            ..ApplicationDraft::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["portfolioURL"], "https://a.io");
        assert!(json.get("fullName").is_some());

        let partial: ApplicationDraft = serde_json::from_str(r#"{"email":"x@y.z"}"#).unwrap();
        assert_eq!(partial.email, "x@y.z");
        assert!(partial.additional_skills.is_empty());
        assert_eq!(partial.position, None);
    }

    #[test]
    fn test_draft_json_position_accepts_empty_and_null() {
        let empty: ApplicationDraft =
            serde_json::from_str(r#"{"fullName":"A","position":""}"#).unwrap();
        assert_eq!(empty.full_name, "A");
        assert_eq!(empty.position, None);

        let null: ApplicationDraft = serde_json::from_str(r#"{"position":null}"#).unwrap();
        assert_eq!(null.position, None);

        let manager: ApplicationDraft =
            serde_json::from_str(r#"{"position":"Manager"}"#).unwrap();
        assert_eq!(manager.position, Some(Position::Manager));

        assert!(serde_json::from_str::<ApplicationDraft>(r#"{"position":"manager"}"#).is_err());
    }

    #[test]
    fn test_draft_json_drops_duplicate_skills() {
        let mut draft: ApplicationDraft =
            serde_json::from_str(r#"{"additionalSkills":["CSS","CSS","Rust","CSS"]}"#).unwrap();
        assert_eq!(draft.additional_skills, vec!["CSS", "Rust"]);

        draft.toggle_skill("Python", true);
        draft.toggle_skill("Python", false);
        assert_eq!(draft.additional_skills, vec!["CSS", "Rust"]);

        draft.toggle_skill("CSS", false);
        assert_eq!(draft.additional_skills, vec!["Rust"]);
        draft.toggle_skill("CSS", true);
        assert_eq!(draft.additional_skills, vec!["Rust", "CSS"]);
    }
}
