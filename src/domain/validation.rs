//! Validation rules for the application form.
//!
//! Validation is a pure function of the draft. Every active field is checked
//! on every call and the first failing rule of a field produces its message.
//! Position-gated fields are only checked when the selected position lists
//! them in [`Position::conditional_fields`](super::models::Position::conditional_fields).

use super::models::{ApplicationDraft, FieldId};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern compiles"));
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://.+\..+").expect("url pattern compiles"));

pub const FULL_NAME_REQUIRED: &str = "Full Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Email address is invalid";
pub const PHONE_REQUIRED: &str = "Phone Number is required";
pub const PHONE_INVALID: &str = "Phone Number must be a 10-digit number";
pub const EXPERIENCE_INVALID: &str =
    "Relevant Experience is required and must be a number greater than 0";
pub const PORTFOLIO_REQUIRED: &str = "Portfolio URL is required";
pub const PORTFOLIO_INVALID: &str = "Portfolio URL is invalid";
pub const MANAGEMENT_REQUIRED: &str = "Management Experience is required";
pub const SKILLS_REQUIRED: &str = "At least one skill must be selected";
pub const INTERVIEW_TIME_REQUIRED: &str = "Preferred Interview Time is required";

/// Error messages keyed by field, iterated in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: BTreeMap<FieldId, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, field: FieldId) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.entries
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: FieldId, message: &str) {
        self.entries.insert(field, message.to_string());
    }
}

/// Validates a draft against the form rules.
///
/// # Examples
///
/// ```
/// use jobform::domain::{validate, ApplicationDraft, FieldId};
///
/// let errors = validate(&ApplicationDraft::default());
/// assert_eq!(errors.len(), 5);
/// assert_eq!(errors.get(FieldId::FullName), Some("Full Name is required"));
/// ```
pub fn validate(draft: &ApplicationDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for field in FieldId::ALL {
        if !draft.is_field_active(field) {
            continue;
        }
        if let Some(message) = check_field(draft, field) {
            errors.insert(field, message);
        }
    }
    errors
}

fn check_field(draft: &ApplicationDraft, field: FieldId) -> Option<&'static str> {
    match field {
        FieldId::FullName => required(&draft.full_name, FULL_NAME_REQUIRED),
        FieldId::Email => required(&draft.email, EMAIL_REQUIRED)
            .or_else(|| matches(&EMAIL_PATTERN, &draft.email, EMAIL_INVALID)),
        FieldId::PhoneNumber => required(&draft.phone_number, PHONE_REQUIRED)
            .or_else(|| matches(&PHONE_PATTERN, &draft.phone_number, PHONE_INVALID)),
        FieldId::Position => None,
        FieldId::RelevantExperience => {
            (!is_positive_number(&draft.relevant_experience)).then_some(EXPERIENCE_INVALID)
        }
        FieldId::PortfolioUrl => required(&draft.portfolio_url, PORTFOLIO_REQUIRED)
            .or_else(|| matches(&URL_PATTERN, &draft.portfolio_url, PORTFOLIO_INVALID)),
        FieldId::ManagementExperience => {
            required(&draft.management_experience, MANAGEMENT_REQUIRED)
        }
        FieldId::AdditionalSkills => draft
            .additional_skills
            .is_empty()
            .then_some(SKILLS_REQUIRED),
        FieldId::InterviewTime => required(&draft.interview_time, INTERVIEW_TIME_REQUIRED),
    }
}

fn required(value: &str, message: &'static str) -> Option<&'static str> {
    value.is_empty().then_some(message)
}

fn matches(pattern: &Regex, value: &str, message: &'static str) -> Option<&'static str> {
    (!pattern.is_match(value)).then_some(message)
}

fn is_positive_number(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .is_ok_and(|years| years.is_finite() && years > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Position;

    fn valid_draft() -> ApplicationDraft {
        ApplicationDraft {
            full_name: "Grace Hopper".to_string(),
            email: "a@b.c".to_string(),
            phone_number: "1234567890".to_string(),
            additional_skills: vec!["CSS".to_string()],
            interview_time: "2024-05-01T10:00".to_string(),
            ..ApplicationDraft::default()
        }
    }

    #[test]
    fn test_empty_draft_reports_unconditional_fields() {
        let errors = validate(&ApplicationDraft::default());
        let fields: Vec<FieldId> = errors.fields().collect();
        assert_eq!(
            fields,
            vec![
                FieldId::FullName,
                FieldId::Email,
                FieldId::PhoneNumber,
                FieldId::AdditionalSkills,
                FieldId::InterviewTime,
            ]
        );
        assert_eq!(errors.get(FieldId::Email), Some(EMAIL_REQUIRED));
        assert_eq!(errors.get(FieldId::PhoneNumber), Some(PHONE_REQUIRED));
    }

    #[test]
    fn test_empty_draft_with_position_adds_gated_fields() {
        let draft = ApplicationDraft {
            position: Some(Position::Designer),
            ..ApplicationDraft::default()
        };
        let errors = validate(&draft);
        assert_eq!(errors.len(), 7);
        assert_eq!(errors.get(FieldId::RelevantExperience), Some(EXPERIENCE_INVALID));
        assert_eq!(errors.get(FieldId::PortfolioUrl), Some(PORTFOLIO_REQUIRED));
        assert!(!errors.contains(FieldId::ManagementExperience));
    }

    #[test]
    fn test_valid_draft_without_position_has_no_errors() {
        assert!(validate(&valid_draft()).is_empty());
    }

    #[test]
    fn test_email_pattern() {
        let mut draft = valid_draft();
        draft.email = "not-an-email".to_string();
        assert_eq!(validate(&draft).get(FieldId::Email), Some(EMAIL_INVALID));

        draft.email = "user@example".to_string();
        assert_eq!(validate(&draft).get(FieldId::Email), Some(EMAIL_INVALID));

        draft.email = "user@example.com".to_string();
        assert!(!validate(&draft).contains(FieldId::Email));
    }

    #[test]
    fn test_phone_requires_exactly_ten_digits() {
        let mut draft = valid_draft();
        for bad in ["123456789", "12345678901", "12345abcde", "123-456-7890"] {
            draft.phone_number = bad.to_string();
            assert_eq!(validate(&draft).get(FieldId::PhoneNumber), Some(PHONE_INVALID), "{bad}");
        }
        draft.phone_number = "0987654321".to_string();
        assert!(!validate(&draft).contains(FieldId::PhoneNumber));
    }

    #[test]
    fn test_developer_experience_must_be_positive() {
        let mut draft = valid_draft();
        draft.position = Some(Position::Developer);

        draft.relevant_experience = "0".to_string();
        assert!(validate(&draft).contains(FieldId::RelevantExperience));

        draft.relevant_experience = "-2".to_string();
        assert!(validate(&draft).contains(FieldId::RelevantExperience));

        draft.relevant_experience = "three".to_string();
        assert!(validate(&draft).contains(FieldId::RelevantExperience));

        draft.relevant_experience = "3".to_string();
        assert!(validate(&draft).is_empty());

        draft.relevant_experience = "0.5".to_string();
        assert!(validate(&draft).is_empty());
    }

    #[test]
    fn test_designer_portfolio_rules() {
        let mut draft = valid_draft();
        draft.position = Some(Position::Designer);
        draft.relevant_experience = "2".to_string();

        draft.portfolio_url = String::new();
        assert_eq!(validate(&draft).get(FieldId::PortfolioUrl), Some(PORTFOLIO_REQUIRED));

        draft.portfolio_url = "not-a-url".to_string();
        assert_eq!(validate(&draft).get(FieldId::PortfolioUrl), Some(PORTFOLIO_INVALID));

        draft.portfolio_url = "ftp://a.io".to_string();
        assert_eq!(validate(&draft).get(FieldId::PortfolioUrl), Some(PORTFOLIO_INVALID));

        draft.portfolio_url = "https://a.io".to_string();
        assert!(validate(&draft).is_empty());
    }

    #[test]
    fn test_manager_requires_management_experience() {
        let mut draft = valid_draft();
        draft.position = Some(Position::Manager);

        assert_eq!(
            validate(&draft).get(FieldId::ManagementExperience),
            Some(MANAGEMENT_REQUIRED)
        );

        draft.management_experience = "Led a team of five".to_string();
        assert!(validate(&draft).is_empty());
    }

    #[test]
    fn test_gated_fields_ignored_for_other_positions() {
        let mut draft = valid_draft();
        draft.portfolio_url = "not-a-url".to_string();
        draft.relevant_experience = "0".to_string();
        draft.position = Some(Position::Manager);
        draft.management_experience = "Yes".to_string();

        assert!(validate(&draft).is_empty());
    }

    #[test]
    fn test_validation_is_deterministic() {
        let draft = ApplicationDraft {
            email: "bad".to_string(),
            position: Some(Position::Developer),
            ..ApplicationDraft::default()
        };
        assert_eq!(validate(&draft), validate(&draft));
    }
}
