use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Unknown form field: {0}")]
    UnknownField(String),
    #[error("Unknown position: {0}")]
    UnknownPosition(String),
    #[error("Field {0} does not take a text value")]
    NotATextField(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
