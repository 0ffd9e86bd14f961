use serde::Serialize;
use thiserror::Error;

/// A single failed field rule. `Display` yields the message shown to the user.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    #[error("Name is required.")]
    NameRequired,
    #[error("Phone number length must be 10 digits or phone number is required.")]
    PhoneTooShort,
    #[error("Enter a valid email.")]
    InvalidEmail,
    #[error("Enter notes less than 250 chars.")]
    NotesTooLong,
    #[error("Title is required.")]
    TitleRequired,
    #[error("Appointment date must be in the future.")]
    AppointmentNotInFuture,
    #[error("Description cannot exceed 250 characters.")]
    DescriptionTooLong,
    #[error("Due date cannot be before creation date.")]
    DueBeforeCreation,
    #[error("Subject is required.")]
    SubjectRequired,
    #[error("Subject cannot exceed 150 characters.")]
    SubjectTooLong,
    #[error("Message cannot exceed 500 characters.")]
    MessageTooLong,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("validation failed: {}", join_violations(.0))]
    Validation(Vec<Violation>),
    #[error("invalid customer category: {0}")]
    InvalidCategory(String),
    #[error("invalid status: {0}")]
    InvalidStatus(String),
    #[error("invalid communication type: {0}")]
    InvalidCommunicationType(String),
    #[error("invalid call outcome: {0}")]
    InvalidCallOutcome(String),
}

impl CoreError {
    pub fn violations(&self) -> &[Violation] {
        match self {
            CoreError::Validation(items) => items,
            _ => &[],
        }
    }
}

pub(crate) fn ensure_no_violations(violations: Vec<Violation>) -> Result<(), CoreError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(violations))
    }
}

fn join_violations(items: &[Violation]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::{CoreError, Violation};

    #[test]
    fn validation_error_lists_every_message() {
        let err = CoreError::Validation(vec![Violation::NameRequired, Violation::InvalidEmail]);
        assert_eq!(
            err.to_string(),
            "validation failed: Name is required. Enter a valid email."
        );
        assert_eq!(err.violations().len(), 2);
    }
}
