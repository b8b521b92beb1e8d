//! Shared error types for the tuition registry

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("Invalid tuition code: '{input}'")]
    InvalidCode { input: String },

    #[error("Invalid tuition field {field}: {reason}")]
    InvalidTuition { field: String, reason: String },
}

impl SharedError {
    pub fn invalid_tuition(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTuition {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
