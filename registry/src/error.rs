//! Registry error types

use thiserror::Error;
use shared::{SharedError, TuitionCode};

/// Faults raised by a tuition store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Duplicate tuition code: {code}")]
    DuplicateCode { code: TuitionCode },

    #[error("Store unavailable: {message}")]
    Unavailable { message: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by registry operations
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Tuition code already in use: {code}")]
    CodeTaken { code: TuitionCode },

    #[error("Tuition not found: {code}")]
    NotFound { code: TuitionCode },

    #[error("Could not persist tuition after {attempts} code allocations")]
    AllocationExhausted { attempts: u32 },

    #[error("Configuration error: {field}: {reason}")]
    ConfigurationError { field: String, reason: String },

    #[error("Invalid input: {0}")]
    Invalid(#[from] SharedError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl RegistryError {
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
