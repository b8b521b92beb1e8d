//! WebServer-specific error types

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;
use registry::{RegistryError, StoreError};
use shared::{service_error, ServiceId, SharedError};

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid request format: {details}")]
    InvalidRequest { details: String },

    #[error("{0}")]
    Registry(#[from] RegistryError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl WebServerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    pub fn invalid(details: impl Into<String>) -> Self {
        Self::InvalidRequest {
            details: details.into(),
        }
    }

    /// HTTP status reported to clients for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Registry(err) => match err {
                RegistryError::Invalid(_) => StatusCode::BAD_REQUEST,
                RegistryError::NotFound { .. } => StatusCode::NOT_FOUND,
                RegistryError::CodeTaken { .. } => StatusCode::CONFLICT,
                RegistryError::AllocationExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
                RegistryError::Store(StoreError::Unavailable { .. }) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                RegistryError::Store(StoreError::DuplicateCode { .. }) => StatusCode::CONFLICT,
                RegistryError::Store(_) | RegistryError::ConfigurationError { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::ServerStartup(_) | Self::ConfigError(_) | Self::IoError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<SharedError> for WebServerError {
    fn from(err: SharedError) -> Self {
        Self::Registry(RegistryError::Invalid(err))
    }
}

/// Malformed or incomplete JSON bodies are reported like any other bad request
impl From<JsonRejection> for WebServerError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid(rejection.body_text())
    }
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            service_error!(ServiceId::current(), status = %status, "Request failed: {}", self);
        }

        let body = Json(json!({
            "status": "error",
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;
