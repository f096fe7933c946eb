use serde::Serialize;
use thiserror::Error;

use crate::modules::broadcast::HubError;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Carries the aggregated rule messages verbatim, they are user-visible.
    #[error("{0}")]
    ValidationError(String),

    #[error("Broadcast error: {0}")]
    BroadcastError(String),
}

impl AppError {
    /// HTTP-like status a routing layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::NotFound(_) => 404,
            AppError::InvalidInput(_) | AppError::ValidationError(_) => 400,
            AppError::BroadcastError(_) => 409,
            AppError::InternalError(_) | AppError::SerializationError(_) => 500,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<HubError> for AppError {
    fn from(err: HubError) -> Self {
        AppError::BroadcastError(err.to_string())
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
