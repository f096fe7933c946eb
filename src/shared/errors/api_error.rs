//! Failure taxonomy shared by the upstream client and the movie aggregator.
//!
//! Every failure that leaves the aggregator is an [`ApiError`]. The `kind`
//! drives both retry decisions and the response status a routing layer sends.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use super::AppError;

/// Upstream services the gateway talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Upstream {
    MoviesInfo,
    Reviews,
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Upstream::MoviesInfo => write!(f, "movies-info-service"),
            Upstream::Reviews => write!(f, "movies-review-service"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// The caller's own input was rejected before any upstream call
    ClientInputInvalid,
    NotFound,
    /// Upstream rejected the request with a 4xx other than 404
    UpstreamClientError,
    /// Upstream failed with a 5xx, or could not be reached in time
    UpstreamServerError,
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    /// Status observed at the boundary where the failure was classified
    pub status: u16,
    pub message: String,
    /// `None` for failures detected locally
    pub origin: Option<Upstream>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, status: u16, message: impl Into<String>, origin: Upstream) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
            origin: Some(origin),
        }
    }

    pub fn client_input_invalid(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::ClientInputInvalid,
            status: 400,
            message: message.into(),
            origin: None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind == ErrorKind::UpstreamServerError
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    /// Fixed mapping from taxonomy kind to the status sent to the caller
    pub fn response_status(&self) -> u16 {
        match self.kind {
            ErrorKind::ClientInputInvalid => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::UpstreamClientError => 400,
            ErrorKind::UpstreamServerError => 500,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::ValidationError(msg) | AppError::InvalidInput(msg) => {
                ApiError::client_input_invalid(msg)
            }
            AppError::NotFound(msg) => Self {
                kind: ErrorKind::NotFound,
                status: 404,
                message: msg,
                origin: None,
            },
            other => Self {
                kind: ErrorKind::UpstreamServerError,
                status: other.status_code(),
                message: other.to_string(),
                origin: None,
            },
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_status_follows_fixed_mapping() {
        let cases = [
            (ErrorKind::ClientInputInvalid, 400),
            (ErrorKind::NotFound, 404),
            (ErrorKind::UpstreamClientError, 400),
            (ErrorKind::UpstreamServerError, 500),
        ];
        for (kind, expected) in cases {
            let err = ApiError::new(kind, 418, "x", Upstream::Reviews);
            assert_eq!(err.response_status(), expected, "{:?}", kind);
        }
    }

    #[test]
    fn only_server_errors_are_retryable() {
        let server = ApiError::new(ErrorKind::UpstreamServerError, 503, "down", Upstream::MoviesInfo);
        let client = ApiError::new(ErrorKind::UpstreamClientError, 400, "bad", Upstream::MoviesInfo);
        assert!(server.is_retryable());
        assert!(!client.is_retryable());
    }

    #[test]
    fn validation_failure_becomes_client_input_invalid() {
        let err: ApiError = AppError::ValidationError("movieInfo.name should be present".into()).into();
        assert_eq!(err.kind, ErrorKind::ClientInputInvalid);
        assert_eq!(err.response_status(), 400);
        assert_eq!(err.origin, None);
        assert_eq!(err.to_string(), "movieInfo.name should be present");
    }
}
