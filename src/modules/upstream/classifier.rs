//! Pure mapping from raw upstream outcomes to [`ApiError`].
//!
//! Kept apart from transport and retry code so the taxonomy can be tested
//! without a network.

use crate::shared::errors::{ApiError, ErrorKind, Upstream};

/// Transport-level failure observed before a usable response existed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    Timeout,
    Connect(String),
    /// A 2xx response whose body could not be decoded
    Decode(String),
    Other(String),
}

impl From<&reqwest::Error> for TransportFailure {
    fn from(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportFailure::Timeout
        } else if err.is_connect() {
            TransportFailure::Connect(err.to_string())
        } else if err.is_decode() {
            TransportFailure::Decode(err.to_string())
        } else {
            TransportFailure::Other(err.to_string())
        }
    }
}

/// Classify a non-success status returned by `origin` for `target`
pub fn classify_status(origin: Upstream, target: &str, status: u16, body: &str) -> ApiError {
    let body = body.trim();
    match status {
        404 => {
            let message = if body.is_empty() {
                not_found_message(origin, target)
            } else {
                body.to_string()
            };
            ApiError::new(ErrorKind::NotFound, status, message, origin)
        }
        400..=499 => ApiError::new(
            ErrorKind::UpstreamClientError,
            status,
            body_or_status(origin, status, body),
            origin,
        ),
        _ => ApiError::new(
            ErrorKind::UpstreamServerError,
            status,
            body_or_status(origin, status, body),
            origin,
        ),
    }
}

/// Classify a failure where no status was available. Always retryable.
pub fn classify_transport(origin: Upstream, target: &str, failure: TransportFailure) -> ApiError {
    let (status, message) = match failure {
        TransportFailure::Timeout => (504, format!("{} timed out for {}", origin, target)),
        TransportFailure::Connect(detail) => {
            (503, format!("{} is unreachable: {}", origin, detail))
        }
        TransportFailure::Decode(detail) => (
            502,
            format!("{} returned an unreadable body for {}: {}", origin, target, detail),
        ),
        TransportFailure::Other(detail) => {
            (502, format!("{} request failed: {}", origin, detail))
        }
    };
    ApiError::new(ErrorKind::UpstreamServerError, status, message, origin)
}

fn not_found_message(origin: Upstream, target: &str) -> String {
    match origin {
        Upstream::MoviesInfo => format!("There is no movie info available for id {}", target),
        Upstream::Reviews => format!("No reviews available for movieInfoId {}", target),
    }
}

fn body_or_status(origin: Upstream, status: u16, body: &str) -> String {
    if body.is_empty() {
        format!("{} responded with status {}", origin, status)
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_uses_default_message_for_empty_body() {
        let err = classify_status(Upstream::MoviesInfo, "abc", 404, "");
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, "There is no movie info available for id abc");
        assert_eq!(err.origin, Some(Upstream::MoviesInfo));
        assert!(!err.is_retryable());
    }

    #[test]
    fn client_errors_keep_upstream_body_and_status() {
        let err = classify_status(Upstream::Reviews, "abc", 422, "  rating.negative  ");
        assert_eq!(err.kind, ErrorKind::UpstreamClientError);
        assert_eq!(err.status, 422);
        assert_eq!(err.message, "rating.negative");
        assert_eq!(err.response_status(), 400);
        assert!(!err.is_retryable());
    }

    #[test]
    fn server_errors_are_retryable() {
        let err = classify_status(Upstream::MoviesInfo, "abc", 503, "Movie Info Service Unavailable");
        assert_eq!(err.kind, ErrorKind::UpstreamServerError);
        assert_eq!(err.message, "Movie Info Service Unavailable");
        assert!(err.is_retryable());
        assert_eq!(err.response_status(), 500);
    }

    #[test]
    fn server_error_without_body_names_upstream() {
        let err = classify_status(Upstream::Reviews, "abc", 500, "");
        assert_eq!(err.message, "movies-review-service responded with status 500");
    }

    #[test]
    fn transport_failures_are_server_errors() {
        let timeout = classify_transport(Upstream::Reviews, "abc", TransportFailure::Timeout);
        assert_eq!(timeout.kind, ErrorKind::UpstreamServerError);
        assert_eq!(timeout.status, 504);

        let refused = classify_transport(
            Upstream::MoviesInfo,
            "abc",
            TransportFailure::Connect("connection refused".into()),
        );
        assert_eq!(refused.status, 503);
        assert!(refused.is_retryable());
    }
}
