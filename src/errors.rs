// src/errors.rs
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal server error: {0}")]
    InternalServerError(String),

    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to decode response JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("unexpected response structure: {0}")]
    UnexpectedResponse(String),

    #[error("expression was not resolved within {0:?}")]
    Timeout(Duration),

    #[error("poll cancelled by caller")]
    Cancelled,

    #[error("configuration error: {0}")]
    Config(String),
}

/// Discriminant-only view of `ClientError`, used by the harness to match
/// an observed failure against a scenario's expected rejection kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    NotFound,
    InternalServerError,
    UnexpectedStatus,
    Request,
    JsonParse,
    UnexpectedResponse,
    Timeout,
    Cancelled,
    Config,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::BadRequest(_) => ErrorKind::BadRequest,
            ClientError::Unauthorized(_) => ErrorKind::Unauthorized,
            ClientError::NotFound(_) => ErrorKind::NotFound,
            ClientError::InternalServerError(_) => ErrorKind::InternalServerError,
            ClientError::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
            ClientError::Request(_) => ErrorKind::Request,
            ClientError::JsonParse(_) => ErrorKind::JsonParse,
            ClientError::UnexpectedResponse(_) => ErrorKind::UnexpectedResponse,
            ClientError::Timeout(_) => ErrorKind::Timeout,
            ClientError::Cancelled => ErrorKind::Cancelled,
            ClientError::Config(_) => ErrorKind::Config,
        }
    }

    /// The raw response body the remote service sent alongside a classified
    /// status, kept verbatim for diagnostic display.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            ClientError::BadRequest(body)
            | ClientError::Unauthorized(body)
            | ClientError::NotFound(body)
            | ClientError::InternalServerError(body)
            | ClientError::UnexpectedStatus { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Maps a non-success response status to a classified error carrying the
/// raw body verbatim. 400/401/404/500 get their dedicated kinds; any other
/// non-success status (403, 429, ...) classifies as `UnexpectedStatus`
/// rather than falling through to JSON decoding.
pub fn classify(status: reqwest::StatusCode, body: String) -> ClientError {
    match status.as_u16() {
        400 => ClientError::BadRequest(body),
        401 => ClientError::Unauthorized(body),
        404 => ClientError::NotFound(body),
        500 => ClientError::InternalServerError(body),
        other => ClientError::UnexpectedStatus {
            status: other,
            body,
        },
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_classify_table_statuses() {
        let cases = [
            (StatusCode::BAD_REQUEST, ErrorKind::BadRequest),
            (StatusCode::UNAUTHORIZED, ErrorKind::Unauthorized),
            (StatusCode::NOT_FOUND, ErrorKind::NotFound),
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorKind::InternalServerError,
            ),
        ];

        for (status, expected) in cases {
            let err = classify(status, "boom".to_string());
            assert_eq!(err.kind(), expected, "status {status} misclassified");
            assert_eq!(err.raw_body(), Some("boom"));
        }
    }

    #[test]
    fn test_classify_unlisted_status() {
        let err = classify(StatusCode::FORBIDDEN, "nope".to_string());
        match err {
            ClientError::UnexpectedStatus { status, ref body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "nope");
            }
            other => panic!("expected UnexpectedStatus, got {other:?}"),
        }
    }

    #[test]
    fn test_classified_error_keeps_body_verbatim() {
        let body = "{\"error\": \"empty username\"}";
        let err = classify(StatusCode::BAD_REQUEST, body.to_string());
        assert_eq!(err.raw_body(), Some(body));
        assert!(err.to_string().contains(body));
    }
}
