//! Client error types

use thiserror::Error;

/// Errors surfaced to callers of the API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure; no usable response was received.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-success status other than a
    /// recoverable 401.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Token renewal was exhausted; the local session has been cleared.
    #[error("session expired, run 'sacco-cli login' to sign in again")]
    SessionExpired,

    /// Response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Build an HTTP error from a status and the raw response body. Backend
    /// error bodies are JSON with a `message` field; fall back to the raw
    /// text when the body is anything else.
    pub fn from_response(status: reqwest::StatusCode, body: String) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or(body);
        let message = if message.is_empty() {
            status.canonical_reason().unwrap_or("unknown error").to_string()
        } else {
            message
        };
        Self::Http {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_extracted_from_json_body() {
        let err = ApiError::from_response(
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"message": "Image is required"}"#.to_string(),
        );
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Image is required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_raw_body_kept_when_not_json() {
        let err =
            ApiError::from_response(reqwest::StatusCode::BAD_GATEWAY, "upstream down".to_string());
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_body_uses_canonical_reason() {
        let err = ApiError::from_response(reqwest::StatusCode::NOT_FOUND, String::new());
        match err {
            ApiError::Http { message, .. } => assert_eq!(message, "Not Found"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
