//! API errors.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by backend calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A success body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend returned a non-2xx response.
    #[error("backend responded with {status}{}", suffix(.message.as_deref()))]
    Status {
        /// Response status
        status: StatusCode,

        /// Message from the error body, if any
        message: Option<String>,
    },
}

impl ApiError {
    /// Response status, when the backend answered.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(error) => error.status(),
            Self::Decode(_) => None,
        }
    }

    /// Whether the backend rejected the credentials or token.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status().is_some_and(|status| {
            status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
        })
    }
}

fn suffix(message: Option<&str>) -> String {
    message.map_or_else(String::new, |message| format!(": {message}"))
}

/// Error body the backend may send. Only `message` and `detail` are read.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    detail: Option<Value>,
}

impl ErrorBody {
    /// Parse an error body, ignoring anything that is not JSON.
    pub(crate) fn parse(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }

    /// Human readable message, preferring `message` over `detail`.
    pub(crate) fn into_message(self) -> Option<String> {
        self.message.or_else(|| {
            self.detail.map(|detail| match detail {
                Value::String(text) => text,
                other => other.to_string(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_wins_over_detail() {
        let body = ErrorBody::parse(r#"{"message": "bad login", "detail": "ignored"}"#);

        assert_eq!(body.into_message().as_deref(), Some("bad login"));
    }

    #[test]
    fn structured_detail_is_kept_as_json() {
        let body = ErrorBody::parse(r#"{"detail": [{"loc": ["body", "time"]}]}"#);

        assert_eq!(
            body.into_message().as_deref(),
            Some(r#"[{"loc":["body","time"]}]"#)
        );
    }

    #[test]
    fn non_json_bodies_carry_no_message() {
        assert_eq!(ErrorBody::parse("<html>oops</html>").into_message(), None);
    }

    #[test]
    fn status_errors_render_their_message() {
        let error = ApiError::Status {
            status: StatusCode::NOT_FOUND,
            message: Some("supply not found".to_string()),
        };

        assert_eq!(error.to_string(), "backend responded with 404 Not Found: supply not found");
        assert!(!error.is_unauthorized());
    }
}
