//! Error types for calls to the model service.

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The service could not be reached.
    #[error("Model service unreachable: {0}")]
    Connection(String),

    #[error("Model service did not answer within {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The service answered with a non-success status.
    #[error("Model service returned {status}: {detail}")]
    Status { status: u16, detail: String },

    /// The response body was not the expected JSON shape.
    #[error("Failed to decode model service response: {0}")]
    Decode(String),

    /// The request could not be built (bad base URL, bad upload).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    pub fn status(status: u16, detail: impl Into<String>) -> Self {
        Self::Status {
            status,
            detail: detail.into(),
        }
    }

    /// Whether the upstream rejected the request itself (4xx) rather than failing.
    pub fn is_client_rejection(&self) -> bool {
        matches!(self, Self::Status { status, .. } if (400..500).contains(status))
    }
}

/// Pull the human-readable reason out of an error body.
///
/// Uses the JSON `detail` field when present, otherwise the trimmed body.
pub fn extract_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(detail)) => detail.clone(),
            Some(other) => other.to_string(),
            None => body.trim().to_string(),
        },
        _ if body.trim().is_empty() => "<empty response>".to_string(),
        _ => body.trim().to_string(),
    }
}
