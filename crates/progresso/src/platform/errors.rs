use thiserror::Error;

use crate::http::HttpError;

/// Errors an adapter can raise while fetching one platform's history.
///
/// These never cross the sync orchestrator: each one is recorded as a single
/// entry in `SyncResult::errors` for the source that raised it.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Source unreachable or answered with a non-2xx status.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Response did not have the expected shape.
    #[error("Unexpected response: {message}")]
    Parse { message: String },

    /// Source explicitly reported a failure.
    #[error("Source reported failure: {message}")]
    SourceFailure { message: String },

    /// Identity is missing or malformed (e.g. an unparsable profile URL).
    #[error("Invalid identity: {message}")]
    Config { message: String },
}

impl AdapterError {
    #[inline]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    #[inline]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    #[inline]
    pub fn source_failure(message: impl Into<String>) -> Self {
        Self::SourceFailure {
            message: message.into(),
        }
    }

    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Build a network error from a non-2xx response, keeping the body short.
    pub(crate) fn status(status: u16, body: &str) -> Self {
        let body = body.trim();
        if body.is_empty() {
            Self::network(format!("HTTP {status}"))
        } else {
            let truncated: String = body.chars().take(120).collect();
            Self::network(format!("HTTP {status}: {truncated}"))
        }
    }

    #[inline]
    pub fn is_source_failure(&self) -> bool {
        matches!(self, Self::SourceFailure { .. })
    }
}

impl From<HttpError> for AdapterError {
    fn from(err: HttpError) -> Self {
        Self::network(err.to_string())
    }
}

impl From<serde_json::Error> for AdapterError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}

/// Extract a short error message suitable for display.
///
/// Takes the first line of an error message, which keeps log lines and the
/// `SyncResult` error list readable when an error carries a response body.
#[inline]
pub fn short_error_message(e: &impl std::error::Error) -> String {
    let full = e.to_string();
    full.lines().next().unwrap_or(&full).to_string()
}

/// Result type for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;
