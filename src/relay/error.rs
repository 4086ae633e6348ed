//! Downstream failure types.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors raised while calling the next hop.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The `call` parameter is not a usable URL.
    #[error("invalid downstream url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connection could not be established or broke mid-request.
    #[error("downstream request to {url} failed: {reason}")]
    Connect { url: String, reason: String },

    /// The next hop did not answer in time.
    #[error("downstream request to {url} timed out")]
    Timeout { url: String },

    /// The next hop answered with a non-2xx status.
    #[error("downstream {url} answered with status {status}")]
    Status { url: String, status: u16 },

    /// The downstream body could not be read or is not JSON.
    #[error("downstream {url} returned an invalid body: {reason}")]
    Body { url: String, reason: String },
}

impl RelayError {
    /// Status code reported to our caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::BAD_GATEWAY,
        }
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::InvalidUrl { .. } => "invalid_url",
            RelayError::Connect { .. } => "connect",
            RelayError::Timeout { .. } => "timeout",
            RelayError::Status { .. } => "status",
            RelayError::Body { .. } => "body",
        }
    }
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let timeout = RelayError::Timeout { url: "http://b/".into() };
        assert_eq!(timeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(timeout.to_string(), "downstream request to http://b/ timed out");

        let status = RelayError::Status { url: "http://b/".into(), status: 500 };
        assert_eq!(status.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(status.kind(), "status");
    }
}
