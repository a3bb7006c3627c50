// ABOUTME: Structured error types for Garmin Connect remote calls
// ABOUTME: Distinguishes missing sessions, platform rejections, and transport failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use serde_json::json;

use super::{AppError, ErrorCode};

/// Service name used in remote error messages
const SERVICE: &str = "Garmin Connect";

/// Errors returned by the remote platform client.
///
/// No variant is ever retried by this crate; the caller decides.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Platform refused the session credentials (401/403)
    #[error("{SERVICE} authentication required (status {status})")]
    AuthenticationRequired {
        /// HTTP status returned by the platform
        status: u16,
    },

    /// Platform reports the resource does not exist (404)
    #[error("{SERVICE} {resource} not found")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Platform throttled the session (429)
    #[error("{SERVICE} rate limit exceeded")]
    RateLimited,

    /// Any other non-success status
    #[error("{SERVICE} rejected the request with status {status}: {message}")]
    Rejected {
        /// HTTP status returned by the platform
        status: u16,
        /// Message extracted from the platform response body
        message: String,
    },

    /// Network failure before a response arrived
    #[error("{SERVICE} request failed: {message}")]
    Transport {
        /// Description of the transport failure
        message: String,
    },

    /// The platform answered with a body this client cannot interpret
    #[error("{SERVICE} returned an unexpected response: {message}")]
    InvalidResponse {
        /// Description of the problem
        message: String,
    },
}

/// Result type for remote calls
pub type RemoteResult<T> = Result<T, RemoteError>;

impl RemoteError {
    /// Classify a non-success HTTP status
    #[must_use]
    pub fn from_status(status: u16, resource: impl Into<String>, body: &str) -> Self {
        match status {
            401 | 403 => Self::AuthenticationRequired { status },
            404 => Self::NotFound {
                resource: resource.into(),
            },
            429 => Self::RateLimited,
            _ => Self::Rejected {
                status,
                message: extract_platform_message(body),
            },
        }
    }

    /// Whether the platform reported the resource as missing
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Error code this failure maps to
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::AuthenticationRequired { .. } => ErrorCode::ExternalAuthFailed,
            Self::NotFound { .. } => ErrorCode::ResourceNotFound,
            Self::RateLimited => ErrorCode::ExternalRateLimited,
            Self::Rejected { .. } | Self::InvalidResponse { .. } => {
                ErrorCode::ExternalServiceError
            }
            Self::Transport { .. } => ErrorCode::ExternalServiceUnavailable,
        }
    }
}

/// Pull a human message out of a platform error body, falling back to the raw text
fn extract_platform_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "errorMessage", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(str::to_owned))
        })
        .unwrap_or_else(|| body.trim().chars().take(500).collect())
}

impl From<RemoteError> for AppError {
    fn from(error: RemoteError) -> Self {
        let details = match &error {
            RemoteError::AuthenticationRequired { status } | RemoteError::Rejected { status, .. } => {
                json!({ "status": status })
            }
            _ => serde_json::Value::Null,
        };
        Self::new(error.code(), error.to_string())
            .with_details(details)
            .with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            RemoteError::from_status(401, "workout 1", ""),
            RemoteError::AuthenticationRequired { status: 401 }
        ));
        assert!(RemoteError::from_status(404, "workout 1", "").is_not_found());
        assert!(matches!(
            RemoteError::from_status(429, "workout 1", ""),
            RemoteError::RateLimited
        ));
    }

    #[test]
    fn test_rejection_keeps_platform_message() {
        let error = RemoteError::from_status(400, "workout", r#"{"message":"Invalid stepId"}"#);
        match error {
            RemoteError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid stepId");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejection_falls_back_to_raw_body() {
        let error = RemoteError::from_status(500, "workout", "  upstream exploded ");
        assert!(error.to_string().ends_with("upstream exploded"));
        let app: AppError = error.into();
        assert_eq!(app.code, ErrorCode::ExternalServiceError);
        assert_eq!(app.details["status"], 500);
    }
}
