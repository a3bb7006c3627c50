// ABOUTME: Session token decoding for already-issued Garmin Connect credentials
// ABOUTME: Accepts a raw bearer token or a base64-encoded JSON token bundle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! Session tokens.
//!
//! Token issuance is outside this server. Callers hand in either the bearer
//! access token itself or the base64 bundle produced by common Garmin login
//! tools, which is a JSON array (or object) holding an OAuth2 token object
//! with an `access_token` field.

use std::fmt;

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::{DateTime, Utc};
use garmin_core::errors::{AppError, AppResult, ErrorCode};
use serde_json::Value;

/// Shortest string accepted as a raw bearer token
const MIN_RAW_TOKEN_LEN: usize = 16;

/// Credentials for one session
#[derive(Clone, PartialEq, Eq)]
pub struct SessionTokens {
    access_token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl SessionTokens {
    /// Wrap an access token directly
    #[must_use]
    pub fn from_access_token(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
        }
    }

    /// Decode caller-supplied tokens.
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` when the input is empty, contains whitespace, or is
    /// a bundle without an access token.
    pub fn decode(raw: &str) -> AppResult<Self> {
        let trimmed = raw.trim();
        let trimmed = trimmed
            .strip_prefix("Bearer ")
            .map_or(trimmed, str::trim_start);
        if trimmed.is_empty() {
            return Err(invalid("session tokens are empty"));
        }

        if let Some(bundle) = decode_bundle(trimmed) {
            return Self::from_bundle(&bundle);
        }

        if trimmed.len() < MIN_RAW_TOKEN_LEN || trimmed.chars().any(char::is_whitespace) {
            return Err(invalid(
                "session tokens must be a bearer access token or a base64 token bundle",
            ));
        }
        Ok(Self::from_access_token(trimmed))
    }

    fn from_bundle(bundle: &Value) -> AppResult<Self> {
        let token_object = match bundle {
            Value::Array(items) => items.iter().find(|item| item.get("access_token").is_some()),
            Value::Object(_) if bundle.get("access_token").is_some() => Some(bundle),
            Value::Object(_) => bundle.get("oauth2_token"),
            _ => None,
        }
        .ok_or_else(|| invalid("token bundle does not contain an OAuth2 access_token"))?;

        let access_token = token_object
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| invalid("token bundle access_token must be a non-empty string"))?;

        let expires_at = token_object
            .get("expires_at")
            .and_then(Value::as_i64)
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        Ok(Self {
            access_token: access_token.to_owned(),
            expires_at,
        })
    }

    /// Bearer token for the `Authorization` header
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Expiry advertised by the bundle, when present
    #[must_use]
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Whether the advertised expiry has passed at `now`
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= now)
    }
}

impl fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokens")
            .field("access_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

fn decode_bundle(encoded: &str) -> Option<Value> {
    let bytes = STANDARD
        .decode(encoded)
        .or_else(|_| URL_SAFE_NO_PAD.decode(encoded))
        .ok()?;
    let value: Value = serde_json::from_slice(&bytes).ok()?;
    (value.is_array() || value.is_object()).then_some(value)
}

fn invalid(message: &str) -> AppError {
    AppError::new(ErrorCode::AuthInvalid, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode(value: &Value) -> String {
        STANDARD.encode(serde_json::to_vec(value).unwrap())
    }

    #[test]
    fn test_raw_bearer_token() {
        let tokens = SessionTokens::decode("Bearer abcdefghijklmnop.qrstuv").unwrap();
        assert_eq!(tokens.access_token(), "abcdefghijklmnop.qrstuv");
        assert!(tokens.expires_at().is_none());
    }

    #[test]
    fn test_garth_style_bundle() {
        let bundle = json!([
            {"oauth_token": "legacy", "oauth_token_secret": "secret"},
            {"access_token": "oauth2-access", "expires_at": 1_900_000_000}
        ]);
        let tokens = SessionTokens::decode(&encode(&bundle)).unwrap();
        assert_eq!(tokens.access_token(), "oauth2-access");
        assert!(!tokens.is_expired_at(DateTime::from_timestamp(1_800_000_000, 0).unwrap()));
        assert!(tokens.is_expired_at(DateTime::from_timestamp(1_900_000_000, 0).unwrap()));
    }

    #[test]
    fn test_object_bundle_with_nested_token() {
        let bundle = json!({"oauth2_token": {"access_token": "nested"}});
        assert_eq!(
            SessionTokens::decode(&encode(&bundle)).unwrap().access_token(),
            "nested"
        );
    }

    #[test]
    fn test_rejects_unusable_input() {
        for raw in ["", "   ", "short", "has some spaces in the token"] {
            let error = SessionTokens::decode(raw).unwrap_err();
            assert_eq!(error.code, ErrorCode::AuthInvalid, "{raw:?}");
        }
        let bundle = json!([{"oauth_token": "legacy"}]);
        assert!(SessionTokens::decode(&encode(&bundle)).is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let tokens = SessionTokens::from_access_token("super-secret-token-value");
        assert!(!format!("{tokens:?}").contains("super-secret"));
    }
}
