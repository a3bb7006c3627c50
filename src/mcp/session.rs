// ABOUTME: Per-connection Garmin session storage and session-scoped client resolution
// ABOUTME: Maps connection ids to decoded tokens and builds the remote client each tool call uses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Session store
//!
//! There is no process-wide authenticated client. Each connection owns one
//! session entry, and every tool call resolves its client from that entry.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use garmin_connect::{GarminConnectApi, GarminConnectClient, SessionTokens};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::{AppError, AppResult, ErrorCode};

/// Identifier of one client connection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// The single connection served over stdio
    #[must_use]
    pub fn stdio() -> Self {
        Self("stdio".to_owned())
    }

    /// A fresh random connection id
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wrap an existing id
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// String form for logging
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the remote client for a freshly installed session
pub trait ClientFactory: Send + Sync {
    /// Client authenticated with `tokens`
    fn create(&self, tokens: &SessionTokens) -> Arc<dyn GarminConnectApi>;
}

/// Factory producing reqwest-backed clients against a base URL
pub struct HttpClientFactory {
    base_url: String,
}

impl HttpClientFactory {
    /// Factory for the given API base URL
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl ClientFactory for HttpClientFactory {
    fn create(&self, tokens: &SessionTokens) -> Arc<dyn GarminConnectApi> {
        Arc::new(GarminConnectClient::new(self.base_url.clone(), tokens.clone()))
    }
}

struct SessionEntry {
    tokens: SessionTokens,
    client: Arc<dyn GarminConnectApi>,
    established_at: DateTime<Utc>,
}

/// Snapshot of one connection's session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    /// Whether tokens are installed
    pub active: bool,
    /// When the tokens were installed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub established_at: Option<DateTime<Utc>>,
    /// Expiry advertised by the token bundle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether the advertised expiry has passed
    pub expired: bool,
}

impl SessionStatus {
    const fn inactive() -> Self {
        Self {
            active: false,
            established_at: None,
            expires_at: None,
            expired: false,
        }
    }
}

/// Concurrent map of connection id to session
pub struct SessionStore {
    sessions: DashMap<SessionId, SessionEntry>,
    factory: Arc<dyn ClientFactory>,
}

impl SessionStore {
    /// Empty store using `factory` to build clients
    #[must_use]
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            sessions: DashMap::new(),
            factory,
        }
    }

    /// Decode and install tokens, replacing any previous session
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` when the tokens cannot be decoded; the previous
    /// session is left untouched in that case.
    pub fn set_tokens(&self, session_id: &SessionId, raw_tokens: &str) -> AppResult<SessionStatus> {
        let tokens = SessionTokens::decode(raw_tokens)?;
        let now = Utc::now();
        if tokens.is_expired_at(now) {
            return Err(AppError::new(
                ErrorCode::AuthInvalid,
                "The supplied session tokens have already expired",
            ));
        }
        let client = self.factory.create(&tokens);
        self.sessions.insert(
            session_id.clone(),
            SessionEntry {
                tokens,
                client,
                established_at: now,
            },
        );
        Ok(self.status(session_id))
    }

    /// Remove the session; returns whether one existed
    pub fn clear(&self, session_id: &SessionId) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    /// Current session state
    #[must_use]
    pub fn status(&self, session_id: &SessionId) -> SessionStatus {
        self.sessions
            .get(session_id)
            .map_or_else(SessionStatus::inactive, |entry| SessionStatus {
                active: true,
                established_at: Some(entry.established_at),
                expires_at: entry.tokens.expires_at(),
                expired: entry.tokens.is_expired_at(Utc::now()),
            })
    }

    /// Client for this connection's session
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when the session holds no tokens, `AuthInvalid`
    /// when its tokens have expired.
    pub fn current_client(&self, session_id: &SessionId) -> AppResult<Arc<dyn GarminConnectApi>> {
        let entry = self
            .sessions
            .get(session_id)
            .ok_or_else(AppError::auth_required)?;
        if entry.tokens.is_expired_at(Utc::now()) {
            return Err(AppError::new(
                ErrorCode::AuthInvalid,
                "Garmin session tokens have expired. Call set_garmin_session with fresh tokens.",
            ));
        }
        Ok(Arc::clone(&entry.client))
    }

    /// Number of sessions with tokens
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session holds tokens
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
