// ABOUTME: Defines ToolExecutionContext which gives tools their session, resources, and request id.
// ABOUTME: Resolves the session-scoped Garmin client and scheduler for each tool call.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Tool Execution Context
//!
//! One context is built per `tools/call`. Tools never hold a client of their
//! own; they ask the context, which asks the session store.

use std::sync::Arc;

use garmin_connect::GarminConnectApi;
use serde_json::Value;

use crate::config::ServerConfig;
use crate::errors::AppResult;
use crate::mcp::resources::ServerResources;
use crate::mcp::session::{SessionId, SessionStore};
use crate::workouts::WorkoutScheduler;

/// Context provided to every tool execution.
#[derive(Clone)]
pub struct ToolExecutionContext {
    /// Connection the call arrived on
    pub session_id: SessionId,
    /// Request ID for tracing/logging
    pub request_id: Option<Value>,
    /// Access to shared server resources
    pub resources: Arc<ServerResources>,
}

impl ToolExecutionContext {
    /// Create a new context for one connection
    #[must_use]
    pub const fn new(session_id: SessionId, resources: Arc<ServerResources>) -> Self {
        Self {
            session_id,
            request_id: None,
            resources,
        }
    }

    /// Set request ID for tracing
    #[must_use]
    pub fn with_request_id(mut self, request_id: Value) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Server configuration
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.resources.config
    }

    /// Session store
    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.resources.sessions
    }

    /// Remote client for this connection's session
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when no session tokens are installed
    pub fn client(&self) -> AppResult<Arc<dyn GarminConnectApi>> {
        self.sessions().current_client(&self.session_id)
    }

    /// Scheduler bound to this connection's client
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when no session tokens are installed
    pub fn scheduler(&self) -> AppResult<WorkoutScheduler> {
        Ok(WorkoutScheduler::new(self.client()?))
    }

    /// Fail early for tools that need a session
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when no session tokens are installed
    pub fn require_session(&self) -> AppResult<()> {
        self.client().map(|_| ())
    }
}
