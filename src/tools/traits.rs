// ABOUTME: Defines the McpTool trait and ToolCapabilities for the pluggable tools architecture.
// ABOUTME: Tools implement this trait to be registered and executed via the ToolRegistry.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # MCP Tool Trait and Capabilities
//!
//! All tools implement [`McpTool`], which provides:
//! - Tool metadata (name, description, input schema)
//! - Capability flags checked by the registry before execution
//! - Async execution with a per-call context

use async_trait::async_trait;
use bitflags::bitflags;
use serde_json::Value;

use crate::errors::AppResult;
use crate::mcp::schema::JsonSchema;

use super::context::ToolExecutionContext;
use super::result::ToolResult;

bitflags! {
    /// Capabilities that tools declare for filtering and pre-execution checks.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ToolCapabilities: u8 {
        /// Tool needs an active Garmin session
        const REQUIRES_SESSION = 0b0000_0001;
        /// Tool reads library or calendar data
        const READS_DATA = 0b0000_0010;
        /// Tool creates, modifies, or deletes remote data
        const WRITES_DATA = 0b0000_0100;
        /// Tool validates and rewrites workout definitions
        const NORMALIZES = 0b0000_1000;
        /// Tool manages the connection's session
        const SESSION_MANAGEMENT = 0b0001_0000;
    }
}

impl ToolCapabilities {
    /// Check if tool requires an active session
    #[must_use]
    pub const fn requires_session(self) -> bool {
        self.contains(Self::REQUIRES_SESSION)
    }

    /// Check if tool reads remote data
    #[must_use]
    pub const fn reads_data(self) -> bool {
        self.contains(Self::READS_DATA)
    }

    /// Check if tool writes remote data
    #[must_use]
    pub const fn writes_data(self) -> bool {
        self.contains(Self::WRITES_DATA)
    }

    /// Get a description of all enabled capabilities for logging
    #[must_use]
    pub fn describe(&self) -> String {
        let parts: Vec<&str> = [
            (Self::REQUIRES_SESSION, "requires_session"),
            (Self::READS_DATA, "reads_data"),
            (Self::WRITES_DATA, "writes_data"),
            (Self::NORMALIZES, "normalizes"),
            (Self::SESSION_MANAGEMENT, "session_management"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
        .collect();

        if parts.is_empty() {
            "none".to_owned()
        } else {
            parts.join(", ")
        }
    }
}

/// The main trait that all MCP tools must implement.
///
/// Tools are `Send + Sync` and registered once at startup; `name()` returns a
/// `&'static str` used for lookup.
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Unique identifier for the tool (e.g., `plan_workout`)
    fn name(&self) -> &'static str;

    /// Human-readable description for LLM consumption
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters, returned in `tools/list`
    fn input_schema(&self) -> JsonSchema;

    /// Capability flags for filtering and validation
    fn capabilities(&self) -> ToolCapabilities;

    /// Execute the tool with given arguments and context
    ///
    /// # Errors
    ///
    /// Returns `AppError` for validation failures, missing sessions, or remote failures
    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult>;
}
