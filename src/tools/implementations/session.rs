// ABOUTME: Session tools installing and removing already-issued Garmin Connect tokens.
// ABOUTME: Implements set_garmin_session, clear_garmin_session, get_session_status.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Session Tools
//!
//! Tokens are issued elsewhere; these tools only store them for the current
//! connection. Token values never appear in results or logs.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::constants::tools::{CLEAR_GARMIN_SESSION, GET_SESSION_STATUS, SET_GARMIN_SESSION};
use crate::errors::AppResult;
use crate::logging::AppLogger;
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

use super::required_str;

/// Installs session tokens for this connection.
pub struct SetGarminSessionTool;

#[async_trait]
impl McpTool for SetGarminSessionTool {
    fn name(&self) -> &'static str {
        SET_GARMIN_SESSION
    }

    fn description(&self) -> &'static str {
        "Store Garmin Connect session tokens for this connection: a bearer access token or a \
         base64-encoded token bundle. Replaces any previous session"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![(
                "tokens",
                PropertySchema::typed("string", "Access token or base64 token bundle"),
            )],
            &["tokens"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::SESSION_MANAGEMENT
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let tokens = required_str(&args, SET_GARMIN_SESSION, "tokens")?;
        let status = ctx.sessions().set_tokens(&ctx.session_id, tokens)?;
        AppLogger::log_session_event(ctx.session_id.as_str(), "established");
        Ok(ToolResult::from_serializable(&status)?)
    }
}

/// Forgets this connection's tokens.
pub struct ClearGarminSessionTool;

#[async_trait]
impl McpTool for ClearGarminSessionTool {
    fn name(&self) -> &'static str {
        CLEAR_GARMIN_SESSION
    }

    fn description(&self) -> &'static str {
        "Forget the Garmin Connect session tokens of this connection"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::empty()
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::SESSION_MANAGEMENT
    }

    async fn execute(&self, _args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let cleared = ctx.sessions().clear(&ctx.session_id);
        if cleared {
            AppLogger::log_session_event(ctx.session_id.as_str(), "cleared");
        }
        Ok(ToolResult::ok(json!({ "cleared": cleared, "active": false })))
    }
}

/// Reports whether this connection has a session.
pub struct GetSessionStatusTool;

#[async_trait]
impl McpTool for GetSessionStatusTool {
    fn name(&self) -> &'static str {
        GET_SESSION_STATUS
    }

    fn description(&self) -> &'static str {
        "Report whether this connection has Garmin Connect session tokens and when they expire"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::empty()
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::SESSION_MANAGEMENT
    }

    async fn execute(&self, _args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let status = ctx.sessions().status(&ctx.session_id);
        Ok(ToolResult::from_serializable(&status)?)
    }
}

/// Create all session tools for registration
#[must_use]
pub fn create_session_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(SetGarminSessionTool),
        Box::new(ClearGarminSessionTool),
        Box::new(GetSessionStatusTool),
    ]
}
