// ABOUTME: Defines ToolResult returned by tool execution and its MCP rendering.
// ABOUTME: Converts successful values and AppError bodies into MCP tool responses.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Tool Result Types
//!
//! Bridges tool implementations with the MCP `tools/call` response format.
//! Failures are not JSON-RPC errors: they are rendered as results with
//! `isError: true` and the structured error body as content.

use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::mcp::schema::{Content, ToolResponse};

/// Result returned by tool execution.
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// The result value to return to the client
    pub content: Value,
    /// Whether this result represents an error condition
    pub is_error: bool,
}

impl ToolResult {
    /// Create a simple successful result with just content
    #[must_use]
    pub const fn ok(content: Value) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    /// Create an error result
    #[must_use]
    pub const fn error(content: Value) -> Self {
        Self {
            content,
            is_error: true,
        }
    }

    /// Create a result from a serializable value
    ///
    /// # Errors
    ///
    /// Returns the serialization error if the value cannot be converted to JSON
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::ok(serde_json::to_value(value)?))
    }

    /// Error result carrying the `{error: {code, message, details}}` body
    #[must_use]
    pub fn from_app_error(error: &AppError) -> Self {
        Self::error(serde_json::to_value(error.to_response()).unwrap_or_else(|_| {
            serde_json::json!({ "error": { "message": error.message } })
        }))
    }

    /// Render as an MCP tool response
    #[must_use]
    pub fn into_response(self) -> ToolResponse {
        let text =
            serde_json::to_string_pretty(&self.content).unwrap_or_else(|_| self.content.to_string());
        ToolResponse {
            content: vec![Content::Text { text }],
            is_error: self.is_error,
            structured_content: Some(self.content),
        }
    }
}

impl Default for ToolResult {
    fn default() -> Self {
        Self::ok(Value::Null)
    }
}
