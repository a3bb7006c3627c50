// ABOUTME: Defines tool-specific error types for the pluggable tools architecture.
// ABOUTME: Provides structured argument errors that integrate with the main AppError system.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Tool Error Types
//!
//! `ToolError` covers registry lookups and argument checking. Everything
//! converts into [`AppError`] before it reaches the caller.

use std::error::Error;
use std::fmt;

use serde_json::json;

use crate::errors::{AppError, ErrorCode};

/// Errors specific to tool operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// Tool was not found in the registry
    NotFound {
        /// Name of the requested tool
        tool_name: String,
    },
    /// Tool parameter validation failed
    InvalidParameter {
        /// Name of the tool
        tool_name: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Reason the parameter is invalid
        reason: String,
    },
    /// Required parameter is missing
    MissingParameter {
        /// Name of the tool
        tool_name: String,
        /// Name of the missing parameter
        parameter: String,
    },
}

impl ToolError {
    /// Create a "not found" error
    #[must_use]
    pub fn not_found(tool_name: impl Into<String>) -> Self {
        Self::NotFound {
            tool_name: tool_name.into(),
        }
    }

    /// Create an "invalid parameter" error
    #[must_use]
    pub fn invalid_parameter(
        tool_name: impl Into<String>,
        parameter: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            tool_name: tool_name.into(),
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a "missing parameter" error
    #[must_use]
    pub fn missing_parameter(tool_name: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::MissingParameter {
            tool_name: tool_name.into(),
            parameter: parameter.into(),
        }
    }

    /// Get the tool name associated with this error
    #[must_use]
    pub fn tool_name(&self) -> &str {
        match self {
            Self::NotFound { tool_name }
            | Self::InvalidParameter { tool_name, .. }
            | Self::MissingParameter { tool_name, .. } => tool_name,
        }
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { tool_name } => write!(f, "Tool '{tool_name}' not found"),
            Self::InvalidParameter {
                tool_name,
                parameter,
                reason,
            } => write!(
                f,
                "Invalid parameter '{parameter}' for tool '{tool_name}': {reason}"
            ),
            Self::MissingParameter {
                tool_name,
                parameter,
            } => write!(
                f,
                "Missing required parameter '{parameter}' for tool '{tool_name}'"
            ),
        }
    }
}

impl Error for ToolError {}

impl From<ToolError> for AppError {
    fn from(error: ToolError) -> Self {
        let message = error.to_string();
        match error {
            ToolError::NotFound { tool_name } => Self::not_found(format!("tool '{tool_name}'")),
            ToolError::InvalidParameter { parameter, .. } => {
                Self::new(ErrorCode::InvalidInput, message)
                    .with_details(json!({ "parameter": parameter }))
            }
            ToolError::MissingParameter { parameter, .. } => {
                Self::new(ErrorCode::MissingRequiredField, message)
                    .with_details(json!({ "parameter": parameter }))
            }
        }
    }
}
