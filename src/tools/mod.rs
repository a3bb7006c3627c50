// ABOUTME: MCP tool framework: trait, registry, execution context, results, and implementations.
// ABOUTME: Each tool category lives in its own implementation module behind a cargo feature.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Tools
//!
//! Tools implement [`McpTool`] and are registered once in the
//! [`ToolRegistry`]. The request processor looks them up by name and runs
//! them with a [`ToolExecutionContext`] for the calling connection.

/// Per-call execution context
pub mod context;
/// Argument-level tool errors
pub mod errors;
/// Tool implementations grouped by category
pub mod implementations;
/// Tool registry
pub mod registry;
/// Tool results and their MCP rendering
pub mod result;
/// `McpTool` trait and capability flags
pub mod traits;

pub use context::ToolExecutionContext;
pub use errors::ToolError;
pub use registry::ToolRegistry;
pub use result::ToolResult;
pub use traits::{McpTool, ToolCapabilities};
