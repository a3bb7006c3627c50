// ABOUTME: Configuration management module for server settings
// ABOUTME: Loads the environment-driven ServerConfig used at startup and by tools
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! Configuration for the Garmin MCP server.
//!
//! All settings come from environment variables; the binary can override a
//! few of them from the command line.

/// Environment-driven server configuration
pub mod environment;

pub use environment::ServerConfig;
