// ABOUTME: Error types for the server crate, re-exported from garmin-core.
// ABOUTME: Keeps `crate::errors::AppError` paths stable across the server modules.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

pub use garmin_core::errors::*;
