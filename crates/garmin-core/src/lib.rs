// ABOUTME: Core types and constants for the Garmin workout MCP server
// ABOUTME: Foundation crate with error handling, wire models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

#![deny(unsafe_code)]

//! # Garmin Core
//!
//! Foundation crate shared by the remote client crate and the MCP server.
//! It changes rarely, which keeps incremental builds of the workspace cheap.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and the domain error enums
//! - **constants**: endpoint paths, lookup tables, and defaults
//! - **models**: canonical workout and calendar wire types

/// Unified error handling with standard error codes and domain-specific errors
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Canonical Garmin Connect wire models (workouts, calendar)
pub mod models;
