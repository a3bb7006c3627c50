// ABOUTME: Main library entry point for the Garmin Connect workout MCP server
// ABOUTME: Normalizes free-form workout definitions and schedules them through MCP tools
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

#![deny(unsafe_code)]

//! # Garmin MCP Server
//!
//! A Model Context Protocol (MCP) server that lets an AI agent build
//! structured Garmin Connect workouts and place them on the training calendar.
//!
//! ## Features
//!
//! - **Workout normalization**: loose, agent-written definitions become the
//!   exact structure Garmin Connect accepts, or are rejected before any remote call
//! - **Library management**: create, update, delete, read, and export workouts
//! - **Calendar scheduling**: schedule, reschedule, unschedule, and list occurrences
//! - **Per-connection sessions**: already-issued tokens, never a global login
//!
//! ## Architecture
//!
//! - **workouts**: the normalization pipeline and the scheduling engine
//! - **tools**: MCP tool trait, registry, and tool implementations
//! - **mcp**: JSON-RPC envelopes, request routing, sessions, stdio transport
//! - **config** and **logging**: environment-driven configuration and tracing setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use garmin_mcp_server::workouts::normalize_workout;
//! use serde_json::json;
//!
//! let workout = normalize_workout(&json!({
//!     "name": "Tempo",
//!     "sport": "running",
//!     "steps": [
//!         { "stepType": "warmup", "endCondition": "time", "endConditionValue": 600 },
//!         { "stepType": "interval", "endCondition": "time", "endConditionValue": 1200,
//!           "targetType": "heart.rate.zone", "zoneNumber": 3 }
//!     ]
//! }))?;
//! assert_eq!(workout.step_ids(), vec![1, 2]);
//! # Ok::<(), garmin_mcp_server::errors::WorkoutValidationError>(())
//! ```

pub use garmin_core::{constants, models};

/// Environment-driven configuration
pub mod config;

/// Error types shared with the core crate
pub mod errors;

/// Structured logging setup
pub mod logging;

/// MCP protocol, sessions, and transport
pub mod mcp;

/// MCP tools
pub mod tools;

/// Workout normalization and scheduling
pub mod workouts;
