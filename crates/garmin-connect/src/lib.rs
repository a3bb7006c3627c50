// ABOUTME: Garmin Connect remote client for workouts, schedules, and calendar months
// ABOUTME: Exposes the GarminConnectApi trait and its reqwest-backed implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Garmin Connect client
//!
//! Every call is issued exactly once. Failures come back as
//! [`RemoteError`](garmin_core::errors::RemoteError) and are never retried here.

pub use garmin_core::constants;
pub use garmin_core::errors;
pub use garmin_core::models;

/// Platform operations used by the scheduling engine
pub mod api;
/// reqwest implementation of [`api::GarminConnectApi`]
pub mod client;
/// Shared HTTP client with connection pooling
pub mod http_client;
/// Decoding of caller-supplied session tokens
pub mod tokens;

pub use api::GarminConnectApi;
pub use client::GarminConnectClient;
pub use http_client::{initialize_shared_client, shared_client};
pub use tokens::SessionTokens;
