// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for endpoints, protocol identification, zones, and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Tool identifiers exposed over MCP
pub mod tools;

pub use tools::*;

/// Protocol identification for MCP and JSON-RPC
pub mod protocol {
    /// JSON-RPC version (standard, not configurable)
    pub const JSONRPC_VERSION: &str = "2.0";
    /// MCP protocol version advertised during `initialize`
    pub const MCP_PROTOCOL_VERSION: &str = "2025-06-18";
    /// Server name advertised during `initialize`
    pub const SERVER_NAME: &str = "garmin-mcp-server";
    /// Server version from Cargo.toml
    pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

    /// JSON-RPC parse error
    pub const ERROR_PARSE: i32 = -32700;
    /// JSON-RPC invalid request
    pub const ERROR_INVALID_REQUEST: i32 = -32600;
    /// JSON-RPC method not found
    pub const ERROR_METHOD_NOT_FOUND: i32 = -32601;
    /// JSON-RPC invalid params
    pub const ERROR_INVALID_PARAMS: i32 = -32602;
    /// JSON-RPC internal error
    pub const ERROR_INTERNAL_ERROR: i32 = -32603;
}

/// Garmin Connect endpoint paths, relative to the configured base URL
pub mod endpoints {
    /// Library listing (`?start=&limit=`)
    pub const WORKOUTS: &str = "/workout-service/workouts";
    /// Single library entry; append `/{id}` for read, update, delete
    pub const WORKOUT: &str = "/workout-service/workout";
    /// Calendar occurrences; append `/{workoutId}` to create, `/{scheduleId}` to move or remove
    pub const SCHEDULE: &str = "/workout-service/schedule";
    /// Exported workout file; append `/{id}`
    pub const WORKOUT_FIT: &str = "/workout-service/workout/FIT";
    /// Calendar month view; append `/{year}/month/{zeroBasedMonth}`
    pub const CALENDAR_YEAR: &str = "/calendar-service/year";
}

/// Zone ranges for zone-eligible target types
pub mod zones {
    /// Highest heart rate zone
    pub const HEART_RATE_ZONE_MAX: u8 = 5;
    /// Highest power zone
    pub const POWER_ZONE_MAX: u8 = 7;
}

/// Default values applied when the caller leaves them out
pub mod defaults {
    /// Production Garmin Connect API host
    pub const API_BASE_URL: &str = "https://connectapi.garmin.com";
    /// Total request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
    /// Connect timeout in seconds
    pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Library listing page size
    pub const WORKOUT_LIST_LIMIT: u32 = 100;
    /// Name given to workouts submitted without one
    pub const WORKOUT_NAME: &str = "Workout";
    /// Average training speed in m/s attached to every new workout
    pub const AVG_TRAINING_SPEED: f64 = 2.5;
    /// `displayOrder` of the workout-level sport type
    pub const SPORT_TYPE_DISPLAY_ORDER: u32 = 1;
}

/// Request limits
pub mod limits {
    /// Longest calendar range accepted by `get_calendar`, in days
    pub const MAX_CALENDAR_RANGE_DAYS: i64 = 366;
    /// Largest library page a caller may request
    pub const MAX_WORKOUT_LIST_LIMIT: u32 = 1000;
}
