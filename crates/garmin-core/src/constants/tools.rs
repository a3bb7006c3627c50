// ABOUTME: Tool name constants for the workout MCP tools
// ABOUTME: Shared by tool implementations, the registry, and integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

/// Normalize a workout definition without touching the platform
pub const NORMALIZE_WORKOUT: &str = "normalize_workout";
/// Create a library entry
pub const CREATE_WORKOUT: &str = "create_workout";
/// Replace a library entry's definition
pub const UPDATE_WORKOUT: &str = "update_workout";
/// Delete a library entry (cascades to its calendar occurrences)
pub const DELETE_WORKOUT: &str = "delete_workout";
/// Create a library entry and schedule it
pub const PLAN_WORKOUT: &str = "plan_workout";
/// Schedule an existing library entry
pub const SCHEDULE_WORKOUT: &str = "schedule_workout";
/// Move a calendar occurrence
pub const RESCHEDULE_WORKOUT: &str = "reschedule_workout";
/// Remove a calendar occurrence
pub const UNSCHEDULE_WORKOUT: &str = "unschedule_workout";
/// List calendar occurrences in a date range
pub const GET_CALENDAR: &str = "get_calendar";
/// List library entries
pub const GET_WORKOUTS: &str = "get_workouts";
/// Read one library entry
pub const GET_WORKOUT: &str = "get_workout";
/// Download a library entry as a FIT file
pub const DOWNLOAD_WORKOUT: &str = "download_workout";
/// Store session tokens for this connection
pub const SET_GARMIN_SESSION: &str = "set_garmin_session";
/// Drop session tokens for this connection
pub const CLEAR_GARMIN_SESSION: &str = "clear_garmin_session";
/// Report whether this connection has a session
pub const GET_SESSION_STATUS: &str = "get_session_status";
