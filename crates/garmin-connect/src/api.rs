// ABOUTME: Async trait describing the Garmin Connect operations the workout engine needs
// ABOUTME: Implemented by the HTTP client and by in-memory doubles in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use async_trait::async_trait;
use chrono::NaiveDate;
use garmin_core::errors::RemoteResult;
use garmin_core::models::CanonicalWorkout;
use serde_json::Value;

/// Workout library, schedule, and calendar operations.
///
/// Responses are the platform's JSON bodies; callers extract what they need.
/// Deleting a library entry also deletes every calendar occurrence of it on
/// the platform side.
#[async_trait]
pub trait GarminConnectApi: Send + Sync {
    /// List library entries
    async fn list_workouts(&self, start: u32, limit: u32) -> RemoteResult<Vec<Value>>;

    /// Read one library entry, `None` when the platform reports it missing
    async fn get_workout(&self, workout_id: i64) -> RemoteResult<Option<Value>>;

    /// Create a library entry; the response carries the new `workoutId`
    async fn create_workout(&self, workout: &CanonicalWorkout) -> RemoteResult<Value>;

    /// Replace a library entry's definition
    async fn update_workout(&self, workout_id: i64, workout: &CanonicalWorkout)
        -> RemoteResult<Value>;

    /// Delete a library entry
    async fn delete_workout(&self, workout_id: i64) -> RemoteResult<()>;

    /// Place a library entry on a date; the response carries `workoutScheduleId`
    async fn schedule_workout(&self, workout_id: i64, date: NaiveDate) -> RemoteResult<Value>;

    /// Move an occurrence to another date
    async fn reschedule_workout(&self, schedule_id: i64, date: NaiveDate) -> RemoteResult<Value>;

    /// Remove an occurrence, keeping the library entry
    async fn unschedule_workout(&self, schedule_id: i64) -> RemoteResult<()>;

    /// Calendar items of one month (`month` is 1-based)
    async fn calendar_month(&self, year: i32, month: u32) -> RemoteResult<Vec<Value>>;

    /// Export a library entry as a FIT file
    async fn download_workout(&self, workout_id: i64) -> RemoteResult<Vec<u8>>;
}
