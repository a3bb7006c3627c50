// ABOUTME: Calendar tools placing library workouts on dates and listing scheduled occurrences.
// ABOUTME: Implements schedule_workout, reschedule_workout, unschedule_workout, get_calendar.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Calendar Tools
//!
//! - `ScheduleWorkoutTool` - confirm the library entry, then place it on a date
//! - `RescheduleWorkoutTool` - move one occurrence, keeping its id
//! - `UnscheduleWorkoutTool` - remove one occurrence, library untouched
//! - `GetCalendarTool` - workout occurrences in an inclusive date range

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::constants::tools::{
    GET_CALENDAR, RESCHEDULE_WORKOUT, SCHEDULE_WORKOUT, UNSCHEDULE_WORKOUT,
};
use crate::errors::AppResult;
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::models::DateRange;
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

use super::{required_date, required_id};

fn date_property(description: &str) -> PropertySchema {
    PropertySchema::typed("string", description)
}

// ============================================================================
// ScheduleWorkoutTool
// ============================================================================

/// Places an existing library workout on a calendar date.
pub struct ScheduleWorkoutTool;

#[async_trait]
impl McpTool for ScheduleWorkoutTool {
    fn name(&self) -> &'static str {
        SCHEDULE_WORKOUT
    }

    fn description(&self) -> &'static str {
        "Schedule an existing library workout on a date. Fails with RESOURCE_NOT_FOUND if the \
         workout_id is not in the library"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![
                (
                    "workout_id",
                    PropertySchema::typed("integer", "Library id of the workout"),
                ),
                ("date", date_property("Calendar date in YYYY-MM-DD format")),
            ],
            &["workout_id", "date"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_SESSION | ToolCapabilities::WRITES_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let workout_id = required_id(&args, SCHEDULE_WORKOUT, "workout_id")?;
        let date = required_date(&args, SCHEDULE_WORKOUT, "date")?;
        let occurrence = ctx.scheduler()?.schedule(workout_id, date).await?;
        Ok(ToolResult::from_serializable(&occurrence)?)
    }
}

// ============================================================================
// RescheduleWorkoutTool
// ============================================================================

/// Moves a scheduled occurrence to another date.
pub struct RescheduleWorkoutTool;

#[async_trait]
impl McpTool for RescheduleWorkoutTool {
    fn name(&self) -> &'static str {
        RESCHEDULE_WORKOUT
    }

    fn description(&self) -> &'static str {
        "Move a scheduled workout occurrence to a new date. The schedule_id stays the same"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![
                (
                    "schedule_id",
                    PropertySchema::typed("integer", "Occurrence id from get_calendar"),
                ),
                ("date", date_property("New calendar date in YYYY-MM-DD format")),
            ],
            &["schedule_id", "date"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_SESSION | ToolCapabilities::WRITES_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let schedule_id = required_id(&args, RESCHEDULE_WORKOUT, "schedule_id")?;
        let date = required_date(&args, RESCHEDULE_WORKOUT, "date")?;
        let occurrence = ctx.scheduler()?.reschedule(schedule_id, date).await?;
        Ok(ToolResult::from_serializable(&occurrence)?)
    }
}

// ============================================================================
// UnscheduleWorkoutTool
// ============================================================================

/// Removes one occurrence; the library entry stays.
pub struct UnscheduleWorkoutTool;

#[async_trait]
impl McpTool for UnscheduleWorkoutTool {
    fn name(&self) -> &'static str {
        UNSCHEDULE_WORKOUT
    }

    fn description(&self) -> &'static str {
        "Remove a scheduled workout occurrence from the calendar. The library workout is kept"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![(
                "schedule_id",
                PropertySchema::typed("integer", "Occurrence id from get_calendar"),
            )],
            &["schedule_id"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_SESSION | ToolCapabilities::WRITES_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let schedule_id = required_id(&args, UNSCHEDULE_WORKOUT, "schedule_id")?;
        ctx.scheduler()?.unschedule(schedule_id).await?;
        Ok(ToolResult::ok(json!({
            "schedule_id": schedule_id,
            "unscheduled": true,
        })))
    }
}

// ============================================================================
// GetCalendarTool
// ============================================================================

/// Lists scheduled workouts in a date range.
pub struct GetCalendarTool;

#[async_trait]
impl McpTool for GetCalendarTool {
    fn name(&self) -> &'static str {
        GET_CALENDAR
    }

    fn description(&self) -> &'static str {
        "List scheduled workouts between two dates, inclusive (at most 366 days)"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![
                ("start_date", date_property("First day, YYYY-MM-DD")),
                ("end_date", date_property("Last day, YYYY-MM-DD")),
            ],
            &["start_date", "end_date"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_SESSION | ToolCapabilities::READS_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let start = required_date(&args, GET_CALENDAR, "start_date")?;
        let end = required_date(&args, GET_CALENDAR, "end_date")?;
        let range = DateRange::new(start, end)?;
        let occurrences = ctx.scheduler()?.calendar(range).await?;
        Ok(ToolResult::ok(json!({
            "start_date": range.start,
            "end_date": range.end,
            "count": occurrences.len(),
            "scheduled_workouts": occurrences,
        })))
    }
}

// ============================================================================
// Module exports
// ============================================================================

/// Create all calendar tools for registration
#[must_use]
pub fn create_calendar_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(ScheduleWorkoutTool),
        Box::new(RescheduleWorkoutTool),
        Box::new(UnscheduleWorkoutTool),
        Box::new(GetCalendarTool),
    ]
}
