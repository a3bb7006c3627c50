// ABOUTME: Workout definition tools for normalizing and managing library entries.
// ABOUTME: Implements normalize_workout, create_workout, update_workout, delete_workout, plan_workout.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Workout Tools
//!
//! Every definition passes through the structure normalizer before any remote
//! call; a rejected definition never reaches Garmin Connect.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::constants::tools::{
    CREATE_WORKOUT, DELETE_WORKOUT, NORMALIZE_WORKOUT, PLAN_WORKOUT, UPDATE_WORKOUT,
};
use crate::errors::AppResult;
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::models::CanonicalWorkout;
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};
use crate::workouts::normalize_workout;

use super::{required_date, required_id, required_workout};

const WORKOUT_DESCRIPTION: &str =
    "Workout definition. Either the full form (workoutName, sportType, workoutSegments) or the \
     simplified form: {name, sport, steps}. Steps take stepType (warmup, cooldown, interval, \
     recovery, rest, other), endCondition (lap.button, time, distance, calories, heart.rate) with \
     endConditionValue, and targetType (no.target, heart.rate.zone, power.zone, pace.zone, speed.zone, \
     cadence) with targetValueOne/targetValueTwo or zoneNumber. Repeat groups: \
     {type: repeat, numberOfIterations, steps}.";

fn workout_property() -> PropertySchema {
    PropertySchema::typed("object", WORKOUT_DESCRIPTION)
}

fn normalized_argument(args: &Value, tool: &str) -> AppResult<CanonicalWorkout> {
    let raw = required_workout(args, tool, "workout")?;
    Ok(normalize_workout(&raw)?)
}

// ============================================================================
// NormalizeWorkoutTool
// ============================================================================

/// Validates and rewrites a definition without any remote call.
pub struct NormalizeWorkoutTool;

#[async_trait]
impl McpTool for NormalizeWorkoutTool {
    fn name(&self) -> &'static str {
        NORMALIZE_WORKOUT
    }

    fn description(&self) -> &'static str {
        "Validate a workout definition and return the exact structure Garmin Connect accepts, \
         without creating anything"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(vec![("workout", workout_property())], &["workout"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::NORMALIZES
    }

    async fn execute(&self, args: Value, _ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let workout = normalized_argument(&args, NORMALIZE_WORKOUT)?;
        Ok(ToolResult::ok(json!({
            "node_count": workout.node_count(),
            "step_ids": workout.step_ids(),
            "workout": workout,
        })))
    }
}

// ============================================================================
// CreateWorkoutTool
// ============================================================================

/// Adds a normalized definition to the library.
pub struct CreateWorkoutTool;

#[async_trait]
impl McpTool for CreateWorkoutTool {
    fn name(&self) -> &'static str {
        CREATE_WORKOUT
    }

    fn description(&self) -> &'static str {
        "Create a workout in the Garmin Connect library. Returns its workout_id; the workout is \
         not scheduled"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(vec![("workout", workout_property())], &["workout"])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_SESSION
            | ToolCapabilities::WRITES_DATA
            | ToolCapabilities::NORMALIZES
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let workout = normalized_argument(&args, CREATE_WORKOUT)?;
        let created = ctx.scheduler()?.create(&workout).await?;
        Ok(ToolResult::from_serializable(&created)?)
    }
}

// ============================================================================
// UpdateWorkoutTool
// ============================================================================

/// Replaces the definition of an existing library entry.
pub struct UpdateWorkoutTool;

#[async_trait]
impl McpTool for UpdateWorkoutTool {
    fn name(&self) -> &'static str {
        UPDATE_WORKOUT
    }

    fn description(&self) -> &'static str {
        "Replace the definition of an existing library workout. Scheduled occurrences keep \
         pointing at it"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![
                (
                    "workout_id",
                    PropertySchema::typed("integer", "Library id of the workout to replace"),
                ),
                ("workout", workout_property()),
            ],
            &["workout_id", "workout"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_SESSION
            | ToolCapabilities::WRITES_DATA
            | ToolCapabilities::NORMALIZES
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let workout_id = required_id(&args, UPDATE_WORKOUT, "workout_id")?;
        let workout = normalized_argument(&args, UPDATE_WORKOUT)?;
        let updated = ctx.scheduler()?.update(workout_id, &workout).await?;
        Ok(ToolResult::from_serializable(&updated)?)
    }
}

// ============================================================================
// DeleteWorkoutTool
// ============================================================================

/// Removes a library entry together with its calendar occurrences.
pub struct DeleteWorkoutTool;

#[async_trait]
impl McpTool for DeleteWorkoutTool {
    fn name(&self) -> &'static str {
        DELETE_WORKOUT
    }

    fn description(&self) -> &'static str {
        "Delete a workout from the library. Garmin Connect also removes every calendar \
         occurrence of it"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![(
                "workout_id",
                PropertySchema::typed("integer", "Library id of the workout to delete"),
            )],
            &["workout_id"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_SESSION | ToolCapabilities::WRITES_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let workout_id = required_id(&args, DELETE_WORKOUT, "workout_id")?;
        ctx.scheduler()?.delete(workout_id).await?;
        Ok(ToolResult::ok(json!({
            "workout_id": workout_id,
            "deleted": true,
            "scheduled_occurrences_removed": true,
        })))
    }
}

// ============================================================================
// PlanWorkoutTool
// ============================================================================

/// Creates a library entry and schedules it on one date.
pub struct PlanWorkoutTool;

#[async_trait]
impl McpTool for PlanWorkoutTool {
    fn name(&self) -> &'static str {
        PLAN_WORKOUT
    }

    fn description(&self) -> &'static str {
        "Create a workout and schedule it on a date in one call. If scheduling fails after the \
         workout was created, the error is PARTIAL_SUCCESS and its details carry the new \
         workout_id so it can be scheduled later"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![
                ("workout", workout_property()),
                (
                    "date",
                    PropertySchema::typed("string", "Calendar date in YYYY-MM-DD format"),
                ),
            ],
            &["workout", "date"],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_SESSION
            | ToolCapabilities::WRITES_DATA
            | ToolCapabilities::NORMALIZES
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let workout = normalized_argument(&args, PLAN_WORKOUT)?;
        let date = required_date(&args, PLAN_WORKOUT, "date")?;
        let planned = ctx.scheduler()?.plan(&workout, date).await?;
        Ok(ToolResult::from_serializable(&planned)?)
    }
}

// ============================================================================
// Module exports
// ============================================================================

/// Create all workout tools for registration
#[must_use]
pub fn create_workout_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(NormalizeWorkoutTool),
        Box::new(CreateWorkoutTool),
        Box::new(UpdateWorkoutTool),
        Box::new(DeleteWorkoutTool),
        Box::new(PlanWorkoutTool),
    ]
}
