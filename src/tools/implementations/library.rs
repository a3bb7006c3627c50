// ABOUTME: Library read tools returning curated workout summaries, details, and FIT exports.
// ABOUTME: Implements get_workouts, get_workout, download_workout.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};

use crate::constants::limits::MAX_WORKOUT_LIST_LIMIT;
use crate::constants::tools::{DOWNLOAD_WORKOUT, GET_WORKOUT, GET_WORKOUTS};
use crate::errors::AppResult;
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

use super::{optional_u32, required_id};

fn workout_id_schema(description: &str) -> JsonSchema {
    JsonSchema::object(
        vec![("workout_id", PropertySchema::typed("integer", description))],
        &["workout_id"],
    )
}

/// Lists library workouts.
pub struct GetWorkoutsTool;

#[async_trait]
impl McpTool for GetWorkoutsTool {
    fn name(&self) -> &'static str {
        GET_WORKOUTS
    }

    fn description(&self) -> &'static str {
        "List workouts in the Garmin Connect library with their ids, names and sports"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::object(
            vec![
                (
                    "start",
                    PropertySchema::typed("integer", "Offset into the library (default 0)"),
                ),
                (
                    "limit",
                    PropertySchema::typed("integer", "Maximum number of workouts to return"),
                ),
            ],
            &[],
        )
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_SESSION | ToolCapabilities::READS_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let start = optional_u32(&args, GET_WORKOUTS, "start", u32::MAX)?.unwrap_or(0);
        let limit = optional_u32(&args, GET_WORKOUTS, "limit", MAX_WORKOUT_LIST_LIMIT)?
            .filter(|limit| *limit > 0)
            .unwrap_or(ctx.config().workout_list_limit);
        let workouts = ctx.scheduler()?.library(start, limit).await?;
        Ok(ToolResult::ok(json!({
            "start": start,
            "limit": limit,
            "count": workouts.len(),
            "workouts": workouts,
        })))
    }
}

/// Reads one library workout including its steps.
pub struct GetWorkoutTool;

#[async_trait]
impl McpTool for GetWorkoutTool {
    fn name(&self) -> &'static str {
        GET_WORKOUT
    }

    fn description(&self) -> &'static str {
        "Get one library workout with its segments and steps"
    }

    fn input_schema(&self) -> JsonSchema {
        workout_id_schema("Library id of the workout")
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_SESSION | ToolCapabilities::READS_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let workout_id = required_id(&args, GET_WORKOUT, "workout_id")?;
        let detail = ctx.scheduler()?.detail(workout_id).await?;
        Ok(ToolResult::from_serializable(&detail)?)
    }
}

/// Exports a library workout as a FIT file.
pub struct DownloadWorkoutTool;

#[async_trait]
impl McpTool for DownloadWorkoutTool {
    fn name(&self) -> &'static str {
        DOWNLOAD_WORKOUT
    }

    fn description(&self) -> &'static str {
        "Download a library workout as a FIT file, returned base64-encoded"
    }

    fn input_schema(&self) -> JsonSchema {
        workout_id_schema("Library id of the workout to export")
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_SESSION | ToolCapabilities::READS_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let workout_id = required_id(&args, DOWNLOAD_WORKOUT, "workout_id")?;
        let bytes = ctx.scheduler()?.download(workout_id).await?;
        Ok(ToolResult::ok(json!({
            "workout_id": workout_id,
            "format": "FIT",
            "size_bytes": bytes.len(),
            "data_base64": STANDARD.encode(&bytes),
        })))
    }
}

/// Create all library tools for registration
#[must_use]
pub fn create_library_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(GetWorkoutsTool),
        Box::new(GetWorkoutTool),
        Box::new(DownloadWorkoutTool),
    ]
}
