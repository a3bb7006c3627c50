// ABOUTME: Module containing all MCP tool implementations organized by category.
// ABOUTME: Shared argument extraction helpers used by every category.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Tool Implementations
//!
//! - `workouts` - normalize, create, update, delete, plan
//! - `calendar` - schedule, reschedule, unschedule, calendar range
//! - `library` - library listing, single entry, FIT download
//! - `session` - install, clear, and inspect session tokens
//!
//! Each category is conditionally compiled based on feature flags.

use chrono::NaiveDate;
use serde_json::Value;

use crate::errors::AppResult;
use crate::models::parse_date;
use crate::tools::errors::ToolError;

// Workout tools: normalize_workout, create_workout, update_workout, delete_workout, plan_workout
#[cfg(feature = "tools-workouts")]
pub mod workouts;

// Calendar tools: schedule_workout, reschedule_workout, unschedule_workout, get_calendar
#[cfg(feature = "tools-calendar")]
pub mod calendar;

// Library tools: get_workouts, get_workout, download_workout
#[cfg(feature = "tools-library")]
pub mod library;

// Session tools: set_garmin_session, clear_garmin_session, get_session_status
#[cfg(feature = "tools-session")]
pub mod session;

/// Required positive integer id; numeric strings are accepted
pub(crate) fn required_id(args: &Value, tool: &str, name: &str) -> AppResult<i64> {
    let value = args
        .get(name)
        .filter(|value| !value.is_null())
        .ok_or_else(|| ToolError::missing_parameter(tool, name))?;
    let id = match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    id.filter(|id| *id > 0)
        .ok_or_else(|| ToolError::invalid_parameter(tool, name, "must be a positive integer").into())
}

/// Required `YYYY-MM-DD` date
pub(crate) fn required_date(args: &Value, tool: &str, name: &str) -> AppResult<NaiveDate> {
    let text = required_str(args, tool, name)?;
    parse_date(name, text)
}

/// Required non-empty string
pub(crate) fn required_str<'a>(args: &'a Value, tool: &str, name: &str) -> AppResult<&'a str> {
    match args.get(name) {
        None | Some(Value::Null) => Err(ToolError::missing_parameter(tool, name).into()),
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.as_str()),
        Some(_) => Err(ToolError::invalid_parameter(tool, name, "must be a non-empty string").into()),
    }
}

/// Optional non-negative integer bounded by `max`
pub(crate) fn optional_u32(
    args: &Value,
    tool: &str,
    name: &str,
    max: u32,
) -> AppResult<Option<u32>> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|value| u32::try_from(value).ok())
            .filter(|value| *value <= max)
            .map(Some)
            .ok_or_else(|| {
                ToolError::invalid_parameter(
                    tool,
                    name,
                    format!("must be an integer between 0 and {max}"),
                )
                .into()
            }),
    }
}

/// Required workout definition; a JSON-encoded string is decoded first
pub(crate) fn required_workout(args: &Value, tool: &str, name: &str) -> AppResult<Value> {
    match args.get(name) {
        None | Some(Value::Null) => Err(ToolError::missing_parameter(tool, name).into()),
        Some(Value::Object(_)) => Ok(args[name].clone()),
        Some(Value::String(text)) => serde_json::from_str::<Value>(text)
            .ok()
            .filter(Value::is_object)
            .ok_or_else(|| {
                ToolError::invalid_parameter(tool, name, "string is not a JSON object").into()
            }),
        Some(_) => Err(ToolError::invalid_parameter(tool, name, "must be a JSON object").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_required_id_accepts_numbers_and_numeric_strings() {
        let args = json!({ "a": 12, "b": "34", "c": -1, "d": "x" });
        assert_eq!(required_id(&args, "t", "a").unwrap(), 12);
        assert_eq!(required_id(&args, "t", "b").unwrap(), 34);
        assert_eq!(
            required_id(&args, "t", "c").unwrap_err().code,
            ErrorCode::InvalidInput
        );
        assert_eq!(
            required_id(&args, "t", "d").unwrap_err().code,
            ErrorCode::InvalidInput
        );
        assert_eq!(
            required_id(&args, "t", "missing").unwrap_err().code,
            ErrorCode::MissingRequiredField
        );
    }

    #[test]
    fn test_required_date_is_strict() {
        let args = json!({ "date": "2024-02-30", "ok": "2024-02-29" });
        assert_eq!(
            required_date(&args, "t", "date").unwrap_err().code,
            ErrorCode::InvalidFormat
        );
        assert_eq!(
            required_date(&args, "t", "ok").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_required_workout_decodes_strings() {
        let args = json!({ "workout": "{\"sport\": \"running\"}", "bad": "[1]" });
        assert_eq!(required_workout(&args, "t", "workout").unwrap()["sport"], "running");
        assert!(required_workout(&args, "t", "bad").is_err());
    }

    #[test]
    fn test_optional_u32_bounds() {
        let args = json!({ "limit": 50, "huge": 5000 });
        assert_eq!(optional_u32(&args, "t", "limit", 1000).unwrap(), Some(50));
        assert_eq!(optional_u32(&args, "t", "none", 1000).unwrap(), None);
        assert!(optional_u32(&args, "t", "huge", 1000).is_err());
    }
}
