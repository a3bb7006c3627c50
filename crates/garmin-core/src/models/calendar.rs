// ABOUTME: Calendar dates, inclusive date ranges, and scheduled workout occurrences
// ABOUTME: Strict YYYY-MM-DD parsing and extraction of occurrences from platform payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use serde_json::{json, Value};

use crate::constants::limits::MAX_CALENDAR_RANGE_DAYS;
use crate::errors::{AppError, AppResult, ErrorCode};

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns `InvalidFormat` when the value is not a real date in that exact shape.
pub fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    let well_formed = value.len() == 10
        && value.bytes().enumerate().all(|(index, byte)| match index {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        });
    let parsed = well_formed
        .then(|| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
        .flatten();
    parsed.ok_or_else(|| {
        AppError::new(
            ErrorCode::InvalidFormat,
            format!("{field} must be a valid date in YYYY-MM-DD format, got '{value}'"),
        )
        .with_details(json!({ "field": field }))
    })
}

/// Inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// First day, inclusive
    pub start: NaiveDate,
    /// Last day, inclusive
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting reversed or overlong spans.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `start > end` and `ValueOutOfRange` when the
    /// range covers more than [`MAX_CALENDAR_RANGE_DAYS`] days.
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start > end {
            return Err(AppError::invalid_input(format!(
                "start_date {start} is after end_date {end}"
            )));
        }
        let range = Self { start, end };
        if range.days() > MAX_CALENDAR_RANGE_DAYS {
            return Err(AppError::new(
                ErrorCode::ValueOutOfRange,
                format!(
                    "date range covers {} days, at most {MAX_CALENDAR_RANGE_DAYS} are allowed",
                    range.days()
                ),
            ));
        }
        Ok(range)
    }

    /// Number of days covered, both ends included
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether `date` falls inside the range
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every `(year, month)` pair touched by the range, month 1-based, in order
    #[must_use]
    pub fn months(&self) -> Vec<(i32, u32)> {
        let mut months = Vec::new();
        let (mut year, mut month) = (self.start.year(), self.start.month());
        let last = (self.end.year(), self.end.month());
        loop {
            months.push((year, month));
            if (year, month) >= last {
                break;
            }
            if month == 12 {
                year += 1;
                month = 1;
            } else {
                month += 1;
            }
        }
        months
    }
}

/// A library entry placed on a calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledOccurrence {
    /// Calendar date
    pub date: NaiveDate,
    /// Platform occurrence id (`workoutScheduleId`), `None` when the platform
    /// accepted a schedule call without reporting it
    pub schedule_id: Option<i64>,
    /// Library id of the scheduled workout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<i64>,
    /// Workout name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Sport key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    /// Whether an activity was recorded against the occurrence
    pub completed: bool,
}

impl ScheduledOccurrence {
    /// Extract an occurrence from a calendar-month item, skipping non-workout items
    #[must_use]
    pub fn from_calendar_item(item: &Value) -> Option<Self> {
        if item.get("itemType").and_then(Value::as_str) != Some("workout") {
            return None;
        }
        let schedule_id = item
            .get("workoutScheduleId")
            .or_else(|| item.get("id"))
            .and_then(Value::as_i64)?;
        let date = item
            .get("date")
            .and_then(Value::as_str)
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())?;
        Some(Self {
            date,
            schedule_id: Some(schedule_id),
            workout_id: item.get("workoutId").and_then(Value::as_i64),
            name: string_field(item, &["title", "workoutName"]),
            sport: string_field(item, &["sportTypeKey"]),
            completed: item
                .get("isCompleted")
                .or_else(|| item.get("completed"))
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
    }

    /// Extract an occurrence from a schedule or reschedule response
    #[must_use]
    pub fn from_schedule_response(response: &Value) -> Option<Self> {
        let schedule_id = response.get("workoutScheduleId").and_then(Value::as_i64)?;
        let date = response
            .get("calendarDate")
            .or_else(|| response.get("date"))
            .and_then(Value::as_str)
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())?;
        let workout = response.get("workout").unwrap_or(&Value::Null);
        Some(Self {
            date,
            schedule_id: Some(schedule_id),
            workout_id: workout.get("workoutId").and_then(Value::as_i64),
            name: string_field(workout, &["workoutName"]),
            sport: workout
                .get("sportType")
                .and_then(|sport| sport.get("sportTypeKey"))
                .and_then(Value::as_str)
                .map(str::to_owned),
            completed: response
                .get("completed")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
    }
}

fn string_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_date_is_strict() {
        assert_eq!(parse_date("date", "2025-03-09").unwrap(), date("2025-03-09"));
        for bad in ["2025-3-9", "2025-02-30", "09/03/2025", "2025-03-09T00:00:00", ""] {
            let error = parse_date("date", bad).unwrap_err();
            assert_eq!(error.code, ErrorCode::InvalidFormat, "{bad}");
        }
    }

    #[test]
    fn test_range_validation() {
        assert!(DateRange::new(date("2025-01-02"), date("2025-01-01")).is_err());
        let full_leap_year = DateRange::new(date("2024-01-01"), date("2024-12-31")).unwrap();
        assert_eq!(full_leap_year.days(), 366);
        let error = DateRange::new(date("2024-01-01"), date("2025-01-01")).unwrap_err();
        assert_eq!(error.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_months_cross_year_boundary() {
        let range = DateRange::new(date("2024-11-20"), date("2025-02-03")).unwrap();
        assert_eq!(range.months(), vec![(2024, 11), (2024, 12), (2025, 1), (2025, 2)]);
        let single = DateRange::new(date("2025-05-01"), date("2025-05-01")).unwrap();
        assert_eq!(single.months(), vec![(2025, 5)]);
        assert!(single.contains(date("2025-05-01")));
        assert!(!single.contains(date("2025-05-02")));
    }

    #[test]
    fn test_calendar_item_extraction() {
        let item = json!({
            "id": 555,
            "itemType": "workout",
            "workoutId": 42,
            "title": "Tempo",
            "date": "2025-04-01",
            "sportTypeKey": "running"
        });
        let occurrence = ScheduledOccurrence::from_calendar_item(&item).unwrap();
        assert_eq!(occurrence.schedule_id, Some(555));
        assert_eq!(occurrence.workout_id, Some(42));
        assert_eq!(occurrence.name.as_deref(), Some("Tempo"));
        assert!(!occurrence.completed);

        let activity = json!({"id": 1, "itemType": "activity", "date": "2025-04-01"});
        assert!(ScheduledOccurrence::from_calendar_item(&activity).is_none());
    }

    #[test]
    fn test_schedule_response_extraction() {
        let response = json!({
            "workoutScheduleId": 900,
            "calendarDate": "2025-06-10",
            "workout": {"workoutId": 42, "workoutName": "Hills", "sportType": {"sportTypeKey": "running"}}
        });
        let occurrence = ScheduledOccurrence::from_schedule_response(&response).unwrap();
        assert_eq!(occurrence.schedule_id, Some(900));
        assert_eq!(occurrence.date, date("2025-06-10"));
        assert_eq!(occurrence.sport.as_deref(), Some("running"));
    }
}
