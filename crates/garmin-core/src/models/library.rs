// ABOUTME: Curated views of Garmin Connect library entries for agent consumption
// ABOUTME: Keeps coaching-relevant fields and drops platform bookkeeping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use serde::Serialize;
use serde_json::Value;

/// Library entry summary used by list views
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutSummary {
    /// Library id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Workout name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Sport key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Who authored the workout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Creation timestamp as reported by the platform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    /// Last update timestamp as reported by the platform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
    /// Platform duration estimate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration_seconds: Option<f64>,
    /// Platform distance estimate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_distance_meters: Option<f64>,
}

impl WorkoutSummary {
    /// Curate a raw library entry
    #[must_use]
    pub fn from_platform(workout: &Value) -> Self {
        let text = |key: &str| workout.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            id: workout.get("workoutId").and_then(Value::as_i64),
            name: text("workoutName"),
            sport: workout
                .get("sportType")
                .and_then(|sport| sport.get("sportTypeKey"))
                .and_then(Value::as_str)
                .map(str::to_owned),
            description: text("description"),
            provider: text("workoutProvider"),
            created_date: text("createdDate"),
            updated_date: text("updatedDate"),
            estimated_duration_seconds: workout
                .get("estimatedDurationInSecs")
                .or_else(|| workout.get("estimatedDuration"))
                .and_then(Value::as_f64),
            estimated_distance_meters: workout
                .get("estimatedDistanceInMeters")
                .or_else(|| workout.get("estimatedDistance"))
                .and_then(Value::as_f64),
        }
    }
}

/// Library entry detail including its step tree, suitable as a template for edits
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutDetail {
    /// Summary fields
    #[serde(flatten)]
    pub summary: WorkoutSummary,
    /// Average training speed in m/s
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_training_speed_mps: Option<f64>,
    /// Raw segments as stored by the platform
    #[serde(skip_serializing_if = "Value::is_null")]
    pub segments: Value,
}

impl WorkoutDetail {
    /// Curate a raw library entry
    #[must_use]
    pub fn from_platform(workout: &Value) -> Self {
        Self {
            summary: WorkoutSummary::from_platform(workout),
            avg_training_speed_mps: workout.get("avgTrainingSpeed").and_then(Value::as_f64),
            segments: workout.get("workoutSegments").cloned().unwrap_or(Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_drops_missing_fields() {
        let raw = json!({
            "workoutId": 12,
            "workoutName": "Threshold",
            "sportType": {"sportTypeId": 2, "sportTypeKey": "cycling"},
            "ownerId": 99,
            "estimatedDurationInSecs": 3600
        });
        let value = serde_json::to_value(WorkoutSummary::from_platform(&raw)).unwrap();
        assert_eq!(
            value,
            json!({"id": 12, "name": "Threshold", "sport": "cycling", "estimated_duration_seconds": 3600.0})
        );
    }

    #[test]
    fn test_detail_keeps_segments() {
        let raw = json!({
            "workoutId": 3,
            "avgTrainingSpeed": 2.5,
            "workoutSegments": [{"segmentOrder": 1, "workoutSteps": []}]
        });
        let value = serde_json::to_value(WorkoutDetail::from_platform(&raw)).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["avg_training_speed_mps"], 2.5);
        assert_eq!(value["segments"][0]["segmentOrder"], 1);
    }
}
