// ABOUTME: Validation errors raised while normalizing caller-supplied workout definitions
// ABOUTME: Every variant names the JSON path of the offending node so agents can fix their input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use serde_json::json;

use super::{AppError, ErrorCode};

/// Validation failures for workout definitions.
///
/// These are always detected locally, before any remote call is issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkoutValidationError {
    /// The node at `path` is not a JSON object
    #[error("{path}: expected an object")]
    NotAnObject {
        /// JSON path of the node
        path: String,
    },

    /// A required field is absent or null
    #[error("{path}: missing required field '{field}'")]
    MissingField {
        /// JSON path of the node
        path: String,
        /// Name of the missing field
        field: &'static str,
    },

    /// A field has the wrong JSON type
    #[error("{path}: field '{field}' must be {expected}")]
    InvalidFieldType {
        /// JSON path of the node
        path: String,
        /// Name of the field
        field: &'static str,
        /// Human description of the accepted type
        expected: &'static str,
    },

    /// The node's `type` tag is neither a step nor a repeat group alias
    #[error("{path}: unrecognized node type '{tag}'")]
    UnknownNodeType {
        /// JSON path of the node
        path: String,
        /// Tag supplied by the caller
        tag: String,
    },

    /// The `stepTypeKey` is not in the fixed step type table
    #[error("{path}: unrecognized step type '{key}' (expected warmup, cooldown, interval, recovery, rest, repeat, other)")]
    UnknownStepType {
        /// JSON path of the node
        path: String,
        /// Key supplied by the caller
        key: String,
    },

    /// End condition key is unknown and carries no numeric id to pass through
    #[error("{path}: unrecognized end condition '{key}'")]
    UnknownEndCondition {
        /// JSON path of the node
        path: String,
        /// Key supplied by the caller
        key: String,
    },

    /// `endConditionValue` was supplied without saying what it measures
    #[error("{path}: endConditionValue given without an endCondition (time, distance, ...)")]
    AmbiguousEndCondition {
        /// JSON path of the node
        path: String,
    },

    /// Target type key is unknown
    #[error("{path}: unrecognized target type '{key}'")]
    UnknownTargetType {
        /// JSON path of the node
        path: String,
        /// Key supplied by the caller
        key: String,
    },

    /// An explicit zone number on a target type that has no zones
    #[error("{path}: zoneNumber is only valid for heart.rate.zone and power.zone targets, got '{target}'")]
    ZoneNotSupported {
        /// JSON path of the node
        path: String,
        /// Target type key of the step
        target: String,
    },

    /// An explicit zone number outside the valid range
    #[error("{path}: zoneNumber {zone} is outside 1-{max}")]
    ZoneOutOfRange {
        /// JSON path of the node
        path: String,
        /// Zone supplied by the caller
        zone: i64,
        /// Highest valid zone for the target type
        max: u8,
    },

    /// Sport is missing or not supported
    #[error("unrecognized sport '{value}' (expected running, cycling, swimming, other)")]
    UnknownSport {
        /// Sport supplied by the caller
        value: String,
    },

    /// Repeat count below one
    #[error("{path}: numberOfIterations must be at least 1, got {value}")]
    InvalidIterations {
        /// JSON path of the node
        path: String,
        /// Value supplied by the caller
        value: i64,
    },

    /// Repeat group without children
    #[error("{path}: repeat group has no child steps")]
    EmptyRepeatGroup {
        /// JSON path of the node
        path: String,
    },

    /// The definition contains no steps at all
    #[error("workout has no steps")]
    EmptyWorkout,
}

impl WorkoutValidationError {
    /// JSON path of the offending node, when the failure is node-specific
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::NotAnObject { path }
            | Self::MissingField { path, .. }
            | Self::InvalidFieldType { path, .. }
            | Self::UnknownNodeType { path, .. }
            | Self::UnknownStepType { path, .. }
            | Self::UnknownEndCondition { path, .. }
            | Self::AmbiguousEndCondition { path }
            | Self::UnknownTargetType { path, .. }
            | Self::ZoneNotSupported { path, .. }
            | Self::ZoneOutOfRange { path, .. }
            | Self::InvalidIterations { path, .. }
            | Self::EmptyRepeatGroup { path } => Some(path),
            Self::UnknownSport { .. } | Self::EmptyWorkout => None,
        }
    }

    /// Error code this failure maps to
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MissingField { .. } => ErrorCode::MissingRequiredField,
            Self::ZoneOutOfRange { .. } | Self::InvalidIterations { .. } => {
                ErrorCode::ValueOutOfRange
            }
            Self::InvalidFieldType { .. } | Self::NotAnObject { .. } => ErrorCode::InvalidFormat,
            _ => ErrorCode::InvalidInput,
        }
    }
}

impl From<WorkoutValidationError> for AppError {
    fn from(error: WorkoutValidationError) -> Self {
        let details = error
            .path()
            .map_or(serde_json::Value::Null, |path| json!({ "path": path }));
        Self::new(error.code(), error.to_string()).with_details(details)
    }
}
