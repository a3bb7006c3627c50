// ABOUTME: Wire models shared by the remote client and the MCP server
// ABOUTME: Canonical workout DTOs, calendar occurrences, and curated library views
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

/// Calendar dates, ranges, and scheduled occurrences
pub mod calendar;
/// Curated views of library entries returned by the platform
pub mod library;
/// Canonical workout wire model and lookup tables
pub mod workout;

pub use calendar::{parse_date, DateRange, ScheduledOccurrence};
pub use library::{WorkoutDetail, WorkoutSummary};
pub use workout::{
    CanonicalWorkout, EndCondition, EquipmentType, ExecutableStep, RepeatGroup, SportType,
    SportTypeKey, StepTarget, StepType, StepTypeKey, StrokeType, TargetType, TargetTypeKey,
    WorkoutNode, WorkoutSegment,
};
