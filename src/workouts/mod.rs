// ABOUTME: Workout normalization and scheduling engine
// ABOUTME: Input model, step and structure normalizers, and the scheduling state machine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

/// Tagged boundary model for caller-supplied definitions
pub mod input;
/// Leaf step normalization and zone shorthand detection
pub mod normalizer;
/// Library and calendar state machine
pub mod scheduling;
/// Whole-tree normalization with depth-first ids
pub mod structure;

pub use input::{RawNode, RawRepeatGroup, RawSegment, RawStep, RawWorkout};
pub use normalizer::{detect_zone_shorthand, normalize_step};
pub use scheduling::{
    CreatedWorkout, PlanError, PlannedWorkout, UpdatedWorkout, WorkoutError, WorkoutScheduler,
};
pub use structure::{normalize_raw_workout, normalize_steps, normalize_workout};
