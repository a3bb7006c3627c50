// ABOUTME: Structure normalizer walking the whole step tree of a workout definition
// ABOUTME: Assigns depth-first step ids across segments and rebuilds repeat groups canonically
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Structure normalizer
//!
//! Ids are strictly increasing in depth-first order across every segment and
//! nesting level; a repeat group takes its id before its children. Orders are
//! 1-based within each enclosing sequence. Any failure rejects the whole
//! definition.

use garmin_core::errors::WorkoutValidationError;
use garmin_core::models::{CanonicalWorkout, RepeatGroup, WorkoutNode, WorkoutSegment};
use serde_json::Value;
use tracing::debug;

use super::input::{parse_nodes, RawNode, RawWorkout};
use super::normalizer::normalize_step;

/// Normalize a full or simplified workout definition.
///
/// # Errors
///
/// Returns the first validation failure; no partial output is produced.
pub fn normalize_workout(value: &Value) -> Result<CanonicalWorkout, WorkoutValidationError> {
    let raw = RawWorkout::from_value(value)?;
    let workout = normalize_raw_workout(&raw)?;
    debug!(
        name = %workout.workout_name,
        sport = workout.sport_type.sport_type_key.as_str(),
        nodes = workout.node_count(),
        "Normalized workout definition"
    );
    Ok(workout)
}

/// Normalize a bare list of steps, numbering from 1.
///
/// # Errors
///
/// Returns the first validation failure in the list.
pub fn normalize_steps(steps: &[Value]) -> Result<Vec<WorkoutNode>, WorkoutValidationError> {
    let nodes = parse_nodes(steps, "steps")?;
    let mut next_id = 1;
    normalize_sequence(&nodes, &mut next_id)
}

/// Normalize an already parsed workout.
///
/// # Errors
///
/// Returns the first validation failure in any segment.
pub fn normalize_raw_workout(raw: &RawWorkout) -> Result<CanonicalWorkout, WorkoutValidationError> {
    let mut next_id = 1;
    let mut segments = Vec::with_capacity(raw.segments.len());
    for (index, segment) in raw.segments.iter().enumerate() {
        segments.push(WorkoutSegment {
            segment_order: position(index),
            sport_type: segment.sport.into(),
            workout_steps: normalize_sequence(&segment.nodes, &mut next_id)?,
        });
    }
    Ok(CanonicalWorkout::new(
        raw.name.clone(),
        raw.description.clone(),
        raw.sport,
        segments,
    ))
}

fn normalize_sequence(
    nodes: &[RawNode],
    next_id: &mut u32,
) -> Result<Vec<WorkoutNode>, WorkoutValidationError> {
    nodes
        .iter()
        .enumerate()
        .map(|(index, node)| normalize_node(node, position(index), next_id))
        .collect()
}

fn normalize_node(
    node: &RawNode,
    step_order: u32,
    next_id: &mut u32,
) -> Result<WorkoutNode, WorkoutValidationError> {
    let step_id = *next_id;
    *next_id += 1;
    match node {
        RawNode::Step(step) => normalize_step(step, step_id, step_order).map(WorkoutNode::Step),
        RawNode::Group(group) => {
            let children = normalize_sequence(&group.children, next_id)?;
            let mut canonical = RepeatGroup::new(step_id, step_order, group.iterations, children);
            canonical.skip_last_rest_step = group.skip_last_rest_step;
            canonical.smart_repeat = group.smart_repeat;
            Ok(WorkoutNode::Group(canonical))
        }
    }
}

/// 1-based position of a sequence index
fn position(index: usize) -> u32 {
    u32::try_from(index).map_or(u32::MAX, |index| index.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ids_follow_depth_first_order() {
        let nodes = normalize_steps(&[
            json!({"stepType": "warmup"}),
            json!({"type": "repeat", "numberOfIterations": 3, "workoutSteps": [
                {"stepType": "interval"},
                {"stepType": "recovery"}
            ]}),
            json!({"stepType": "cooldown"}),
        ])
        .unwrap();
        let ids: Vec<u32> = nodes.iter().flat_map(WorkoutNode::step_ids).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        let orders: Vec<u32> = nodes.iter().map(WorkoutNode::step_order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        let WorkoutNode::Group(group) = &nodes[1] else {
            panic!("expected a repeat group");
        };
        let child_orders: Vec<u32> = group.workout_steps.iter().map(WorkoutNode::step_order).collect();
        assert_eq!(child_orders, vec![1, 2]);
    }

    #[test]
    fn test_ids_continue_across_segments() {
        let workout = normalize_workout(&json!({
            "workoutName": "Brick",
            "sportType": {"sportTypeKey": "cycling"},
            "workoutSegments": [
                {"segmentOrder": 1, "workoutSteps": [{"stepType": "interval"}, {"stepType": "interval"}]},
                {"segmentOrder": 2, "sportType": "running", "workoutSteps": [{"stepType": "interval"}]}
            ]
        }))
        .unwrap();
        assert_eq!(workout.step_ids(), vec![1, 2, 3]);
        assert_eq!(workout.workout_segments[1].segment_order, 2);
        assert_eq!(
            workout.workout_segments[1].sport_type.sport_type_key.as_str(),
            "running"
        );
    }

    #[test]
    fn test_failure_anywhere_rejects_everything() {
        let error = normalize_steps(&[
            json!({"stepType": "warmup"}),
            json!({"type": "repeat", "numberOfIterations": 2, "workoutSteps": [
                {"stepType": "sprint"}
            ]}),
        ])
        .unwrap_err();
        assert_eq!(
            error,
            WorkoutValidationError::UnknownStepType {
                path: "steps[1].workoutSteps[0]".to_owned(),
                key: "sprint".to_owned()
            }
        );
    }
}
