// ABOUTME: Tagged boundary model for caller-supplied workout definitions
// ABOUTME: Resolves key aliases and the simplified input form, validating every node with its JSON path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Raw workout input
//!
//! Agents send workouts in two shapes: the full segmented form the platform
//! returns from `get_workout`, and a simplified form (`sport: "running"`,
//! `steps: [...]`, string step types). Both are parsed here into
//! [`RawWorkout`], a tagged tree of [`RawNode`]s. Parsing validates shape and
//! vocabulary; identifiers, orders, and type codes are left to the normalizer.

use std::collections::{HashMap, HashSet};

use garmin_core::errors::WorkoutValidationError;
use garmin_core::models::{EndCondition, SportTypeKey, StepTypeKey, TargetTypeKey};
use serde_json::{Map, Value};

type ParseResult<T> = Result<T, WorkoutValidationError>;

const LEAF_TAGS: &[&str] = &["executablestepdto", "executablestep", "executable", "step"];
const GROUP_TAGS: &[&str] = &[
    "repeatgroupdto",
    "repeatgroup",
    "repeat",
    "repeat_group",
    "group",
];

/// Parsed workout, before identifiers are assigned
#[derive(Debug, Clone, PartialEq)]
pub struct RawWorkout {
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Workout-level sport
    pub sport: SportTypeKey,
    /// Non-empty segments in order
    pub segments: Vec<RawSegment>,
}

/// Parsed segment
#[derive(Debug, Clone, PartialEq)]
pub struct RawSegment {
    /// Segment sport, defaulting to the workout sport
    pub sport: SportTypeKey,
    /// Top-level nodes
    pub nodes: Vec<RawNode>,
}

/// A node of the caller's step tree
#[derive(Debug, Clone, PartialEq)]
pub enum RawNode {
    /// Leaf step
    Step(RawStep),
    /// Repeat group
    Group(RawRepeatGroup),
}

/// Leaf step as supplied by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct RawStep {
    /// JSON path used in error messages
    pub path: String,
    /// Step type key
    pub step_type: StepTypeKey,
    /// Optional note
    pub description: Option<String>,
    /// End condition, `None` when the caller named none
    pub end_condition: Option<EndCondition>,
    /// End condition value
    pub end_condition_value: Option<f64>,
    /// Target type, `None` when the caller named none
    pub target_type: Option<TargetTypeKey>,
    /// `targetValueOne` (alias `targetValueHigh`)
    pub target_value_one: Option<f64>,
    /// `targetValueTwo` (alias `targetValueLow`)
    pub target_value_two: Option<f64>,
    /// Explicit zone number
    pub zone_number: Option<i64>,
}

/// Repeat group as supplied by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct RawRepeatGroup {
    /// JSON path used in error messages
    pub path: String,
    /// Repeat count, at least 1
    pub iterations: u32,
    /// Defaults to true
    pub skip_last_rest_step: bool,
    /// Defaults to false
    pub smart_repeat: bool,
    /// Non-empty children
    pub children: Vec<RawNode>,
}

impl RawWorkout {
    /// Parse a full or simplified workout definition.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure found in document order.
    pub fn from_value(value: &Value) -> ParseResult<Self> {
        let root = "workout";
        let object = as_object(value, root)?;

        let name = optional_string(object, root, &["workoutName", "name"])?
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| garmin_core::constants::defaults::WORKOUT_NAME.to_owned());
        let description = optional_string(object, root, &["description"])?;

        let sport = match first_present(object, &["sportType", "sport"]) {
            Some((_, sport)) => parse_sport(sport)?,
            None => {
                return Err(WorkoutValidationError::MissingField {
                    path: root.to_owned(),
                    field: "sportType",
                })
            }
        };

        let segments = if let Some((key, segments)) = first_present(object, &["workoutSegments"]) {
            let items = as_array(segments, root, key)?;
            let mut parsed = Vec::with_capacity(items.len());
            for (index, segment) in items.iter().enumerate() {
                let path = format!("{key}[{index}]");
                parsed.push(RawSegment::from_value(segment, &path, sport)?);
            }
            parsed
        } else if let Some((key, steps)) = first_present(object, &["steps", "workoutSteps"]) {
            let nodes = parse_nodes(as_array(steps, root, key)?, key)?;
            vec![RawSegment { sport, nodes }]
        } else {
            Vec::new()
        };

        let segments: Vec<RawSegment> = segments
            .into_iter()
            .filter(|segment| !segment.nodes.is_empty())
            .collect();
        if segments.is_empty() {
            return Err(WorkoutValidationError::EmptyWorkout);
        }

        Ok(Self {
            name,
            description,
            sport,
            segments,
        })
    }
}

impl RawSegment {
    fn from_value(value: &Value, path: &str, workout_sport: SportTypeKey) -> ParseResult<Self> {
        let object = as_object(value, path)?;
        let sport = match first_present(object, &["sportType", "sport"]) {
            Some((_, sport)) => parse_sport(sport)?,
            None => workout_sport,
        };
        let nodes = match first_present(object, &["workoutSteps", "steps"]) {
            Some((key, steps)) => {
                parse_nodes(as_array(steps, path, key)?, &format!("{path}.{key}"))?
            }
            None => Vec::new(),
        };
        Ok(Self { sport, nodes })
    }
}

impl RawNode {
    /// Parse one node of the step tree.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure in this node or its descendants.
    pub fn from_value(value: &Value, path: &str) -> ParseResult<Self> {
        let object = as_object(value, path)?;
        if is_group(object, path)? {
            RawRepeatGroup::from_object(object, path, None).map(Self::Group)
        } else {
            RawStep::from_object(object, path).map(Self::Step)
        }
    }
}

/// Parse a list of nodes whose paths are `{prefix}[i]`
pub(crate) fn parse_nodes(items: &[Value], prefix: &str) -> ParseResult<Vec<RawNode>> {
    let entries: Vec<(String, &Value)> = items
        .iter()
        .enumerate()
        .map(|(index, item)| (format!("{prefix}[{index}]"), item))
        .collect();
    parse_siblings(&entries)
}

/// Parse sibling nodes, folding each flat repeat together with the steps its
/// `childStepId` chain points at into one group
fn parse_siblings(entries: &[(String, &Value)]) -> ParseResult<Vec<RawNode>> {
    let chains = flat_repeat_chains(entries);
    let moved: HashSet<usize> = chains.values().flatten().copied().collect();

    let mut nodes = Vec::with_capacity(entries.len());
    for (index, (path, value)) in entries.iter().enumerate() {
        if moved.contains(&index) {
            continue;
        }
        let node = match chains.get(&index) {
            Some(chain) => {
                let members: Vec<(String, &Value)> =
                    chain.iter().map(|member| entries[*member].clone()).collect();
                let children = parse_siblings(&members)?;
                RawRepeatGroup::from_object(as_object(value, path)?, path, Some(children))
                    .map(RawNode::Group)?
            }
            None => RawNode::from_value(value, path)?,
        };
        nodes.push(node);
    }
    Ok(nodes)
}

/// Index of every flat repeat mapped to the sibling indices of its children.
///
/// A flat repeat is a repeat without nested steps whose `childStepId` names a
/// sibling's `stepId`; that sibling's own `childStepId` continues the chain.
/// A step joins at most one chain.
fn flat_repeat_chains(entries: &[(String, &Value)]) -> HashMap<usize, Vec<usize>> {
    let mut by_step_id = HashMap::new();
    for (index, (_, value)) in entries.iter().enumerate() {
        if let Some(step_id) = value.get("stepId").and_then(step_reference) {
            by_step_id.entry(step_id).or_insert(index);
        }
    }

    let mut chains = HashMap::new();
    let mut moved = HashSet::new();
    for (index, (_, value)) in entries.iter().enumerate() {
        let Some(object) = value.as_object() else {
            continue;
        };
        if moved.contains(&index) || !is_flat_repeat(object) {
            continue;
        }
        let mut chain = Vec::new();
        let mut next = object.get("childStepId").and_then(step_reference);
        while let Some(member) = next.and_then(|step_id| by_step_id.get(&step_id).copied()) {
            if member == index || moved.contains(&member) {
                break;
            }
            moved.insert(member);
            chain.push(member);
            next = entries[member].1.get("childStepId").and_then(step_reference);
        }
        if !chain.is_empty() {
            chains.insert(index, chain);
        }
    }
    chains
}

fn is_flat_repeat(object: &Map<String, Value>) -> bool {
    let repeats = declares_repeat(object)
        || first_present(object, &["numberOfIterations", "repeatCount", "iterations"]).is_some();
    repeats && first_present(object, &["childStepId"]).is_some() && !has_children(object)
}

/// Integer step reference, accepting numeric strings
fn step_reference(value: &Value) -> Option<i64> {
    match value {
        Value::String(raw) => raw.trim().parse().ok(),
        other => other.as_i64(),
    }
}

/// Decide between leaf and group. A group tag decides alone; a leaf tag or a
/// missing tag yields to a repeat step type, a repeat count, or nested steps.
fn is_group(object: &Map<String, Value>, path: &str) -> ParseResult<bool> {
    let shaped_as_group = declares_repeat(object)
        || has_children(object)
        || first_present(object, &["numberOfIterations", "repeatCount", "iterations"]).is_some();
    match object.get("type") {
        Some(Value::String(tag)) => {
            let normalized = tag.trim().to_ascii_lowercase();
            if GROUP_TAGS.contains(&normalized.as_str()) {
                Ok(true)
            } else if LEAF_TAGS.contains(&normalized.as_str()) {
                Ok(shaped_as_group)
            } else {
                Err(WorkoutValidationError::UnknownNodeType {
                    path: path.to_owned(),
                    tag: tag.clone(),
                })
            }
        }
        Some(Value::Null) | None => Ok(shaped_as_group),
        Some(other) => Err(WorkoutValidationError::UnknownNodeType {
            path: path.to_owned(),
            tag: other.to_string(),
        }),
    }
}

/// `stepType` names the repeat step type
fn declares_repeat(object: &Map<String, Value>) -> bool {
    let step_type = match object.get("stepType") {
        Some(Value::String(key)) => StepTypeKey::from_key(key),
        Some(Value::Object(step_type)) => match step_type
            .get("stepTypeKey")
            .and_then(Value::as_str)
        {
            Some(key) => StepTypeKey::from_key(key),
            None => step_type
                .get("stepTypeId")
                .and_then(Value::as_u64)
                .and_then(StepTypeKey::from_id),
        },
        _ => None,
    };
    step_type == Some(StepTypeKey::Repeat)
}

/// Non-empty nested step list
fn has_children(object: &Map<String, Value>) -> bool {
    first_present(object, &["workoutSteps", "steps"])
        .and_then(|(_, steps)| steps.as_array())
        .is_some_and(|steps| !steps.is_empty())
}

impl RawStep {
    fn from_object(object: &Map<String, Value>, path: &str) -> ParseResult<Self> {
        let step_type = match first_present(object, &["stepType"]) {
            Some((_, value)) => parse_step_type(value, path)?,
            None => {
                return Err(WorkoutValidationError::MissingField {
                    path: path.to_owned(),
                    field: "stepType",
                })
            }
        };
        let end_condition = first_present(object, &["endCondition", "endConditionType"])
            .map(|(_, value)| parse_end_condition(value, path))
            .transpose()?;
        let end_condition_value = optional_number(object, path, "endConditionValue")?;
        if end_condition.is_none() && end_condition_value.is_some() {
            return Err(WorkoutValidationError::AmbiguousEndCondition {
                path: path.to_owned(),
            });
        }

        let target_type = first_present(object, &["targetType"])
            .map(|(_, value)| parse_target_type(value, path))
            .transpose()?;
        let target_value_one = first_number(object, path, &["targetValueOne", "targetValueHigh"])?;
        let target_value_two = first_number(object, path, &["targetValueTwo", "targetValueLow"])?;
        let zone_number = optional_integer(object, path, "zoneNumber")?;

        let has_target_values =
            target_value_one.is_some() || target_value_two.is_some() || zone_number.is_some();
        if target_type.is_none() && has_target_values {
            return Err(WorkoutValidationError::MissingField {
                path: path.to_owned(),
                field: "targetType",
            });
        }

        Ok(Self {
            path: path.to_owned(),
            step_type,
            description: optional_string(object, path, &["description"])?,
            end_condition,
            end_condition_value,
            target_type,
            target_value_one,
            target_value_two,
            zone_number,
        })
    }
}

impl RawRepeatGroup {
    /// `flat_children` replaces the nested step list for a flat repeat
    fn from_object(
        object: &Map<String, Value>,
        path: &str,
        flat_children: Option<Vec<RawNode>>,
    ) -> ParseResult<Self> {
        let iterations = match first_present(
            object,
            &["numberOfIterations", "repeatCount", "iterations"],
        ) {
            Some((key, value)) => parse_iterations(value, path, key)?,
            None => {
                return Err(WorkoutValidationError::MissingField {
                    path: path.to_owned(),
                    field: "numberOfIterations",
                })
            }
        };

        let children = match (flat_children, first_present(object, &["workoutSteps", "steps"])) {
            (Some(children), _) => children,
            (None, Some((key, steps))) => {
                parse_nodes(as_array(steps, path, key)?, &format!("{path}.{key}"))?
            }
            (None, None) => Vec::new(),
        };
        if children.is_empty() {
            return Err(WorkoutValidationError::EmptyRepeatGroup {
                path: path.to_owned(),
            });
        }

        Ok(Self {
            path: path.to_owned(),
            iterations,
            skip_last_rest_step: optional_bool(object, path, "skipLastRestStep")?.unwrap_or(true),
            smart_repeat: optional_bool(object, path, "smartRepeat")?.unwrap_or(false),
            children,
        })
    }
}

fn parse_sport(value: &Value) -> ParseResult<SportTypeKey> {
    let resolved = match value {
        Value::String(key) => SportTypeKey::from_key(key),
        Value::Object(object) => match object.get("sportTypeKey").and_then(Value::as_str) {
            Some(key) => SportTypeKey::from_key(key),
            None => object
                .get("sportTypeId")
                .and_then(Value::as_u64)
                .and_then(SportTypeKey::from_id),
        },
        _ => None,
    };
    resolved.ok_or_else(|| WorkoutValidationError::UnknownSport {
        value: describe(value, "sportTypeKey"),
    })
}

fn parse_step_type(value: &Value, path: &str) -> ParseResult<StepTypeKey> {
    let resolved = match value {
        Value::String(key) => StepTypeKey::from_key(key),
        Value::Object(object) => match object.get("stepTypeKey").and_then(Value::as_str) {
            Some(key) => StepTypeKey::from_key(key),
            None => object
                .get("stepTypeId")
                .and_then(Value::as_u64)
                .and_then(StepTypeKey::from_id),
        },
        _ => None,
    };
    resolved.ok_or_else(|| WorkoutValidationError::UnknownStepType {
        path: path.to_owned(),
        key: describe(value, "stepTypeKey"),
    })
}

fn parse_end_condition(value: &Value, path: &str) -> ParseResult<EndCondition> {
    let unknown = || WorkoutValidationError::UnknownEndCondition {
        path: path.to_owned(),
        key: describe(value, "conditionTypeKey"),
    };
    match value {
        Value::String(key) => EndCondition::from_key(key).ok_or_else(unknown),
        Value::Object(object) => {
            let id = object.get("conditionTypeId").and_then(Value::as_u64);
            match object.get("conditionTypeKey").and_then(Value::as_str) {
                Some(key) => EndCondition::from_key(key)
                    .or_else(|| {
                        let id = u32::try_from(id?).ok()?;
                        let display_order = object
                            .get("displayOrder")
                            .and_then(Value::as_u64)
                            .and_then(|order| u32::try_from(order).ok());
                        Some(EndCondition::passthrough(key.to_owned(), id, display_order))
                    })
                    .ok_or_else(unknown),
                None => id.and_then(EndCondition::from_id).ok_or_else(unknown),
            }
        }
        _ => Err(unknown()),
    }
}

fn parse_target_type(value: &Value, path: &str) -> ParseResult<TargetTypeKey> {
    let resolved = match value {
        Value::String(key) => TargetTypeKey::from_key(key),
        Value::Object(object) => match object.get("workoutTargetTypeKey").and_then(Value::as_str) {
            Some(key) => TargetTypeKey::from_key(key),
            None => object
                .get("workoutTargetTypeId")
                .and_then(Value::as_u64)
                .and_then(TargetTypeKey::from_id),
        },
        _ => None,
    };
    resolved.ok_or_else(|| WorkoutValidationError::UnknownTargetType {
        path: path.to_owned(),
        key: describe(value, "workoutTargetTypeKey"),
    })
}

fn parse_iterations(value: &Value, path: &str, key: &str) -> ParseResult<u32> {
    let count = value
        .as_i64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|count| count.fract() == 0.0)
                .map(|count| count as i64)
        })
        .ok_or_else(|| WorkoutValidationError::InvalidFieldType {
            path: path.to_owned(),
            field: static_key(key),
            expected: "a whole number",
        })?;
    u32::try_from(count)
        .ok()
        .filter(|count| *count >= 1)
        .ok_or_else(|| WorkoutValidationError::InvalidIterations {
            path: path.to_owned(),
            value: count,
        })
}

/// Human rendering of a vocabulary value for error messages
fn describe(value: &Value, key_field: &str) -> String {
    match value {
        Value::String(key) => key.clone(),
        Value::Object(object) => object
            .get(key_field)
            .and_then(Value::as_str)
            .map_or_else(|| value.to_string(), str::to_owned),
        other => other.to_string(),
    }
}

/// First key present with a non-null value
fn first_present<'a>(
    object: &'a Map<String, Value>,
    keys: &[&'static str],
) -> Option<(&'static str, &'a Value)> {
    keys.iter().find_map(|key| match object.get(*key) {
        Some(Value::Null) | None => None,
        Some(value) => Some((*key, value)),
    })
}

fn as_object<'a>(value: &'a Value, path: &str) -> ParseResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| WorkoutValidationError::NotAnObject {
            path: path.to_owned(),
        })
}

fn as_array<'a>(value: &'a Value, path: &str, key: &'static str) -> ParseResult<&'a [Value]> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| WorkoutValidationError::InvalidFieldType {
            path: path.to_owned(),
            field: key,
            expected: "an array",
        })
}

fn optional_string(
    object: &Map<String, Value>,
    path: &str,
    keys: &[&'static str],
) -> ParseResult<Option<String>> {
    match first_present(object, keys) {
        Some((_, Value::String(text))) => Ok(Some(text.clone())),
        Some((key, _)) => Err(WorkoutValidationError::InvalidFieldType {
            path: path.to_owned(),
            field: key,
            expected: "a string",
        }),
        None => Ok(None),
    }
}

fn optional_number(
    object: &Map<String, Value>,
    path: &str,
    key: &'static str,
) -> ParseResult<Option<f64>> {
    first_number(object, path, &[key])
}

fn first_number(
    object: &Map<String, Value>,
    path: &str,
    keys: &[&'static str],
) -> ParseResult<Option<f64>> {
    match first_present(object, keys) {
        Some((key, value)) => value.as_f64().map(Some).ok_or_else(|| {
            WorkoutValidationError::InvalidFieldType {
                path: path.to_owned(),
                field: key,
                expected: "a number",
            }
        }),
        None => Ok(None),
    }
}

fn optional_integer(
    object: &Map<String, Value>,
    path: &str,
    key: &'static str,
) -> ParseResult<Option<i64>> {
    match first_present(object, &[key]) {
        Some((_, value)) => value
            .as_i64()
            .or_else(|| {
                value
                    .as_f64()
                    .filter(|number| number.fract() == 0.0)
                    .map(|number| number as i64)
            })
            .map(Some)
            .ok_or_else(|| WorkoutValidationError::InvalidFieldType {
                path: path.to_owned(),
                field: key,
                expected: "a whole number",
            }),
        None => Ok(None),
    }
}

fn optional_bool(
    object: &Map<String, Value>,
    path: &str,
    key: &'static str,
) -> ParseResult<Option<bool>> {
    match first_present(object, &[key]) {
        Some((_, value)) => value.as_bool().map(Some).ok_or_else(|| {
            WorkoutValidationError::InvalidFieldType {
                path: path.to_owned(),
                field: key,
                expected: "a boolean",
            }
        }),
        None => Ok(None),
    }
}

fn static_key(key: &str) -> &'static str {
    match key {
        "repeatCount" => "repeatCount",
        "iterations" => "iterations",
        _ => "numberOfIterations",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simplified_form() {
        let workout = RawWorkout::from_value(&json!({
            "name": "Easy run",
            "sport": "running",
            "steps": [
                {"stepType": "warmup", "endCondition": "time", "endConditionValue": 600},
                {"type": "repeat", "repeatCount": 4, "steps": [
                    {"stepType": "interval", "endConditionType": "distance", "endConditionValue": 400,
                     "targetType": "heart.rate.zone", "targetValueHigh": 4, "targetValueLow": 4}
                ]}
            ]
        }))
        .unwrap();
        assert_eq!(workout.name, "Easy run");
        assert_eq!(workout.sport, SportTypeKey::Running);
        assert_eq!(workout.segments.len(), 1);
        let RawNode::Group(group) = &workout.segments[0].nodes[1] else {
            panic!("expected a repeat group");
        };
        assert_eq!(group.iterations, 4);
        assert_eq!(group.path, "steps[1]");
        let RawNode::Step(step) = &group.children[0] else {
            panic!("expected a step");
        };
        assert_eq!(step.path, "steps[1].steps[0]");
        assert_eq!(step.target_value_one, Some(4.0));
        assert_eq!(step.target_value_two, Some(4.0));
    }

    #[test]
    fn test_group_inferred_from_shape() {
        let node = RawNode::from_value(
            &json!({"numberOfIterations": 2, "workoutSteps": [{"stepType": "rest"}]}),
            "steps[0]",
        )
        .unwrap();
        assert!(matches!(node, RawNode::Group(_)));
    }

    #[test]
    fn test_leaf_tag_with_repeat_count_is_group() {
        let node = RawNode::from_value(
            &json!({"type": "executable", "stepType": "interval", "repeatCount": 2,
                    "steps": [{"stepType": "interval"}, {"stepType": "rest"}]}),
            "steps[0]",
        )
        .unwrap();
        let RawNode::Group(group) = node else {
            panic!("expected a repeat group");
        };
        assert_eq!(group.iterations, 2);
        assert_eq!(group.children.len(), 2);
    }

    #[test]
    fn test_flat_repeat_chain_claims_each_step_once() {
        let nodes = parse_nodes(
            &[
                json!({"stepId": 1, "stepType": "repeat", "numberOfIterations": 2, "childStepId": 2}),
                json!({"stepId": 2, "stepType": "interval", "childStepId": 3}),
                json!({"stepId": 3, "stepType": "rest", "childStepId": 2}),
                json!({"stepId": 4, "stepType": "cooldown"}),
            ],
            "steps",
        )
        .unwrap();
        assert_eq!(nodes.len(), 2);
        let RawNode::Group(group) = &nodes[0] else {
            panic!("expected a repeat group");
        };
        let paths: Vec<&str> = group
            .children
            .iter()
            .map(|child| match child {
                RawNode::Step(step) => step.path.as_str(),
                RawNode::Group(group) => group.path.as_str(),
            })
            .collect();
        assert_eq!(paths, vec!["steps[1]", "steps[2]"]);
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let error = RawNode::from_value(&json!({"type": "Superset"}), "steps[3]").unwrap_err();
        assert_eq!(
            error,
            WorkoutValidationError::UnknownNodeType {
                path: "steps[3]".to_owned(),
                tag: "Superset".to_owned()
            }
        );
    }

    #[test]
    fn test_value_without_condition_is_ambiguous() {
        let error =
            RawNode::from_value(&json!({"stepType": "interval", "endConditionValue": 60}), "s")
                .unwrap_err();
        assert!(matches!(
            error,
            WorkoutValidationError::AmbiguousEndCondition { .. }
        ));
    }

    #[test]
    fn test_unknown_condition_with_id_passes_through() {
        let node = RawNode::from_value(
            &json!({
                "stepType": "interval",
                "endCondition": {"conditionTypeKey": "power.last.lap", "conditionTypeId": 11}
            }),
            "s",
        )
        .unwrap();
        let RawNode::Step(step) = node else {
            panic!("expected a step");
        };
        let condition = step.end_condition.unwrap();
        assert_eq!(condition.condition_type_id, 11);
        assert_eq!(condition.condition_type_key, "power.last.lap");
        assert!(condition.display_order.is_none());
    }

    #[test]
    fn test_missing_sport_and_empty_workout() {
        let error = RawWorkout::from_value(&json!({"steps": []})).unwrap_err();
        assert!(matches!(
            error,
            WorkoutValidationError::MissingField { field: "sportType", .. }
        ));
        let error = RawWorkout::from_value(&json!({"sport": "cycling", "steps": []})).unwrap_err();
        assert_eq!(error, WorkoutValidationError::EmptyWorkout);
        let error = RawWorkout::from_value(&json!({"sport": "rowing", "steps": []})).unwrap_err();
        assert!(matches!(error, WorkoutValidationError::UnknownSport { .. }));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let error = RawNode::from_value(
            &json!({"type": "RepeatGroupDTO", "numberOfIterations": 0, "workoutSteps": [{"stepType": "rest"}]}),
            "g",
        )
        .unwrap_err();
        assert_eq!(
            error,
            WorkoutValidationError::InvalidIterations {
                path: "g".to_owned(),
                value: 0
            }
        );
    }
}
