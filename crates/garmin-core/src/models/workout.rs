// ABOUTME: Canonical Garmin Connect workout wire model (steps, repeat groups, segments)
// ABOUTME: Lookup tables for sport, step, end condition, and target types live here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Canonical workout model
//!
//! These types are only ever produced by the normalizer, so they serialize to
//! exactly the shape the platform accepts. The lookup tables are the single
//! source of type codes and display orders; caller-supplied codes are never
//! trusted.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::constants::defaults::{AVG_TRAINING_SPEED, SPORT_TYPE_DISPLAY_ORDER};
use crate::constants::zones::{HEART_RATE_ZONE_MAX, POWER_ZONE_MAX};

/// Sports supported by the workout service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SportTypeKey {
    /// Running
    Running,
    /// Cycling
    Cycling,
    /// Pool or open-water swimming
    Swimming,
    /// Anything else
    Other,
}

impl SportTypeKey {
    /// Platform `sportTypeId`
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::Running => 1,
            Self::Cycling => 2,
            Self::Swimming => 5,
            Self::Other => 99,
        }
    }

    /// Wire key
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
            Self::Swimming => "swimming",
            Self::Other => "other",
        }
    }

    /// Look up a sport by key (case-insensitive)
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "running" => Some(Self::Running),
            "cycling" => Some(Self::Cycling),
            "swimming" => Some(Self::Swimming),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Look up a sport by platform id
    #[must_use]
    pub const fn from_id(id: u64) -> Option<Self> {
        match id {
            1 => Some(Self::Running),
            2 => Some(Self::Cycling),
            5 => Some(Self::Swimming),
            99 => Some(Self::Other),
            _ => None,
        }
    }
}

/// Wire `sportType` object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SportType {
    /// Platform id derived from the key
    pub sport_type_id: u32,
    /// Sport key
    pub sport_type_key: SportTypeKey,
    /// Always 1
    pub display_order: u32,
}

impl From<SportTypeKey> for SportType {
    fn from(key: SportTypeKey) -> Self {
        Self {
            sport_type_id: key.id(),
            sport_type_key: key,
            display_order: SPORT_TYPE_DISPLAY_ORDER,
        }
    }
}

/// Step type keys from the fixed step type table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepTypeKey {
    /// Warm-up
    Warmup,
    /// Cool-down
    Cooldown,
    /// Work interval
    Interval,
    /// Active recovery
    Recovery,
    /// Rest
    Rest,
    /// Repeat group
    Repeat,
    /// Anything else
    Other,
}

impl StepTypeKey {
    /// Platform `stepTypeId`
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::Warmup => 1,
            Self::Cooldown => 2,
            Self::Interval => 3,
            Self::Recovery => 4,
            Self::Rest => 5,
            Self::Repeat => 6,
            Self::Other => 7,
        }
    }

    /// Platform `displayOrder`, identical to the id for every step type
    #[must_use]
    pub const fn display_order(self) -> u32 {
        self.id()
    }

    /// Look up a step type by key (case-insensitive, `warm_up`/`cool_down` accepted)
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "warmup" | "warm_up" => Some(Self::Warmup),
            "cooldown" | "cool_down" => Some(Self::Cooldown),
            "interval" => Some(Self::Interval),
            "recovery" => Some(Self::Recovery),
            "rest" => Some(Self::Rest),
            "repeat" => Some(Self::Repeat),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Look up a step type by platform id
    #[must_use]
    pub const fn from_id(id: u64) -> Option<Self> {
        match id {
            1 => Some(Self::Warmup),
            2 => Some(Self::Cooldown),
            3 => Some(Self::Interval),
            4 => Some(Self::Recovery),
            5 => Some(Self::Rest),
            6 => Some(Self::Repeat),
            7 => Some(Self::Other),
            _ => None,
        }
    }
}

/// Wire `stepType` object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepType {
    /// Derived from the key
    pub step_type_id: u32,
    /// Step type key
    pub step_type_key: StepTypeKey,
    /// Derived from the key
    pub display_order: u32,
}

impl From<StepTypeKey> for StepType {
    fn from(key: StepTypeKey) -> Self {
        Self {
            step_type_id: key.id(),
            step_type_key: key,
            display_order: key.display_order(),
        }
    }
}

/// Known end condition keys with their `(conditionTypeId, displayOrder)`
const END_CONDITIONS: &[(&str, u32, u32)] = &[
    ("lap.button", 1, 1),
    ("time", 2, 2),
    ("distance", 3, 3),
    ("calories", 4, 4),
    ("heart.rate", 6, 6),
    ("iterations", 7, 7),
];

/// Key of the end condition used by repeat groups
pub const ITERATIONS_CONDITION_KEY: &str = "iterations";
/// Key of the default end condition
pub const LAP_BUTTON_CONDITION_KEY: &str = "lap.button";

/// Wire `endCondition` object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndCondition {
    /// Platform id
    pub condition_type_id: u32,
    /// Condition key (`time`, `distance`, ...)
    pub condition_type_key: String,
    /// Display order, omitted for condition keys outside the known table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<u32>,
    /// Whether the watch shows the condition; false only for repeat iterations
    pub displayable: bool,
}

impl EndCondition {
    /// Build from a known key
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        END_CONDITIONS
            .iter()
            .find(|(known, _, _)| *known == key)
            .map(|&(known, id, display_order)| Self {
                condition_type_id: id,
                condition_type_key: known.to_owned(),
                display_order: Some(display_order),
                displayable: known != ITERATIONS_CONDITION_KEY,
            })
    }

    /// Build from a platform id, when the id is in the known table
    #[must_use]
    pub fn from_id(id: u64) -> Option<Self> {
        END_CONDITIONS
            .iter()
            .find(|(_, known_id, _)| u64::from(*known_id) == id)
            .and_then(|(key, _, _)| Self::from_key(key))
    }

    /// Condition key outside the known table, kept with the caller's id
    #[must_use]
    pub fn passthrough(key: String, id: u32, display_order: Option<u32>) -> Self {
        Self {
            condition_type_id: id,
            condition_type_key: key,
            display_order,
            displayable: true,
        }
    }

    /// The press-lap-to-advance condition used when a step names none
    #[must_use]
    pub fn lap_button() -> Self {
        Self {
            condition_type_id: 1,
            condition_type_key: LAP_BUTTON_CONDITION_KEY.to_owned(),
            display_order: Some(1),
            displayable: true,
        }
    }

    /// The repeat-count condition carried by every repeat group
    #[must_use]
    pub fn iterations() -> Self {
        Self {
            condition_type_id: 7,
            condition_type_key: ITERATIONS_CONDITION_KEY.to_owned(),
            display_order: Some(7),
            displayable: false,
        }
    }
}

/// Workout target type keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetTypeKey {
    /// No target
    #[serde(rename = "no.target")]
    NoTarget,
    /// Speed range
    #[serde(rename = "speed.zone")]
    SpeedZone,
    /// Cadence range
    #[serde(rename = "cadence")]
    Cadence,
    /// Heart rate zone or bpm range
    #[serde(rename = "heart.rate.zone")]
    HeartRateZone,
    /// Power zone or watt range
    #[serde(rename = "power.zone")]
    PowerZone,
    /// Pace range
    #[serde(rename = "pace.zone")]
    PaceZone,
}

impl TargetTypeKey {
    /// Platform `workoutTargetTypeId`
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Self::NoTarget => 1,
            Self::SpeedZone => 2,
            Self::Cadence => 3,
            Self::HeartRateZone => 4,
            Self::PowerZone => 5,
            Self::PaceZone => 6,
        }
    }

    /// Platform `displayOrder`, identical to the id for every target type
    #[must_use]
    pub const fn display_order(self) -> u32 {
        self.id()
    }

    /// Wire key
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoTarget => "no.target",
            Self::SpeedZone => "speed.zone",
            Self::Cadence => "cadence",
            Self::HeartRateZone => "heart.rate.zone",
            Self::PowerZone => "power.zone",
            Self::PaceZone => "pace.zone",
        }
    }

    /// Highest zone for zone-eligible target types, `None` otherwise
    #[must_use]
    pub const fn zone_max(self) -> Option<u8> {
        match self {
            Self::HeartRateZone => Some(HEART_RATE_ZONE_MAX),
            Self::PowerZone => Some(POWER_ZONE_MAX),
            _ => None,
        }
    }

    /// Look up a target type by key (case-insensitive)
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "no.target" | "none" => Some(Self::NoTarget),
            "speed.zone" => Some(Self::SpeedZone),
            "cadence" | "cadence.zone" => Some(Self::Cadence),
            "heart.rate.zone" => Some(Self::HeartRateZone),
            "power.zone" => Some(Self::PowerZone),
            "pace.zone" => Some(Self::PaceZone),
            _ => None,
        }
    }

    /// Look up a target type by platform id
    #[must_use]
    pub const fn from_id(id: u64) -> Option<Self> {
        match id {
            1 => Some(Self::NoTarget),
            2 => Some(Self::SpeedZone),
            3 => Some(Self::Cadence),
            4 => Some(Self::HeartRateZone),
            5 => Some(Self::PowerZone),
            6 => Some(Self::PaceZone),
            _ => None,
        }
    }
}

/// Wire `targetType` object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetType {
    /// Derived from the key
    pub workout_target_type_id: u32,
    /// Target type key
    pub workout_target_type_key: TargetTypeKey,
    /// Derived from the key
    pub display_order: u32,
}

impl From<TargetTypeKey> for TargetType {
    fn from(key: TargetTypeKey) -> Self {
        Self {
            workout_target_type_id: key.id(),
            workout_target_type_key: key,
            display_order: key.display_order(),
        }
    }
}

/// The single target form a step carries after normalization
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepTarget {
    /// No target values
    Absent,
    /// Raw range, e.g. bpm or watts
    Raw {
        /// `targetValueOne`
        one: Option<f64>,
        /// `targetValueTwo`
        two: Option<f64>,
    },
    /// Zone reference
    Zone(u8),
}

impl StepTarget {
    /// Zone number when this is a zone reference
    #[must_use]
    pub const fn zone(&self) -> Option<u8> {
        match self {
            Self::Zone(zone) => Some(*zone),
            _ => None,
        }
    }
}

impl Serialize for StepTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absent => serializer.serialize_map(Some(0))?.end(),
            Self::Raw { one, two } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("targetValueOne", one)?;
                map.serialize_entry("targetValueTwo", two)?;
                map.end()
            }
            Self::Zone(zone) => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("zoneNumber", zone)?;
                map.serialize_entry("targetValueOne", &Option::<f64>::None)?;
                map.serialize_entry("targetValueTwo", &Option::<f64>::None)?;
                map.end()
            }
        }
    }
}

/// Wire `equipmentType` object; the workout service expects explicit nulls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentType {
    /// Always null for created workouts
    pub equipment_type_id: Option<u32>,
    /// Always null for created workouts
    pub equipment_type_key: Option<String>,
    /// Always null for created workouts
    pub display_order: Option<u32>,
}

/// Wire `strokeType` object, always empty outside swim drills
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StrokeType {}

/// Leaf step (`ExecutableStepDTO`)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutableStep {
    /// Traversal-order id, starting at 1
    pub step_id: u32,
    /// 1-based position within the enclosing sequence
    pub step_order: u32,
    /// Step type with derived codes
    pub step_type: StepType,
    /// Optional free-text note shown on the watch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// What ends the step
    pub end_condition: EndCondition,
    /// Seconds, meters, ... depending on the end condition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_condition_value: Option<f64>,
    /// What the step aims for
    pub target_type: TargetType,
    /// Target values or zone
    #[serde(flatten)]
    pub target: StepTarget,
    /// Always empty
    pub stroke_type: StrokeType,
    /// Always null fields
    pub equipment_type: EquipmentType,
}

/// Repeat group (`RepeatGroupDTO`)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatGroup {
    /// Traversal-order id, taken before the children's ids
    pub step_id: u32,
    /// 1-based position within the enclosing sequence
    pub step_order: u32,
    /// Always the `repeat` step type
    pub step_type: StepType,
    /// Repeat count, at least 1
    pub number_of_iterations: u32,
    /// Always the `iterations` condition
    pub end_condition: EndCondition,
    /// Mirrors `number_of_iterations`
    pub end_condition_value: f64,
    /// Skip the trailing rest step on the final iteration
    pub skip_last_rest_step: bool,
    /// Platform "smart repeat" (repeat until lap press)
    pub smart_repeat: bool,
    /// Child nodes in execution order
    pub workout_steps: Vec<WorkoutNode>,
}

impl RepeatGroup {
    /// Repeat group with the platform defaults for everything but its children
    #[must_use]
    pub fn new(step_id: u32, step_order: u32, iterations: u32, children: Vec<WorkoutNode>) -> Self {
        Self {
            step_id,
            step_order,
            step_type: StepTypeKey::Repeat.into(),
            number_of_iterations: iterations,
            end_condition: EndCondition::iterations(),
            end_condition_value: f64::from(iterations),
            skip_last_rest_step: true,
            smart_repeat: false,
            workout_steps: children,
        }
    }
}

/// A node of the step tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum WorkoutNode {
    /// Leaf step
    #[serde(rename = "ExecutableStepDTO")]
    Step(ExecutableStep),
    /// Repeat group
    #[serde(rename = "RepeatGroupDTO")]
    Group(RepeatGroup),
}

impl WorkoutNode {
    /// Id of this node
    #[must_use]
    pub const fn step_id(&self) -> u32 {
        match self {
            Self::Step(step) => step.step_id,
            Self::Group(group) => group.step_id,
        }
    }

    /// Position of this node within its enclosing sequence
    #[must_use]
    pub const fn step_order(&self) -> u32 {
        match self {
            Self::Step(step) => step.step_order,
            Self::Group(group) => group.step_order,
        }
    }

    /// Ids of this node and every descendant in depth-first order
    #[must_use]
    pub fn step_ids(&self) -> Vec<u32> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, ids: &mut Vec<u32>) {
        ids.push(self.step_id());
        if let Self::Group(group) = self {
            for child in &group.workout_steps {
                child.collect_ids(ids);
            }
        }
    }
}

/// Wire `workoutSegments` entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSegment {
    /// 1-based segment position
    pub segment_order: u32,
    /// Sport of the segment
    pub sport_type: SportType,
    /// Top-level nodes of the segment
    pub workout_steps: Vec<WorkoutNode>,
}

/// A fully normalized workout definition, ready for the workout service
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalWorkout {
    /// Library id, only set on update payloads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_id: Option<i64>,
    /// Display name
    pub workout_name: String,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sport of the workout
    pub sport_type: SportType,
    /// Average training speed in m/s
    pub avg_training_speed: f64,
    /// Platform estimate, always 0 on submission
    pub estimated_duration_in_secs: u32,
    /// Platform estimate, always 0 on submission
    pub estimated_distance_in_meters: f64,
    /// Always null on submission
    pub estimate_type: Option<String>,
    /// Only sent for running workouts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_wheelchair: Option<bool>,
    /// Ordered segments
    pub workout_segments: Vec<WorkoutSegment>,
}

impl CanonicalWorkout {
    /// New workout with the platform's submission defaults
    #[must_use]
    pub fn new(
        name: String,
        description: Option<String>,
        sport: SportTypeKey,
        segments: Vec<WorkoutSegment>,
    ) -> Self {
        Self {
            workout_id: None,
            workout_name: name,
            description,
            sport_type: sport.into(),
            avg_training_speed: AVG_TRAINING_SPEED,
            estimated_duration_in_secs: 0,
            estimated_distance_in_meters: 0.0,
            estimate_type: None,
            is_wheelchair: (sport == SportTypeKey::Running).then_some(false),
            workout_segments: segments,
        }
    }

    /// Copy of this workout addressed to an existing library entry
    #[must_use]
    pub fn with_workout_id(mut self, workout_id: i64) -> Self {
        self.workout_id = Some(workout_id);
        self
    }

    /// Every node id in depth-first order across all segments
    #[must_use]
    pub fn step_ids(&self) -> Vec<u32> {
        self.workout_segments
            .iter()
            .flat_map(|segment| segment.workout_steps.iter().flat_map(WorkoutNode::step_ids))
            .collect()
    }

    /// Total number of nodes, groups included
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.step_ids().len()
    }
}
