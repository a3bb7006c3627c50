// ABOUTME: Step normalizer turning one parsed leaf step into its canonical wire form
// ABOUTME: Assigns ids and orders, derives type codes, and resolves zone shorthand targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Step normalizer
//!
//! Pure functions only. The caller's `stepId`, `stepTypeId` and display orders
//! never survive: ids come from the traversal, codes from the lookup tables.

use garmin_core::errors::WorkoutValidationError;
use garmin_core::models::{
    EndCondition, EquipmentType, ExecutableStep, StepTarget, StepType, StrokeType, TargetType,
    TargetTypeKey,
};

use super::input::RawStep;

/// Normalize one leaf step.
///
/// # Errors
///
/// Returns a validation error when an explicit `zoneNumber` is used with a
/// target type that has no zones, or lies outside that type's zone range.
pub fn normalize_step(
    raw: &RawStep,
    step_id: u32,
    step_order: u32,
) -> Result<ExecutableStep, WorkoutValidationError> {
    let target_key = raw.target_type.unwrap_or(TargetTypeKey::NoTarget);
    let target = resolve_target(raw, target_key)?;

    Ok(ExecutableStep {
        step_id,
        step_order,
        step_type: StepType::from(raw.step_type),
        description: raw.description.clone(),
        end_condition: raw
            .end_condition
            .clone()
            .unwrap_or_else(EndCondition::lap_button),
        end_condition_value: raw.end_condition_value,
        target_type: TargetType::from(target_key),
        target,
        stroke_type: StrokeType::default(),
        equipment_type: EquipmentType::default(),
    })
}

/// Zone shorthand detection.
///
/// Agents often express "zone N" as a raw range `{N, N}`. When both values are
/// present, equal, whole, and inside the zone range of a zone-eligible target
/// type, the zone number is returned. Everything else is a genuine raw range.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn detect_zone_shorthand(
    target: TargetTypeKey,
    value_one: Option<f64>,
    value_two: Option<f64>,
) -> Option<u8> {
    let max = target.zone_max()?;
    let (Some(one), Some(two)) = (value_one, value_two) else {
        return None;
    };
    if one != two || one.fract() != 0.0 {
        return None;
    }
    (1.0..=f64::from(max)).contains(&one).then_some(one as u8)
}

fn resolve_target(
    raw: &RawStep,
    target_key: TargetTypeKey,
) -> Result<StepTarget, WorkoutValidationError> {
    if let Some(zone) = raw.zone_number {
        let max = target_key
            .zone_max()
            .ok_or_else(|| WorkoutValidationError::ZoneNotSupported {
                path: raw.path.clone(),
                target: target_key.as_str().to_owned(),
            })?;
        return u8::try_from(zone)
            .ok()
            .filter(|zone| (1..=max).contains(zone))
            .map(StepTarget::Zone)
            .ok_or_else(|| WorkoutValidationError::ZoneOutOfRange {
                path: raw.path.clone(),
                zone,
                max,
            });
    }

    let (one, two) = (raw.target_value_one, raw.target_value_two);
    if one.is_none() && two.is_none() {
        return Ok(StepTarget::Absent);
    }
    Ok(detect_zone_shorthand(target_key, one, two)
        .map_or(StepTarget::Raw { one, two }, StepTarget::Zone))
}

#[cfg(test)]
mod tests {
    use super::*;
    use garmin_core::models::StepTypeKey;

    fn raw_step(target: Option<TargetTypeKey>, one: Option<f64>, two: Option<f64>) -> RawStep {
        RawStep {
            path: "steps[0]".to_owned(),
            step_type: StepTypeKey::Interval,
            description: None,
            end_condition: None,
            end_condition_value: None,
            target_type: target,
            target_value_one: one,
            target_value_two: two,
            zone_number: None,
        }
    }

    #[test]
    fn test_heart_rate_zone_boundaries() {
        let hr = TargetTypeKey::HeartRateZone;
        for zone in 1..=5_u8 {
            let value = Some(f64::from(zone));
            assert_eq!(detect_zone_shorthand(hr, value, value), Some(zone));
        }
        assert_eq!(detect_zone_shorthand(hr, Some(0.0), Some(0.0)), None);
        assert_eq!(detect_zone_shorthand(hr, Some(6.0), Some(6.0)), None);
        assert_eq!(detect_zone_shorthand(hr, Some(-1.0), Some(-1.0)), None);
    }

    #[test]
    fn test_power_zone_boundaries() {
        let power = TargetTypeKey::PowerZone;
        assert_eq!(detect_zone_shorthand(power, Some(1.0), Some(1.0)), Some(1));
        assert_eq!(detect_zone_shorthand(power, Some(7.0), Some(7.0)), Some(7));
        assert_eq!(detect_zone_shorthand(power, Some(8.0), Some(8.0)), None);
        assert_eq!(detect_zone_shorthand(power, Some(6.0), Some(8.0)), None);
    }

    #[test]
    fn test_non_shorthand_values_stay_raw() {
        let hr = TargetTypeKey::HeartRateZone;
        assert_eq!(detect_zone_shorthand(hr, Some(2.5), Some(2.5)), None);
        assert_eq!(detect_zone_shorthand(hr, Some(3.0), None), None);
        assert_eq!(detect_zone_shorthand(hr, Some(140.0), Some(140.0)), None);
        assert_eq!(
            detect_zone_shorthand(TargetTypeKey::PaceZone, Some(3.0), Some(3.0)),
            None
        );
        assert_eq!(
            detect_zone_shorthand(TargetTypeKey::Cadence, Some(2.0), Some(2.0)),
            None
        );
    }

    #[test]
    fn test_normalize_step_overwrites_codes() {
        let step = normalize_step(
            &raw_step(Some(TargetTypeKey::HeartRateZone), Some(2.0), Some(2.0)),
            7,
            3,
        )
        .unwrap();
        assert_eq!(step.step_id, 7);
        assert_eq!(step.step_order, 3);
        assert_eq!(step.step_type.step_type_id, 3);
        assert_eq!(step.step_type.display_order, 3);
        assert_eq!(step.target, StepTarget::Zone(2));
        assert_eq!(step.end_condition, EndCondition::lap_button());
    }

    #[test]
    fn test_raw_range_passes_through() {
        let step = normalize_step(
            &raw_step(Some(TargetTypeKey::PowerZone), Some(6.0), Some(8.0)),
            1,
            1,
        )
        .unwrap();
        assert_eq!(
            step.target,
            StepTarget::Raw {
                one: Some(6.0),
                two: Some(8.0)
            }
        );
    }

    #[test]
    fn test_explicit_zone_wins_over_raw_values() {
        let mut raw = raw_step(Some(TargetTypeKey::HeartRateZone), Some(150.0), Some(160.0));
        raw.zone_number = Some(4);
        assert_eq!(normalize_step(&raw, 1, 1).unwrap().target, StepTarget::Zone(4));

        raw.zone_number = Some(6);
        assert!(matches!(
            normalize_step(&raw, 1, 1),
            Err(WorkoutValidationError::ZoneOutOfRange { zone: 6, max: 5, .. })
        ));

        let mut pace = raw_step(Some(TargetTypeKey::PaceZone), None, None);
        pace.zone_number = Some(2);
        assert!(matches!(
            normalize_step(&pace, 1, 1),
            Err(WorkoutValidationError::ZoneNotSupported { .. })
        ));
    }

    #[test]
    fn test_absent_target_defaults_to_no_target() {
        let step = normalize_step(&raw_step(None, None, None), 1, 1).unwrap();
        assert_eq!(step.target, StepTarget::Absent);
        assert_eq!(step.target_type.workout_target_type_key, TargetTypeKey::NoTarget);
    }
}
