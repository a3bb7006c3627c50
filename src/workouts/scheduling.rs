// ABOUTME: Scheduling state machine over the Garmin Connect library and calendar
// ABOUTME: Enforces library existence before scheduling and reports partial plan failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

//! # Workout scheduler
//!
//! A workout is absent, in the library, or in the library with calendar
//! occurrences. The scheduler keeps no state of its own: every decision is
//! based on a fresh remote read, and a failed call leaves the caller in the
//! last state it observed.
//!
//! Deleting a library entry removes its occurrences on the platform side.
//! The scheduler issues exactly one delete call and never unschedules first.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use garmin_connect::GarminConnectApi;
use garmin_core::errors::{AppError, ErrorCode, RemoteError};
use garmin_core::models::{
    CanonicalWorkout, DateRange, ScheduledOccurrence, WorkoutDetail, WorkoutSummary,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

/// Failures of single scheduler operations
#[derive(Debug, thiserror::Error)]
pub enum WorkoutError {
    /// The library id does not resolve to an entry
    #[error("workout {workout_id} does not exist in the library")]
    LibraryEntryNotFound {
        /// Library id that was looked up
        workout_id: i64,
    },

    /// The platform answered without a field the operation depends on
    #[error("Garmin Connect response is missing '{field}'")]
    MissingResponseField {
        /// Name of the missing field
        field: &'static str,
    },

    /// The remote call failed
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Failures of the create-then-schedule operation
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Nothing was created
    #[error("creating the workout failed: {0}")]
    Create(#[source] WorkoutError),

    /// The library entry exists but has no occurrence on the requested date
    #[error("workout {workout_id} was created but scheduling it on {date} failed: {source}")]
    PartialSuccess {
        /// Library id of the created entry
        workout_id: i64,
        /// Date that could not be scheduled
        date: NaiveDate,
        /// Why scheduling failed
        #[source]
        source: WorkoutError,
    },
}

impl From<WorkoutError> for AppError {
    fn from(error: WorkoutError) -> Self {
        match error {
            WorkoutError::LibraryEntryNotFound { workout_id } => {
                Self::not_found(format!("Workout {workout_id} in the library"))
                    .with_details(json!({ "workout_id": workout_id }))
            }
            WorkoutError::MissingResponseField { field } => Self::new(
                ErrorCode::ExternalServiceError,
                format!("Garmin Connect response is missing '{field}'"),
            ),
            WorkoutError::Remote(remote) => remote.into(),
        }
    }
}

impl From<PlanError> for AppError {
    fn from(error: PlanError) -> Self {
        match error {
            PlanError::Create(cause) => cause.into(),
            PlanError::PartialSuccess {
                workout_id,
                date,
                source,
            } => {
                let message = format!(
                    "Workout {workout_id} was created but scheduling it on {date} failed: {source}"
                );
                let cause = Self::from(source);
                Self::new(ErrorCode::PartialSuccess, message).with_details(json!({
                    "workout_id": workout_id,
                    "date": date,
                    "schedule_error": {
                        "code": cause.code,
                        "message": cause.message,
                    },
                }))
            }
        }
    }
}

/// A new library entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedWorkout {
    /// Library id assigned by the platform
    pub workout_id: i64,
    /// Name as stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Creation timestamp as reported by the platform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
}

/// An updated library entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatedWorkout {
    /// Library id
    pub workout_id: i64,
    /// Name as stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Update timestamp as reported by the platform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
}

/// Outcome of create-then-schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedWorkout {
    /// The created library entry
    pub workout: CreatedWorkout,
    /// Its calendar occurrence
    pub occurrence: ScheduledOccurrence,
}

/// Stateless scheduler bound to one session's client
#[derive(Clone)]
pub struct WorkoutScheduler {
    api: Arc<dyn GarminConnectApi>,
}

impl WorkoutScheduler {
    /// Scheduler over a session client
    #[must_use]
    pub fn new(api: Arc<dyn GarminConnectApi>) -> Self {
        Self { api }
    }

    /// absent → in library.
    ///
    /// # Errors
    ///
    /// Remote failures, or a response without `workoutId`.
    pub async fn create(&self, workout: &CanonicalWorkout) -> Result<CreatedWorkout, WorkoutError> {
        let response = self.api.create_workout(workout).await?;
        let workout_id = response
            .get("workoutId")
            .and_then(Value::as_i64)
            .ok_or(WorkoutError::MissingResponseField { field: "workoutId" })?;
        Ok(CreatedWorkout {
            workout_id,
            name: text(&response, "workoutName").or_else(|| Some(workout.workout_name.clone())),
            created_date: text(&response, "createdDate"),
        })
    }

    /// Replace the definition of an existing entry; state is unchanged.
    ///
    /// # Errors
    ///
    /// `LibraryEntryNotFound` when a fresh read does not find the entry.
    pub async fn update(
        &self,
        workout_id: i64,
        workout: &CanonicalWorkout,
    ) -> Result<UpdatedWorkout, WorkoutError> {
        self.require_entry(workout_id).await?;
        let payload = workout.clone().with_workout_id(workout_id);
        let response = self.api.update_workout(workout_id, &payload).await?;
        Ok(UpdatedWorkout {
            workout_id: response
                .get("workoutId")
                .and_then(Value::as_i64)
                .unwrap_or(workout_id),
            name: text(&response, "workoutName").or_else(|| Some(payload.workout_name.clone())),
            updated_date: text(&response, "updatedDate"),
        })
    }

    /// in library → scheduled.
    ///
    /// # Errors
    ///
    /// `LibraryEntryNotFound` when a fresh read does not find the entry; the
    /// schedule call is not issued in that case. A successful schedule call is
    /// never reported as a failure, even when its response is empty.
    pub async fn schedule(
        &self,
        workout_id: i64,
        date: NaiveDate,
    ) -> Result<ScheduledOccurrence, WorkoutError> {
        let entry = self.require_entry(workout_id).await?;
        let response = self.api.schedule_workout(workout_id, date).await?;
        let mut occurrence = match ScheduledOccurrence::from_schedule_response(&response) {
            Some(occurrence) => occurrence,
            None => self.recover_occurrence(workout_id, date).await,
        };
        occurrence.workout_id.get_or_insert(workout_id);
        if occurrence.name.is_none() {
            occurrence.name = text(&entry, "workoutName");
        }
        if occurrence.sport.is_none() {
            occurrence.sport = entry
                .get("sportType")
                .and_then(|sport| text(sport, "sportTypeKey"));
        }
        Ok(occurrence)
    }

    /// Create, then schedule. Never concurrent, never rolled back.
    ///
    /// # Errors
    ///
    /// `PlanError::Create` when nothing was created, `PlanError::PartialSuccess`
    /// carrying the new library id when only scheduling failed.
    pub async fn plan(
        &self,
        workout: &CanonicalWorkout,
        date: NaiveDate,
    ) -> Result<PlannedWorkout, PlanError> {
        let created = self.create(workout).await.map_err(PlanError::Create)?;
        match self.schedule(created.workout_id, date).await {
            Ok(occurrence) => Ok(PlannedWorkout {
                workout: created,
                occurrence,
            }),
            Err(source) => {
                warn!(
                    workout_id = created.workout_id,
                    %date,
                    "Workout created but scheduling failed: {source}"
                );
                Err(PlanError::PartialSuccess {
                    workout_id: created.workout_id,
                    date,
                    source,
                })
            }
        }
    }

    /// Move an occurrence; its id is kept.
    ///
    /// # Errors
    ///
    /// Remote failures.
    pub async fn reschedule(
        &self,
        schedule_id: i64,
        date: NaiveDate,
    ) -> Result<ScheduledOccurrence, WorkoutError> {
        let response = self.api.reschedule_workout(schedule_id, date).await?;
        let mut occurrence = ScheduledOccurrence::from_schedule_response(&response)
            .unwrap_or_else(|| bare_occurrence(date, None));
        occurrence.schedule_id = Some(schedule_id);
        occurrence.date = date;
        Ok(occurrence)
    }

    /// scheduled → in library for this occurrence; the entry is untouched.
    ///
    /// # Errors
    ///
    /// Remote failures.
    pub async fn unschedule(&self, schedule_id: i64) -> Result<(), WorkoutError> {
        self.api.unschedule_workout(schedule_id).await?;
        Ok(())
    }

    /// in library | scheduled → absent, occurrences included.
    ///
    /// # Errors
    ///
    /// Remote failures.
    pub async fn delete(&self, workout_id: i64) -> Result<(), WorkoutError> {
        self.api.delete_workout(workout_id).await?;
        info!(workout_id, "Library entry deleted; platform removes its occurrences");
        Ok(())
    }

    /// Workout occurrences in an inclusive date range, ordered by date.
    ///
    /// # Errors
    ///
    /// Remote failures for any month of the range.
    pub async fn calendar(&self, range: DateRange) -> Result<Vec<ScheduledOccurrence>, WorkoutError> {
        let mut seen = HashSet::new();
        let mut occurrences = Vec::new();
        for (year, month) in range.months() {
            for item in self.api.calendar_month(year, month).await? {
                if let Some(occurrence) = ScheduledOccurrence::from_calendar_item(&item) {
                    if range.contains(occurrence.date) && seen.insert(occurrence.schedule_id) {
                        occurrences.push(occurrence);
                    }
                }
            }
        }
        occurrences.sort_by_key(|occurrence| (occurrence.date, occurrence.schedule_id));
        Ok(occurrences)
    }

    /// Curated library listing.
    ///
    /// # Errors
    ///
    /// Remote failures.
    pub async fn library(&self, start: u32, limit: u32) -> Result<Vec<WorkoutSummary>, WorkoutError> {
        let entries = self.api.list_workouts(start, limit).await?;
        Ok(entries.iter().map(WorkoutSummary::from_platform).collect())
    }

    /// Curated library entry including its step tree.
    ///
    /// # Errors
    ///
    /// `LibraryEntryNotFound` when the entry does not exist.
    pub async fn detail(&self, workout_id: i64) -> Result<WorkoutDetail, WorkoutError> {
        let entry = self.require_entry(workout_id).await?;
        Ok(WorkoutDetail::from_platform(&entry))
    }

    /// Exported FIT file of a library entry.
    ///
    /// # Errors
    ///
    /// Remote failures; a missing entry surfaces as `LibraryEntryNotFound`.
    pub async fn download(&self, workout_id: i64) -> Result<Vec<u8>, WorkoutError> {
        match self.api.download_workout(workout_id).await {
            Ok(bytes) => Ok(bytes),
            Err(error) if error.is_not_found() => {
                Err(WorkoutError::LibraryEntryNotFound { workout_id })
            }
            Err(error) => Err(error.into()),
        }
    }

    /// The schedule call succeeded but its body did not describe the
    /// occurrence. Look it up in the date's calendar month; the occurrence is
    /// returned without an id when the calendar cannot be read either.
    async fn recover_occurrence(&self, workout_id: i64, date: NaiveDate) -> ScheduledOccurrence {
        warn!(
            workout_id,
            %date,
            "Schedule response did not identify the occurrence; reading the calendar"
        );
        match self.api.calendar_month(date.year(), date.month()).await {
            Ok(items) => items
                .iter()
                .filter_map(ScheduledOccurrence::from_calendar_item)
                .filter(|occurrence| {
                    occurrence.date == date && occurrence.workout_id == Some(workout_id)
                })
                .max_by_key(|occurrence| occurrence.schedule_id)
                .unwrap_or_else(|| bare_occurrence(date, Some(workout_id))),
            Err(error) => {
                warn!(workout_id, %date, "Calendar read after scheduling failed: {error}");
                bare_occurrence(date, Some(workout_id))
            }
        }
    }

    async fn require_entry(&self, workout_id: i64) -> Result<Value, WorkoutError> {
        self.api
            .get_workout(workout_id)
            .await?
            .ok_or(WorkoutError::LibraryEntryNotFound { workout_id })
    }
}

fn bare_occurrence(date: NaiveDate, workout_id: Option<i64>) -> ScheduledOccurrence {
    ScheduledOccurrence {
        date,
        schedule_id: None,
        workout_id,
        name: None,
        sport: None,
        completed: false,
    }
}

fn text(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_owned)
}
