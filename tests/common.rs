// ABOUTME: Shared test utilities for integration tests
// ABOUTME: Provides logging setup, an in-memory Garmin Connect double, and resource builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::significant_drop_tightening
)]
//! Shared test utilities for `garmin_mcp_server`

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use garmin_connect::{GarminConnectApi, SessionTokens};
use garmin_core::errors::{RemoteError, RemoteResult};
use garmin_core::models::CanonicalWorkout;
use garmin_mcp_server::config::ServerConfig;
use garmin_mcp_server::mcp::resources::ServerResources;
use garmin_mcp_server::mcp::session::{ClientFactory, SessionId};
use garmin_mcp_server::tools::ToolExecutionContext;
use serde_json::{json, Value};

static INIT_LOGGER: Once = Once::new();

/// Raw bearer token accepted by the session store
pub const TEST_TOKEN: &str = "test-access-token-0123456789";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

#[derive(Default)]
struct LibraryState {
    next_workout_id: i64,
    next_schedule_id: i64,
    workouts: BTreeMap<i64, Value>,
    schedules: BTreeMap<i64, (i64, NaiveDate)>,
}

/// In-memory Garmin Connect with platform-side cascade delete
#[derive(Default)]
pub struct InMemoryGarminConnect {
    state: Mutex<LibraryState>,
    calls: Mutex<HashMap<&'static str, usize>>,
    fail_schedule: AtomicBool,
    blank_schedule: AtomicBool,
    extra_calendar_items: Mutex<Vec<Value>>,
}

impl InMemoryGarminConnect {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(LibraryState {
                next_workout_id: 1000,
                next_schedule_id: 5000,
                ..LibraryState::default()
            }),
            ..Self::default()
        })
    }

    /// Make every schedule call fail with a platform rejection
    pub fn fail_schedule_calls(&self, fail: bool) {
        self.fail_schedule.store(fail, Ordering::SeqCst);
    }

    /// Store occurrences but answer schedule calls with an empty body
    pub fn blank_schedule_responses(&self, blank: bool) {
        self.blank_schedule.store(blank, Ordering::SeqCst);
    }

    /// Add a raw calendar item returned for its month (e.g. an activity)
    pub fn add_calendar_item(&self, item: Value) {
        self.extra_calendar_items.lock().unwrap().push(item);
    }

    /// Number of calls made to one operation
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls.lock().unwrap().get(operation).copied().unwrap_or(0)
    }

    /// Number of library entries
    pub fn workout_count(&self) -> usize {
        self.state.lock().unwrap().workouts.len()
    }

    /// Number of calendar occurrences
    pub fn schedule_count(&self) -> usize {
        self.state.lock().unwrap().schedules.len()
    }

    /// Stored body of a library entry
    pub fn stored_workout(&self, workout_id: i64) -> Option<Value> {
        self.state.lock().unwrap().workouts.get(&workout_id).cloned()
    }

    /// Seed a library entry directly
    pub fn insert_workout(&self, name: &str, sport: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        state.next_workout_id += 1;
        let workout_id = state.next_workout_id;
        state.workouts.insert(
            workout_id,
            json!({
                "workoutId": workout_id,
                "workoutName": name,
                "sportType": { "sportTypeId": 1, "sportTypeKey": sport },
                "workoutSegments": [],
            }),
        );
        workout_id
    }

    fn record(&self, operation: &'static str) {
        *self.calls.lock().unwrap().entry(operation).or_insert(0) += 1;
    }

    fn not_found(resource: String) -> RemoteError {
        RemoteError::NotFound { resource }
    }

    fn schedule_body(state: &LibraryState, schedule_id: i64) -> Value {
        let (workout_id, date) = state.schedules[&schedule_id];
        json!({
            "workoutScheduleId": schedule_id,
            "calendarDate": date.format("%Y-%m-%d").to_string(),
            "workout": state.workouts.get(&workout_id).cloned().unwrap_or(Value::Null),
        })
    }
}

#[async_trait]
impl GarminConnectApi for InMemoryGarminConnect {
    async fn list_workouts(&self, start: u32, limit: u32) -> RemoteResult<Vec<Value>> {
        self.record("list_workouts");
        let state = self.state.lock().unwrap();
        Ok(state
            .workouts
            .values()
            .skip(start as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get_workout(&self, workout_id: i64) -> RemoteResult<Option<Value>> {
        self.record("get_workout");
        Ok(self.state.lock().unwrap().workouts.get(&workout_id).cloned())
    }

    async fn create_workout(&self, workout: &CanonicalWorkout) -> RemoteResult<Value> {
        self.record("create_workout");
        let mut body = serde_json::to_value(workout).unwrap();
        let mut state = self.state.lock().unwrap();
        state.next_workout_id += 1;
        let workout_id = state.next_workout_id;
        body["workoutId"] = json!(workout_id);
        body["createdDate"] = json!("2025-03-01T08:00:00.0");
        state.workouts.insert(workout_id, body.clone());
        Ok(body)
    }

    async fn update_workout(
        &self,
        workout_id: i64,
        workout: &CanonicalWorkout,
    ) -> RemoteResult<Value> {
        self.record("update_workout");
        let mut state = self.state.lock().unwrap();
        if !state.workouts.contains_key(&workout_id) {
            return Err(Self::not_found(format!("workout {workout_id}")));
        }
        let mut body = serde_json::to_value(workout).unwrap();
        body["workoutId"] = json!(workout_id);
        body["updatedDate"] = json!("2025-03-02T08:00:00.0");
        state.workouts.insert(workout_id, body.clone());
        Ok(body)
    }

    async fn delete_workout(&self, workout_id: i64) -> RemoteResult<()> {
        self.record("delete_workout");
        let mut state = self.state.lock().unwrap();
        if state.workouts.remove(&workout_id).is_none() {
            return Err(Self::not_found(format!("workout {workout_id}")));
        }
        state
            .schedules
            .retain(|_, (scheduled_workout, _)| *scheduled_workout != workout_id);
        Ok(())
    }

    async fn schedule_workout(&self, workout_id: i64, date: NaiveDate) -> RemoteResult<Value> {
        self.record("schedule_workout");
        if self.fail_schedule.load(Ordering::SeqCst) {
            return Err(RemoteError::Rejected {
                status: 500,
                message: "calendar service unavailable".to_owned(),
            });
        }
        let mut state = self.state.lock().unwrap();
        if !state.workouts.contains_key(&workout_id) {
            return Err(Self::not_found(format!("workout {workout_id}")));
        }
        state.next_schedule_id += 1;
        let schedule_id = state.next_schedule_id;
        state.schedules.insert(schedule_id, (workout_id, date));
        if self.blank_schedule.load(Ordering::SeqCst) {
            return Ok(Value::Null);
        }
        Ok(Self::schedule_body(&state, schedule_id))
    }

    async fn reschedule_workout(&self, schedule_id: i64, date: NaiveDate) -> RemoteResult<Value> {
        self.record("reschedule_workout");
        let mut state = self.state.lock().unwrap();
        let Some(entry) = state.schedules.get_mut(&schedule_id) else {
            return Err(Self::not_found(format!("scheduled workout {schedule_id}")));
        };
        entry.1 = date;
        Ok(Self::schedule_body(&state, schedule_id))
    }

    async fn unschedule_workout(&self, schedule_id: i64) -> RemoteResult<()> {
        self.record("unschedule_workout");
        let mut state = self.state.lock().unwrap();
        if state.schedules.remove(&schedule_id).is_none() {
            return Err(Self::not_found(format!("scheduled workout {schedule_id}")));
        }
        Ok(())
    }

    async fn calendar_month(&self, year: i32, month: u32) -> RemoteResult<Vec<Value>> {
        self.record("calendar_month");
        let state = self.state.lock().unwrap();
        let mut items: Vec<Value> = state
            .schedules
            .iter()
            .filter(|(_, (_, date))| date.year() == year && date.month() == month)
            .map(|(schedule_id, (workout_id, date))| {
                let workout = state.workouts.get(workout_id);
                json!({
                    "id": schedule_id,
                    "itemType": "workout",
                    "workoutId": workout_id,
                    "title": workout.and_then(|w| w.get("workoutName")).cloned(),
                    "sportTypeKey": workout
                        .and_then(|w| w.get("sportType"))
                        .and_then(|s| s.get("sportTypeKey"))
                        .cloned(),
                    "date": date.format("%Y-%m-%d").to_string(),
                })
            })
            .collect();
        let prefix = format!("{year}-{month:02}-");
        items.extend(
            self.extra_calendar_items
                .lock()
                .unwrap()
                .iter()
                .filter(|item| {
                    item.get("date")
                        .and_then(Value::as_str)
                        .is_some_and(|date| date.starts_with(&prefix))
                })
                .cloned(),
        );
        Ok(items)
    }

    async fn download_workout(&self, workout_id: i64) -> RemoteResult<Vec<u8>> {
        self.record("download_workout");
        if !self.state.lock().unwrap().workouts.contains_key(&workout_id) {
            return Err(Self::not_found(format!("workout {workout_id}")));
        }
        Ok(b"\x0e\x10FIT-test-payload".to_vec())
    }
}

/// Factory handing every session the same in-memory platform
pub struct FakeClientFactory {
    api: Arc<InMemoryGarminConnect>,
}

impl FakeClientFactory {
    pub fn new(api: Arc<InMemoryGarminConnect>) -> Arc<Self> {
        Arc::new(Self { api })
    }
}

impl ClientFactory for FakeClientFactory {
    fn create(&self, _tokens: &SessionTokens) -> Arc<dyn GarminConnectApi> {
        self.api.clone()
    }
}

/// Server resources backed by the in-memory platform
pub fn test_resources(api: &Arc<InMemoryGarminConnect>) -> Arc<ServerResources> {
    init_test_logging();
    Arc::new(ServerResources::with_client_factory(
        ServerConfig::default(),
        FakeClientFactory::new(Arc::clone(api)),
    ))
}

/// Tool context for the stdio session, with tokens installed
pub fn authenticated_context(resources: &Arc<ServerResources>) -> ToolExecutionContext {
    let session_id = SessionId::stdio();
    resources.sessions.set_tokens(&session_id, TEST_TOKEN).unwrap();
    ToolExecutionContext::new(session_id, Arc::clone(resources))
}

/// Tool context for a connection without tokens
pub fn anonymous_context(resources: &Arc<ServerResources>) -> ToolExecutionContext {
    ToolExecutionContext::new(SessionId::generate(), Arc::clone(resources))
}

/// A small valid running workout in the simplified form
pub fn simple_running_workout() -> Value {
    json!({
        "name": "Easy Tempo",
        "sport": "running",
        "steps": [
            { "stepType": "warmup", "endCondition": "time", "endConditionValue": 600 },
            {
                "type": "repeat",
                "numberOfIterations": 3,
                "steps": [
                    { "stepType": "interval", "endCondition": "distance", "endConditionValue": 1000,
                      "targetType": "heart.rate.zone", "zoneNumber": 4 },
                    { "stepType": "recovery", "endCondition": "time", "endConditionValue": 120 }
                ]
            },
            { "stepType": "cooldown", "endCondition": "lap.button" }
        ]
    })
}
