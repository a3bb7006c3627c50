// ABOUTME: reqwest-backed Garmin Connect client bound to one session's tokens
// ABOUTME: Maps HTTP statuses to RemoteError and logs every remote call once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

use std::time::Instant;

use async_trait::async_trait;
use chrono::NaiveDate;
use garmin_core::constants::endpoints;
use garmin_core::errors::{RemoteError, RemoteResult};
use garmin_core::models::CanonicalWorkout;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::api::GarminConnectApi;
use crate::http_client::shared_client;
use crate::tokens::SessionTokens;

/// Garmin Connect client for a single session
pub struct GarminConnectClient {
    base_url: String,
    tokens: SessionTokens,
    client: Client,
}

impl GarminConnectClient {
    /// Client using the shared connection pool
    #[must_use]
    pub fn new(base_url: impl Into<String>, tokens: SessionTokens) -> Self {
        Self::with_client(base_url, tokens, shared_client().clone())
    }

    /// Client using a caller-provided HTTP client
    #[must_use]
    pub fn with_client(base_url: impl Into<String>, tokens: SessionTokens, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            base_url,
            tokens,
            client,
        }
    }

    /// Base URL requests are issued against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        self.client
            .request(method, url)
            .bearer_auth(self.tokens.access_token())
            .header("NK", "NT")
    }

    /// Send once, classify non-success statuses
    async fn send(&self, builder: RequestBuilder, resource: &str) -> RemoteResult<Response> {
        let started = Instant::now();
        let response = builder.send().await.map_err(|error| {
            warn!(resource, "Garmin Connect request failed: {error}");
            RemoteError::Transport {
                message: error.to_string(),
            }
        })?;

        let status = response.status();
        let elapsed_ms = started.elapsed().as_millis() as u64;
        if status.is_success() {
            debug!(resource, status = status.as_u16(), elapsed_ms, "Garmin Connect call succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(
            resource,
            status = status.as_u16(),
            elapsed_ms,
            "Garmin Connect call rejected"
        );
        Err(RemoteError::from_status(status.as_u16(), resource, &body))
    }

    /// Parse a JSON body, treating an empty body as `null`
    async fn json_body(response: Response) -> RemoteResult<Value> {
        let text = response
            .text()
            .await
            .map_err(|error| RemoteError::Transport {
                message: error.to_string(),
            })?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|error| RemoteError::InvalidResponse {
            message: format!("invalid JSON body: {error}"),
        })
    }

    async fn send_json(&self, builder: RequestBuilder, resource: &str) -> RemoteResult<Value> {
        let response = self.send(builder, resource).await?;
        Self::json_body(response).await
    }
}

/// Extract the item list from a calendar-month body
fn calendar_items(body: Value) -> Vec<Value> {
    match body {
        Value::Object(mut map) => match map.remove("calendarItems") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

#[async_trait]
impl GarminConnectApi for GarminConnectClient {
    async fn list_workouts(&self, start: u32, limit: u32) -> RemoteResult<Vec<Value>> {
        let builder = self
            .request(Method::GET, endpoints::WORKOUTS)
            .query(&[("start", start), ("limit", limit)]);
        match self.send_json(builder, "workout library").await? {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            other => Err(RemoteError::InvalidResponse {
                message: format!("expected a workout list, got {other}"),
            }),
        }
    }

    async fn get_workout(&self, workout_id: i64) -> RemoteResult<Option<Value>> {
        let path = format!("{}/{workout_id}", endpoints::WORKOUT);
        let resource = format!("workout {workout_id}");
        match self.send_json(self.request(Method::GET, &path), &resource).await {
            Ok(Value::Null) => Ok(None),
            Ok(body) => Ok(Some(body)),
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(error),
        }
    }

    async fn create_workout(&self, workout: &CanonicalWorkout) -> RemoteResult<Value> {
        let builder = self.request(Method::POST, endpoints::WORKOUT).json(workout);
        let body = self.send_json(builder, "workout").await?;
        info!(
            workout_id = ?body.get("workoutId"),
            name = %workout.workout_name,
            "Created Garmin Connect workout"
        );
        Ok(body)
    }

    async fn update_workout(
        &self,
        workout_id: i64,
        workout: &CanonicalWorkout,
    ) -> RemoteResult<Value> {
        let path = format!("{}/{workout_id}", endpoints::WORKOUT);
        let builder = self.request(Method::PUT, &path).json(workout);
        let body = self
            .send_json(builder, &format!("workout {workout_id}"))
            .await?;
        info!(workout_id, "Updated Garmin Connect workout");
        Ok(body)
    }

    async fn delete_workout(&self, workout_id: i64) -> RemoteResult<()> {
        let path = format!("{}/{workout_id}", endpoints::WORKOUT);
        self.send(
            self.request(Method::DELETE, &path),
            &format!("workout {workout_id}"),
        )
        .await?;
        info!(workout_id, "Deleted Garmin Connect workout");
        Ok(())
    }

    async fn schedule_workout(&self, workout_id: i64, date: NaiveDate) -> RemoteResult<Value> {
        let path = format!("{}/{workout_id}", endpoints::SCHEDULE);
        let builder = self
            .request(Method::POST, &path)
            .json(&json!({ "date": date.format("%Y-%m-%d").to_string() }));
        let body = self
            .send_json(builder, &format!("workout {workout_id}"))
            .await?;
        info!(workout_id, %date, "Scheduled Garmin Connect workout");
        Ok(body)
    }

    async fn reschedule_workout(&self, schedule_id: i64, date: NaiveDate) -> RemoteResult<Value> {
        let path = format!("{}/{schedule_id}", endpoints::SCHEDULE);
        let builder = self
            .request(Method::PUT, &path)
            .json(&json!({ "date": date.format("%Y-%m-%d").to_string() }));
        let body = self
            .send_json(builder, &format!("scheduled workout {schedule_id}"))
            .await?;
        info!(schedule_id, %date, "Rescheduled Garmin Connect workout");
        Ok(body)
    }

    async fn unschedule_workout(&self, schedule_id: i64) -> RemoteResult<()> {
        let path = format!("{}/{schedule_id}", endpoints::SCHEDULE);
        self.send(
            self.request(Method::DELETE, &path),
            &format!("scheduled workout {schedule_id}"),
        )
        .await?;
        info!(schedule_id, "Unscheduled Garmin Connect workout");
        Ok(())
    }

    async fn calendar_month(&self, year: i32, month: u32) -> RemoteResult<Vec<Value>> {
        // The calendar service numbers months from zero
        let path = format!(
            "{}/{year}/month/{}",
            endpoints::CALENDAR_YEAR,
            month.saturating_sub(1)
        );
        let body = self
            .send_json(
                self.request(Method::GET, &path),
                &format!("calendar {year}-{month:02}"),
            )
            .await?;
        Ok(calendar_items(body))
    }

    async fn download_workout(&self, workout_id: i64) -> RemoteResult<Vec<u8>> {
        let path = format!("{}/{workout_id}", endpoints::WORKOUT_FIT);
        let response = self
            .send(
                self.request(Method::GET, &path),
                &format!("workout {workout_id}"),
            )
            .await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|error| RemoteError::Transport {
                message: error.to_string(),
            })?;
        debug!(workout_id, size = bytes.len(), "Downloaded workout FIT file");
        Ok(bytes.to_vec())
    }
}
