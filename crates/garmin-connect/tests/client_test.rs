// ABOUTME: HTTP-level tests of the Garmin Connect client against a mock server
// ABOUTME: Verifies paths, headers, bodies, and status classification for each operation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin MCP Server Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::NaiveDate;
use garmin_connect::{GarminConnectApi, GarminConnectClient, SessionTokens};
use garmin_core::errors::RemoteError;
use garmin_core::models::{CanonicalWorkout, SportTypeKey};
use mockito::{Matcher, Server};
use serde_json::json;

const TOKEN: &str = "mock-access-token-123456";

fn client(server: &Server) -> GarminConnectClient {
    GarminConnectClient::with_client(
        server.url(),
        SessionTokens::from_access_token(TOKEN),
        reqwest::Client::new(),
    )
}

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

#[tokio::test]
async fn test_create_workout_sends_bearer_and_json() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/workout-service/workout")
        .match_header("authorization", format!("Bearer {TOKEN}").as_str())
        .match_header("nk", "NT")
        .match_body(Matcher::PartialJson(json!({
            "workoutName": "Threshold",
            "sportType": { "sportTypeKey": "cycling", "sportTypeId": 2 }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"workoutId": 321, "workoutName": "Threshold"}"#)
        .create_async()
        .await;

    let workout = CanonicalWorkout::new("Threshold".to_owned(), None, SportTypeKey::Cycling, vec![]);
    let body = client(&server).create_workout(&workout).await.unwrap();

    assert_eq!(body["workoutId"], 321);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_missing_workout_is_none() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/workout-service/workout/404")
        .with_status(404)
        .create_async()
        .await;

    assert!(client(&server).get_workout(404).await.unwrap().is_none());
}

#[tokio::test]
async fn test_schedule_posts_date() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/workout-service/schedule/55")
        .match_body(Matcher::Json(json!({ "date": "2025-03-10" })))
        .with_status(200)
        .with_body(r#"{"workoutScheduleId": 9001, "calendarDate": "2025-03-10"}"#)
        .create_async()
        .await;

    let body = client(&server)
        .schedule_workout(55, date("2025-03-10"))
        .await
        .unwrap();

    assert_eq!(body["workoutScheduleId"], 9001);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_calendar_month_is_zero_based_on_the_wire() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/calendar-service/year/2025/month/2")
        .with_status(200)
        .with_body(
            json!({
                "calendarItems": [
                    { "id": 1, "itemType": "workout", "date": "2025-03-04" },
                    { "id": 2, "itemType": "activity", "date": "2025-03-05" }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let items = client(&server).calendar_month(2025, 3).await.unwrap();

    assert_eq!(items.len(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_workouts_passes_paging() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex("^/workout-service/workouts".to_owned()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("start".into(), "20".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
        ]))
        .with_status(200)
        .with_body(r#"[{"workoutId": 1}, {"workoutId": 2}]"#)
        .create_async()
        .await;

    let workouts = client(&server).list_workouts(20, 10).await.unwrap();

    assert_eq!(workouts.len(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_and_unschedule_issue_one_call_each() {
    let mut server = Server::new_async().await;
    let delete = server
        .mock("DELETE", "/workout-service/workout/7")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;
    let unschedule = server
        .mock("DELETE", "/workout-service/schedule/70")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let client = client(&server);
    client.delete_workout(7).await.unwrap();
    client.unschedule_workout(70).await.unwrap();

    delete.assert_async().await;
    unschedule.assert_async().await;
}

#[tokio::test]
async fn test_download_returns_raw_bytes() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/workout-service/workout/FIT/12")
        .with_status(200)
        .with_header("content-type", "application/octet-stream")
        .with_body(vec![0x0e_u8, 0x10, 0x2e, 0x46, 0x49, 0x54])
        .create_async()
        .await;

    let bytes = client(&server).download_workout(12).await.unwrap();

    assert_eq!(bytes, vec![0x0e, 0x10, 0x2e, 0x46, 0x49, 0x54]);
}

#[tokio::test]
async fn test_status_classification() {
    let mut server = Server::new_async().await;
    server
        .mock("PUT", "/workout-service/schedule/1")
        .with_status(401)
        .create_async()
        .await;
    server
        .mock("PUT", "/workout-service/schedule/2")
        .with_status(429)
        .create_async()
        .await;
    server
        .mock("PUT", "/workout-service/schedule/3")
        .with_status(500)
        .with_body(r#"{"message": "calendar is read-only"}"#)
        .create_async()
        .await;
    server
        .mock("PUT", "/workout-service/schedule/4")
        .with_status(404)
        .create_async()
        .await;

    let client = client(&server);
    let day = date("2025-03-10");

    assert!(matches!(
        client.reschedule_workout(1, day).await.unwrap_err(),
        RemoteError::AuthenticationRequired { status: 401 }
    ));
    assert!(matches!(
        client.reschedule_workout(2, day).await.unwrap_err(),
        RemoteError::RateLimited
    ));
    match client.reschedule_workout(3, day).await.unwrap_err() {
        RemoteError::Rejected { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "calendar is read-only");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(client.reschedule_workout(4, day).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_invalid_json_body_is_reported() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/workout-service/workout/8")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    assert!(matches!(
        client(&server).get_workout(8).await.unwrap_err(),
        RemoteError::InvalidResponse { .. }
    ));
}
