//! Integration tests for daily calorie endpoints

mod common;

use axum::http::StatusCode;
use common::json;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_calories_require_auth() {
    let app = common::TestApp::new().await;

    let (status, _) = app.get("/api/v1/calories/2024-03-13").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_unlogged_day_is_not_an_error() {
    let app = common::TestApp::new().await;

    let (status, body) = app.get_auth("/api/v1/calories/2024-03-13").await;

    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert!(body["entry"].is_null());
    assert_eq!(body["status"]["consumed"], 0);
    assert_eq!(body["status"]["target"], 2000);
    assert_eq!(body["status"]["remaining"], 2000);
    assert_eq!(body["band"], "under");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_upsert_then_read_day() {
    let app = common::TestApp::new().await;

    let body = json!({
        "calories_consumed": 1800,
        "target_calories": 2000,
        "notes": "  lunch out  "
    });
    let (status, response) = app
        .put_auth("/api/v1/calories/2024-03-13", &body.to_string())
        .await;
    assert_eq!(status, StatusCode::OK);
    let saved = json(&response);
    assert_eq!(saved["calories_consumed"], 1800);
    assert_eq!(saved["notes"], "lunch out");

    let (status, response) = app.get_auth("/api/v1/calories/2024-03-13").await;
    assert_eq!(status, StatusCode::OK);
    let day = json(&response);
    assert_eq!(day["entry"]["id"], saved["id"]);
    assert_eq!(day["status"]["remaining"], 200);
    assert_eq!(day["status"]["progress"], 90.0);
    assert_eq!(day["band"], "on_target");

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_upsert_replaces_existing_entry() {
    let app = common::TestApp::new().await;

    let first = json!({ "calories_consumed": 500, "target_calories": 2000 });
    let second = json!({ "calories_consumed": 2300, "target_calories": 2000 });
    app.put_auth("/api/v1/calories/2024-03-13", &first.to_string()).await;
    let (status, _) = app
        .put_auth("/api/v1/calories/2024-03-13", &second.to_string())
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, response) = app.get_auth("/api/v1/calories/2024-03-13").await;
    let day = json(&response);
    assert_eq!(day["status"]["consumed"], 2300);
    assert_eq!(day["status"]["remaining"], 0);
    assert_eq!(day["status"]["is_over_target"], true);
    assert_eq!(day["status"]["progress"], 100.0);
    assert_eq!(day["band"], "over");

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_missing_target_comes_from_weekly_goal() {
    let app = common::TestApp::new().await;

    let goal = json!({ "total_target_calories": 10500 });
    app.put_auth("/api/v1/goals/weekly/2024-03-11", &goal.to_string())
        .await;

    let body = json!({ "calories_consumed": 1000 });
    let (status, response) = app
        .put_auth("/api/v1/calories/2024-03-15", &body.to_string())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&response)["target_calories"], 1500);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_half_specified_fast_is_completed() {
    let app = common::TestApp::new().await;

    let body = json!({
        "calories_consumed": 1200,
        "target_calories": 1800,
        "fasting_hours": 16,
        "fast_start_time": "20:00"
    });
    let (status, response) = app
        .put_auth("/api/v1/calories/2024-03-13", &body.to_string())
        .await;

    assert_eq!(status, StatusCode::OK);
    let saved = json(&response);
    assert_eq!(saved["fast_start_time"], "20:00");
    assert_eq!(saved["fast_end_time"], "12:00");
    assert_eq!(saved["fasting_hours"], 16.0);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_invalid_entries_are_rejected() {
    let app = common::TestApp::new().await;

    let negative = json!({ "calories_consumed": -5 });
    let (status, _) = app
        .put_auth("/api/v1/calories/2024-03-13", &negative.to_string())
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let bad_time = json!({ "calories_consumed": 100, "fast_start_time": "8pm" });
    let (status, response) = app
        .put_auth("/api/v1/calories/2024-03-13", &bad_time.to_string())
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&response)["error"]["field"], "fast_start_time");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_list_range_is_oldest_first() {
    let app = common::TestApp::new().await;

    for (date, calories) in [("2024-03-14", 1700), ("2024-03-11", 2100), ("2024-03-20", 900)] {
        let body = json!({ "calories_consumed": calories, "target_calories": 2000 });
        app.put_auth(&format!("/api/v1/calories/{}", date), &body.to_string())
            .await;
    }

    let (status, response) = app
        .get_auth("/api/v1/calories?start=2024-03-11&end=2024-03-17")
        .await;

    assert_eq!(status, StatusCode::OK);
    let entries = json(&response)["entries"].as_array().unwrap().clone();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["date"], "2024-03-11");
    assert_eq!(entries[1]["date"], "2024-03-14");

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_delete_day() {
    let app = common::TestApp::new().await;

    let (status, _) = app.delete_auth("/api/v1/calories/2024-03-13").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let body = json!({ "calories_consumed": 800, "target_calories": 2000 });
    app.put_auth("/api/v1/calories/2024-03-13", &body.to_string())
        .await;

    let (status, _) = app.delete_auth("/api/v1/calories/2024-03-13").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, response) = app.get_auth("/api/v1/calories/2024-03-13").await;
    assert!(json(&response)["entry"].is_null());
}
