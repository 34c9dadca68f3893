use crate::helpers::{get, get_json, seeded_database, spawn_sqlite_app};
use axum::http::StatusCode;
use climate_api::build_app_state;
use std::collections::HashSet;

#[tokio::test]
async fn precipitation_matches_measurement_rows() {
    let (_dir, test_app) = spawn_sqlite_app().await;

    let (status, json) = get_json(&test_app.app, "/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 10);
    assert!(entries
        .iter()
        .all(|e| e.as_object().unwrap().len() == 2 && e.get("date").is_some()));
}

#[tokio::test]
async fn stations_match_station_table() {
    let (_dir, test_app) = spawn_sqlite_app().await;

    let (status, json) = get_json(&test_app.app, "/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    let stations: HashSet<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap())
        .collect();
    assert_eq!(
        stations,
        HashSet::from(["USC00519397", "USC00519281", "USC00513117"])
    );
}

#[tokio::test]
async fn tobs_covers_trailing_year_of_most_active_station() {
    let (_dir, test_app) = spawn_sqlite_app().await;

    let (status, json) = get_json(&test_app.app, "/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    let dates: HashSet<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["date"].as_str().unwrap())
        .collect();
    // 2016-08-22 falls one day before the window; other stations are excluded
    assert_eq!(
        dates,
        HashSet::from(["2016-08-23", "2017-01-01", "2017-08-18"])
    );
}

#[tokio::test]
async fn start_stats_follow_dataset_span() {
    let (_dir, test_app) = spawn_sqlite_app().await;

    let (status, json) = get_json(&test_app.app, "/api/v1.0/2016-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["MIN"], 70.0);
    assert_eq!(json["MAX"], 81.0);
    assert!(json["AVG"].is_f64());

    let (status, json) = get_json(&test_app.app, "/api/v1.0/2020-01-01").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["ERROR"].as_str().unwrap().contains("2020-01-01"));
}

#[tokio::test]
async fn range_stats_follow_dataset_span() {
    let (_dir, test_app) = spawn_sqlite_app().await;

    let (status, json) = get_json(&test_app.app, "/api/v1.0/2016-01-01/2017-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["MIN"], 70.0);
    assert_eq!(json["MAX"], 80.0);

    let (status, json) = get_json(&test_app.app, "/api/v1.0/2009-01-01/2017-01-01").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["ERROR"].as_str().unwrap().contains("START"));

    let (status, json) = get_json(&test_app.app, "/api/v1.0/2016-01-01/2018-01-01").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["ERROR"].as_str().unwrap().contains("END"));

    let (status, json) = get_json(&test_app.app, "/api/v1.0/2009-01-01/2018-01-01").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let message = json["ERROR"].as_str().unwrap();
    assert!(message.contains("2009-01-01") && message.contains("2018-01-01"));
}

#[tokio::test]
async fn repeated_requests_are_identical() {
    let (_dir, test_app) = spawn_sqlite_app().await;

    for uri in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/2016-01-01",
        "/api/v1.0/2016-01-01/2017-01-01",
    ] {
        let first = get(&test_app.app, uri).await;
        let second = get(&test_app.app, uri).await;
        assert_eq!(first, second, "{}", uri);
    }
}

#[tokio::test]
async fn concurrent_requests_share_the_pool() {
    let (_dir, test_app) = spawn_sqlite_app().await;

    // more requests than pooled connections; each session is released when done
    let requests = (0..8).map(|_| get(&test_app.app, "/api/v1.0/tobs"));
    let responses = futures::future::join_all(requests).await;

    assert!(responses
        .iter()
        .all(|(status, _)| *status == StatusCode::OK));
}

#[tokio::test]
async fn startup_rejects_missing_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.sqlite");

    let result = build_app_state(path.to_str().unwrap().to_owned(), 2).await;

    assert!(result.is_err());
    assert!(!path.exists());
}

#[tokio::test]
async fn startup_rejects_database_without_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.sqlite");
    std::fs::write(&path, b"").unwrap();

    let result = build_app_state(path.to_str().unwrap().to_owned(), 2).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn startup_accepts_seeded_database() {
    let (_dir, path) = seeded_database().await;

    assert!(build_app_state(path, 1).await.is_ok());
}
