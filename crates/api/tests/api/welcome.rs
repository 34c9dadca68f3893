use crate::helpers::{get, spawn_app, MockClimateAccess};
use axum::{body::Body, http::Request};
use hyper::{header, Method, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

#[tokio::test]
async fn welcome_lists_routes_without_touching_the_store() {
    // no session expectations: any data access would panic the mock
    let test_app = spawn_app(Arc::new(MockClimateAccess::new())).await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/")
        .header(header::ACCEPT, "text/html")
        .body(Body::empty())
        .unwrap();

    let response = test_app
        .app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(content_type.starts_with("text/html"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();

    assert!(html.contains("Welcome to the Climate API!"));
    assert!(html.contains("/api/v1.0/precipitation"));
    assert!(html.contains("/api/v1.0/stations"));
    assert!(html.contains("/api/v1.0/tobs"));
    assert!(html.contains("/api/v1.0/2016-01-01/2017-01-01"));
}

#[tokio::test]
async fn api_docs_are_served() {
    let test_app = spawn_app(Arc::new(MockClimateAccess::new())).await;

    let (status, body) = get(&test_app.app, "/docs").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.is_empty());
}
