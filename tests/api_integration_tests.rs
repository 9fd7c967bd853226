//! Integration Tests for the Inspection API
//!
//! Tests full request/response cycle for each endpoint against a cache that
//! shares its storage medium with the test.

use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use booking_cache::{
    api::create_router,
    cache::CacheService,
    config::CacheConfig,
    storage::{MemoryStorage, Storage},
    AppState,
};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> (Router, Arc<CacheService>, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let state = AppState::new(CacheService::new(&CacheConfig::default(), storage.clone()));
    let cache = state.cache.clone();
    (create_router(state), cache, storage)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == Stats Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint_reports_namespace() {
    let (app, cache, storage) = create_test_app();

    cache.set("events_list", &vec![1, 2, 3], None);
    cache.set("short", "v", Some(Duration::from_millis(20)));
    storage.set_item("unrelated", "x").unwrap();
    sleep(Duration::from_millis(40));

    let (status, json) = send(&app, "GET", "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_keys"], 2);
    assert_eq!(json["expired_keys"], 1);
    assert!(json["total_size"].as_u64().unwrap() > 0);
    assert!(json.get("total_size_kb").is_some());
}

// == Keys Endpoint Tests ==

#[tokio::test]
async fn test_keys_endpoint_lists_logical_keys() {
    let (app, cache, storage) = create_test_app();

    cache.set_with_tags("events_list", &1, &["events"], None);
    storage.set_item("unrelated", "x").unwrap();

    let (status, json) = send(&app, "GET", "/keys").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);
    assert_eq!(json["keys"][0], "events_list");
    assert_eq!(json["keys"][1], "tag_events");
}

#[tokio::test]
async fn test_delete_key_endpoint() {
    let (app, cache, _) = create_test_app();
    cache.set("delete_key", "value", None);

    let (status, json) = send(&app, "DELETE", "/keys/delete_key").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].as_str().unwrap().contains("delete_key"));
    assert!(!cache.has("delete_key"));

    let (status, json) = send(&app, "DELETE", "/keys/delete_key").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_clear_endpoint_keeps_foreign_keys() {
    let (app, cache, storage) = create_test_app();

    cache.set("a", &1, None);
    cache.set("b", &2, None);
    storage.set_item("theme", "dark").unwrap();

    let (status, json) = send(&app, "DELETE", "/keys").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], 2);
    assert_eq!(storage.get_item("theme").as_deref(), Some("dark"));
}

// == Invalidation Endpoint Tests ==

#[tokio::test]
async fn test_tag_endpoint_invalidates_members() {
    let (app, cache, _) = create_test_app();

    cache.set_with_tags("k1", "v1", &["t"], None);
    cache.set_with_tags("k2", "v2", &["t"], None);

    let (status, json) = send(&app, "DELETE", "/tags/t").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);
    assert!(!cache.has("k1"));
    assert!(!cache.has("k2"));

    let (_, json) = send(&app, "DELETE", "/tags/t").await;
    assert_eq!(json["count"], 0);
}

#[tokio::test]
async fn test_pattern_endpoint_deletes_matches() {
    let (app, cache, _) = create_test_app();

    cache.set("events_list_a", &1, None);
    cache.set("events_list_b", &2, None);
    cache.set("social_hubs", &3, None);

    let (status, json) = send(&app, "DELETE", "/patterns/events_list").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);
    assert_eq!(cache.get::<i32>("social_hubs"), Some(3));
}

#[tokio::test]
async fn test_clean_endpoint_sweeps_expired() {
    let (app, cache, _) = create_test_app();

    cache.set("short", "v", Some(Duration::from_millis(20)));
    cache.set("long", "v", None);
    sleep(Duration::from_millis(40));

    let (status, json) = send(&app, "POST", "/clean").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(cache.keys(), vec!["long".to_string()]);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _, _) = create_test_app();

    let (status, json) = send(&app, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

#[tokio::test]
async fn test_unknown_route_not_found() {
    let (app, _, _) = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
