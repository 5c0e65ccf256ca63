//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint, plus the library
//! facade used directly.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use call_ledger::{
    api::create_router,
    cache::{Instrumented, Operation, STORE_OPERATION},
    AppState, Cache, CacheError, Config, KeyValueStore, Lookup, MemoryStore, StoredValue,
};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    let state = AppState::from_config(&Config::default()).unwrap();
    create_router(state)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn put_store(app: &Router, body: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/store")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == Store Endpoint Tests ==

#[tokio::test]
async fn test_store_endpoint_returns_key() {
    let app = create_test_app();

    let (status, json) = put_store(&app, r#"{"type":"text","value":"hello"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"].as_str().unwrap().len(), 36);
}

#[tokio::test]
async fn test_store_endpoint_rejects_unknown_type() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/store")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"type":"date","value":"today"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// == Get Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_round_trips() {
    let app = create_test_app();

    let (_, stored) = put_store(&app, r#"{"type":"int","value":42}"#).await;
    let key = stored["key"].as_str().unwrap();
    let (status, json) = get_json(&app, &format!("/get/{}?decode=int", key)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"], 42);

    let (_, stored) = put_store(&app, r#"{"type":"text","value":"hello"}"#).await;
    let key = stored["key"].as_str().unwrap();
    let (status, json) = get_json(&app, &format!("/get/{}?decode=str", key)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"], "hello");
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app();

    let (status, json) = get_json(&app, "/get/nonexistent-uuid").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("nonexistent-uuid"));
}

#[tokio::test]
async fn test_get_endpoint_decoding_error() {
    let app = create_test_app();

    let (_, stored) = put_store(&app, r#"{"type":"text","value":"abc"}"#).await;
    let key = stored["key"].as_str().unwrap();
    let (status, json) = get_json(&app, &format!("/get/{}?decode=int", key)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("Decoding error"));
}

// == Diagnostics Endpoint Tests ==

#[tokio::test]
async fn test_replay_endpoint_scenario() {
    let app = create_test_app();

    let (_, foo) = put_store(&app, r#"{"type":"text","value":"foo"}"#).await;
    let (_, bar) = put_store(&app, r#"{"type":"text","value":"bar"}"#).await;
    // Reads are not instrumented
    get_json(&app, &format!("/get/{}", foo["key"].as_str().unwrap())).await;

    let (status, calls) = get_json(&app, "/calls/Cache.store").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(calls["calls"], 2);

    let (status, replay) = get_json(&app, "/replay/Cache.store").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replay["calls"], 2);

    let records = replay["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["inputs"], r#"["foo"]"#);
    assert_eq!(records[1]["inputs"], r#"["bar"]"#);
    assert_eq!(records[0]["output"], format!("\"{}\"", foo["key"].as_str().unwrap()));
    assert_eq!(records[1]["output"], format!("\"{}\"", bar["key"].as_str().unwrap()));

    let trace = replay["trace"].as_str().unwrap();
    assert_eq!(trace.lines().count(), 3);
    assert_eq!(trace.lines().next().unwrap(), "Cache.store was called 2 times:");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

// == Library Facade Tests ==

#[test]
fn test_facade_end_to_end() {
    let store = Arc::new(MemoryStore::new());
    let cache = Cache::new(Arc::clone(&store)).unwrap();

    let key = cache.store(StoredValue::Int(42)).unwrap();
    assert_eq!(cache.get_int(&key).unwrap(), Lookup::Found(42));
    assert_eq!(cache.get("missing").unwrap(), Lookup::NotFound);

    let replay = cache.replay(STORE_OPERATION).unwrap();
    assert_eq!(
        replay.to_string(),
        format!("Cache.store was called 1 times:\nCache.store(*[42]) -> \"{}\"", key)
    );

    // An 8-byte integer encoding can be valid UTF-8; raw 0xff never is
    let int_as_text = cache.get_str(&key).unwrap();
    assert_eq!(int_as_text, Lookup::Found("*\0\0\0\0\0\0\0".to_string()));
    let invalid = cache.store(StoredValue::Bytes(vec![0xff, 0xfe])).unwrap();
    assert!(matches!(cache.get_str(&invalid), Err(CacheError::Decoding(_))));
    let short_text = cache.store("abc").unwrap();
    assert!(matches!(cache.get_int(&short_text), Err(CacheError::Decoding(_))));

    Cache::new(Arc::clone(&store)).unwrap();
    assert!(store.is_empty().unwrap());
}

/// Operation defined outside the crate, instrumented the same way as `Cache.store`.
struct Greet;

impl Operation for Greet {
    type Args = (String, u32);
    type Output = String;

    fn name(&self) -> &str {
        "Greeter.greet"
    }

    fn call(
        &self,
        _store: &dyn KeyValueStore,
        (who, times): (String, u32),
    ) -> call_ledger::Result<String> {
        Ok(format!("hello {}", who).repeat(times as usize))
    }
}

#[test]
fn test_instrument_custom_operation() {
    let store = MemoryStore::new();
    let greet: Instrumented<Greet> = call_ledger::cache::instrument(Greet);

    assert_eq!(greet.call(&store, ("ann".to_string(), 1)).unwrap(), "hello ann");
    greet.call(&store, ("bob".to_string(), 2)).unwrap();

    let replay = call_ledger::cache::replay(&store, "Greeter.greet").unwrap();
    assert_eq!(replay.calls, 2);
    assert_eq!(replay.records[0].inputs, r#"["ann",1]"#);
    assert_eq!(replay.records[1].output, "\"hello bobhello bob\"");
}
