// Integration tests for GET /api/town and the area endpoints

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use plaza::api::{create_town_router, TownAppState};
use plaza::map::TownMap;
use plaza::town::{Town, TownHandle};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const MAP: &str = r#"{
    "layers": [{
        "name": "Objects",
        "type": "objectgroup",
        "objects": [
            { "id": 1, "name": "Lobby", "type": "ConversationArea", "x": 0, "y": 0, "width": 10, "height": 10 },
            { "id": 2, "name": "Stage", "type": "StreamingArea", "x": 20, "y": 0, "width": 10, "height": 10 }
        ]
    }]
}"#;

fn create_test_app() -> (Router, TownHandle) {
    let map = TownMap::from_json(MAP).unwrap();
    let town = Town::from_map("campus", "Campus", &map).unwrap();
    let handle = TownHandle::spawn(town, 8, 16);
    let app = create_town_router(Arc::new(TownAppState {
        town: handle.clone(),
    }));
    (app, handle)
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_get_town_snapshot() {
    let (app, handle) = create_test_app();
    handle.join("alice").await.unwrap();

    let response = app.oneshot(get("/api/town")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let snapshot = body_json(response).await;
    assert_eq!(snapshot["townId"], json!("campus"));
    assert_eq!(snapshot["friendlyName"], json!("Campus"));
    assert_eq!(snapshot["players"][0]["userName"], json!("alice"));
    assert_eq!(snapshot["interactables"].as_array().unwrap().len(), 2);
    assert_eq!(snapshot["interactables"][0]["type"], json!("ConversationArea"));
}

#[tokio::test]
async fn test_get_area() {
    let (app, _handle) = create_test_app();

    let response = app.oneshot(get("/api/town/areas/Stage")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "type": "StreamingArea", "id": "Stage" })
    );
}

#[tokio::test]
async fn test_get_unknown_area_returns_404() {
    let (app, _handle) = create_test_app();

    let response = app.oneshot(get("/api/town/areas/Nowhere")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_activate_area_broadcasts_update() {
    let (app, handle) = create_test_app();
    let mut rx = handle.subscribe();

    let response = app
        .oneshot(post_json(
            "/api/town/areas",
            json!({ "type": "StreamingArea", "id": "Stage", "stream": "ch1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["stream"], json!("ch1"));

    let event = rx.recv().await.unwrap();
    assert_eq!(event.name(), "interactableUpdate");
}

#[tokio::test]
async fn test_activate_twice_returns_400() {
    let (app, _handle) = create_test_app();
    let body = json!({ "type": "StreamingArea", "id": "Stage", "stream": "ch1" });

    let first = app.clone().oneshot(post_json("/api/town/areas", body.clone())).await.unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.oneshot(post_json("/api/town/areas", body)).await.unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(second).await["error"]
        .as_str()
        .unwrap()
        .contains("already active"));
}

#[tokio::test]
async fn test_activate_without_stream_returns_400() {
    let (app, _handle) = create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/town/areas",
            json!({ "type": "StreamingArea", "id": "Stage" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_activate_wrong_kind_returns_400() {
    let (app, _handle) = create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/town/areas",
            json!({ "type": "ConversationArea", "id": "Stage", "topic": "hello" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_activate_unknown_area_returns_404() {
    let (app, _handle) = create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/town/areas",
            json!({ "type": "StreamingArea", "id": "Nowhere", "stream": "ch1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
