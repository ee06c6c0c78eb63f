// Integration tests for the WebSocket upgrade guard
//
// The userName check is a tower middleware that runs BEFORE WebSocket
// upgrade extraction, so 400 can be returned without a full handshake.
//
// Note: Tests use tower::ServiceExt::oneshot. When the check passes, requests
// reach the WebSocketUpgrade extractor, which returns 426 (no hyper OnUpgrade
// extension in test requests). Requests carry the handshake headers so the
// extractor itself never answers 400. The tests verify the guard decision
// (400 vs non-400), not the upgrade itself.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use plaza::{
    api::{create_ws_router, WsAppState},
    town::{Town, TownHandle},
};
use std::sync::Arc;
use tower::ServiceExt;

fn make_router() -> Router {
    let state = Arc::new(WsAppState {
        town: TownHandle::spawn(Town::new("town", "Town"), 8, 16),
    });
    create_ws_router(state)
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("connection", "upgrade")
        .header("upgrade", "websocket")
        .header("sec-websocket-version", "13")
        .header("sec-websocket-key", "dGhlIHNhbXBsZSBub25jZQ==")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_missing_user_name_rejected() {
    let app = make_router();
    let resp = app.oneshot(get_request("/api/ws")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_user_name_rejected() {
    let app = make_router();
    let resp = app.oneshot(get_request("/api/ws?userName=%20%20")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_user_name_passes_guard() {
    let app = make_router();
    let resp = app.oneshot(get_request("/api/ws?userName=alice")).await.unwrap();
    // Guard passes; WebSocket extractor fails with 426 (test artifact, not 400)
    assert_eq!(resp.status(), StatusCode::UPGRADE_REQUIRED);
}
