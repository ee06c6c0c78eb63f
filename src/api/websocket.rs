use crate::subscription::ConnectionManager;
use crate::town::TownHandle;
use axum::{
    extract::{
        ws::{WebSocket, WebSocketUpgrade},
        Query, Request, State,
    },
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

/// Query parameters for WebSocket upgrade
#[derive(Deserialize)]
pub struct WsQuery {
    #[serde(rename = "userName")]
    pub user_name: Option<String>,
}

/// Shared application state for WebSocket handler
#[derive(Clone)]
pub struct WsAppState {
    pub town: TownHandle,
}

/// Rejects upgrades without a usable `?userName=`.
///
/// Runs as a tower layer BEFORE WebSocket upgrade extraction so 400 can be
/// returned without requiring a valid upgrade request in tests.
async fn require_user_name(Query(params): Query<WsQuery>, req: Request, next: Next) -> Response {
    match params.user_name {
        Some(ref name) if !name.trim().is_empty() => next.run(req).await,
        _ => (StatusCode::BAD_REQUEST, "userName is required").into_response(),
    }
}

/// GET /api/ws?userName=... - WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsQuery>,
    State(state): State<Arc<WsAppState>>,
) -> Response {
    let user_name = params.user_name.unwrap_or_default().trim().to_string();
    info!(user_name = %user_name, "WebSocket upgrade request received");
    ws.on_upgrade(move |socket| handle_socket(socket, state, user_name))
}

/// Create WebSocket router with the userName check applied
pub fn create_ws_router(state: Arc<WsAppState>) -> Router {
    Router::new()
        .route("/api/ws", get(ws_handler))
        .route_layer(middleware::from_fn(require_user_name))
        .with_state(state)
}

/// Handle WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<WsAppState>, user_name: String) {
    // Subscribe before joining so no event after the join snapshot is missed
    let events_rx = state.town.subscribe();

    let (player, snapshot) = match state.town.join(&user_name).await {
        Ok(joined) => joined,
        Err(e) => {
            error!(error = %e, "Failed to join town");
            return;
        }
    };

    ConnectionManager::new(player.id, state.town.clone())
        .handle(socket, events_rx, snapshot)
        .await;
}
