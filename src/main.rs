use anyhow::{Context, Result};
use plaza::api::{create_town_router, create_ws_router, TownAppState, WsAppState};
use plaza::config::{load_or_default, PlazaConfig};
use plaza::map::TownMap;
use plaza::town::{Town, TownHandle};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plaza=info".into()),
        )
        .init();

    info!("Plaza starting...");

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));
    let mut config = load_or_default(&config_path)?;
    config.apply_env_overrides();

    let town = load_town(&config)?;
    let handle = TownHandle::spawn(
        town,
        config.town.command_capacity,
        config.town.event_capacity,
    );

    let app = create_ws_router(Arc::new(WsAppState {
        town: handle.clone(),
    }))
    .merge(create_town_router(Arc::new(TownAppState { town: handle })))
    .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;

    info!(bind_addr = %config.server.bind_addr, "HTTP/WebSocket server listening");

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}

/// Build the configured town; a malformed map stops startup
fn load_town(config: &PlazaConfig) -> Result<Town> {
    let town_config = &config.town;

    let Some(map_path) = &town_config.map_path else {
        info!(town_id = %town_config.id, "No map configured, town has no areas");
        return Ok(Town::new(&town_config.id, &town_config.friendly_name));
    };

    let json = std::fs::read_to_string(map_path)
        .with_context(|| format!("Failed to read map {}", map_path.display()))?;
    let map = TownMap::from_json(&json)
        .with_context(|| format!("Failed to parse map {}", map_path.display()))?;

    info!(map = %map_path.display(), kinds = ?map.kind_counts(), "Map loaded");

    Town::from_map(&town_config.id, &town_config.friendly_name, &map)
        .with_context(|| format!("Failed to build town from map {}", map_path.display()))
}
