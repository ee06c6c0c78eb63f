use crate::area::{AreaError, AreaModel};
use crate::town::{TownError, TownHandle, TownSnapshot};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared state for the town query/activation API
pub struct TownAppState {
    pub town: TownHandle,
}

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Create town API router
pub fn create_town_router(state: Arc<TownAppState>) -> Router {
    Router::new()
        .route("/api/town", get(get_town))
        .route("/api/town/areas", post(activate_area))
        .route("/api/town/areas/:id", get(get_area))
        .with_state(state)
}

/// GET /api/town - Full town snapshot
async fn get_town(State(state): State<Arc<TownAppState>>) -> Result<Json<TownSnapshot>, ApiError> {
    Ok(Json(state.town.snapshot().await?))
}

/// GET /api/town/areas/:id - One area model
async fn get_area(
    State(state): State<Arc<TownAppState>>,
    Path(id): Path<String>,
) -> Result<Json<AreaModel>, ApiError> {
    let model = state
        .town
        .area(&id)
        .await?
        .ok_or(ApiError(TownError::UnknownArea(id)))?;

    Ok(Json(model))
}

/// POST /api/town/areas - Activate an area from a model payload
///
/// Body is a tagged area model, e.g.
/// `{"type": "StreamingArea", "id": "Stage", "stream": "some_channel"}`
async fn activate_area(
    State(state): State<Arc<TownAppState>>,
    Json(model): Json<AreaModel>,
) -> Result<(StatusCode, Json<AreaModel>), ApiError> {
    let area_id = model.id().to_string();
    let activated = state.town.activate_area(model).await?;

    info!(area_id = %area_id, "Area activated via API");
    Ok((StatusCode::CREATED, Json(activated)))
}

/// Town error mapped onto an HTTP response
#[derive(Debug)]
struct ApiError(TownError);

impl From<TownError> for ApiError {
    fn from(e: TownError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            TownError::UnknownArea(_) | TownError::UnknownPlayer(_) => StatusCode::NOT_FOUND,
            TownError::Closed => StatusCode::SERVICE_UNAVAILABLE,
            TownError::Area(AreaError::KindMismatch { .. })
            | TownError::AreaAlreadyActive(_)
            | TownError::InactivePayload(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status != StatusCode::NOT_FOUND {
            warn!(error = %self.0, status = %status, "Town API request failed");
        }

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });

        (status, body).into_response()
    }
}
