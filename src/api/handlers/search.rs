//! Worker proximity search.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{NearbyWorkerDto, WorkerSearchRequest};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /search/workers` — Workers near a point, nearest first.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] for a negative radius.
#[utoipa::path(
    post,
    path = "/api/v1/search/workers",
    tag = "Search",
    summary = "Search nearby workers",
    description = "Returns workers with a profile within the radius, filtered by profession, minimum rating and maximum hourly rate, sorted by distance.",
    request_body = WorkerSearchRequest,
    responses(
        (status = 200, description = "Matching workers", body = Vec<NearbyWorkerDto>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    )
)]
pub async fn search_workers(
    State(state): State<AppState>,
    Json(req): Json<WorkerSearchRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    req.validate()?;
    let hits = state
        .marketplace
        .search_workers(req.origin(), req.radius, &req.filter())
        .await;
    let body: Vec<NearbyWorkerDto> = hits.into_iter().map(NearbyWorkerDto::from).collect();
    Ok(Json(body))
}

/// Search routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/search/workers", post(search_workers))
}
