//! Market handlers: create, get, update and nearby search.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    MarketSearchRequest, NearbyMarketDto, check_radius, validate_market_patch, validate_new_market,
};
use crate::app_state::AppState;
use crate::domain::{Market, MarketId, MarketPatch, NewMarket};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /markets` — Register a market.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] on validation failure.
#[utoipa::path(
    post,
    path = "/api/v1/markets",
    tag = "Markets",
    summary = "Create a market",
    request_body = NewMarket,
    responses(
        (status = 201, description = "Market created", body = Market),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    )
)]
pub async fn create_market(
    State(state): State<AppState>,
    Json(req): Json<NewMarket>,
) -> Result<impl IntoResponse, GatewayError> {
    validate_new_market(&req)?;
    let market = state.marketplace.create_market(req).await;
    Ok((StatusCode::CREATED, Json(market)))
}

/// `GET /markets/{id}` — Get a market.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] if the market does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/markets/{id}",
    tag = "Markets",
    summary = "Get market details",
    params(
        ("id" = u64, Path, description = "Market id"),
    ),
    responses(
        (status = 200, description = "Market details", body = Market),
        (status = 404, description = "Market not found", body = ErrorResponse),
    )
)]
pub async fn get_market(
    State(state): State<AppState>,
    Path(id): Path<MarketId>,
) -> Result<impl IntoResponse, GatewayError> {
    let market = state.marketplace.market(id).await?;
    Ok(Json(market))
}

/// `PATCH /markets/{id}` — Update a market.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] if the market does not exist.
#[utoipa::path(
    patch,
    path = "/api/v1/markets/{id}",
    tag = "Markets",
    summary = "Update a market",
    params(
        ("id" = u64, Path, description = "Market id"),
    ),
    request_body = MarketPatch,
    responses(
        (status = 200, description = "Updated market", body = Market),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Market not found", body = ErrorResponse),
    )
)]
pub async fn update_market(
    State(state): State<AppState>,
    Path(id): Path<MarketId>,
    Json(patch): Json<MarketPatch>,
) -> Result<impl IntoResponse, GatewayError> {
    validate_market_patch(&patch)?;
    let market = state.marketplace.update_market(id, patch).await?;
    Ok(Json(market))
}

/// `POST /markets/nearby` — Markets near a point, nearest first.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] for a negative radius.
#[utoipa::path(
    post,
    path = "/api/v1/markets/nearby",
    tag = "Search",
    summary = "Search nearby markets",
    description = "Returns markets within the radius, optionally restricted to one type, sorted by distance.",
    request_body = MarketSearchRequest,
    responses(
        (status = 200, description = "Matching markets", body = Vec<NearbyMarketDto>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    )
)]
pub async fn nearby_markets(
    State(state): State<AppState>,
    Json(req): Json<MarketSearchRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    check_radius(req.radius)?;
    let hits = state
        .marketplace
        .search_markets(req.origin(), req.radius, req.market_type.as_deref())
        .await;
    let body: Vec<NearbyMarketDto> = hits.into_iter().map(NearbyMarketDto::from).collect();
    Ok(Json(body))
}

/// Market routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/markets", post(create_market))
        .route("/markets/nearby", post(nearby_markets))
        .route("/markets/{id}", get(get_market).patch(update_market))
}
