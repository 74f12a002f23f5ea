//! Review handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{PaginationParams, ReviewListResponse, validate_new_review};
use crate::app_state::AppState;
use crate::domain::{NewReview, Review, UserId};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /reviews` — Review a user.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] if the reviewer, the target or the
/// referenced job does not exist.
#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    tag = "Reviews",
    summary = "Create a review",
    description = "Stores the review and recomputes the target's average rating.",
    request_body = NewReview,
    responses(
        (status = 201, description = "Review stored", body = Review),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "User or job not found", body = ErrorResponse),
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    Json(req): Json<NewReview>,
) -> Result<impl IntoResponse, GatewayError> {
    validate_new_review(&req)?;
    let review = state.marketplace.create_review(req).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// `GET /reviews/target/{id}` — Reviews received by a user.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] if the user does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/reviews/target/{id}",
    tag = "Reviews",
    summary = "List reviews of a user",
    params(
        ("id" = u64, Path, description = "Reviewed user id"),
        PaginationParams,
    ),
    responses(
        (status = 200, description = "Paginated review list", body = ReviewListResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn reviews_for_target(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let reviews = state.marketplace.reviews_for_target(id).await?;
    let (data, pagination) = params.paginate(reviews);
    Ok(Json(ReviewListResponse { data, pagination }))
}

/// Review routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", post(create_review))
        .route("/reviews/target/{id}", get(reviews_for_target))
}
