//! Worker profile handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{validate_new_worker_profile, validate_worker_profile_patch};
use crate::app_state::AppState;
use crate::domain::{NewWorkerProfile, UserId, WorkerProfile, WorkerProfilePatch};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /worker-profiles` — Create the profile of a worker.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] for an unknown user,
/// [`GatewayError::InvalidRole`] if the user is an employer and
/// [`GatewayError::AlreadyExists`] if the worker already has a profile.
#[utoipa::path(
    post,
    path = "/api/v1/worker-profiles",
    tag = "Workers",
    summary = "Create a worker profile",
    request_body = NewWorkerProfile,
    responses(
        (status = 201, description = "Profile created", body = WorkerProfile),
        (status = 400, description = "Invalid request or wrong role", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Profile already exists", body = ErrorResponse),
    )
)]
pub async fn create_worker_profile(
    State(state): State<AppState>,
    Json(req): Json<NewWorkerProfile>,
) -> Result<impl IntoResponse, GatewayError> {
    validate_new_worker_profile(&req)?;
    let profile = state.marketplace.create_worker_profile(req).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// `GET /worker-profiles/{user_id}` — Get the profile owned by a user.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] if the user has no profile.
#[utoipa::path(
    get,
    path = "/api/v1/worker-profiles/{user_id}",
    tag = "Workers",
    summary = "Get a worker profile",
    params(
        ("user_id" = u64, Path, description = "Id of the profile owner"),
    ),
    responses(
        (status = 200, description = "Worker profile", body = WorkerProfile),
        (status = 404, description = "Profile not found", body = ErrorResponse),
    )
)]
pub async fn get_worker_profile(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<impl IntoResponse, GatewayError> {
    let profile = state.marketplace.worker_profile(user_id).await?;
    Ok(Json(profile))
}

/// `PATCH /worker-profiles/{user_id}` — Update the profile owned by a user.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] if the user has no profile.
#[utoipa::path(
    patch,
    path = "/api/v1/worker-profiles/{user_id}",
    tag = "Workers",
    summary = "Update a worker profile",
    params(
        ("user_id" = u64, Path, description = "Id of the profile owner"),
    ),
    request_body = WorkerProfilePatch,
    responses(
        (status = 200, description = "Updated profile", body = WorkerProfile),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse),
    )
)]
pub async fn update_worker_profile(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(changes): Json<WorkerProfilePatch>,
) -> Result<impl IntoResponse, GatewayError> {
    validate_worker_profile_patch(&changes)?;
    let profile = state
        .marketplace
        .update_worker_profile(user_id, changes)
        .await?;
    Ok(Json(profile))
}

/// Worker profile routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/worker-profiles", post(create_worker_profile))
        .route(
            "/worker-profiles/{user_id}",
            get(get_worker_profile).patch(update_worker_profile),
        )
}
