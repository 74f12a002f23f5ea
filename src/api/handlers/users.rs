//! User handlers: register, get, update.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{UserDetailResponse, validate_new_user, validate_user_patch};
use crate::app_state::AppState;
use crate::domain::{NewUser, User, UserId, UserPatch};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /users` — Register a user.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] on validation failure and
/// [`GatewayError::AlreadyExists`] if the username is taken.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    summary = "Register a user",
    description = "Creates a worker or employer account. The rating starts at 0.",
    request_body = NewUser,
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Username already taken", body = ErrorResponse),
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    Json(req): Json<NewUser>,
) -> Result<impl IntoResponse, GatewayError> {
    validate_new_user(&req)?;
    let user = state.marketplace.register_user(req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users/{id}` — Get a user, with the worker profile for workers.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] if the user does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    summary = "Get user details",
    params(
        ("id" = u64, Path, description = "User id"),
    ),
    responses(
        (status = 200, description = "User details", body = UserDetailResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<impl IntoResponse, GatewayError> {
    let (user, worker_profile) = state.marketplace.user(id).await?;
    Ok(Json(UserDetailResponse {
        user,
        worker_profile,
    }))
}

/// `PATCH /users/{id}` — Update profile fields of a user.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] if the user does not exist.
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    tag = "Users",
    summary = "Update a user",
    description = "Merges the supplied fields. Username, role and rating cannot be changed.",
    params(
        ("id" = u64, Path, description = "User id"),
    ),
    request_body = UserPatch,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(patch): Json<UserPatch>,
) -> Result<impl IntoResponse, GatewayError> {
    validate_user_patch(&patch)?;
    let user = state.marketplace.update_user(id, patch).await?;
    Ok(Json(user))
}

/// User routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register_user))
        .route("/users/{id}", get(get_user).patch(update_user))
}
