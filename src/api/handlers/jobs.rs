//! Job handlers: post, get, update, listings and nearby search.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    JobListResponse, JobSearchRequest, NearbyJobDto, PaginationParams, check_radius,
    validate_job_patch, validate_new_job,
};
use crate::app_state::AppState;
use crate::domain::{Job, JobId, JobPatch, NewJob, UserId};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /jobs` — Post a new job.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] for an unknown employer and
/// [`GatewayError::InvalidRole`] if the poster is not an employer.
#[utoipa::path(
    post,
    path = "/api/v1/jobs",
    tag = "Jobs",
    summary = "Post a job",
    description = "Creates an open job owned by an employer.",
    request_body = NewJob,
    responses(
        (status = 201, description = "Job posted", body = Job),
        (status = 400, description = "Invalid request or wrong role", body = ErrorResponse),
        (status = 404, description = "Employer not found", body = ErrorResponse),
    )
)]
pub async fn post_job(
    State(state): State<AppState>,
    Json(req): Json<NewJob>,
) -> Result<impl IntoResponse, GatewayError> {
    validate_new_job(&req)?;
    let job = state.marketplace.post_job(req).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// `GET /jobs/{id}` — Get a job.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] if the job does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/jobs/{id}",
    tag = "Jobs",
    summary = "Get job details",
    params(
        ("id" = u64, Path, description = "Job id"),
    ),
    responses(
        (status = 200, description = "Job details", body = Job),
        (status = 404, description = "Job not found", body = ErrorResponse),
    )
)]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<JobId>,
) -> Result<impl IntoResponse, GatewayError> {
    let job = state.marketplace.job(id).await?;
    Ok(Json(job))
}

/// `PATCH /jobs/{id}` — Update a job, including assignment and status.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] for an unknown job or worker,
/// [`GatewayError::InvalidRole`] if the assignee is not a worker and
/// [`GatewayError::InvalidTransition`] for a status change outside the
/// job lifecycle.
#[utoipa::path(
    patch,
    path = "/api/v1/jobs/{id}",
    tag = "Jobs",
    summary = "Update a job",
    description = "Merges the supplied fields. Status follows open → assigned → completed, with cancellation allowed from open or assigned.",
    params(
        ("id" = u64, Path, description = "Job id"),
    ),
    request_body = JobPatch,
    responses(
        (status = 200, description = "Updated job", body = Job),
        (status = 400, description = "Invalid field, assignee is not a worker, or status and worker disagree", body = ErrorResponse),
        (status = 404, description = "Job or worker not found", body = ErrorResponse),
        (status = 409, description = "Status transition not allowed", body = ErrorResponse),
    )
)]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<JobId>,
    Json(patch): Json<JobPatch>,
) -> Result<impl IntoResponse, GatewayError> {
    validate_job_patch(&patch)?;
    let job = state.marketplace.update_job(id, patch).await?;
    Ok(Json(job))
}

/// `GET /jobs/employer/{id}` — Jobs posted by an employer.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] if the user does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/jobs/employer/{id}",
    tag = "Jobs",
    summary = "List jobs of an employer",
    params(
        ("id" = u64, Path, description = "Employer user id"),
        PaginationParams,
    ),
    responses(
        (status = 200, description = "Paginated job list", body = JobListResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn jobs_by_employer(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let jobs = state.marketplace.jobs_by_employer(id).await?;
    let (data, pagination) = params.paginate(jobs);
    Ok(Json(JobListResponse { data, pagination }))
}

/// `GET /jobs/worker/{id}` — Jobs assigned to a worker.
///
/// # Errors
///
/// Returns [`GatewayError::NotFound`] if the user does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/jobs/worker/{id}",
    tag = "Jobs",
    summary = "List jobs of a worker",
    params(
        ("id" = u64, Path, description = "Worker user id"),
        PaginationParams,
    ),
    responses(
        (status = 200, description = "Paginated job list", body = JobListResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn jobs_by_worker(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let jobs = state.marketplace.jobs_by_worker(id).await?;
    let (data, pagination) = params.paginate(jobs);
    Ok(Json(JobListResponse { data, pagination }))
}

/// `POST /jobs/nearby` — Open jobs near a point, nearest first.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] for a negative radius.
#[utoipa::path(
    post,
    path = "/api/v1/jobs/nearby",
    tag = "Search",
    summary = "Search nearby jobs",
    description = "Returns open jobs within the radius, optionally restricted to one category, sorted by distance.",
    request_body = JobSearchRequest,
    responses(
        (status = 200, description = "Matching jobs", body = Vec<NearbyJobDto>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
    )
)]
pub async fn nearby_jobs(
    State(state): State<AppState>,
    Json(req): Json<JobSearchRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    check_radius(req.radius)?;
    let hits = state
        .marketplace
        .search_jobs(req.origin(), req.radius, req.category.as_deref())
        .await;
    let body: Vec<NearbyJobDto> = hits.into_iter().map(NearbyJobDto::from).collect();
    Ok(Json(body))
}

/// Job routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", post(post_job))
        .route("/jobs/nearby", post(nearby_jobs))
        .route("/jobs/employer/{id}", get(jobs_by_employer))
        .route("/jobs/worker/{id}", get(jobs_by_worker))
        .route("/jobs/{id}", get(get_job).patch(update_job))
}
