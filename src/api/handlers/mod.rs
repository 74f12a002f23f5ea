//! REST endpoint handlers organized by resource.

pub mod jobs;
pub mod markets;
pub mod reviews;
pub mod search;
pub mod system;
pub mod users;
pub mod worker_profiles;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(users::routes())
        .merge(worker_profiles::routes())
        .merge(jobs::routes())
        .merge(markets::routes())
        .merge(reviews::routes())
        .merge(search::routes())
}
