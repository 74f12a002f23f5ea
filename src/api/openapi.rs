//! OpenAPI document for every REST endpoint.

use utoipa::OpenApi;

use crate::api::dto::{
    JobListResponse, JobSearchRequest, MarketSearchRequest, NearbyJobDto, NearbyMarketDto,
    NearbyWorkerDto, PaginationMeta, ReviewListResponse, UserDetailResponse, WorkerSearchRequest,
};
use crate::api::handlers::{jobs, markets, reviews, search, system, users, worker_profiles};
use crate::domain::{
    Availability, Coordinate, Job, JobPatch, JobStatus, Market, MarketItem, MarketPatch, NewJob,
    NewMarket, NewReview, NewUser, NewWorkerProfile, Review, Role, User, UserPatch,
    WorkerProfile, WorkerProfilePatch,
};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI document, served by Swagger UI when the
/// `swagger-ui` feature is enabled.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "jobfinder-gateway",
        description = "Workers, jobs and markets marketplace with proximity search."
    ),
    paths(
        system::health_handler,
        users::register_user,
        users::get_user,
        users::update_user,
        worker_profiles::create_worker_profile,
        worker_profiles::get_worker_profile,
        worker_profiles::update_worker_profile,
        jobs::post_job,
        jobs::get_job,
        jobs::update_job,
        jobs::jobs_by_employer,
        jobs::jobs_by_worker,
        jobs::nearby_jobs,
        markets::create_market,
        markets::get_market,
        markets::update_market,
        markets::nearby_markets,
        reviews::create_review,
        reviews::reviews_for_target,
        search::search_workers,
    ),
    components(schemas(
        Coordinate,
        Role,
        User,
        NewUser,
        UserPatch,
        UserDetailResponse,
        Availability,
        WorkerProfile,
        NewWorkerProfile,
        WorkerProfilePatch,
        JobStatus,
        Job,
        NewJob,
        JobPatch,
        JobListResponse,
        MarketItem,
        Market,
        NewMarket,
        MarketPatch,
        Review,
        NewReview,
        ReviewListResponse,
        PaginationMeta,
        WorkerSearchRequest,
        JobSearchRequest,
        MarketSearchRequest,
        NearbyWorkerDto,
        NearbyJobDto,
        NearbyMarketDto,
        system::HealthResponse,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "System", description = "Health"),
        (name = "Users", description = "Worker and employer accounts"),
        (name = "Workers", description = "Worker profiles"),
        (name = "Jobs", description = "Job postings and lifecycle"),
        (name = "Markets", description = "Local markets"),
        (name = "Reviews", description = "Reviews and ratings"),
        (name = "Search", description = "Proximity search"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/health",
            "/api/v1/users",
            "/api/v1/users/{id}",
            "/api/v1/worker-profiles",
            "/api/v1/worker-profiles/{user_id}",
            "/api/v1/jobs",
            "/api/v1/jobs/{id}",
            "/api/v1/jobs/employer/{id}",
            "/api/v1/jobs/worker/{id}",
            "/api/v1/jobs/nearby",
            "/api/v1/markets",
            "/api/v1/markets/{id}",
            "/api/v1/markets/nearby",
            "/api/v1/reviews",
            "/api/v1/reviews/target/{id}",
            "/api/v1/search/workers",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
