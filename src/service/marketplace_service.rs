//! Marketplace service: orchestrates repository operations and searches.

use std::sync::Arc;

use crate::domain::{
    Coordinate, EntityKind, Job, JobId, JobPatch, Market, MarketId, MarketPatch, NewJob,
    NewMarket, NewReview, NewUser, NewWorkerProfile, Repository, Review, Role, Tables, User,
    UserId, UserPatch, WorkerProfile, WorkerProfilePatch,
};
use crate::error::GatewayError;

use super::rating;
use super::search::{self, Nearby, NearbyWorker, SearchArea, WorkerFilter};

/// Orchestration layer for all marketplace operations.
///
/// Stateless coordinator over a shared [`Repository`]. Every mutation takes
/// the repository write lock, validates references, applies the change and
/// returns a copy of the stored record; reads and searches work on a read
/// snapshot. Callers never hold references into the store.
#[derive(Debug, Clone)]
pub struct MarketplaceService {
    repository: Arc<Repository>,
    default_radius_km: f64,
}

impl MarketplaceService {
    /// Creates a new `MarketplaceService`.
    ///
    /// `default_radius_km` is used by searches that do not pass a radius.
    #[must_use]
    pub fn new(repository: Arc<Repository>, default_radius_km: f64) -> Self {
        Self {
            repository,
            default_radius_km,
        }
    }

    /// Returns a reference to the inner [`Repository`].
    #[must_use]
    pub fn repository(&self) -> &Arc<Repository> {
        &self.repository
    }

    // ── Users ───────────────────────────────────────────────────────────

    /// Registers a new user with a zero rating.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::AlreadyExists`] if the username is taken.
    pub async fn register_user(&self, new: NewUser) -> Result<User, GatewayError> {
        let mut tables = self.repository.write().await;
        if tables.user_by_username(&new.username).is_some() {
            return Err(GatewayError::AlreadyExists(format!(
                "username {}",
                new.username
            )));
        }
        let user = tables.users.insert_with(|id| new.into_user(id)).clone();
        tracing::info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(user)
    }

    /// Returns a user and, for workers, their profile if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the user does not exist.
    pub async fn user(&self, id: UserId) -> Result<(User, Option<WorkerProfile>), GatewayError> {
        let tables = self.repository.read().await;
        let user = tables.users.require(id)?.clone();
        let profile = match user.role {
            Role::Worker => tables.worker_profile_of(id).cloned(),
            Role::Employer => None,
        };
        Ok((user, profile))
    }

    /// Merges `patch` into the user record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the user does not exist.
    pub async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, GatewayError> {
        let mut tables = self.repository.write().await;
        let user = tables
            .users
            .update(id, |user| {
                patch.apply(user);
                Ok(())
            })?
            .clone();
        tracing::info!(user_id = %id, "user updated");
        Ok(user)
    }

    // ── Worker profiles ─────────────────────────────────────────────────

    /// Creates the worker profile of an existing worker user.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the user does not exist,
    /// [`GatewayError::InvalidRole`] if they are not a worker, and
    /// [`GatewayError::AlreadyExists`] if they already have a profile.
    pub async fn create_worker_profile(
        &self,
        new: NewWorkerProfile,
    ) -> Result<WorkerProfile, GatewayError> {
        let mut tables = self.repository.write().await;
        require_role(&tables, new.user_id, Role::Worker)?;
        if tables.worker_profile_of(new.user_id).is_some() {
            return Err(GatewayError::AlreadyExists(format!(
                "worker profile for user {}",
                new.user_id
            )));
        }
        let profile = tables
            .worker_profiles
            .insert_with(|id| new.into_profile(id))
            .clone();
        tracing::info!(
            user_id = %profile.user_id,
            profession = %profile.profession,
            "worker profile created"
        );
        Ok(profile)
    }

    /// Returns the worker profile owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the user has no profile.
    pub async fn worker_profile(&self, user_id: UserId) -> Result<WorkerProfile, GatewayError> {
        let tables = self.repository.read().await;
        tables
            .worker_profile_of(user_id)
            .cloned()
            .ok_or_else(|| GatewayError::not_found(EntityKind::WorkerProfile, user_id))
    }

    /// Merges `patch` into the profile owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the user has no profile.
    pub async fn update_worker_profile(
        &self,
        user_id: UserId,
        patch: WorkerProfilePatch,
    ) -> Result<WorkerProfile, GatewayError> {
        let mut tables = self.repository.write().await;
        let profile_id = tables
            .worker_profile_of(user_id)
            .map(|profile| profile.id)
            .ok_or_else(|| GatewayError::not_found(EntityKind::WorkerProfile, user_id))?;
        let profile = tables
            .worker_profiles
            .update(profile_id, |profile| {
                patch.apply(profile);
                Ok(())
            })?
            .clone();
        tracing::info!(user_id = %user_id, "worker profile updated");
        Ok(profile)
    }

    // ── Jobs ────────────────────────────────────────────────────────────

    /// Posts a new, open job.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the employer does not exist and
    /// [`GatewayError::InvalidRole`] if the user is not an employer.
    pub async fn post_job(&self, new: NewJob) -> Result<Job, GatewayError> {
        let mut tables = self.repository.write().await;
        require_role(&tables, new.employer_id, Role::Employer)?;
        let job = tables.jobs.insert_with(|id| new.into_job(id)).clone();
        tracing::info!(
            job_id = %job.id,
            employer_id = %job.employer_id,
            category = %job.category,
            "job posted"
        );
        Ok(job)
    }

    /// Returns a job by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the job does not exist.
    pub async fn job(&self, id: JobId) -> Result<Job, GatewayError> {
        let tables = self.repository.read().await;
        tables.jobs.require(id).cloned()
    }

    /// Merges `patch` into the job.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the job or the assigned worker
    /// does not exist, [`GatewayError::InvalidRole`] if the assigned user is
    /// not a worker, [`GatewayError::InvalidTransition`] if the status
    /// change breaks the job lifecycle, and [`GatewayError::InvalidRequest`]
    /// if the resulting status and worker disagree.
    pub async fn update_job(&self, id: JobId, patch: JobPatch) -> Result<Job, GatewayError> {
        let mut tables = self.repository.write().await;
        if let Some(Some(worker_id)) = patch.worker_id {
            require_role(&tables, worker_id, Role::Worker)?;
        }
        let job = tables.jobs.update(id, |job| patch.apply(job))?.clone();
        tracing::info!(job_id = %id, status = %job.status, "job updated");
        Ok(job)
    }

    /// Returns all jobs posted by `employer_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the user does not exist.
    pub async fn jobs_by_employer(&self, employer_id: UserId) -> Result<Vec<Job>, GatewayError> {
        let tables = self.repository.read().await;
        tables.users.require(employer_id)?;
        Ok(tables
            .jobs
            .filter(|job| job.employer_id == employer_id)
            .cloned()
            .collect())
    }

    /// Returns all jobs assigned to `worker_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the user does not exist.
    pub async fn jobs_by_worker(&self, worker_id: UserId) -> Result<Vec<Job>, GatewayError> {
        let tables = self.repository.read().await;
        tables.users.require(worker_id)?;
        Ok(tables
            .jobs
            .filter(|job| job.worker_id == Some(worker_id))
            .cloned()
            .collect())
    }

    // ── Markets ─────────────────────────────────────────────────────────

    /// Registers a new market with a zero rating.
    pub async fn create_market(&self, new: NewMarket) -> Market {
        let mut tables = self.repository.write().await;
        let market = tables.markets.insert_with(|id| new.into_market(id)).clone();
        tracing::info!(market_id = %market.id, market_type = %market.market_type, "market created");
        market
    }

    /// Returns a market by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the market does not exist.
    pub async fn market(&self, id: MarketId) -> Result<Market, GatewayError> {
        let tables = self.repository.read().await;
        tables.markets.require(id).cloned()
    }

    /// Merges `patch` into the market.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the market does not exist.
    pub async fn update_market(
        &self,
        id: MarketId,
        patch: MarketPatch,
    ) -> Result<Market, GatewayError> {
        let mut tables = self.repository.write().await;
        let market = tables
            .markets
            .update(id, |market| {
                patch.apply(market);
                Ok(())
            })?
            .clone();
        tracing::info!(market_id = %id, "market updated");
        Ok(market)
    }

    // ── Reviews ─────────────────────────────────────────────────────────

    /// Records a review and refreshes the target's average rating.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the reviewer, target or job
    /// does not exist.
    pub async fn create_review(&self, new: NewReview) -> Result<Review, GatewayError> {
        let mut tables = self.repository.write().await;
        rating::record_review(&mut tables, new)
    }

    /// Returns all reviews of `target_id`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the target user does not exist.
    pub async fn reviews_for_target(&self, target_id: UserId) -> Result<Vec<Review>, GatewayError> {
        let tables = self.repository.read().await;
        tables.users.require(target_id)?;
        Ok(tables.reviews_for(target_id).cloned().collect())
    }

    // ── Proximity search ────────────────────────────────────────────────

    /// Workers near `origin`, nearest first.
    pub async fn search_workers(
        &self,
        origin: Coordinate,
        radius_km: Option<f64>,
        filter: &WorkerFilter,
    ) -> Vec<NearbyWorker> {
        let area = self.area(origin, radius_km);
        let tables = self.repository.read().await;
        let hits = search::search_workers(&tables, &area, filter);
        tracing::debug!(radius_km = area.radius_km, hits = hits.len(), "worker search");
        hits
    }

    /// Open jobs near `origin`, nearest first.
    pub async fn search_jobs(
        &self,
        origin: Coordinate,
        radius_km: Option<f64>,
        category: Option<&str>,
    ) -> Vec<Nearby<Job>> {
        let area = self.area(origin, radius_km);
        let tables = self.repository.read().await;
        let hits = search::search_jobs(&tables, &area, category);
        tracing::debug!(radius_km = area.radius_km, hits = hits.len(), "job search");
        hits
    }

    /// Markets near `origin`, nearest first.
    pub async fn search_markets(
        &self,
        origin: Coordinate,
        radius_km: Option<f64>,
        market_type: Option<&str>,
    ) -> Vec<Nearby<Market>> {
        let area = self.area(origin, radius_km);
        let tables = self.repository.read().await;
        let hits = search::search_markets(&tables, &area, market_type);
        tracing::debug!(radius_km = area.radius_km, hits = hits.len(), "market search");
        hits
    }

    fn area(&self, origin: Coordinate, radius_km: Option<f64>) -> SearchArea {
        SearchArea::new(origin, radius_km.unwrap_or(self.default_radius_km))
    }
}

/// Checks that `user_id` exists and has `expected` role.
fn require_role(tables: &Tables, user_id: UserId, expected: Role) -> Result<(), GatewayError> {
    let user = tables.users.require(user_id)?;
    if user.role != expected {
        return Err(GatewayError::InvalidRole {
            user_id: user_id.into(),
            expected,
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::JobStatus;
    use crate::service::search::DEFAULT_RADIUS_KM;

    const ORIGIN: Coordinate = Coordinate::new(28.4595, 77.0266);

    fn make_service() -> MarketplaceService {
        MarketplaceService::new(Arc::new(Repository::new()), DEFAULT_RADIUS_KM)
    }

    fn new_user(username: &str, role: Role, location: Option<Coordinate>) -> NewUser {
        NewUser {
            username: username.to_string(),
            name: username.to_string(),
            email: format!("{username}@example.com"),
            phone: "+911234567890".to_string(),
            role,
            profile_picture: None,
            location,
            address: None,
        }
    }

    fn new_profile(user_id: UserId, profession: &str) -> NewWorkerProfile {
        NewWorkerProfile {
            user_id,
            profession: profession.to_string(),
            experience: 5,
            hourly_rate: Some(50_000),
            daily_rate: Some(300_000),
            availability: Default::default(),
            bio: None,
            skills: vec!["Pipe Fitting".to_string()],
        }
    }

    fn new_job(employer_id: UserId, category: &str) -> NewJob {
        NewJob {
            title: "Bathroom Plumbing Repair".to_string(),
            description: "Fix leaking sink".to_string(),
            category: category.to_string(),
            budget: Some(100_000),
            location: Some(ORIGIN),
            address: "Sector 18, Gurugram".to_string(),
            employer_id,
            scheduled_for: None,
        }
    }

    async fn register(service: &MarketplaceService, username: &str, role: Role) -> UserId {
        let Ok(user) = service
            .register_user(new_user(username, role, Some(ORIGIN)))
            .await
        else {
            panic!("registration of {username} failed");
        };
        user.id
    }

    #[tokio::test]
    async fn duplicate_username_rejected() {
        let service = make_service();
        register(&service, "ahmed123", Role::Employer).await;

        let result = service
            .register_user(new_user("ahmed123", Role::Worker, None))
            .await;
        assert!(matches!(result, Err(GatewayError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn worker_profile_requires_worker_role_and_is_unique() {
        let service = make_service();
        let worker = register(&service, "hamid456", Role::Worker).await;
        let employer = register(&service, "ananya234", Role::Employer).await;

        let missing = service
            .create_worker_profile(new_profile(UserId::new(99), "Plumber"))
            .await;
        assert!(matches!(missing, Err(GatewayError::NotFound { .. })));

        let wrong_role = service
            .create_worker_profile(new_profile(employer, "Plumber"))
            .await;
        assert!(matches!(
            wrong_role,
            Err(GatewayError::InvalidRole {
                expected: Role::Worker,
                ..
            })
        ));

        assert!(
            service
                .create_worker_profile(new_profile(worker, "Plumber"))
                .await
                .is_ok()
        );
        let duplicate = service
            .create_worker_profile(new_profile(worker, "Electrician"))
            .await;
        assert!(matches!(duplicate, Err(GatewayError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn user_lookup_includes_worker_profile() {
        let service = make_service();
        let worker = register(&service, "hamid456", Role::Worker).await;
        let _ = service
            .create_worker_profile(new_profile(worker, "Plumber"))
            .await;

        let Ok((user, profile)) = service.user(worker).await else {
            panic!("user should exist");
        };
        assert_eq!(user.username, "hamid456");
        assert_eq!(profile.map(|p| p.profession).as_deref(), Some("Plumber"));
    }

    #[tokio::test]
    async fn update_worker_profile_by_user_id() {
        let service = make_service();
        let worker = register(&service, "hamid456", Role::Worker).await;

        let missing = service
            .update_worker_profile(worker, WorkerProfilePatch::default())
            .await;
        assert!(matches!(missing, Err(GatewayError::NotFound { .. })));

        let _ = service
            .create_worker_profile(new_profile(worker, "Plumber"))
            .await;
        let patch = WorkerProfilePatch {
            experience: Some(6),
            ..WorkerProfilePatch::default()
        };
        let Ok(updated) = service.update_worker_profile(worker, patch).await else {
            panic!("update should succeed");
        };
        assert_eq!(updated.experience, 6);
        assert_eq!(updated.profession, "Plumber");
    }

    #[tokio::test]
    async fn post_job_requires_employer() {
        let service = make_service();
        let worker = register(&service, "hamid456", Role::Worker).await;
        let employer = register(&service, "ananya234", Role::Employer).await;

        let by_worker = service.post_job(new_job(worker, "Plumbing")).await;
        assert!(matches!(by_worker, Err(GatewayError::InvalidRole { .. })));

        let by_ghost = service.post_job(new_job(UserId::new(77), "Plumbing")).await;
        assert!(matches!(by_ghost, Err(GatewayError::NotFound { id: 77, .. })));

        let Ok(job) = service.post_job(new_job(employer, "Plumbing")).await else {
            panic!("job should be posted");
        };
        assert_eq!(job.status, JobStatus::Open);

        let Ok(listed) = service.jobs_by_employer(employer).await else {
            panic!("employer exists");
        };
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn assignment_validates_worker_and_hides_job_from_search() {
        let service = make_service();
        let worker = register(&service, "hamid456", Role::Worker).await;
        let employer = register(&service, "ananya234", Role::Employer).await;
        let Ok(job) = service.post_job(new_job(employer, "Plumbing")).await else {
            panic!("job should be posted");
        };

        let to_employer = JobPatch {
            worker_id: Some(Some(employer)),
            status: Some(JobStatus::Assigned),
            ..JobPatch::default()
        };
        let rejected = service.update_job(job.id, to_employer).await;
        assert!(matches!(rejected, Err(GatewayError::InvalidRole { .. })));

        let assign = JobPatch {
            worker_id: Some(Some(worker)),
            status: Some(JobStatus::Assigned),
            ..JobPatch::default()
        };
        let Ok(assigned) = service.update_job(job.id, assign).await else {
            panic!("assignment should succeed");
        };
        assert_eq!(assigned.worker_id, Some(worker));

        let Ok(by_worker) = service.jobs_by_worker(worker).await else {
            panic!("worker exists");
        };
        assert_eq!(by_worker.len(), 1);

        let hits = service.search_jobs(ORIGIN, Some(100.0), None).await;
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn worker_without_assigned_status_keeps_job_open() {
        let service = make_service();
        let worker = register(&service, "hamid456", Role::Worker).await;
        let employer = register(&service, "ananya234", Role::Employer).await;
        let Ok(job) = service.post_job(new_job(employer, "Plumbing")).await else {
            panic!("job should be posted");
        };

        let worker_only = JobPatch {
            worker_id: Some(Some(worker)),
            ..JobPatch::default()
        };
        let result = service.update_job(job.id, worker_only).await;
        assert!(matches!(result, Err(GatewayError::InvalidRequest(_))));

        let status_only = JobPatch {
            status: Some(JobStatus::Assigned),
            ..JobPatch::default()
        };
        let result = service.update_job(job.id, status_only).await;
        assert!(matches!(result, Err(GatewayError::InvalidRequest(_))));

        let Ok(stored) = service.job(job.id).await else {
            panic!("job exists");
        };
        assert_eq!((stored.status, stored.worker_id), (JobStatus::Open, None));
        let hits = service.search_jobs(ORIGIN, Some(100.0), None).await;
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn reopening_completed_job_is_rejected() {
        let service = make_service();
        let employer = register(&service, "ananya234", Role::Employer).await;
        let Ok(job) = service.post_job(new_job(employer, "Plumbing")).await else {
            panic!("job should be posted");
        };
        let cancel = JobPatch {
            status: Some(JobStatus::Cancelled),
            ..JobPatch::default()
        };
        assert!(service.update_job(job.id, cancel).await.is_ok());

        let reopen = JobPatch {
            status: Some(JobStatus::Open),
            ..JobPatch::default()
        };
        let result = service.update_job(job.id, reopen).await;
        assert!(matches!(result, Err(GatewayError::InvalidTransition { .. })));
    }

    #[tokio::test]
    async fn update_missing_entities_is_not_found() {
        let service = make_service();
        assert!(matches!(
            service.update_user(UserId::new(1), UserPatch::default()).await,
            Err(GatewayError::NotFound { .. })
        ));
        assert!(matches!(
            service.update_job(JobId::new(1), JobPatch::default()).await,
            Err(GatewayError::NotFound { .. })
        ));
        assert!(matches!(
            service
                .update_market(MarketId::new(1), MarketPatch::default())
                .await,
            Err(GatewayError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn reviews_update_target_rating() {
        let service = make_service();
        let reviewer = register(&service, "ahmed123", Role::Employer).await;
        let target = register(&service, "hamid456", Role::Worker).await;

        for rating in [5, 4] {
            let review = NewReview {
                user_id: reviewer,
                target_id: target,
                job_id: None,
                rating,
                comment: None,
            };
            assert!(service.create_review(review).await.is_ok());
        }

        let Ok((user, _)) = service.user(target).await else {
            panic!("target exists");
        };
        assert_eq!(user.rating, 4.5);

        let Ok(reviews) = service.reviews_for_target(target).await else {
            panic!("target exists");
        };
        assert_eq!(reviews.len(), 2);
    }

    #[tokio::test]
    async fn search_uses_default_radius() {
        let service = make_service();
        let near = service
            .create_market(NewMarket {
                name: "Sharma Hardware Store".to_string(),
                description: None,
                market_type: "Hardware".to_string(),
                location: Some(Coordinate::new(28.4645, 77.0316)),
                address: "Sector 19, Gurugram".to_string(),
                phone: None,
                items: Vec::new(),
            })
            .await;
        let _far = service
            .create_market(NewMarket {
                name: "Bangalore Tools".to_string(),
                description: None,
                market_type: "Hardware".to_string(),
                location: Some(Coordinate::new(12.9716, 77.5946)),
                address: "BTM Layout, Bangalore".to_string(),
                phone: None,
                items: Vec::new(),
            })
            .await;

        let hits = service.search_markets(ORIGIN, None, Some("Hardware")).await;
        let ids: Vec<MarketId> = hits.iter().map(|hit| hit.item.id).collect();
        assert_eq!(ids, vec![near.id]);
    }

    #[tokio::test]
    async fn concurrent_reviews_produce_exact_mean() {
        let service = make_service();
        let target = register(&service, "hamid456", Role::Worker).await;
        let mut reviewers = Vec::new();
        for i in 0..20 {
            reviewers.push(register(&service, &format!("reviewer{i}"), Role::Employer).await);
        }

        let mut tasks = Vec::new();
        for (i, reviewer) in reviewers.into_iter().enumerate() {
            let service = service.clone();
            let rating = if i % 2 == 0 { 5 } else { 4 };
            tasks.push(tokio::spawn(async move {
                service
                    .create_review(NewReview {
                        user_id: reviewer,
                        target_id: target,
                        job_id: None,
                        rating,
                        comment: None,
                    })
                    .await
            }));
        }
        for task in tasks {
            let Ok(Ok(_)) = task.await else {
                panic!("review task failed");
            };
        }

        let Ok((user, _)) = service.user(target).await else {
            panic!("target exists");
        };
        assert_eq!(user.rating, 4.5);
    }
}
