//! Proximity search requests and results.
//!
//! Result DTOs flatten the matched entity and add `distance_km`, so a
//! nearby job serializes as the job object with one extra field.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Coordinate, Job, Market, User, WorkerProfile};
use crate::error::GatewayError;
use crate::service::{Nearby, NearbyWorker, WorkerFilter};

use super::common_dto::check_radius;

/// Highest rating a review can express, and so the top of the
/// `min_rating` range.
pub const MAX_RATING: f64 = 5.0;

/// Request body for `POST /search/workers`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct WorkerSearchRequest {
    /// Origin latitude in degrees.
    pub latitude: f64,
    /// Origin longitude in degrees.
    pub longitude: f64,
    /// Radius in kilometres; the configured default when omitted.
    #[serde(default)]
    pub radius: Option<f64>,
    /// Exact, case-sensitive profession.
    #[serde(default)]
    pub profession: Option<String>,
    /// Minimum worker rating, between 0 and 5.
    #[serde(default)]
    pub min_rating: Option<f64>,
    /// Maximum hourly rate.
    #[serde(default)]
    pub max_rate: Option<i64>,
}

impl WorkerSearchRequest {
    /// Query origin.
    #[must_use]
    pub const fn origin(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Checks the radius and the `min_rating` range.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] for an unusable radius or a
    /// `min_rating` outside `0..=5`.
    pub fn validate(&self) -> Result<(), GatewayError> {
        check_radius(self.radius)?;
        match self.min_rating {
            Some(rating) if !(0.0..=MAX_RATING).contains(&rating) => {
                Err(GatewayError::InvalidRequest(format!(
                    "min_rating must be between 0 and {MAX_RATING}, got {rating}"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Field filters of the query.
    #[must_use]
    pub fn filter(&self) -> WorkerFilter {
        WorkerFilter {
            profession: self.profession.clone(),
            min_rating: self.min_rating,
            max_hourly_rate: self.max_rate,
        }
    }
}

/// Request body for `POST /jobs/nearby`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct JobSearchRequest {
    /// Origin latitude in degrees.
    pub latitude: f64,
    /// Origin longitude in degrees.
    pub longitude: f64,
    /// Radius in kilometres; the configured default when omitted.
    #[serde(default)]
    pub radius: Option<f64>,
    /// Exact, case-sensitive category.
    #[serde(default)]
    pub category: Option<String>,
}

impl JobSearchRequest {
    /// Query origin.
    #[must_use]
    pub const fn origin(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Request body for `POST /markets/nearby`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MarketSearchRequest {
    /// Origin latitude in degrees.
    pub latitude: f64,
    /// Origin longitude in degrees.
    pub longitude: f64,
    /// Radius in kilometres; the configured default when omitted.
    #[serde(default)]
    pub radius: Option<f64>,
    /// Exact, case-sensitive market type.
    #[serde(default, rename = "type")]
    pub market_type: Option<String>,
}

impl MarketSearchRequest {
    /// Query origin.
    #[must_use]
    pub const fn origin(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A worker search hit.
#[derive(Debug, Serialize, ToSchema)]
pub struct NearbyWorkerDto {
    /// Worker user record.
    #[serde(flatten)]
    pub user: User,
    /// Joined worker profile.
    pub worker_profile: WorkerProfile,
    /// Distance from the query origin in kilometres.
    pub distance_km: f64,
}

impl From<NearbyWorker> for NearbyWorkerDto {
    fn from(hit: NearbyWorker) -> Self {
        Self {
            user: hit.user,
            worker_profile: hit.worker_profile,
            distance_km: hit.distance_km,
        }
    }
}

/// A job search hit.
#[derive(Debug, Serialize, ToSchema)]
pub struct NearbyJobDto {
    /// Matched job.
    #[serde(flatten)]
    pub job: Job,
    /// Distance from the query origin in kilometres.
    pub distance_km: f64,
}

impl From<Nearby<Job>> for NearbyJobDto {
    fn from(hit: Nearby<Job>) -> Self {
        Self {
            job: hit.item,
            distance_km: hit.distance_km,
        }
    }
}

/// A market search hit.
#[derive(Debug, Serialize, ToSchema)]
pub struct NearbyMarketDto {
    /// Matched market.
    #[serde(flatten)]
    pub market: Market,
    /// Distance from the query origin in kilometres.
    pub distance_km: f64,
}

impl From<Nearby<Market>> for NearbyMarketDto {
    fn from(hit: Nearby<Market>) -> Self {
        Self {
            market: hit.item,
            distance_km: hit.distance_km,
        }
    }
}
