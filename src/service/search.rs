//! Proximity search engine.
//!
//! Every nearby query runs the same pipeline over one entity kind:
//!
//! 1. skip candidates without a location,
//! 2. apply the kind-specific field filters (status, category/type/profession),
//! 3. compute the haversine distance to the origin and drop anything farther
//!    than the radius (the boundary itself is kept),
//! 4. sort by distance, ties broken by ascending id.
//!
//! Cheap field checks run before the trigonometry. All functions here are
//! pure and operate on a read snapshot of the [`Tables`].

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::domain::{
    Coordinate, EntityId, Job, JobStatus, Market, Role, Tables, User, UserId, WorkerProfile,
    distance_km,
};

/// Radius used when a query does not specify one.
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Something that can be placed on the map and ranked.
pub trait Locatable {
    /// Position used for distance ranking; `None` excludes the candidate.
    fn location(&self) -> Option<Coordinate>;

    /// Secondary sort key for equidistant candidates.
    fn rank_key(&self) -> u64;
}

impl<T: Locatable + ?Sized> Locatable for &T {
    fn location(&self) -> Option<Coordinate> {
        (**self).location()
    }

    fn rank_key(&self) -> u64 {
        (**self).rank_key()
    }
}

impl Locatable for User {
    fn location(&self) -> Option<Coordinate> {
        self.location
    }

    fn rank_key(&self) -> u64 {
        self.id.get()
    }
}

impl Locatable for Job {
    fn location(&self) -> Option<Coordinate> {
        self.location
    }

    fn rank_key(&self) -> u64 {
        self.id.get()
    }
}

impl Locatable for Market {
    fn location(&self) -> Option<Coordinate> {
        self.location
    }

    fn rank_key(&self) -> u64 {
        self.id.get()
    }
}

/// Query origin and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchArea {
    /// Point distances are measured from.
    pub origin: Coordinate,
    /// Inclusive radius in kilometres.
    pub radius_km: f64,
}

impl SearchArea {
    /// Creates a search area.
    #[must_use]
    pub const fn new(origin: Coordinate, radius_km: f64) -> Self {
        Self { origin, radius_km }
    }
}

/// A search hit annotated with its distance from the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Nearby<T> {
    /// The matched entity.
    pub item: T,
    /// Great-circle distance from the query origin in kilometres.
    pub distance_km: f64,
}

impl<T: Clone> Nearby<&T> {
    /// Detaches the hit from the snapshot it was found in.
    #[must_use]
    pub fn cloned(self) -> Nearby<T> {
        Nearby {
            item: self.item.clone(),
            distance_km: self.distance_km,
        }
    }
}

/// A worker search hit: the user, their profile and the distance.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyWorker {
    /// Worker user record.
    pub user: User,
    /// Joined worker profile.
    pub worker_profile: WorkerProfile,
    /// Great-circle distance from the query origin in kilometres.
    pub distance_km: f64,
}

/// Optional filters for worker search. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkerFilter {
    /// Exact, case-sensitive profession.
    pub profession: Option<String>,
    /// Keep workers whose rating is at least this value.
    pub min_rating: Option<f64>,
    /// Keep workers with an hourly rate set and at most this value.
    pub max_hourly_rate: Option<i64>,
}

impl WorkerFilter {
    /// Filter on profession only.
    #[must_use]
    pub fn profession(profession: impl Into<String>) -> Self {
        Self {
            profession: Some(profession.into()),
            ..Self::default()
        }
    }

    fn accepts(&self, user: &User, profile: &WorkerProfile) -> bool {
        exact_match(self.profession.as_deref(), &profile.profession)
            && self.min_rating.is_none_or(|min| user.rating >= min)
            && self
                .max_hourly_rate
                .is_none_or(|max| profile.hourly_rate.is_some_and(|rate| rate <= max))
    }
}

/// Worker user joined with its profile, ranked by the user's location.
#[derive(Debug, Clone, Copy)]
struct WorkerCandidate<'a> {
    user: &'a User,
    profile: &'a WorkerProfile,
}

impl Locatable for WorkerCandidate<'_> {
    fn location(&self) -> Option<Coordinate> {
        self.user.location
    }

    fn rank_key(&self) -> u64 {
        self.user.id.get()
    }
}

/// `None` and `""` accept everything; anything else must equal `value`.
fn exact_match(filter: Option<&str>, value: &str) -> bool {
    match filter {
        Some(wanted) if !wanted.is_empty() => wanted == value,
        _ => true,
    }
}

/// Runs the location → filter → radius → sort pipeline over `candidates`.
///
/// `accept` is only consulted for candidates that have a location. The
/// radius test is `distance <= radius` with no tolerance, so a NaN distance
/// is always rejected.
pub fn rank_within<T, I, F>(candidates: I, area: &SearchArea, mut accept: F) -> Vec<Nearby<T>>
where
    T: Locatable,
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> bool,
{
    let mut hits: Vec<Nearby<T>> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let location = candidate.location()?;
            if !accept(&candidate) {
                return None;
            }
            let distance_km = distance_km(area.origin, location);
            (distance_km <= area.radius_km).then_some(Nearby {
                item: candidate,
                distance_km,
            })
        })
        .collect();

    hits.sort_by(by_distance_then_id);
    hits
}

fn by_distance_then_id<T: Locatable>(a: &Nearby<T>, b: &Nearby<T>) -> Ordering {
    a.distance_km
        .total_cmp(&b.distance_km)
        .then_with(|| a.item.rank_key().cmp(&b.item.rank_key()))
}

/// Open jobs within `area`, optionally restricted to one category.
#[must_use]
pub fn search_jobs(tables: &Tables, area: &SearchArea, category: Option<&str>) -> Vec<Nearby<Job>> {
    rank_within(tables.jobs.iter(), area, |job| {
        job.status == JobStatus::Open && exact_match(category, &job.category)
    })
    .into_iter()
    .map(Nearby::cloned)
    .collect()
}

/// Markets within `area`, optionally restricted to one type.
#[must_use]
pub fn search_markets(
    tables: &Tables,
    area: &SearchArea,
    market_type: Option<&str>,
) -> Vec<Nearby<Market>> {
    rank_within(tables.markets.iter(), area, |market| {
        exact_match(market_type, &market.market_type)
    })
    .into_iter()
    .map(Nearby::cloned)
    .collect()
}

/// Workers within `area` that have a profile matching `filter`.
///
/// Users with role `worker` but no profile are never returned.
#[must_use]
pub fn search_workers(tables: &Tables, area: &SearchArea, filter: &WorkerFilter) -> Vec<NearbyWorker> {
    let profiles: HashMap<UserId, &WorkerProfile> = tables
        .worker_profiles
        .iter()
        .map(|profile| (profile.user_id, profile))
        .collect();

    let candidates = tables
        .users
        .filter(|user| user.role == Role::Worker)
        .filter_map(|user| {
            profiles
                .get(&user.id)
                .map(|profile| WorkerCandidate { user, profile })
        });

    rank_within(candidates, area, |candidate| {
        filter.accepts(candidate.user, candidate.profile)
    })
    .into_iter()
    .map(|hit| NearbyWorker {
        user: hit.item.user.clone(),
        worker_profile: hit.item.profile.clone(),
        distance_km: hit.distance_km,
    })
    .collect()
}
