//! Domain layer: coordinates, typed identifiers, marketplace entities and
//! the in-memory repository.
//!
//! Entities are plain data. Each kind comes with a `New*` type (the fields a
//! caller supplies on create) and, where the entity is mutable, a `*Patch`
//! type implementing the shallow, last-write-wins merge used by updates.

pub mod coordinate;
pub mod ids;
pub mod job;
pub mod market;
pub mod patch;
pub mod repository;
pub mod review;
pub mod user;
pub mod worker_profile;

use std::fmt;

pub use coordinate::{Coordinate, distance_km};
pub use ids::{EntityId, JobId, MarketId, ReviewId, UserId, WorkerProfileId};
pub use job::{Job, JobPatch, JobStatus, NewJob};
pub use market::{Market, MarketItem, MarketPatch, NewMarket};
pub use repository::{Repository, Table, Tables};
pub use review::{NewReview, Review};
pub use user::{NewUser, Role, User, UserPatch};
pub use worker_profile::{Availability, NewWorkerProfile, WorkerProfile, WorkerProfilePatch};

/// Entity kinds held by the [`Repository`]; used in not-found errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// [`User`].
    User,
    /// [`WorkerProfile`].
    WorkerProfile,
    /// [`Job`].
    Job,
    /// [`Market`].
    Market,
    /// [`Review`].
    Review,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::WorkerProfile => "worker profile",
            Self::Job => "job",
            Self::Market => "market",
            Self::Review => "review",
        })
    }
}
