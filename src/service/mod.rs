//! Service layer: business logic orchestration.
//!
//! [`MarketplaceService`] coordinates repository operations, enforces
//! cross-entity rules (roles, uniqueness, job lifecycle) and exposes the
//! proximity search engine in [`search`] and the rating aggregator in
//! [`rating`].

pub mod marketplace_service;
pub mod rating;
pub mod search;

pub use marketplace_service::MarketplaceService;
pub use search::{Nearby, NearbyWorker, SearchArea, WorkerFilter};
