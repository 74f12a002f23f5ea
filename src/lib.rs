//! # jobfinder-gateway
//!
//! REST gateway for a local services marketplace: workers offering a
//! profession, employers posting jobs, and nearby markets.
//!
//! The core of the crate is the proximity search engine: given an origin,
//! a radius and optional field filters, it returns the workers, open jobs
//! or markets within great-circle (haversine) distance, nearest first.
//! Around it sit an in-memory repository, review-driven rating
//! aggregation and the HTTP boundary.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers + OpenAPI (api/)
//!     │
//!     ├── MarketplaceService (service/)
//!     ├── Proximity search, rating aggregation (service/)
//!     │
//!     └── Repository: one RwLock over all tables (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod seed;
pub mod service;
