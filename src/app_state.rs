//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::MarketplaceService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Marketplace service for all business logic.
    pub marketplace: Arc<MarketplaceService>,
}

impl AppState {
    /// Wraps `marketplace` for sharing across handlers.
    #[must_use]
    pub fn new(marketplace: MarketplaceService) -> Self {
        Self {
            marketplace: Arc::new(marketplace),
        }
    }
}
