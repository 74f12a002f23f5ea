//! Job and market DTOs.
//!
//! Create and patch bodies share one rule set: every text field a create
//! requires must stay non-blank after a patch, and amounts stay
//! non-negative.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Job, JobPatch, MarketItem, MarketPatch, NewJob, NewMarket};
use crate::error::GatewayError;

use super::common_dto::{PaginationMeta, require_non_negative, require_text};

/// Paginated response for the per-employer and per-worker job listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct JobListResponse {
    /// Jobs on this page, oldest first.
    pub data: Vec<Job>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Validates a job posting.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when a required text field is
/// blank or the budget is negative.
pub fn validate_new_job(new: &NewJob) -> Result<(), GatewayError> {
    require_text("title", &new.title)?;
    require_text("description", &new.description)?;
    require_text("category", &new.category)?;
    require_text("address", &new.address)?;
    require_non_negative("budget", new.budget)
}

/// Validates a job update with the rules of [`validate_new_job`], applied to
/// the fields present.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when a supplied text field is
/// blank or the budget is negative.
pub fn validate_job_patch(patch: &JobPatch) -> Result<(), GatewayError> {
    for (field, value) in [
        ("title", &patch.title),
        ("description", &patch.description),
        ("category", &patch.category),
        ("address", &patch.address),
    ] {
        if let Some(value) = value {
            require_text(field, value)?;
        }
    }
    require_non_negative("budget", patch.budget.flatten())
}

/// Validates a market registration.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when the name, type or address is
/// blank, or an item has a negative price.
pub fn validate_new_market(new: &NewMarket) -> Result<(), GatewayError> {
    require_text("name", &new.name)?;
    require_text("type", &new.market_type)?;
    require_text("address", &new.address)?;
    check_items(&new.items)
}

/// Validates a market update with the rules of [`validate_new_market`],
/// applied to the fields present.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when a supplied name, type or
/// address is blank, or a replacement item has a negative price.
pub fn validate_market_patch(patch: &MarketPatch) -> Result<(), GatewayError> {
    for (field, value) in [
        ("name", &patch.name),
        ("type", &patch.market_type),
        ("address", &patch.address),
    ] {
        if let Some(value) = value {
            require_text(field, value)?;
        }
    }
    match &patch.items {
        Some(items) => check_items(items),
        None => Ok(()),
    }
}

fn check_items(items: &[MarketItem]) -> Result<(), GatewayError> {
    for item in items {
        require_text("item name", &item.name)?;
        require_non_negative(&format!("price of {}", item.name), Some(item.price))?;
    }
    Ok(())
}
