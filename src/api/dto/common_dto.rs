//! Shared DTO types and boundary validation helpers.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::GatewayError;

/// Pagination query parameters for list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-indexed). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (max 100). Defaults to 20.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

/// Pagination metadata included in list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: u32,
    /// Total number of pages.
    pub total_pages: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PaginationParams {
    /// Clamps `per_page` to the allowed maximum of 100.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, 100),
        }
    }

    /// Cuts the requested page out of `items` and describes it.
    #[must_use]
    pub fn paginate<T>(&self, items: Vec<T>) -> (Vec<T>, PaginationMeta) {
        let Self { page, per_page } = self.clamped();
        let total = u32::try_from(items.len()).unwrap_or(u32::MAX);
        let total_pages = if total == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };

        let start = usize::try_from(u64::from(page - 1) * u64::from(per_page))
            .unwrap_or(usize::MAX);
        let data = items
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect();

        (
            data,
            PaginationMeta {
                page,
                per_page,
                total,
                total_pages,
            },
        )
    }
}

/// Rejects blank values of a required text field.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] naming `field` when `value` is
/// empty or whitespace only.
pub fn require_text(field: &str, value: &str) -> Result<(), GatewayError> {
    if value.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(format!("{field} is required")));
    }
    Ok(())
}

/// Rejects a negative amount (budget, rate, price).
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] naming `field` when `value` is
/// below zero.
pub fn require_non_negative(field: &str, value: Option<i64>) -> Result<(), GatewayError> {
    if value.is_some_and(|amount| amount < 0) {
        return Err(GatewayError::InvalidRequest(format!(
            "{field} must not be negative"
        )));
    }
    Ok(())
}

/// Rejects a search radius that is negative or not a finite number.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] for an unusable radius.
pub fn check_radius(radius_km: Option<f64>) -> Result<(), GatewayError> {
    match radius_km {
        Some(radius) if !radius.is_finite() || radius < 0.0 => Err(GatewayError::InvalidRequest(
            format!("radius must be a non-negative number, got {radius}"),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: u32, per_page: u32) -> PaginationParams {
        PaginationParams { page, per_page }
    }

    #[test]
    fn clamped_bounds_page_and_size() {
        let clamped = params(0, 500).clamped();
        assert_eq!(clamped.page, 1);
        assert_eq!(clamped.per_page, 100);
    }

    #[test]
    fn paginate_slices_requested_page() {
        let (data, meta) = params(2, 2).paginate((1..=5).collect());
        assert_eq!(data, vec![3, 4]);
        assert_eq!(
            meta,
            PaginationMeta {
                page: 2,
                per_page: 2,
                total: 5,
                total_pages: 3,
            }
        );
    }

    #[test]
    fn paginate_past_the_end_is_empty() {
        let (data, meta) = params(9, 20).paginate(vec!["a", "b"]);
        assert!(data.is_empty());
        assert_eq!(meta.total, 2);
        assert_eq!(meta.total_pages, 1);

        let (_, empty) = PaginationParams::default().paginate(Vec::<u8>::new());
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn blank_text_is_rejected() {
        assert!(require_text("title", "Fix sink").is_ok());
        assert!(matches!(
            require_text("title", "   "),
            Err(GatewayError::InvalidRequest(msg)) if msg == "title is required"
        ));
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(require_non_negative("budget", None).is_ok());
        assert!(require_non_negative("budget", Some(0)).is_ok());
        assert!(matches!(
            require_non_negative("budget", Some(-500)),
            Err(GatewayError::InvalidRequest(msg)) if msg == "budget must not be negative"
        ));
    }

    #[test]
    fn radius_must_be_non_negative() {
        assert!(check_radius(None).is_ok());
        assert!(check_radius(Some(0.0)).is_ok());
        assert!(check_radius(Some(-1.0)).is_err());
        assert!(check_radius(Some(f64::INFINITY)).is_err());
    }
}
