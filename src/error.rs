//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. The domain
//! and service layers return it directly; each variant maps to a specific
//! HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{EntityKind, JobStatus, Role};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "user 9999 not found",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see [`GatewayError`] for ranges).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category         | HTTP Status                  |
/// |-----------|------------------|------------------------------|
/// | 1000–1999 | Validation       | 400 Bad Request              |
/// | 2000–2999 | State/Not Found  | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server           | 500 Internal Server Error    |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Referenced entity does not exist.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Kind of the missing entity.
        kind: EntityKind,
        /// Raw identifier that was looked up.
        id: u64,
    },

    /// The user exists but has the wrong role for the operation.
    #[error("user {user_id} does not have role {expected}")]
    InvalidRole {
        /// Offending user.
        user_id: u64,
        /// Role the operation requires.
        expected: Role,
    },

    /// Uniqueness constraint violated (username, worker profile per user).
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Job status change not permitted by the job lifecycle.
    #[error("job cannot move from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: JobStatus,
        /// Requested status.
        to: JobStatus,
    },

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Shorthand for a [`GatewayError::NotFound`] on the given entity kind.
    #[must_use]
    pub fn not_found(kind: EntityKind, id: impl Into<u64>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidRole { .. } => 1002,
            Self::NotFound { .. } => 2001,
            Self::AlreadyExists(_) => 2002,
            Self::InvalidTransition { .. } => 2003,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidRole { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::AlreadyExists(_) | Self::InvalidTransition { .. } => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_kind_and_id() {
        let err = GatewayError::not_found(EntityKind::User, 9999_u64);
        assert_eq!(err.to_string(), "user 9999 not found");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), 2001);
    }

    #[test]
    fn invalid_role_is_bad_request() {
        let err = GatewayError::InvalidRole {
            user_id: 3,
            expected: Role::Employer,
        };
        assert_eq!(err.to_string(), "user 3 does not have role employer");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn conflicts_map_to_409() {
        let dup = GatewayError::AlreadyExists("username alice".to_string());
        let transition = GatewayError::InvalidTransition {
            from: JobStatus::Completed,
            to: JobStatus::Open,
        };
        assert_eq!(dup.status_code(), StatusCode::CONFLICT);
        assert_eq!(transition.status_code(), StatusCode::CONFLICT);
        assert_eq!(transition.to_string(), "job cannot move from completed to open");
    }

    #[test]
    fn into_response_sets_status() {
        let response = GatewayError::Internal("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
