//! Reviews left by one user about another.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{JobId, ReviewId, UserId};

/// A stored review. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Review {
    /// Review identifier.
    pub id: ReviewId,
    /// Reviewer.
    pub user_id: UserId,
    /// Reviewee (worker or market owner).
    pub target_id: UserId,
    /// Job the review refers to, if any.
    pub job_id: Option<JobId>,
    /// Score, nominally 1–5 (not clamped).
    pub rating: i32,
    /// Free-form comment.
    pub comment: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when leaving a review.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NewReview {
    /// Reviewer.
    pub user_id: UserId,
    /// Reviewee.
    pub target_id: UserId,
    /// Job the review refers to.
    #[serde(default)]
    pub job_id: Option<JobId>,
    /// Score.
    pub rating: i32,
    /// Free-form comment.
    #[serde(default)]
    pub comment: Option<String>,
}

impl NewReview {
    /// Materialises the record with its assigned id.
    #[must_use]
    pub fn into_review(self, id: ReviewId) -> Review {
        Review {
            id,
            user_id: self.user_id,
            target_id: self.target_id,
            job_id: self.job_id,
            rating: self.rating,
            comment: self.comment,
            created_at: Utc::now(),
        }
    }
}
