//! Jobs posted by employers and their status lifecycle.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::patch::double_option;
use super::{Coordinate, JobId, UserId};
use crate::error::GatewayError;

/// Job lifecycle state.
///
/// ```text
/// open ──► assigned ──► completed
///   │          │
///   └──────────┴──────► cancelled
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Accepting workers; the only state visible to nearby search.
    #[default]
    Open,
    /// A worker has been assigned.
    Assigned,
    /// Work finished (terminal).
    Completed,
    /// Withdrawn (terminal).
    Cancelled,
}

impl JobStatus {
    /// Whether a job in this state must name its worker: `assigned` and
    /// `completed` must, `open` must not, `cancelled` may either way.
    #[must_use]
    pub const fn requires_worker(self) -> Option<bool> {
        match self {
            Self::Open => Some(false),
            Self::Assigned | Self::Completed => Some(true),
            Self::Cancelled => None,
        }
    }

    /// Returns `true` if the lifecycle permits moving from `self` to `next`.
    /// Staying in the same state is always permitted.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Open, Self::Open)
                | (Self::Assigned, Self::Assigned)
                | (Self::Completed, Self::Completed)
                | (Self::Cancelled, Self::Cancelled)
                | (Self::Open, Self::Assigned)
                | (Self::Open, Self::Cancelled)
                | (Self::Assigned, Self::Completed)
                | (Self::Assigned, Self::Cancelled)
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "open",
            Self::Assigned => "assigned",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        })
    }
}

/// A request for work.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Job {
    /// Job identifier.
    pub id: JobId,
    /// Short title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Trade category, matched exactly (case-sensitive) by nearby search.
    pub category: String,
    /// Budget in minor currency units.
    pub budget: Option<i64>,
    /// Work site; jobs without one are never returned by nearby search.
    pub location: Option<Coordinate>,
    /// Free-form street address.
    pub address: String,
    /// Posting user (role `employer`).
    pub employer_id: UserId,
    /// Assigned worker, if any.
    pub worker_id: Option<UserId>,
    /// Lifecycle state.
    pub status: JobStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// When the work is planned.
    pub scheduled_for: Option<DateTime<Utc>>,
}

/// Fields supplied when posting a job. New jobs always start `open` and
/// unassigned.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NewJob {
    /// Short title.
    pub title: String,
    /// Full description.
    pub description: String,
    /// Trade category.
    pub category: String,
    /// Budget in minor currency units.
    #[serde(default)]
    pub budget: Option<i64>,
    /// Work site.
    #[serde(default)]
    pub location: Option<Coordinate>,
    /// Free-form street address.
    pub address: String,
    /// Posting user.
    pub employer_id: UserId,
    /// When the work is planned.
    #[serde(default)]
    pub scheduled_for: Option<DateTime<Utc>>,
}

impl NewJob {
    /// Materialises the record with its assigned id.
    #[must_use]
    pub fn into_job(self, id: JobId) -> Job {
        Job {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            budget: self.budget,
            location: self.location,
            address: self.address,
            employer_id: self.employer_id,
            worker_id: None,
            status: JobStatus::Open,
            created_at: Utc::now(),
            scheduled_for: self.scheduled_for,
        }
    }
}

/// Partial update for a [`Job`].
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct JobPatch {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New category.
    #[serde(default)]
    pub category: Option<String>,
    /// New budget, or `null` to clear.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub budget: Option<Option<i64>>,
    /// New location, or `null` to clear.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Coordinate>)]
    pub location: Option<Option<Coordinate>>,
    /// New address.
    #[serde(default)]
    pub address: Option<String>,
    /// Assigned worker, or `null` to unassign.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<UserId>)]
    pub worker_id: Option<Option<UserId>>,
    /// New lifecycle state.
    #[serde(default)]
    pub status: Option<JobStatus>,
    /// New schedule, or `null` to clear.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub scheduled_for: Option<Option<DateTime<Utc>>>,
}

impl JobPatch {
    /// Merges the supplied fields into `job`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidTransition`] if the requested status
    /// is not reachable from the current one, and
    /// [`GatewayError::InvalidRequest`] if the resulting status and
    /// `worker_id` disagree (an assigned or completed job without a worker,
    /// an open job with one). `job` is left untouched in both cases.
    pub fn apply(self, job: &mut Job) -> Result<(), GatewayError> {
        if let Some(next) = self.status
            && !job.status.can_transition_to(next)
        {
            return Err(GatewayError::InvalidTransition {
                from: job.status,
                to: next,
            });
        }

        let status = self.status.unwrap_or(job.status);
        let worker_id = self.worker_id.unwrap_or(job.worker_id);
        match (status.requires_worker(), worker_id) {
            (Some(true), None) => {
                return Err(GatewayError::InvalidRequest(format!(
                    "a job with status {status} needs a worker_id"
                )));
            }
            (Some(false), Some(worker_id)) => {
                return Err(GatewayError::InvalidRequest(format!(
                    "a job with status {status} cannot have worker {worker_id}"
                )));
            }
            _ => {}
        }

        if let Some(title) = self.title {
            job.title = title;
        }
        if let Some(description) = self.description {
            job.description = description;
        }
        if let Some(category) = self.category {
            job.category = category;
        }
        if let Some(budget) = self.budget {
            job.budget = budget;
        }
        if let Some(location) = self.location {
            job.location = location;
        }
        if let Some(address) = self.address {
            job.address = address;
        }
        if let Some(worker_id) = self.worker_id {
            job.worker_id = worker_id;
        }
        if let Some(status) = self.status {
            job.status = status;
        }
        if let Some(scheduled_for) = self.scheduled_for {
            job.scheduled_for = scheduled_for;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> Job {
        NewJob {
            title: "Bathroom Plumbing Repair".to_string(),
            description: "Fix leaking sink".to_string(),
            category: "Plumbing".to_string(),
            budget: Some(100_000),
            location: Some(Coordinate::new(28.4595, 77.0266)),
            address: "Sector 18, Gurugram".to_string(),
            employer_id: UserId::new(4),
            scheduled_for: None,
        }
        .into_job(JobId::new(1))
    }

    #[test]
    fn new_job_is_open_and_unassigned() {
        let job = job();
        assert_eq!(job.status, JobStatus::Open);
        assert_eq!(job.worker_id, None);
    }

    #[test]
    fn lifecycle_transitions() {
        use JobStatus::*;
        assert!(Open.can_transition_to(Assigned));
        assert!(Open.can_transition_to(Cancelled));
        assert!(Assigned.can_transition_to(Completed));
        assert!(Assigned.can_transition_to(Cancelled));
        assert!(!Open.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Open));
        assert!(!Cancelled.can_transition_to(Assigned));
        assert_eq!(Open.requires_worker(), Some(false));
        assert_eq!(Completed.requires_worker(), Some(true));
        assert_eq!(Cancelled.requires_worker(), None);
    }

    #[test]
    fn rejected_transition_leaves_job_unchanged() {
        let mut job = job();
        let patch = JobPatch {
            title: Some("changed".to_string()),
            status: Some(JobStatus::Completed),
            ..JobPatch::default()
        };
        let result = patch.apply(&mut job);
        assert!(matches!(
            result,
            Err(GatewayError::InvalidTransition {
                from: JobStatus::Open,
                to: JobStatus::Completed
            })
        ));
        assert_eq!(job.title, "Bathroom Plumbing Repair");
    }

    #[test]
    fn assignment_patch_sets_worker_and_status() {
        let mut job = job();
        let patch = JobPatch {
            worker_id: Some(Some(UserId::new(2))),
            status: Some(JobStatus::Assigned),
            ..JobPatch::default()
        };
        assert!(patch.apply(&mut job).is_ok());
        assert_eq!(job.worker_id, Some(UserId::new(2)));
        assert_eq!(job.status, JobStatus::Assigned);
    }

    fn assigned_job() -> Job {
        let mut job = job();
        job.worker_id = Some(UserId::new(2));
        job.status = JobStatus::Assigned;
        job
    }

    #[test]
    fn assigning_without_worker_is_rejected() {
        let mut job = job();
        let patch = JobPatch {
            status: Some(JobStatus::Assigned),
            ..JobPatch::default()
        };
        assert!(matches!(
            patch.apply(&mut job),
            Err(GatewayError::InvalidRequest(_))
        ));
        assert_eq!(job.status, JobStatus::Open);
    }

    #[test]
    fn worker_on_open_job_is_rejected() {
        let mut job = job();
        let patch = JobPatch {
            worker_id: Some(Some(UserId::new(2))),
            ..JobPatch::default()
        };
        assert!(matches!(
            patch.apply(&mut job),
            Err(GatewayError::InvalidRequest(_))
        ));
        assert_eq!(job.worker_id, None);
    }

    #[test]
    fn unassigning_assigned_job_is_rejected() {
        let mut job = assigned_job();
        let patch = JobPatch {
            worker_id: Some(None),
            ..JobPatch::default()
        };
        assert!(matches!(
            patch.apply(&mut job),
            Err(GatewayError::InvalidRequest(_))
        ));
        assert_eq!(job.worker_id, Some(UserId::new(2)));
    }

    #[test]
    fn completing_keeps_worker_and_cancelling_may_clear_it() {
        let mut job = assigned_job();
        let complete = JobPatch {
            status: Some(JobStatus::Completed),
            ..JobPatch::default()
        };
        assert!(complete.apply(&mut job).is_ok());
        assert_eq!(job.worker_id, Some(UserId::new(2)));

        let mut job = assigned_job();
        let cancel = JobPatch {
            worker_id: Some(None),
            status: Some(JobStatus::Cancelled),
            ..JobPatch::default()
        };
        assert!(cancel.apply(&mut job).is_ok());
        assert_eq!(job.worker_id, None);
    }
}
