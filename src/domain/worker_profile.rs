//! Worker profiles: the service-offering extension of a worker user.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::patch::double_option;
use super::{UserId, WorkerProfileId};

/// Current availability of a worker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// Accepting work.
    #[default]
    Available,
    /// Temporarily occupied.
    Busy,
    /// Not taking work.
    Unavailable,
}

/// Profession, rates and skills of a worker. At most one per user.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct WorkerProfile {
    /// Profile identifier.
    pub id: WorkerProfileId,
    /// Owning user (role `worker`).
    pub user_id: UserId,
    /// Trade, matched exactly (case-sensitive) by worker search.
    pub profession: String,
    /// Years of experience.
    pub experience: u32,
    /// Hourly rate in minor currency units.
    pub hourly_rate: Option<i64>,
    /// Daily rate in minor currency units.
    pub daily_rate: Option<i64>,
    /// Current availability.
    pub availability: Availability,
    /// Free-form description.
    pub bio: Option<String>,
    /// Skills, in the order given.
    pub skills: Vec<String>,
}

/// Fields supplied when creating a worker profile.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NewWorkerProfile {
    /// Owning user.
    pub user_id: UserId,
    /// Trade.
    pub profession: String,
    /// Years of experience, default 0.
    #[serde(default)]
    pub experience: u32,
    /// Hourly rate in minor currency units.
    #[serde(default)]
    pub hourly_rate: Option<i64>,
    /// Daily rate in minor currency units.
    #[serde(default)]
    pub daily_rate: Option<i64>,
    /// Availability, default `available`.
    #[serde(default)]
    pub availability: Availability,
    /// Free-form description.
    #[serde(default)]
    pub bio: Option<String>,
    /// Skills.
    #[serde(default)]
    pub skills: Vec<String>,
}

impl NewWorkerProfile {
    /// Materialises the record with its assigned id.
    #[must_use]
    pub fn into_profile(self, id: WorkerProfileId) -> WorkerProfile {
        WorkerProfile {
            id,
            user_id: self.user_id,
            profession: self.profession,
            experience: self.experience,
            hourly_rate: self.hourly_rate,
            daily_rate: self.daily_rate,
            availability: self.availability,
            bio: self.bio,
            skills: self.skills,
        }
    }
}

/// Partial update for a [`WorkerProfile`], keyed by the owning user.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct WorkerProfilePatch {
    /// New profession.
    #[serde(default)]
    pub profession: Option<String>,
    /// New experience in years.
    #[serde(default)]
    pub experience: Option<u32>,
    /// New hourly rate, or `null` to clear.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub hourly_rate: Option<Option<i64>>,
    /// New daily rate, or `null` to clear.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub daily_rate: Option<Option<i64>>,
    /// New availability.
    #[serde(default)]
    pub availability: Option<Availability>,
    /// New bio, or `null` to clear.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub bio: Option<Option<String>>,
    /// Replacement skill list.
    #[serde(default)]
    pub skills: Option<Vec<String>>,
}

impl WorkerProfilePatch {
    /// Merges the supplied fields into `profile`.
    pub fn apply(self, profile: &mut WorkerProfile) {
        if let Some(profession) = self.profession {
            profile.profession = profession;
        }
        if let Some(experience) = self.experience {
            profile.experience = experience;
        }
        if let Some(rate) = self.hourly_rate {
            profile.hourly_rate = rate;
        }
        if let Some(rate) = self.daily_rate {
            profile.daily_rate = rate;
        }
        if let Some(availability) = self.availability {
            profile.availability = availability;
        }
        if let Some(bio) = self.bio {
            profile.bio = bio;
        }
        if let Some(skills) = self.skills {
            profile.skills = skills;
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_on_minimal_payload() {
        let Ok(new) =
            serde_json::from_str::<NewWorkerProfile>(r#"{"user_id":2,"profession":"Plumber"}"#)
        else {
            panic!("payload should parse");
        };
        let profile = new.into_profile(WorkerProfileId::new(1));
        assert_eq!(profile.availability, Availability::Available);
        assert_eq!(profile.experience, 0);
        assert!(profile.skills.is_empty());
    }

    #[test]
    fn patch_replaces_skills_and_clears_rate() {
        let Ok(new) = serde_json::from_str::<NewWorkerProfile>(
            r#"{"user_id":2,"profession":"Plumber","hourly_rate":50000,"skills":["Leak Repair"]}"#,
        ) else {
            panic!("payload should parse");
        };
        let mut profile = new.into_profile(WorkerProfileId::new(1));

        let Ok(patch) = serde_json::from_str::<WorkerProfilePatch>(
            r#"{"hourly_rate":null,"skills":["Pipe Fitting","Leak Repair"],"availability":"busy"}"#,
        ) else {
            panic!("patch should parse");
        };
        patch.apply(&mut profile);

        assert_eq!(profile.hourly_rate, None);
        assert_eq!(profile.skills, vec!["Pipe Fitting", "Leak Repair"]);
        assert_eq!(profile.availability, Availability::Busy);
        assert_eq!(profile.profession, "Plumber");
    }
}
