//! User, worker profile and review DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    NewReview, NewUser, NewWorkerProfile, Review, User, UserPatch, WorkerProfile,
    WorkerProfilePatch,
};
use crate::error::GatewayError;

use super::common_dto::{PaginationMeta, require_non_negative, require_text};

/// Minimum length of a username.
pub const MIN_USERNAME_LEN: usize = 3;

/// Response body for `GET /users/{id}`: the user record plus, for workers,
/// their profile.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDetailResponse {
    /// The user record.
    #[serde(flatten)]
    pub user: User,
    /// Worker profile, present only for workers who created one.
    pub worker_profile: Option<WorkerProfile>,
}

/// Paginated response for `GET /reviews/target/{id}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewListResponse {
    /// Reviews on this page, oldest first.
    pub data: Vec<Review>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Validates a registration request.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when the username is shorter than
/// [`MIN_USERNAME_LEN`] or a required field is blank.
pub fn validate_new_user(new: &NewUser) -> Result<(), GatewayError> {
    if new.username.trim().chars().count() < MIN_USERNAME_LEN {
        return Err(GatewayError::InvalidRequest(format!(
            "username must be at least {MIN_USERNAME_LEN} characters"
        )));
    }
    require_text("name", &new.name)?;
    require_text("email", &new.email)?;
    require_text("phone", &new.phone)
}

/// Validates a worker profile request.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when the profession is blank or
/// a rate is negative.
pub fn validate_new_worker_profile(new: &NewWorkerProfile) -> Result<(), GatewayError> {
    require_text("profession", &new.profession)?;
    require_non_negative("hourly_rate", new.hourly_rate)?;
    require_non_negative("daily_rate", new.daily_rate)
}

/// Validates a worker profile update with the rules of
/// [`validate_new_worker_profile`], applied to the fields present.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when a supplied profession is
/// blank or a supplied rate is negative.
pub fn validate_worker_profile_patch(patch: &WorkerProfilePatch) -> Result<(), GatewayError> {
    if let Some(profession) = &patch.profession {
        require_text("profession", profession)?;
    }
    require_non_negative("hourly_rate", patch.hourly_rate.flatten())?;
    require_non_negative("daily_rate", patch.daily_rate.flatten())
}

/// Validates a user update: name, e-mail and phone may change but not
/// become blank.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when a supplied field is blank.
pub fn validate_user_patch(patch: &UserPatch) -> Result<(), GatewayError> {
    for (field, value) in [
        ("name", &patch.name),
        ("email", &patch.email),
        ("phone", &patch.phone),
    ] {
        if let Some(value) = value {
            require_text(field, value)?;
        }
    }
    Ok(())
}

/// Validates a review request. Rating values are not range-checked.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when the comment is present but
/// blank.
pub fn validate_new_review(new: &NewReview) -> Result<(), GatewayError> {
    match &new.comment {
        Some(comment) => require_text("comment", comment),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Role, UserId};

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            name: "Hamid Khan".to_string(),
            email: "hamid@example.com".to_string(),
            phone: "+911234567891".to_string(),
            role: Role::Worker,
            profile_picture: None,
            location: None,
            address: None,
        }
    }

    #[test]
    fn short_username_is_rejected() {
        assert!(validate_new_user(&new_user("hamid456")).is_ok());
        assert!(matches!(
            validate_new_user(&new_user("hk")),
            Err(GatewayError::InvalidRequest(_))
        ));
    }

    #[test]
    fn blank_email_is_rejected() {
        let mut user = new_user("hamid456");
        user.email = String::new();
        assert!(validate_new_user(&user).is_err());
    }

    #[test]
    fn negative_rate_is_rejected() {
        let profile = NewWorkerProfile {
            user_id: UserId::new(2),
            profession: "Plumber".to_string(),
            experience: 0,
            hourly_rate: Some(-1),
            daily_rate: None,
            availability: Default::default(),
            bio: None,
            skills: Vec::new(),
        };
        assert!(validate_new_worker_profile(&profile).is_err());
    }

    #[test]
    fn profile_patch_follows_create_rules() {
        assert!(validate_worker_profile_patch(&WorkerProfilePatch::default()).is_ok());

        let negative_daily = WorkerProfilePatch {
            daily_rate: Some(Some(-400)),
            ..WorkerProfilePatch::default()
        };
        assert!(matches!(
            validate_worker_profile_patch(&negative_daily),
            Err(GatewayError::InvalidRequest(msg)) if msg == "daily_rate must not be negative"
        ));

        let blank_profession = WorkerProfilePatch {
            profession: Some(" ".to_string()),
            ..WorkerProfilePatch::default()
        };
        assert!(validate_worker_profile_patch(&blank_profession).is_err());

        let cleared_rate = WorkerProfilePatch {
            hourly_rate: Some(None),
            ..WorkerProfilePatch::default()
        };
        assert!(validate_worker_profile_patch(&cleared_rate).is_ok());
    }

    #[test]
    fn user_patch_rejects_blank_contact() {
        let renamed = UserPatch {
            name: Some("Hamid K.".to_string()),
            ..UserPatch::default()
        };
        assert!(validate_user_patch(&renamed).is_ok());

        let no_phone = UserPatch {
            phone: Some(String::new()),
            ..UserPatch::default()
        };
        assert!(validate_user_patch(&no_phone).is_err());
    }

    #[test]
    fn detail_flattens_user_fields() {
        let detail = UserDetailResponse {
            user: new_user("hamid456").into_user(UserId::new(2)),
            worker_profile: None,
        };
        let Ok(json) = serde_json::to_value(&detail) else {
            panic!("serializable");
        };
        assert_eq!(json["username"], "hamid456");
        assert_eq!(json["id"], 2);
        assert!(json["worker_profile"].is_null());
    }
}
