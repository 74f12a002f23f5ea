//! Marketplace users (workers and employers).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::patch::double_option;
use super::{Coordinate, UserId};

/// Role a user plays in the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Offers services; may own a [`super::WorkerProfile`].
    Worker,
    /// Posts jobs.
    Employer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Worker => "worker",
            Self::Employer => "employer",
        })
    }
}

/// Canonical user record held by the [`super::Repository`].
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct User {
    /// Unique identifier (immutable).
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Contact e-mail.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Worker or employer.
    pub role: Role,
    /// Avatar URL.
    pub profile_picture: Option<String>,
    /// Current location; users without one never appear in proximity search.
    pub location: Option<Coordinate>,
    /// Free-form street address.
    pub address: Option<String>,
    /// Average review rating, maintained by the rating aggregator.
    pub rating: f64,
    /// Creation timestamp (immutable).
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when registering a user.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NewUser {
    /// Unique login name.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Contact e-mail.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Worker or employer.
    pub role: Role,
    /// Avatar URL.
    #[serde(default)]
    pub profile_picture: Option<String>,
    /// Current location.
    #[serde(default)]
    pub location: Option<Coordinate>,
    /// Free-form street address.
    #[serde(default)]
    pub address: Option<String>,
}

impl NewUser {
    /// Materialises the record with its assigned id, zero rating and a
    /// creation timestamp.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            name: self.name,
            email: self.email,
            phone: self.phone,
            role: self.role,
            profile_picture: self.profile_picture,
            location: self.location,
            address: self.address,
            rating: 0.0,
            created_at: Utc::now(),
        }
    }
}

/// Partial update for a [`User`].
///
/// Absent fields are left untouched; for nullable fields an explicit JSON
/// `null` clears the value. Identity, role and rating are not patchable.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UserPatch {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New e-mail.
    #[serde(default)]
    pub email: Option<String>,
    /// New phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// New avatar URL, or `null` to clear.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub profile_picture: Option<Option<String>>,
    /// New location, or `null` to clear.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Coordinate>)]
    pub location: Option<Option<Coordinate>>,
    /// New address, or `null` to clear.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub address: Option<Option<String>>,
}

impl UserPatch {
    /// Merges the supplied fields into `user`, last write wins per field.
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(phone) = self.phone {
            user.phone = phone;
        }
        if let Some(picture) = self.profile_picture {
            user.profile_picture = picture;
        }
        if let Some(location) = self.location {
            user.location = location;
        }
        if let Some(address) = self.address {
            user.address = address;
        }
    }
}
