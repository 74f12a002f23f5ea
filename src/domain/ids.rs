//! Type-safe entity identifiers.
//!
//! Every entity kind gets its own newtype over `u64` so that, for example, a
//! [`JobId`] can never be passed where a [`UserId`] is expected. Identifiers
//! are assigned by the [`super::Repository`] starting at 1 and are never
//! reused.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Common behaviour of all entity identifiers.
pub trait EntityId: Copy + Ord + fmt::Display + From<u64> {
    /// Returns the raw numeric value.
    fn get(self) -> u64;
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            ToSchema,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw numeric identifier.
            #[must_use]
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl EntityId for $name {
            fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`super::User`].
    UserId
);
entity_id!(
    /// Identifier of a [`super::WorkerProfile`].
    WorkerProfileId
);
entity_id!(
    /// Identifier of a [`super::Job`].
    JobId
);
entity_id!(
    /// Identifier of a [`super::Market`].
    MarketId
);
entity_id!(
    /// Identifier of a [`super::Review`].
    ReviewId
);

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn display_is_plain_number() {
        assert_eq!(UserId::new(42).to_string(), "42");
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&JobId::new(7)).ok();
        assert_eq!(json.as_deref(), Some("7"));

        let Ok(id) = serde_json::from_str::<MarketId>("12") else {
            panic!("deserialization failed");
        };
        assert_eq!(id.get(), 12);
    }

    #[test]
    fn ordering_follows_raw_value() {
        assert!(ReviewId::new(1) < ReviewId::new(2));
        assert_eq!(u64::from(WorkerProfileId::from(9)), 9);
    }
}
