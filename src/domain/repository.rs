//! In-memory entity store.
//!
//! [`Repository`] keeps one [`Table`] per entity kind behind a single
//! [`tokio::sync::RwLock`]. Writers hold the lock for the whole
//! read-modify-write of an operation, so a create, an update, or a review
//! together with its rating recomputation is atomic and serialized.
//! Readers (searches, lookups) run concurrently and each sees a consistent
//! snapshot of every table.

use std::collections::BTreeMap;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{
    EntityId, EntityKind, Job, JobId, Market, MarketId, Review, ReviewId, User, UserId,
    WorkerProfile, WorkerProfileId,
};
use crate::error::GatewayError;

/// Rows of one entity kind, ordered by id.
///
/// Identifiers are assigned on insert, start at 1, increase monotonically
/// and are never reused. Iteration is in id (and therefore insertion)
/// order.
#[derive(Debug)]
pub struct Table<I, T> {
    kind: EntityKind,
    rows: BTreeMap<I, T>,
    next_id: u64,
}

impl<I: EntityId, T> Table<I, T> {
    /// Creates an empty table for the given entity kind.
    #[must_use]
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Returns the row with the given id, if any.
    #[must_use]
    pub fn get(&self, id: I) -> Option<&T> {
        self.rows.get(&id)
    }

    /// Returns the row with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if no such row exists.
    pub fn require(&self, id: I) -> Result<&T, GatewayError> {
        self.rows
            .get(&id)
            .ok_or_else(|| GatewayError::not_found(self.kind, id.get()))
    }

    /// Returns the first row (in id order) matching `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.rows.values().find(|row| predicate(row))
    }

    /// Returns all rows matching `predicate`, in id order.
    pub fn filter<'a, P>(&'a self, mut predicate: P) -> impl Iterator<Item = &'a T> + 'a
    where
        P: FnMut(&T) -> bool + 'a,
    {
        self.rows.values().filter(move |row| predicate(row))
    }

    /// Iterates over all rows in id order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    /// Assigns the next id, builds the row from it and stores it.
    pub fn insert_with<F>(&mut self, build: F) -> &T
    where
        F: FnOnce(I) -> T,
    {
        let id = I::from(self.next_id);
        self.next_id += 1;
        self.rows.entry(id).or_insert(build(id))
    }

    /// Applies `change` to the row with the given id.
    ///
    /// The change runs against a copy that replaces the stored row only
    /// when `change` succeeds, so a failed update leaves no trace.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the row does not exist, or
    /// whatever error `change` returns.
    pub fn update<F>(&mut self, id: I, change: F) -> Result<&T, GatewayError>
    where
        T: Clone,
        F: FnOnce(&mut T) -> Result<(), GatewayError>,
    {
        let kind = self.kind;
        let row = self
            .rows
            .get_mut(&id)
            .ok_or_else(|| GatewayError::not_found(kind, id.get()))?;
        let mut next = row.clone();
        change(&mut next)?;
        *row = next;
        Ok(&*row)
    }

    /// Number of stored rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All entity tables, guarded together by the [`Repository`] lock.
#[derive(Debug)]
pub struct Tables {
    /// Users.
    pub users: Table<UserId, User>,
    /// Worker profiles (at most one per user).
    pub worker_profiles: Table<WorkerProfileId, WorkerProfile>,
    /// Jobs.
    pub jobs: Table<JobId, Job>,
    /// Markets.
    pub markets: Table<MarketId, Market>,
    /// Reviews.
    pub reviews: Table<ReviewId, Review>,
}

impl Tables {
    /// Creates an empty set of tables.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Table::new(EntityKind::User),
            worker_profiles: Table::new(EntityKind::WorkerProfile),
            jobs: Table::new(EntityKind::Job),
            markets: Table::new(EntityKind::Market),
            reviews: Table::new(EntityKind::Review),
        }
    }

    /// Looks a user up by username (exact match).
    #[must_use]
    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users.find(|user| user.username == username)
    }

    /// Returns the worker profile owned by `user_id`, if any.
    #[must_use]
    pub fn worker_profile_of(&self, user_id: UserId) -> Option<&WorkerProfile> {
        self.worker_profiles
            .find(|profile| profile.user_id == user_id)
    }

    /// Returns all reviews whose target is `target_id`, oldest first.
    pub fn reviews_for(&self, target_id: UserId) -> impl Iterator<Item = &Review> {
        self.reviews.filter(move |review| review.target_id == target_id)
    }
}

impl Default for Tables {
    fn default() -> Self {
        Self::new()
    }
}

/// Central in-memory store, constructed once and shared via `Arc`.
#[derive(Debug)]
pub struct Repository {
    tables: RwLock<Tables>,
}

impl Repository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::new()),
        }
    }

    /// Acquires a consistent read snapshot of all tables.
    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    /// Acquires exclusive access to all tables.
    pub async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}
