//! The store seam command handlers are written against.
//!
//! Handlers receive a `&dyn UserStore` rather than reaching for an
//! ambient database handle, so they can be exercised against the
//! in-memory store in tests. The production implementation is
//! `userctl_db::PgUserStore`.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewUser, User, UserPage};

/// Persistence operations over the single `users` table.
///
/// Uniqueness of `username` and `email` is the store's responsibility;
/// a violated constraint surfaces as `StoreError::Conflict` with the
/// write rolled back.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Idempotently create the storage structure for user rows.
    async fn create_schema(&self) -> Result<()>;

    /// Destroy all storage structures. Irreversible; only `initialize`
    /// calls this.
    async fn drop_schema(&self) -> Result<()>;

    /// Insert a new user and return the stored row with its assigned id.
    async fn insert(&self, new_user: NewUser) -> Result<User>;

    /// Exact-match lookup by username.
    async fn get(&self, username: &str) -> Result<Option<User>>;

    /// Every user row, ordered by id.
    async fn all(&self) -> Result<Vec<User>>;

    /// Set the email of the named user. Returns the updated row, or
    /// `None` when no such username exists.
    async fn update_email(&self, username: &str, new_email: &str) -> Result<Option<User>>;

    /// Users whose username or email contains `term` as a substring
    /// (case-sensitive), ordered by id.
    async fn search(&self, term: &str) -> Result<Vec<User>>;

    /// A window of users ordered by id, plus the total row count.
    async fn page(&self, limit: i64, offset: i64) -> Result<UserPage>;

    /// Delete the named user. Returns `false` when no such username
    /// exists.
    async fn delete(&self, username: &str) -> Result<bool>;
}
