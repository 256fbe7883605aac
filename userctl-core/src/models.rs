//! User record types shared by the store implementations and the CLI

use std::fmt;

/// A persisted user row.
///
/// `id` is assigned by the store on insert and is never settable by
/// callers. `username` and `email` are each unique across all rows,
/// enforced by store-level constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Display for User {
    // Password intentionally omitted from console output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User {}: {} <{}>", self.id, self.username, self.email)
    }
}

/// The caller-settable fields of a user, for insertion.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// One window of users plus the total row count, for pagination display.
///
/// `total` is only meaningful when `users` is non-empty; an empty window
/// reports no total because the window query is the only read performed.
#[derive(Debug, Clone, Default)]
pub struct UserPage {
    pub users: Vec<User>,
    pub total: i64,
}
