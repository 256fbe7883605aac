//! In-memory `UserStore` for tests.
//!
//! Mirrors the PostgreSQL implementation's observable behavior: ids are
//! assigned monotonically from 1, duplicate usernames or emails are
//! rejected with `StoreError::Conflict`, reads are ordered by id, and
//! `drop_schema` resets the id sequence the way dropping and recreating
//! the table does.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Result, StoreError};
use crate::models::{NewUser, User, UserPage};
use crate::store::UserStore;

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    users: Vec<User>,
}

/// Fake store backed by a `Vec` behind a mutex.
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                users: Vec::new(),
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn drop_schema(&self) -> Result<()> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        inner.users.clear();
        inner.next_id = 1;
        Ok(())
    }

    async fn insert(&self, new_user: NewUser) -> Result<User> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");

        let taken = inner
            .users
            .iter()
            .any(|u| u.username == new_user.username || u.email == new_user.email);
        if taken {
            return Err(StoreError::Conflict);
        }

        let user = User {
            id: inner.next_id,
            username: new_user.username,
            email: new_user.email,
            password: new_user.password,
        };
        inner.next_id += 1;
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn get(&self, username: &str) -> Result<Option<User>> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn all(&self) -> Result<Vec<User>> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.users.clone())
    }

    async fn update_email(&self, username: &str, new_email: &str) -> Result<Option<User>> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");

        // Another row owning the email is a conflict; the row's own
        // current email is not.
        let conflicting = inner
            .users
            .iter()
            .any(|u| u.email == new_email && u.username != username);
        if conflicting {
            return Err(StoreError::Conflict);
        }

        match inner.users.iter_mut().find(|u| u.username == username) {
            Some(user) => {
                user.email = new_email.to_string();
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }

    async fn search(&self, term: &str) -> Result<Vec<User>> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner
            .users
            .iter()
            .filter(|u| u.username.contains(term) || u.email.contains(term))
            .cloned()
            .collect())
    }

    async fn page(&self, limit: i64, offset: i64) -> Result<UserPage> {
        let inner = self.inner.lock().expect("store mutex poisoned");

        let users: Vec<User> = inner
            .users
            .iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect();

        // An empty window carries no total, matching the single-query
        // COUNT(*) OVER () behavior of the PostgreSQL store.
        let total = if users.is_empty() {
            0
        } else {
            inner.users.len() as i64
        };

        Ok(UserPage { users, total })
    }

    async fn delete(&self, username: &str) -> Result<bool> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let before = inner.users.len();
        inner.users.retain(|u| u.username != username);
        Ok(inner.users.len() < before)
    }
}
