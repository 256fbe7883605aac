//! PostgreSQL implementation of `UserStore`
//!
//! One statement per operation, manual row mapping, and explicit
//! transactions around the writes so the uniqueness-conflict path rolls
//! back before surfacing as `StoreError::Conflict`.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use userctl_core::error::{Result, StoreError};
use userctl_core::models::{NewUser, User, UserPage};
use userctl_core::store::UserStore;

use crate::schema;

/// User store backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password: row.get("password"),
    }
}

fn map_db_err(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict,
        _ => StoreError::backend(err),
    }
}

/// Escape LIKE metacharacters so a search term matches literally.
/// PostgreSQL's default LIKE escape character is backslash.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_schema(&self) -> Result<()> {
        schema::create_all(&self.pool).await.map_err(map_db_err)
    }

    async fn drop_schema(&self) -> Result<()> {
        schema::drop_all(&self.pool).await.map_err(map_db_err)
    }

    async fn insert(&self, new_user: NewUser) -> Result<User> {
        let mut tx = self.pool.begin().await.map_err(map_db_err)?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO users (username, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password)
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(row) => {
                tx.commit().await.map_err(map_db_err)?;
                Ok(user_from_row(&row))
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!("rollback after failed insert failed: {rollback_err}");
                }
                Err(map_db_err(err))
            }
        }
    }

    async fn get(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, username, email, password FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn all(&self) -> Result<Vec<User>> {
        let rows = sqlx::query("SELECT id, username, email, password FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    async fn update_email(&self, username: &str, new_email: &str) -> Result<Option<User>> {
        let mut tx = self.pool.begin().await.map_err(map_db_err)?;

        let updated = sqlx::query(
            r#"
            UPDATE users SET email = $2
            WHERE username = $1
            RETURNING id, username, email, password
            "#,
        )
        .bind(username)
        .bind(new_email)
        .fetch_optional(&mut *tx)
        .await;

        match updated {
            Ok(row) => {
                tx.commit().await.map_err(map_db_err)?;
                Ok(row.as_ref().map(user_from_row))
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!("rollback after failed update failed: {rollback_err}");
                }
                Err(map_db_err(err))
            }
        }
    }

    async fn search(&self, term: &str) -> Result<Vec<User>> {
        let pattern = format!("%{}%", escape_like(term));

        let rows = sqlx::query(
            r#"
            SELECT id, username, email, password FROM users
            WHERE username LIKE $1 OR email LIKE $1
            ORDER BY id
            "#,
        )
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    async fn page(&self, limit: i64, offset: i64) -> Result<UserPage> {
        // Single query: COUNT(*) OVER () carries the total alongside the
        // window, replacing a second full-table read.
        let rows = sqlx::query(
            r#"
            SELECT id, username, email, password, COUNT(*) OVER () AS total
            FROM users
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        let total = rows
            .first()
            .map(|row| row.get::<i64, _>("total"))
            .unwrap_or(0);
        let users = rows.iter().map(user_from_row).collect();

        Ok(UserPage { users, total })
    }

    async fn delete(&self, username: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected() > 0)
    }
}
