//! Schema management for the users table
//!
//! Plain DDL executed statement by statement; there is no migration
//! framework, only full create and full drop for the `initialize` reset.

use sqlx::PgPool;

/// Idempotently create the users table and its uniqueness constraints.
pub async fn create_all(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Creating users table");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Drop the users table. Irreversible; only the full reset calls this.
pub async fn drop_all(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Dropping users table");

    sqlx::query("DROP TABLE IF EXISTS users")
        .execute(pool)
        .await?;

    Ok(())
}
