//! Database connection pool construction
//!
//! Uses sqlx PgPool with explicit connection limits from the resolved
//! store settings.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use userctl_core::config::StoreSettings;

/// Create a PostgreSQL connection pool from resolved settings.
///
/// # Errors
///
/// Returns an error if the connection fails.
pub async fn connect(settings: &StoreSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await
}
