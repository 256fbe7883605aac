//! userctl-db: PostgreSQL persistence for userctl
//!
//! Implements `userctl_core::UserStore` on top of a sqlx connection
//! pool. One SQL statement per store operation; uniqueness enforcement
//! is left entirely to the table constraints.

pub mod pool;
pub mod schema;
pub mod store;

pub use pool::connect;
pub use store::PgUserStore;
