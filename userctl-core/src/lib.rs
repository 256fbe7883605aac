//! userctl-core: domain types and the store seam for the userctl CLI
//!
//! Holds the `User` record types, the `UserStore` trait that command
//! handlers are written against, structured errors, and configuration
//! loading. Concrete PostgreSQL persistence lives in `userctl-db`.

pub mod config;
pub mod error;
#[cfg(feature = "test-support")]
pub mod memory;
pub mod models;
pub mod store;

pub use error::{Result, StoreError};
#[cfg(feature = "test-support")]
pub use memory::MemoryStore;
pub use models::{NewUser, User, UserPage};
pub use store::UserStore;
