/// Structured error types for userctl-core library.
///
/// Uses `thiserror` for better API surface and error composition.
/// The binary crate (userctl-cli) can still use `anyhow` for convenience,
/// but library consumers get structured, composable errors.

use thiserror::Error;

/// Boxed source error from a store backend driver.
///
/// Keeps this crate independent of any particular database driver;
/// `userctl-db` maps `sqlx::Error` into it.
pub type BackendSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// A store-level uniqueness constraint rejected the write
    #[error("unique constraint violated")]
    Conflict,

    /// Underlying database driver failure
    #[error("store backend error: {source}")]
    Backend {
        #[source]
        source: BackendSource,
    },

    /// Configuration error
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Wrap a driver error as a backend failure
    pub fn backend(source: impl Into<BackendSource>) -> Self {
        Self::Backend {
            source: source.into(),
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
