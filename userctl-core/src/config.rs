//! Configuration loading for userctl.
//!
//! Connection settings come from the environment, with an optional TOML
//! file fallback:
//!
//! 1. `.env` in the current directory (highest priority)
//! 2. `~/.userctl/.env`
//! 3. `DATABASE_URL` already present in the environment
//! 4. `~/.userctl/config.toml` `[database] url`

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default maximum connections for the pool. Kept low for single-user
/// administrative tooling.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Load environment variables from .env files.
///
/// dotenvy never overwrites variables that are already set, so the
/// current directory wins over `~/.userctl/.env`, and both lose to the
/// real environment.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
    }

    if let Some(dir) = config_dir() {
        let env_file = dir.join(".env");
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => debug!("Loaded .env from {}", env_file.display()),
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }
}

/// The userctl config directory (~/.userctl)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".userctl"))
}

/// Optional TOML configuration (~/.userctl/config.toml)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserctlConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string; `DATABASE_URL` takes precedence
    #[serde(default)]
    pub url: Option<String>,

    /// Pool size; defaults to [`DEFAULT_MAX_CONNECTIONS`]
    #[serde(default)]
    pub max_connections: Option<u32>,
}

impl UserctlConfig {
    /// Load ~/.userctl/config.toml, or defaults when the file is absent.
    pub fn load() -> Result<Self> {
        let Some(path) = config_dir().map(|dir| dir.join("config.toml")) else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .context(format!("Failed to read config file: {}", path.display()))?;
        let config =
            toml::from_str(&content).context("Failed to parse config file (invalid TOML)")?;
        Ok(config)
    }
}

/// Resolved connection settings for the store.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub database_url: String,
    pub max_connections: u32,
}

impl StoreSettings {
    /// Resolve settings from the environment and the optional config
    /// file. Fails with an actionable message when no connection string
    /// is available anywhere.
    pub fn resolve() -> Result<Self> {
        let config = UserctlConfig::load()?;

        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => config.database.url.clone().context(
                "DATABASE_URL not set and no [database] url in ~/.userctl/config.toml",
            )?,
        };

        let max_connections = config
            .database
            .max_connections
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}
