//! userctl CLI - user record administration over a PostgreSQL store
//!
//! One subcommand per operation: initialize the schema, create, read,
//! update, delete, substring-search, and paginate user records. Each
//! invocation runs exactly one handler against the store and prints a
//! human-readable result.

use std::io;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use userctl_core::config::{self, StoreSettings};
use userctl_core::NewUser;
use userctl_db::PgUserStore;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "userctl",
    author,
    version,
    about = "Administer user records in a PostgreSQL store"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Drop and recreate the schema, then seed the default user
    Initialize,
    /// Look up a user by exact username
    GetUser {
        /// Username to look up
        username: String,
    },
    /// Display all users
    GetAllUsers,
    /// Update a user's email address
    ChangeEmail {
        /// Username of the user to update
        username: String,
        /// The new email address
        new_email: String,
    },
    /// Find users whose username or email contains a search term
    FindUser {
        /// Substring to match against usernames and emails
        search_term: String,
    },
    /// List a window of users
    ListUsers {
        /// Maximum number of users to return
        #[arg(default_value_t = 10)]
        limit: i64,
        /// Number of users to skip
        #[arg(default_value_t = 0)]
        offset: i64,
    },
    /// Create a new user
    CreateUser {
        /// Username (must be unique)
        username: String,
        /// Email address (must be unique)
        email: String,
        /// Password (stored as given)
        password: String,
    },
    /// Delete a user by username
    DeleteUser {
        /// Username of the user to delete
        username: String,
    },
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing().ok();
    config::load_dotenv();

    let cli = Cli::parse();

    let settings = StoreSettings::resolve()?;
    let pool = userctl_db::connect(&settings)
        .await
        .context("failed to connect to the database")?;
    let store = PgUserStore::new(pool);
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Initialize => commands::run_initialize(&store, &mut out).await?,
        Commands::GetUser { username } => {
            commands::run_get_user(&store, &mut out, &username).await?
        }
        Commands::GetAllUsers => commands::run_get_all_users(&store, &mut out).await?,
        Commands::ChangeEmail {
            username,
            new_email,
        } => commands::run_change_email(&store, &mut out, &username, &new_email).await?,
        Commands::FindUser { search_term } => {
            commands::run_find_user(&store, &mut out, &search_term).await?
        }
        Commands::ListUsers { limit, offset } => {
            commands::run_list_users(&store, &mut out, limit, offset).await?
        }
        Commands::CreateUser {
            username,
            email,
            password,
        } => {
            commands::run_create_user(&store, &mut out, NewUser::new(username, email, password))
                .await?
        }
        Commands::DeleteUser { username } => {
            commands::run_delete_user(&store, &mut out, &username).await?
        }
    }
    Ok(())
}
