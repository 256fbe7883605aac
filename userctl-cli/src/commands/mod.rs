//! Command implementations for the userctl CLI

pub mod users;

// Re-export handlers for flat access from main.rs
pub use users::{
    run_change_email, run_create_user, run_delete_user, run_find_user, run_get_all_users,
    run_get_user, run_initialize, run_list_users,
};
