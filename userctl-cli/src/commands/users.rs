//! User record handlers
//!
//! Each handler takes the injected store and an output writer, performs
//! at most two store operations, and prints the outcome. Not-found and
//! uniqueness-conflict cases are recovered locally with a printed
//! message; any other store failure propagates to main.

use std::io::Write;

use anyhow::Result;

use userctl_core::{NewUser, StoreError, UserStore};

/// The user seeded by a full reset.
fn seed_user() -> NewUser {
    NewUser::new("bob", "bob@mail.com", "bobpass")
}

/// Drop all schema, recreate it, and seed the default user.
pub async fn run_initialize(store: &dyn UserStore, out: &mut impl Write) -> Result<()> {
    tracing::warn!("dropping all user data for reinitialization");

    store.drop_schema().await?;
    store.create_schema().await?;
    let seeded = store.insert(seed_user()).await?;
    tracing::debug!(id = seeded.id, "seeded default user");

    writeln!(out, "Database Initialized")?;
    Ok(())
}

/// Exact-match lookup by username.
pub async fn run_get_user(
    store: &dyn UserStore,
    out: &mut impl Write,
    username: &str,
) -> Result<()> {
    match store.get(username).await? {
        Some(user) => writeln!(out, "{user}")?,
        None => writeln!(out, "{username} not found!")?,
    }
    Ok(())
}

/// Display every user.
pub async fn run_get_all_users(store: &dyn UserStore, out: &mut impl Write) -> Result<()> {
    let users = store.all().await?;
    if users.is_empty() {
        writeln!(out, "No users found")?;
        return Ok(());
    }
    for user in &users {
        writeln!(out, "{user}")?;
    }
    Ok(())
}

/// Update a user's email address.
pub async fn run_change_email(
    store: &dyn UserStore,
    out: &mut impl Write,
    username: &str,
    new_email: &str,
) -> Result<()> {
    match store.update_email(username, new_email).await {
        Ok(Some(user)) => writeln!(out, "Updated {}'s email to {}", user.username, user.email)?,
        Ok(None) => writeln!(out, "{username} not found! Unable to update email.")?,
        Err(StoreError::Conflict) => writeln!(out, "Email already taken!")?,
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

/// Find users by username or email substring.
pub async fn run_find_user(
    store: &dyn UserStore,
    out: &mut impl Write,
    search_term: &str,
) -> Result<()> {
    let users = store.search(search_term).await?;
    if users.is_empty() {
        writeln!(out, "No users found matching '{search_term}'")?;
        return Ok(());
    }

    writeln!(out, "Found {} user(s) matching '{search_term}':", users.len())?;
    for user in &users {
        writeln!(out, "{user}")?;
    }
    Ok(())
}

/// List a window of users with a 1-based summary line.
pub async fn run_list_users(
    store: &dyn UserStore,
    out: &mut impl Write,
    limit: i64,
    offset: i64,
) -> Result<()> {
    let page = store.page(limit, offset).await?;
    if page.users.is_empty() {
        // An out-of-range window reports no users even when earlier
        // rows exist.
        writeln!(out, "No users found")?;
        return Ok(());
    }

    let first = offset + 1;
    let last = (offset + limit).min(page.total);
    writeln!(
        out,
        "Showing users {first} to {last} of {} total users:",
        page.total
    )?;
    for user in &page.users {
        writeln!(out, "{user}")?;
    }
    Ok(())
}

/// Create a new user from the provided fields.
pub async fn run_create_user(
    store: &dyn UserStore,
    out: &mut impl Write,
    new_user: NewUser,
) -> Result<()> {
    match store.insert(new_user).await {
        Ok(user) => writeln!(out, "{user}")?,
        Err(StoreError::Conflict) => writeln!(out, "Username or email already taken!")?,
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

/// Delete a user by username.
pub async fn run_delete_user(
    store: &dyn UserStore,
    out: &mut impl Write,
    username: &str,
) -> Result<()> {
    if store.delete(username).await? {
        writeln!(out, "{username} deleted")?;
    } else {
        writeln!(out, "{username} not found! Unable to delete user.")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use userctl_core::MemoryStore;

    fn text(out: Vec<u8>) -> String {
        String::from_utf8(out).expect("handler output was not UTF-8")
    }

    async fn create(store: &MemoryStore, username: &str, email: &str, password: &str) {
        let mut out = Vec::new();
        run_create_user(store, &mut out, NewUser::new(username, email, password))
            .await
            .expect("create failed");
    }

    #[tokio::test]
    async fn initialize_leaves_exactly_bob_each_time() {
        let store = MemoryStore::new();

        let mut out = Vec::new();
        run_initialize(&store, &mut out).await.unwrap();
        assert_eq!(text(out), "Database Initialized\n");

        let mut out = Vec::new();
        run_initialize(&store, &mut out).await.unwrap();
        assert_eq!(text(out), "Database Initialized\n");

        let users = store.all().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "bob");
        assert_eq!(users[0].email, "bob@mail.com");
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let store = MemoryStore::new();
        create(&store, "carol", "c@x.com", "pw").await;

        let mut out = Vec::new();
        run_get_user(&store, &mut out, "carol").await.unwrap();
        assert_eq!(text(out), "User 1: carol <c@x.com>\n");
    }

    #[tokio::test]
    async fn duplicate_create_prints_conflict_and_adds_no_row() {
        let store = MemoryStore::new();
        create(&store, "alice", "a@x.com", "p").await;

        let mut out = Vec::new();
        run_create_user(&store, &mut out, NewUser::new("alice", "b@y.com", "q"))
            .await
            .unwrap();
        assert_eq!(text(out), "Username or email already taken!\n");

        assert_eq!(store.all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_user_reports_missing() {
        let store = MemoryStore::new();

        let mut out = Vec::new();
        run_get_user(&store, &mut out, "ghost").await.unwrap();
        assert_eq!(text(out), "ghost not found!\n");
    }

    #[tokio::test]
    async fn get_all_users_empty_and_populated() {
        let store = MemoryStore::new();

        let mut out = Vec::new();
        run_get_all_users(&store, &mut out).await.unwrap();
        assert_eq!(text(out), "No users found\n");

        create(&store, "alice", "a@x.com", "p").await;
        create(&store, "carol", "c@x.com", "pw").await;

        let mut out = Vec::new();
        run_get_all_users(&store, &mut out).await.unwrap();
        assert_eq!(
            text(out),
            "User 1: alice <a@x.com>\nUser 2: carol <c@x.com>\n"
        );
    }

    #[tokio::test]
    async fn change_email_then_get_shows_new_email() {
        let store = MemoryStore::new();
        create(&store, "dave", "d@x.com", "pw").await;

        let mut out = Vec::new();
        run_change_email(&store, &mut out, "dave", "d2@x.com")
            .await
            .unwrap();
        assert_eq!(text(out), "Updated dave's email to d2@x.com\n");

        let mut out = Vec::new();
        run_get_user(&store, &mut out, "dave").await.unwrap();
        assert_eq!(text(out), "User 1: dave <d2@x.com>\n");
    }

    #[tokio::test]
    async fn change_email_reports_missing_user() {
        let store = MemoryStore::new();

        let mut out = Vec::new();
        run_change_email(&store, &mut out, "dave", "d2@x.com")
            .await
            .unwrap();
        assert_eq!(text(out), "dave not found! Unable to update email.\n");
    }

    #[tokio::test]
    async fn change_email_reports_conflict() {
        let store = MemoryStore::new();
        create(&store, "alice", "a@x.com", "p").await;
        create(&store, "dave", "d@x.com", "pw").await;

        let mut out = Vec::new();
        run_change_email(&store, &mut out, "dave", "a@x.com")
            .await
            .unwrap();
        assert_eq!(text(out), "Email already taken!\n");

        // The row is unchanged.
        let dave = store.get("dave").await.unwrap().unwrap();
        assert_eq!(dave.email, "d@x.com");
    }

    #[tokio::test]
    async fn delete_removes_visibility() {
        let store = MemoryStore::new();
        create(&store, "dave", "d@x.com", "pw").await;

        let mut out = Vec::new();
        run_delete_user(&store, &mut out, "dave").await.unwrap();
        assert_eq!(text(out), "dave deleted\n");

        let mut out = Vec::new();
        run_get_user(&store, &mut out, "dave").await.unwrap();
        assert_eq!(text(out), "dave not found!\n");

        let mut out = Vec::new();
        run_get_all_users(&store, &mut out).await.unwrap();
        assert_eq!(text(out), "No users found\n");
    }

    #[tokio::test]
    async fn delete_reports_missing_user() {
        let store = MemoryStore::new();

        let mut out = Vec::new();
        run_delete_user(&store, &mut out, "dave").await.unwrap();
        assert_eq!(text(out), "dave not found! Unable to delete user.\n");
    }

    #[tokio::test]
    async fn find_user_matches_username_and_email_substrings() {
        let store = MemoryStore::new();
        create(&store, "alice", "a@x.com", "p").await;
        create(&store, "alicia", "b@x.com", "q").await;

        let mut out = Vec::new();
        run_find_user(&store, &mut out, "ali").await.unwrap();
        assert_eq!(
            text(out),
            "Found 2 user(s) matching 'ali':\nUser 1: alice <a@x.com>\nUser 2: alicia <b@x.com>\n"
        );

        let mut out = Vec::new();
        run_find_user(&store, &mut out, "x.com").await.unwrap();
        assert!(text(out).starts_with("Found 2 user(s) matching 'x.com':"));

        let mut out = Vec::new();
        run_find_user(&store, &mut out, "zzz").await.unwrap();
        assert_eq!(text(out), "No users found matching 'zzz'\n");
    }

    #[tokio::test]
    async fn list_users_paginates_fifteen_rows() {
        let store = MemoryStore::new();
        for i in 0..15 {
            create(
                &store,
                &format!("user{i:02}"),
                &format!("u{i:02}@x.com"),
                "pw",
            )
            .await;
        }

        let mut out = Vec::new();
        run_list_users(&store, &mut out, 10, 0).await.unwrap();
        let text_first = text(out);
        assert!(text_first.starts_with("Showing users 1 to 10 of 15 total users:\n"));
        assert_eq!(text_first.lines().count(), 11);

        let mut out = Vec::new();
        run_list_users(&store, &mut out, 10, 10).await.unwrap();
        let text_second = text(out);
        assert!(text_second.starts_with("Showing users 11 to 15 of 15 total users:\n"));
        assert_eq!(text_second.lines().count(), 6);
        assert!(text_second.contains("user10"));
        assert!(text_second.contains("user14"));
    }

    #[tokio::test]
    async fn list_users_past_the_end_reports_no_users() {
        let store = MemoryStore::new();
        for i in 0..15 {
            create(
                &store,
                &format!("user{i:02}"),
                &format!("u{i:02}@x.com"),
                "pw",
            )
            .await;
        }

        let mut out = Vec::new();
        run_list_users(&store, &mut out, 10, 20).await.unwrap();
        assert_eq!(text(out), "No users found\n");
    }
}
