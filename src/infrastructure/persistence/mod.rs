//! SQLite repository implementations.
//!
//! Queries are built at runtime with `sqlx::query_as` and mapped through
//! `FromRow` row structs, so no database is needed at compile time. Timestamps
//! are stored as unix seconds.
//!
//! # Repositories
//!
//! - [`SqliteUserRepository`] - Accounts
//! - [`SqliteLinkRepository`] - Short links
//! - [`SqliteClickRepository`] - Click rows and range queries

pub mod sqlite_click_repository;
pub mod sqlite_link_repository;
pub mod sqlite_user_repository;

pub use sqlite_click_repository::SqliteClickRepository;
pub use sqlite_link_repository::SqliteLinkRepository;
pub use sqlite_user_repository::SqliteUserRepository;

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::config::Config;

/// Opens the connection pool described by `config` and applies migrations.
///
/// The database file is created if missing. Foreign keys are enforced, which
/// the click cascade relies on.
///
/// # Errors
///
/// Returns an error if the URL is malformed, the database cannot be opened, or
/// a migration fails.
pub async fn connect(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Some(Duration::from_secs(config.db_idle_timeout)))
        .max_lifetime(Some(Duration::from_secs(config.db_max_lifetime)))
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

pub(crate) fn from_unix(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}
