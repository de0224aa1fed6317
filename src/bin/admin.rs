//! CLI administration tool for linkpulse.
//!
//! Provides commands for managing accounts, viewing statistics,
//! and checking the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List accounts
//! cargo run --bin admin -- user list
//!
//! # Reset a password (a random one is generated when --password is omitted)
//! cargo run --bin admin -- user reset-password alice@example.com
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_PATH`: SQLite database location

use linkpulse::domain::repositories::{ClickRepository, LinkRepository, UserRepository};
use linkpulse::infrastructure::persistence::{
    SqliteClickRepository, SqliteLinkRepository, SqliteUserRepository,
};
use linkpulse::utils::password::hash_password;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use rand::Rng;
use rand::distr::Alphanumeric;
use sqlx::SqlitePool;
use std::sync::Arc;

const GENERATED_PASSWORD_LEN: usize = 16;

/// CLI tool for managing linkpulse.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List all accounts
    List,

    /// Set a new password for an account
    ResetPassword {
        /// Account email
        email: String,

        /// New password (generated if not provided)
        #[arg(short, long)]
        password: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        let path = std::env::var("DB_PATH").unwrap_or_else(|_| "linkpulse.db".to_string());
        format!("sqlite://{}", path)
    });

    let pool = SqlitePool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let pool = Arc::new(pool);

    match cli.command {
        Commands::User { action } => handle_user_action(action, pool).await?,
        Commands::Stats => handle_stats(pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: Arc<SqlitePool>) -> Result<()> {
    let repo = SqliteUserRepository::new(pool);

    match action {
        UserAction::List => list_users(&repo).await?,
        UserAction::ResetPassword {
            email,
            password,
            yes,
        } => reset_password(&repo, &email, password, yes).await?,
    }

    Ok(())
}

/// Lists accounts.
///
/// ```text
/// 👥 Users
///
///   ID  Username             Email                          Created
///   ─────────────────────────────────────────────────────────────────────
///   1   alice                alice@example.com              2024-01-15 10:30
/// ```
async fn list_users(repo: &SqliteUserRepository) -> Result<()> {
    println!("{}", "👥 Users".bright_blue().bold());
    println!();

    let users = repo.list().await.context("Failed to list users")?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        return Ok(());
    }

    println!(
        "  {:<3} {:<20} {:<30} {:<16}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for user in &users {
        println!(
            "  {:<3} {:<20} {:<30} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            user.email,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Replaces an account's password after confirmation.
///
/// Only the Argon2 hash is stored; a generated password is printed once.
async fn reset_password(
    repo: &SqliteUserRepository,
    email: &str,
    password: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Reset Password".bright_blue().bold());
    println!();

    let email = email.trim().to_lowercase();
    let user = repo
        .find_by_email(&email)
        .await?
        .with_context(|| format!("No user with email {email}"))?;

    let (password, generated) = match password {
        Some(p) => (p, false),
        None => (generate_password(), true),
    };

    println!("  User:  {} ({})", user.username.cyan(), user.email);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Set a new password for this user?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let hash = hash_password(&password).context("Failed to hash password")?;
    repo.update_password(user.id, &hash).await?;

    println!("{}", "✅ Password updated".green().bold());
    if generated {
        println!();
        println!("  New password: {}", password.bright_yellow().bold());
        println!(
            "{}",
            "⚠️  Save it now, it will not be shown again.".red().bold()
        );
    }
    println!();

    Ok(())
}

async fn handle_stats(pool: Arc<SqlitePool>) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users = SqliteUserRepository::new(pool.clone()).count().await?;
    let links = SqliteLinkRepository::new(pool.clone()).count_all().await?;
    let clicks = SqliteClickRepository::new(pool).count_all().await?;

    println!("  Users:  {}", users.to_string().bright_green().bold());
    println!("  Links:  {}", links.to_string().bright_green().bold());
    println!("  Clicks: {}", clicks.to_string().bright_green().bold());
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  SQLite: {}", version.bright_white());
        }
    }

    Ok(())
}

fn generate_password() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LEN)
        .map(char::from)
        .collect()
}
