//! # linkpulse
//!
//! A URL shortener with per-user click analytics, built with Axum and SQLite.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, repository traits, and the analytics
//!   bucketing core
//! - **Application Layer** ([`application`]) - Accounts, links, and analytics services
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite repositories and caching
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Account registration with Argon2 password hashes and JWT sessions
//! - Custom or generated short codes
//! - Asynchronous click tracking with retry logic
//! - Click analytics bucketed by hour, day, or month
//! - Optional Redis caching for fast redirects
//! - Rate limiting, CORS, and structured logging
//!
//! ## Quick Start
//!
//! ```bash
//! export JWT_SECRET="change-me"
//! export DB_PATH="data/linkpulse.db"
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! # Migrations are applied on startup
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AnalyticsService, AuthService, LinkService};
    pub use crate::domain::analytics::{AnalyticsQuery, AnalyticsResult, Bucket, Period};
    pub use crate::domain::entities::{Click, Link, NewLink, User};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
