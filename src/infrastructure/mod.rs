//! Adapters behind the domain traits.
//!
//! # Modules
//!
//! - [`cache`] - Redirect cache (Redis, or a no-op when Redis is not configured)
//! - [`persistence`] - SQLite pool setup and repository implementations

pub mod cache;
pub mod persistence;
