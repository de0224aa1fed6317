//! Data Transfer Objects for API requests and responses.
//!
//! Request bodies derive `validator::Validate`; handlers call `validate()` before
//! touching a service.

pub mod analytics;
pub mod auth;
pub mod health;
pub mod links;
pub mod pagination;
