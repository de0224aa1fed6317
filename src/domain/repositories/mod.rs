//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access behind the Repository pattern. Services hold
//! them as `Arc<R>` and never see a connection pool.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Account storage
//! - [`LinkRepository`] - Short link CRUD and per-user lookups
//! - [`ClickRepository`] - Click recording and time-range queries

pub mod click_repository;
pub mod link_repository;
pub mod user_repository;

pub use click_repository::ClickRepository;
pub use link_repository::LinkRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
