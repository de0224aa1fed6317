//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without persistence concerns.
//!
//! # Entity Types
//!
//! - [`User`] - A registered account that owns links
//! - [`Link`] - A shortened URL mapping owned by a user
//! - [`Click`] - A redirect event on a link
//!
//! Creation inputs live in separate structs (`NewUser`, `NewLink`, `NewClick`),
//! partial updates in [`LinkPatch`].

pub mod click;
pub mod link;
pub mod user;

pub use click::{Click, NewClick};
pub use link::{Link, LinkPatch, NewLink};
pub use user::{NewUser, User};
