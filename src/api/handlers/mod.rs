//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod analytics;
pub mod auth;
pub mod health;
pub mod links;
pub mod redirect;
pub mod stats;

pub use analytics::analytics_handler;
pub use auth::{change_password_handler, login_handler, register_handler};
pub use health::{health_handler, ping_handler};
pub use links::{delete_link_handler, list_links_handler, shorten_handler, update_link_handler};
pub use redirect::redirect_handler;
pub use stats::stats_handler;
