//! Domain layer containing business entities and logic.
//!
//! Nothing here depends on HTTP or on a concrete database.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`analytics`] - Bucket generation and click aggregation
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. HTTP handler resolves the short code and redirects
//! 2. [`click_event::ClickEvent`] is sent to a bounded channel
//! 3. [`click_worker::run_click_worker`] persists it with retry
//! 4. Analytics later read the rows back via [`repositories::ClickRepository`]

pub mod analytics;
pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
