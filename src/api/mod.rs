//! HTTP surface of the service.
//!
//! Handlers decode requests into service calls and encode the results as JSON;
//! none of them touch a repository directly.
//!
//! # Modules
//!
//! - [`dto`] - Request and response bodies
//! - [`handlers`] - One async function per endpoint
//! - [`middleware`] - JWT auth, CORS, rate limiting and tracing layers
//! - [`routes`] - Public and protected `/api` routers

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
