//! Application layer services implementing business logic.
//!
//! Services are generic over the repository traits and hold them as `Arc<R>`;
//! handlers call services, never repositories.
//!
//! # Available Services
//!
//! - [`services::AuthService`] - Registration, login and JWT verification
//! - [`services::LinkService`] - Short link creation, redirects and management
//! - [`services::AnalyticsService`] - Bucketed click analytics

pub mod services;
