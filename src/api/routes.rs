//! API route configuration.
//!
//! Split into routes that need no session and routes that require a Bearer
//! JWT via [`crate::api::middleware::auth`].

use crate::api::handlers::{
    analytics_handler, change_password_handler, delete_link_handler, list_links_handler,
    login_handler, register_handler, shorten_handler, stats_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Account endpoints reachable without a token.
///
/// - `POST /register` - Create an account
/// - `POST /login`    - Exchange credentials for a JWT
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
}

/// Endpoints that act on the authenticated user's data.
///
/// # Endpoints
///
/// - `POST   /shorten`         - Create a short link
/// - `GET    /urls`            - List own links (paginated)
/// - `PUT    /urls/{id}`       - Replace a link's destination or code
/// - `DELETE /urls/{id}`       - Delete a link and its clicks
/// - `GET    /stats/{code}`    - Details for one link
/// - `GET    /analytics`       - Bucketed click analytics
/// - `POST   /change-password` - Change own password
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/urls", get(list_links_handler))
        .route(
            "/urls/{id}",
            put(update_link_handler).delete(delete_link_handler),
        )
        .route("/stats/{code}", get(stats_handler))
        .route("/analytics", get(analytics_handler))
        .route("/change-password", post(change_password_handler))
}
