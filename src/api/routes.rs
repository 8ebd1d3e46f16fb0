//! API route configuration.

use crate::api::handlers::{
    create_url_handler, delete_url_handler, get_about_handler, get_url_handler,
    list_urls_handler, login_handler, profile_handler, register_handler, update_about_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// API routes reachable without a token.
///
/// # Endpoints
///
/// - `POST /auth/register` - Create an account
/// - `POST /auth/login`    - Obtain a bearer token
/// - `GET  /urls`          - List mappings (paginated)
/// - `GET  /about`         - Read the About page
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/urls", get(list_urls_handler))
        .route("/about", get(get_about_handler))
}

/// API routes that require Bearer token authentication.
///
/// # Endpoints
///
/// - `POST   /urls`         - Shorten a URL
/// - `GET    /urls/{id}`    - Mapping details
/// - `DELETE /urls/{id}`    - Delete a mapping (owner or admin)
/// - `GET    /user/profile` - Caller's account
/// - `PUT    /about`        - Edit the About page (admin)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", post(create_url_handler))
        .route("/urls/{id}", get(get_url_handler).delete(delete_url_handler))
        .route("/user/profile", get(profile_handler))
        .route("/about", put(update_about_handler))
}
