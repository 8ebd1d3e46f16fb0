//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod about;
pub mod auth;
pub mod health;
pub mod redirect;
pub mod urls;
pub mod user;

pub use about::{get_about_handler, update_about_handler};
pub use auth::{login_handler, register_handler};
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use urls::{create_url_handler, delete_url_handler, get_url_handler, list_urls_handler};
pub use user::profile_handler;
