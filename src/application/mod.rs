//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation, and permission checks,
//! and give the HTTP handlers and the admin CLI a single API to call.
//!
//! # Available Services
//!
//! - [`services::shortening_service::ShorteningService`] - Short link creation, resolution, and deletion
//! - [`services::auth_service::AuthService`] - Accounts, login, and bearer tokens
//! - [`services::about_service::AboutService`] - About page

pub mod services;
