//! Business logic services for the application layer.

pub mod about_service;
pub mod auth_service;
pub mod shortening_service;

pub use about_service::AboutService;
pub use auth_service::AuthService;
pub use shortening_service::{DeleteOutcome, LIST_ALL_PAGE, MAX_CODE_ATTEMPTS, ShorteningService};
