//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without persistence concerns.
//!
//! # Entity Types
//!
//! - [`User`] and [`Role`] - registered accounts and their authorization role
//! - [`Actor`] - the authenticated identity attempting an operation
//! - [`UrlMapping`] - a short code pointing at an original URL
//! - [`AboutPage`] - the site description singleton
//!
//! Creation inputs live in separate `New*` structs, following the same
//! pattern for every entity.

pub mod about;
pub mod actor;
pub mod url_mapping;
pub mod user;

pub use about::AboutPage;
pub use actor::Actor;
pub use url_mapping::{InsertOutcome, ListCursor, NewUrlMapping, UrlMapping};
pub use user::{NewUser, Role, User, UserSummary};
