//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Field names are snake_case on the wire.

pub mod about;
pub mod auth;
pub mod health;
pub mod mapping;
pub mod message;
pub mod pagination;
pub mod shorten;
