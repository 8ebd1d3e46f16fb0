//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`memory`] - Process-local repository implementation
//! - [`auth`] - Bearer token issuance and verification

pub mod auth;
pub mod memory;
pub mod persistence;
