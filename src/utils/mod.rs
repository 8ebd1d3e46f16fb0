//! Utility functions for code generation, URL validation, passwords, and storage errors.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`url_validator`] - Validation of URLs submitted for shortening
//! - [`password`] - Argon2 password hashing
//! - [`db_error`] - PostgreSQL constraint violation classification

pub mod code_generator;
pub mod db_error;
pub mod password;
pub mod url_validator;
