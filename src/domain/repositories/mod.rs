//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and
//! are implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence` (PostgreSQL)
//!   and `crate::infrastructure::memory` (process-local)
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`MappingRepository`] - URL mapping storage and uniqueness enforcement
//! - [`UserRepository`] - User accounts
//! - [`AboutRepository`] - About page singleton
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod about_repository;
pub mod mapping_repository;
pub mod user_repository;

pub use about_repository::AboutRepository;
pub use mapping_repository::MappingRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use about_repository::MockAboutRepository;
#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
