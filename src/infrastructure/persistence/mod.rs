//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Queries
//! are checked at runtime and mapped through `FromRow` row structs.
//!
//! # Repositories
//!
//! - [`PgMappingRepository`] - URL mapping storage and click counters
//! - [`PgUserRepository`] - User accounts
//! - [`PgAboutRepository`] - About page singleton

pub mod pg_about_repository;
pub mod pg_mapping_repository;
pub mod pg_user_repository;

pub use pg_about_repository::PgAboutRepository;
pub use pg_mapping_repository::PgMappingRepository;
pub use pg_user_repository::PgUserRepository;
