//! Domain layer containing business entities and rules.
//!
//! Nothing in here depends on the HTTP or storage layers. Repository traits
//! define the contracts the infrastructure layer implements.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`access`] - Permission decisions for actors
//! - [`click_event`] - Visit event carried from redirects to the worker
//! - [`click_worker`] - Background worker applying visits to counters
//!
//! # Click Processing Flow
//!
//! 1. The redirect handler resolves the code and answers immediately
//! 2. A [`click_event::ClickEvent`] is pushed onto a bounded channel
//! 3. [`click_worker::run_click_worker`] applies it with retries
//! 4. The counter is bumped via [`repositories::MappingRepository::record_visit`]

pub mod access;
pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
