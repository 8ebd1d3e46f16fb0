//! HTTP surface of the shortener.
//!
//! - [`routes`] splits the `/api` endpoints into public and bearer-protected
//!   routers
//! - [`handlers`] turn requests into service calls and map outcomes to
//!   status codes
//! - [`dto`] holds the JSON request and response shapes
//! - [`middleware`] verifies bearer tokens and opens request spans
//!
//! The redirect and health endpoints live at the root; see
//! [`crate::routes`].

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
