//! REST API layer for HTTP request/response handling.
//!
//! This layer validates requests, calls into the application services and
//! formats responses according to API contracts.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`extract`] - Request metadata extractors
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request id and tracing middleware
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
