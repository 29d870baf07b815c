//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a narrow API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short code allocation, lookup and soft delete
//! - [`services::redirect_service::RedirectService`] - Redirect resolution with visit tracking

pub mod services;
