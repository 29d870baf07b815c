//! Core domain entities.
//!
//! - [`Link`] - A short code mapped to its original URL, with visit statistics
//! - [`LinkTarget`] - Id and URL of a link, enough to redirect
//! - [`NewLink`] - Input for creating a link

pub mod link;

pub use link::{Link, LinkTarget, NewLink};
