//! HTTP middleware for request processing.
//!
//! Provides request id assignment and structured request tracing.

pub mod request_id;
pub mod tracing;
