//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`db_error`] - Database error classification
//! - [`url_validation`] - Redirect target validation

pub mod code_generator;
pub mod db_error;
pub mod url_validation;
