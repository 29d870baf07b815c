//! Redirect target validation.
//!
//! Targets are stored verbatim; this module only decides whether a string is
//! an acceptable redirect target.

use url::Url;
use validator::ValidationError;

/// Reasons a redirect target is rejected.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is an absolute `http`/`https` URL with a host.
///
/// Rejects potentially dangerous schemes like `javascript:`, `data:` and
/// `file:`.
///
/// # Errors
///
/// See [`UrlValidationError`].
pub fn check_redirect_target(input: &str) -> Result<(), UrlValidationError> {
    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(())
}

/// `validator` adapter for [`check_redirect_target`].
pub fn validate_redirect_target(input: &str) -> Result<(), ValidationError> {
    check_redirect_target(input).map_err(|e| {
        let mut err = ValidationError::new("redirect_target");
        err.message = Some(e.to_string().into());
        err
    })
}
