//! Short code generation and validation utilities.
//!
//! Codes are 8 characters drawn uniformly from a 64-symbol URL-safe
//! alphabet, giving 2^48 possible codes. Collisions are still possible and
//! are resolved by the store's uniqueness constraint, not here.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Number of characters in every short code.
pub const CODE_LENGTH: usize = 8;

/// URL-safe alphabet short codes are drawn from.
pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Source of candidate short codes.
///
/// The creation service only asks for candidates; whether one is usable is
/// decided by the store. Tests inject deterministic generators to force
/// collisions.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Generator backed by the thread-local CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code()
    }
}

/// Generates a random short code.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 8);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Returns true if `code` has the short code shape: 8 alphabet characters.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| ALPHABET.contains(&b))
}

/// Validates a short code taken from a request path.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the code is not exactly 8 characters
/// from the short code alphabet.
pub fn validate_short_code(code: &str) -> Result<(), AppError> {
    if code.chars().count() != CODE_LENGTH {
        return Err(AppError::bad_request(
            "Short code must be exactly 8 characters",
            json!({ "provided_length": code.chars().count() }),
        ));
    }

    if !is_valid_code(code) {
        return Err(AppError::bad_request(
            "Short code can only contain letters, digits, '-' and '_'",
            json!({ "short_code": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code();
        assert_eq!(code.len(), CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_url_safe_characters() {
        for _ in 0..100 {
            let code = generate_code();
            assert!(
                code.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
                "unexpected character in {code}"
            );
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code()).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generated_codes_are_valid() {
        let generator = RandomCodeGenerator;
        for _ in 0..100 {
            assert!(is_valid_code(&generator.generate()));
        }
    }

    #[test]
    fn test_alphabet_has_no_duplicates() {
        let unique: HashSet<&u8> = ALPHABET.iter().collect();
        assert_eq!(unique.len(), ALPHABET.len());
    }

    #[test]
    fn test_validate_accepts_mixed_case() {
        assert!(validate_short_code("aB3_x-Z9").is_ok());
        assert!(validate_short_code("zzzzzzzz").is_ok());
    }

    #[test]
    fn test_validate_too_short() {
        let err = validate_short_code("abc123").unwrap_err();
        assert!(err.to_string().contains("exactly 8"));
    }

    #[test]
    fn test_validate_too_long() {
        assert!(validate_short_code("abcd12345").is_err());
    }

    #[test]
    fn test_validate_special_characters() {
        let err = validate_short_code("abc@1234").unwrap_err();
        assert!(err.to_string().contains("letters, digits"));
    }

    #[test]
    fn test_validate_multibyte_characters() {
        assert!(validate_short_code("abcdefgé").is_err());
    }

    #[test]
    fn test_validate_empty_string() {
        assert!(validate_short_code("").is_err());
    }
}
