//! Short code generation and validation utilities.

use std::sync::LazyLock;

use crate::error::AppError;
use base64::Engine as _;
use regex::Regex;
use serde_json::json;

/// Random bytes per generated code; 6 bytes encode to 8 base64 characters.
const CODE_LENGTH_BYTES: usize = 6;

pub const CUSTOM_CODE_MIN_LEN: usize = 4;
pub const CUSTOM_CODE_MAX_LEN: usize = 32;

/// Codes that would shadow top-level routes.
const RESERVED_CODES: &[&str] = &["api", "ping", "health"];

static CUSTOM_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Generates a random 8-character URL-safe short code.
///
/// Uses `getrandom` for entropy and encodes as URL-safe base64 without padding.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system RNG is unavailable.
pub fn generate_code() -> Result<String, AppError> {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate short code",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Validates a user-chosen short code.
///
/// # Rules
///
/// - Length: 4-32 characters
/// - Allowed characters: ASCII letters, digits, `_` and `-`
/// - Not a reserved route name (case-insensitive)
///
/// # Errors
///
/// Returns [`AppError::Validation`] describing the first rule violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.len() < CUSTOM_CODE_MIN_LEN || code.len() > CUSTOM_CODE_MAX_LEN {
        return Err(AppError::bad_request(
            "Custom code must be 4-32 characters",
            json!({ "provided_length": code.len() }),
        ));
    }

    if !CUSTOM_CODE_RE.is_match(code) {
        return Err(AppError::bad_request(
            "Custom code can only contain letters, digits, underscores and hyphens",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
    {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_shape() {
        let code = generate_code().unwrap();

        assert_eq!(code.len(), 8);
        assert!(!code.contains('='));
        assert!(CUSTOM_CODE_RE.is_match(&code));
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<_> = (0..1000).map(|_| generate_code().unwrap()).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_validate_accepts_valid_codes() {
        for code in ["abcd", "My_Link-2024", "a1B2c3", &"x".repeat(32)] {
            assert!(validate_custom_code(code).is_ok(), "{code} should be valid");
        }
    }

    #[test]
    fn test_validate_length_bounds() {
        let err = validate_custom_code("abc").unwrap_err();
        assert!(err.to_string().contains("4-32"));

        assert!(validate_custom_code(&"x".repeat(33)).is_err());
        assert!(validate_custom_code("").is_err());
    }

    #[test]
    fn test_validate_rejects_special_characters() {
        for code in ["my code", "my.link", "promo@2024", "путь1234"] {
            assert!(validate_custom_code(code).is_err(), "{code} should be invalid");
        }
    }

    #[test]
    fn test_validate_rejects_reserved_codes() {
        for &reserved in RESERVED_CODES {
            assert!(validate_custom_code(reserved).is_err());
        }

        let err = validate_custom_code("HEALTH").unwrap_err();
        assert!(err.to_string().contains("reserved"));
    }
}
