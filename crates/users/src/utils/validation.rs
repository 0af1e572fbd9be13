//! Input validation utilities.

use crate::types::RelayError;

/// Require a present, non-blank text field. The value is returned untouched.
pub fn require_text(field: &str, value: Option<String>) -> Result<String, RelayError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(RelayError::validation(format!("{field} must not be empty"))),
        None => Err(RelayError::validation(format!("{field} is required"))),
    }
}

/// Require a present, non-empty secret. Whitespace is significant in passwords.
pub fn require_secret(field: &str, value: Option<String>) -> Result<String, RelayError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        Some(_) => Err(RelayError::validation(format!("{field} must not be empty"))),
        None => Err(RelayError::validation(format!("{field} is required"))),
    }
}

/// Require an explicitly supplied flag; absence is distinct from `false`.
pub fn require_flag(field: &str, value: Option<bool>) -> Result<bool, RelayError> {
    value.ok_or_else(|| RelayError::validation(format!("{field} is required")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert_eq!(
            require_text("userId", Some("alice".into())).unwrap(),
            "alice"
        );
        assert_eq!(
            require_text("routineName", Some(" Morning Run ".into())).unwrap(),
            " Morning Run "
        );

        assert!(require_text("userId", None).is_err());
        assert!(require_text("userId", Some(String::new())).is_err());
        assert!(require_text("userId", Some("   ".into())).is_err());
    }

    #[test]
    fn test_require_secret_keeps_whitespace_passwords() {
        assert_eq!(require_secret("password", Some("  ".into())).unwrap(), "  ");
        assert!(require_secret("password", Some(String::new())).is_err());
        assert!(require_secret("password", None).is_err());
    }

    #[test]
    fn test_require_flag_distinguishes_false_from_missing() {
        assert!(!require_flag("isPerformed", Some(false)).unwrap());
        assert!(require_flag("isPerformed", Some(true)).unwrap());

        let err = require_flag("isPerformed", None).unwrap_err();
        assert_eq!(err.to_string(), "validation failed: isPerformed is required");
    }
}
