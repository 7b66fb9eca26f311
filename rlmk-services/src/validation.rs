//! Field-level checks shared by the services.

use rlmk_core::error::{RlmkError, RlmkResult};

/// A required text field: present and not blank. Returns it trimmed.
pub fn require_text(value: Option<String>, field: &str) -> RlmkResult<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(RlmkError::validation(format!("{field} is required"))),
    }
}

/// A required non-text field.
pub fn require<T>(value: Option<T>, field: &str) -> RlmkResult<T> {
    value.ok_or_else(|| RlmkError::validation(format!("{field} is required")))
}

/// An optional text field; blank strings count as absent.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A quantity must be a finite, non-negative number.
pub fn check_quantity(quantity: f64) -> RlmkResult<f64> {
    if quantity.is_finite() && quantity >= 0.0 {
        Ok(quantity)
    } else {
        Err(RlmkError::validation("quantity must be a non-negative number"))
    }
}

/// Membership role must be `admin` or `member`.
pub fn check_role(role: Option<String>) -> RlmkResult<String> {
    let role = require_text(role, "role")?;
    if rlmk_core::constants::roles::is_valid(&role) {
        Ok(role)
    } else {
        Err(RlmkError::validation("role must be 'admin' or 'member'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert_eq!(require_text(Some("  Salon ".into()), "name").unwrap(), "Salon");
        let err = require_text(Some("   ".into()), "name").unwrap_err();
        assert_eq!(err.to_string(), "name is required");
        assert!(require_text(None, "name").is_err());
    }

    #[test]
    fn test_check_role() {
        assert_eq!(check_role(Some("admin".into())).unwrap(), "admin");
        assert_eq!(check_role(Some("member".into())).unwrap(), "member");
        assert!(matches!(check_role(Some("owner".into())), Err(RlmkError::Validation(_))));
        assert!(matches!(check_role(None), Err(RlmkError::Validation(_))));
    }

    #[test]
    fn test_check_quantity() {
        assert!(check_quantity(0.0).is_ok());
        assert!(check_quantity(-1.0).is_err());
        assert!(check_quantity(f64::NAN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some(" ".into())), None);
        assert_eq!(optional_text(Some(" kg ".into())).as_deref(), Some("kg"));
    }
}
