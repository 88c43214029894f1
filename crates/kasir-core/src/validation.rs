//! # Validation Module
//!
//! Input validation rules for the catalog.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractor (kasir-api)                                   │
//! │  └── Malformed JSON / wrong types → 400                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Required fields, non-empty names, encoded setting values          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── UNIQUE constraints (products.code, categories.name) → 409         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Default number of print history entries returned by a listing.
pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

/// Upper bound on print history entries returned by a listing.
pub const MAX_HISTORY_LIMIT: u32 = 500;

/// Requires a field to be present (not absent, not null).
///
/// Empty strings pass: product fields are presence-checked only.
///
/// ## Example
/// ```rust
/// use kasir_core::validation::require;
///
/// assert_eq!(require("flex", Some(String::new())).unwrap(), "");
/// assert!(require("flex", None).is_err());
/// ```
pub fn require(field: &str, value: Option<String>) -> ValidationResult<String> {
    value.ok_or_else(|| ValidationError::required(field))
}

/// Requires a field to be present and contain something besides whitespace.
///
/// The value is returned as given, not trimmed.
///
/// ## Example
/// ```rust
/// use kasir_core::validation::require_non_empty;
///
/// assert!(require_non_empty("name", Some("Drinks".into())).is_ok());
/// assert!(require_non_empty("name", Some("   ".into())).is_err());
/// assert!(require_non_empty("name", None).is_err());
/// ```
pub fn require_non_empty(field: &str, value: Option<String>) -> ValidationResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::required(field)),
    }
}

/// Checks that a stored setting value is valid encoded JSON.
///
/// Settings are kept as encoded text, and reads decode every row; an
/// undecodable value must never reach the table.
pub fn validate_encoded_json(field: &str, raw: &str) -> ValidationResult<()> {
    serde_json::from_str::<serde_json::Value>(raw)
        .map(|_| ())
        .map_err(|e| ValidationError::invalid_format(field, e.to_string()))
}

/// Clamps a requested print history limit into `1..=MAX_HISTORY_LIMIT`.
pub fn clamp_history_limit(limit: Option<u32>) -> u32 {
    limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert_eq!(require("code", Some("C001".into())).unwrap(), "C001");
        assert_eq!(
            require("code", None).unwrap_err(),
            ValidationError::required("code")
        );
    }

    #[test]
    fn test_require_non_empty_keeps_value_untrimmed() {
        assert_eq!(
            require_non_empty("name", Some(" Drinks ".into())).unwrap(),
            " Drinks "
        );
        assert!(require_non_empty("name", Some(String::new())).is_err());
    }

    #[test]
    fn test_validate_encoded_json() {
        assert!(validate_encoded_json("v", "0.11").is_ok());
        assert!(validate_encoded_json("v", r#"{"dpi":203}"#).is_ok());
        assert!(validate_encoded_json("v", "null").is_ok());
        assert!(validate_encoded_json("v", "not json").is_err());
    }

    #[test]
    fn test_clamp_history_limit() {
        assert_eq!(clamp_history_limit(None), DEFAULT_HISTORY_LIMIT);
        assert_eq!(clamp_history_limit(Some(0)), 1);
        assert_eq!(clamp_history_limit(Some(10)), 10);
        assert_eq!(clamp_history_limit(Some(10_000)), MAX_HISTORY_LIMIT);
    }
}
