//! Field-level validation errors.

use core::fmt;

use serde::Serialize;

/// A validation failure on a single named field.
///
/// Validation stops at the first offending field, so an operation reports
/// at most one of these.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field as it appears in request payloads.
    pub field: &'static str,
    /// Human-readable message, surfaced to callers verbatim.
    pub message: String,
}

impl FieldError {
    /// Create a new field error.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// A "required field is missing" error.
    #[must_use]
    pub fn missing(field: &'static str, what: &str) -> Self {
        Self::new(field, format!("missing {what}"))
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_message() {
        let err = FieldError::missing("name", "product name");
        assert_eq!(err.field, "name");
        assert_eq!(err.message, "missing product name");
    }

    #[test]
    fn test_display() {
        let err = FieldError::new("password", "invalid password length");
        assert_eq!(err.to_string(), "password: invalid password length");
    }
}
