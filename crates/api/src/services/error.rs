//! Service error types.

use core::fmt;

use thiserror::Error;

use tannery_core::{FieldError, IdError};

use crate::db::RepositoryError;

/// The kind of entity a lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Product,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Product => f.write_str("product"),
        }
    }
}

/// Errors that can occur in service operations.
///
/// Every operation yields exactly one of these on failure.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A field failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] FieldError),

    /// An id did not have the store's id shape.
    #[error("malformed identifier: {0}")]
    MalformedId(#[from] IdError),

    /// The referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(Resource),

    /// A unique field is already taken.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Repository/database error.
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(what) => Self::Conflict(what),
            other => Self::Repository(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_is_lifted() {
        let err = ServiceError::from(RepositoryError::Conflict("account already exists".into()));
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[test]
    fn test_other_repository_errors_stay_wrapped() {
        let err = ServiceError::from(RepositoryError::NotFound);
        assert!(matches!(err, ServiceError::Repository(RepositoryError::NotFound)));
    }

    #[test]
    fn test_not_found_display() {
        assert_eq!(
            ServiceError::NotFound(Resource::Product).to_string(),
            "product not found"
        );
    }
}
