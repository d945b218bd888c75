//! Password hashing.
//!
//! Passwords are hashed with Argon2id using the parameters below, with a
//! fresh random salt per call. The length check always runs first, on both
//! the create and the update path.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use secrecy::{ExposeSecret, SecretString};

use tannery_core::FieldError;

use super::ServiceError;
use crate::models::SecretHash;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// Maximum password length in characters.
pub const MAX_PASSWORD_LENGTH: usize = 20;

/// Argon2 memory cost in KiB.
pub const MEMORY_COST_KIB: u32 = Params::DEFAULT_M_COST;

/// Argon2 iteration count.
pub const TIME_COST: u32 = Params::DEFAULT_T_COST;

/// Argon2 degree of parallelism.
pub const PARALLELISM: u32 = Params::DEFAULT_P_COST;

/// Hashes and verifies passwords with a fixed work factor.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialHasher {
    /// Create a hasher using Argon2id v19 with the module's fixed parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::DEFAULT),
        }
    }

    /// Check that a password is 4 to 20 characters long.
    ///
    /// # Errors
    ///
    /// Returns a `password` [`FieldError`] with "invalid password length".
    pub fn check_length(secret: &SecretString) -> Result<(), FieldError> {
        let len = secret.expose_secret().chars().count();
        if (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&len) {
            Ok(())
        } else {
            Err(FieldError::new("password", "invalid password length"))
        }
    }

    /// Validate and hash a password.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if the length check fails and
    /// `ServiceError::PasswordHash` if Argon2 fails.
    pub fn hash(&self, secret: &SecretString) -> Result<SecretHash, ServiceError> {
        Self::check_length(secret)?;

        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(secret.expose_secret().as_bytes(), &salt)
            .map(|hash| SecretHash::new(hash.to_string()))
            .map_err(|e| {
                tracing::error!(error = %e, "password hashing failed");
                ServiceError::PasswordHash
            })
    }

    /// Hash a password only if one is being set.
    ///
    /// `None` means the password is unchanged; the stored hash is left as it
    /// is and nothing is rehashed.
    ///
    /// # Errors
    ///
    /// Same as [`CredentialHasher::hash`].
    pub fn prepare(&self, secret: Option<&SecretString>) -> Result<Option<SecretHash>, ServiceError> {
        secret.map(|s| self.hash(s)).transpose()
    }

    /// Check a password against a stored hash.
    #[must_use]
    pub fn verify(&self, secret: &SecretString, hash: &SecretHash) -> bool {
        let Ok(parsed) = PasswordHash::new(hash.as_str()) else {
            return false;
        };
        self.argon2
            .verify_password(secret.expose_secret().as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    #[test]
    fn test_work_factor_is_fixed() {
        assert_eq!(MEMORY_COST_KIB, 19 * 1024);
        assert_eq!(TIME_COST, 2);
        assert_eq!(PARALLELISM, 1);
    }

    #[test]
    fn test_hash_is_salted_and_verifies() {
        let hasher = CredentialHasher::new();
        let password = secret("hunter22");

        let first = hasher.hash(&password).unwrap();
        let second = hasher.hash(&password).unwrap();

        assert_ne!(first, second);
        assert!(first.as_str().starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
        assert!(hasher.verify(&password, &first));
        assert!(hasher.verify(&password, &second));
        assert!(!hasher.verify(&secret("hunter23"), &first));
    }

    #[test]
    fn test_length_bounds_inclusive() {
        assert!(CredentialHasher::check_length(&secret("abcd")).is_ok());
        assert!(CredentialHasher::check_length(&secret(&"x".repeat(20))).is_ok());
        // Length is counted in characters, not bytes
        assert!(CredentialHasher::check_length(&secret("密碼密碼")).is_ok());
    }

    #[test]
    fn test_out_of_range_lengths_rejected() {
        let hasher = CredentialHasher::new();
        let long = "x".repeat(21);
        for bad in ["", "abc", long.as_str()] {
            match hasher.hash(&secret(bad)).unwrap_err() {
                ServiceError::Validation(field) => {
                    assert_eq!(field.field, "password");
                    assert_eq!(field.message, "invalid password length");
                }
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_prepare_skips_unchanged() {
        let hasher = CredentialHasher::new();
        assert!(hasher.prepare(None).unwrap().is_none());
        assert!(hasher.prepare(Some(&secret("s3cret"))).unwrap().is_some());
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        let hasher = CredentialHasher::new();
        assert!(!hasher.verify(&secret("s3cret"), &SecretHash::new("nope".to_owned())));
    }
}
