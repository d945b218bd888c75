//! Account name type.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::validation::FieldError;

/// Errors that can occur when parsing an [`Account`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// The input string is empty.
    #[error("missing account")]
    Empty,
    /// The input string is too short.
    #[error("account must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// The input string is too long.
    #[error("account must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains something other than ASCII letters and digits.
    #[error("account must be alphanumeric")]
    NotAlphanumeric,
}

impl From<AccountError> for FieldError {
    fn from(err: AccountError) -> Self {
        Self::new("account", err.to_string())
    }
}

/// A user's login account name.
///
/// ## Constraints
///
/// - Length: 4-20 characters
/// - ASCII letters and digits only
///
/// ## Examples
///
/// ```
/// use tannery_core::Account;
///
/// assert!(Account::parse("alice01").is_ok());
///
/// assert!(Account::parse("").is_err());          // empty
/// assert!(Account::parse("abc").is_err());       // too short
/// assert!(Account::parse("alice_01").is_err());  // underscore
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Account(String);

impl Account {
    /// Minimum length of an account name.
    pub const MIN_LENGTH: usize = 4;
    /// Maximum length of an account name.
    pub const MAX_LENGTH: usize = 20;

    /// Parse an `Account` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, outside 4-20 characters, or
    /// contains anything but ASCII letters and digits.
    pub fn parse(s: &str) -> Result<Self, AccountError> {
        if s.is_empty() {
            return Err(AccountError::Empty);
        }

        let len = s.chars().count();
        if len < Self::MIN_LENGTH {
            return Err(AccountError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        if len > Self::MAX_LENGTH {
            return Err(AccountError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AccountError::NotAlphanumeric);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the account name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Account {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Account {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Account {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Account {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::parse(&s)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Account {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_accounts() {
        assert!(Account::parse("abcd").is_ok());
        assert!(Account::parse("Alice2024").is_ok());
        assert!(Account::parse(&"a".repeat(20)).is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Account::parse(""), Err(AccountError::Empty));
    }

    #[test]
    fn test_parse_length_bounds() {
        assert_eq!(
            Account::parse("abc"),
            Err(AccountError::TooShort { min: 4 })
        );
        assert_eq!(
            Account::parse(&"a".repeat(21)),
            Err(AccountError::TooLong { max: 20 })
        );
    }

    #[test]
    fn test_parse_rejects_non_ascii() {
        assert_eq!(
            Account::parse("user name"),
            Err(AccountError::NotAlphanumeric)
        );
        assert_eq!(Account::parse("使用者帳號"), Err(AccountError::NotAlphanumeric));
    }

    #[test]
    fn test_into_field_error() {
        let err: FieldError = AccountError::TooShort { min: 4 }.into();
        assert_eq!(err.field, "account");
        assert_eq!(err.message, "account must be at least 4 characters");
    }
}
