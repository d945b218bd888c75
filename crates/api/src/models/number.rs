//! Numeric payload fields.
//!
//! Numbers are read from the raw JSON value so that a wrong type is
//! reported against its field instead of failing the whole body.

use rust_decimal::Decimal;
use serde_json::Value;

use tannery_core::FieldError;

/// Read an optional numeric field.
///
/// Accepts JSON numbers (including exponent forms) and numeric strings.
/// `null`, a missing field and an empty string are all absent.
///
/// # Errors
///
/// Returns a [`FieldError`] with "`<field>` must be a number" for any other
/// value.
pub fn decimal_field(field: &'static str, value: Option<Value>) -> Result<Option<Decimal>, FieldError> {
    let not_a_number = || FieldError::new(field, format!("{field} must be a number"));
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => parse_decimal(&n.to_string()).map(Some).ok_or_else(not_a_number),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => parse_decimal(s.trim()).map(Some).ok_or_else(not_a_number),
        Some(_) => Err(not_a_number()),
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_numbers_and_numeric_strings() {
        assert_eq!(decimal_field("price", Some(json!(12))).unwrap(), Some(Decimal::from(12)));
        assert_eq!(
            decimal_field("price", Some(json!(1.5))).unwrap(),
            Some(Decimal::new(15, 1))
        );
        assert_eq!(
            decimal_field("price", Some(json!(" 499.5 "))).unwrap(),
            Some(Decimal::new(4995, 1))
        );
        assert_eq!(
            decimal_field("price", Some(json!(1e20))).unwrap(),
            Some(Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0))
        );
    }

    #[test]
    fn test_absent_values() {
        assert_eq!(decimal_field("price", None).unwrap(), None);
        assert_eq!(decimal_field("price", Some(Value::Null)).unwrap(), None);
        assert_eq!(decimal_field("price", Some(json!(""))).unwrap(), None);
    }

    #[test]
    fn test_wrong_types_are_field_errors() {
        for value in [json!("abc"), json!(true), json!([1]), json!({"n": 1})] {
            let err = decimal_field("quantity", Some(value)).unwrap_err();
            assert_eq!(err.field, "quantity");
            assert_eq!(err.message, "quantity must be a number");
        }
    }
}
