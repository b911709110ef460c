//! Coercion of dynamic values into typed attribute values.
//!
//! - [`AttributeKind::Count`]: integers, whole floats (`500.0`) and numeric
//!   strings (`"500"`) are accepted; anything negative is rejected.
//! - [`AttributeKind::Text`]: strings as-is, numbers and booleans are
//!   stringified (so `sku: 1001` becomes `"1001"`).
//!
//! `null`, arrays and objects are rejected for every kind.

use super::AttributeKind;
use crate::error::{BuyableError, Result};
use serde_json::Value;

/// A coerced attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Count(i64),
    Text(String),
}

impl AttrValue {
    pub fn as_count(&self) -> Option<i64> {
        match self {
            AttrValue::Count(v) => Some(*v),
            AttrValue::Text(_) => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            AttrValue::Text(v) => Some(v),
            AttrValue::Count(_) => None,
        }
    }
}

/// Coerce `value` for the attribute `field` of the given kind.
pub fn coerce(field: &str, kind: AttributeKind, value: &Value) -> Result<AttrValue> {
    match kind {
        AttributeKind::Count => coerce_count(field, value).map(AttrValue::Count),
        AttributeKind::Text => coerce_text(field, value).map(AttrValue::Text),
    }
}

fn coerce_count(field: &str, value: &Value) -> Result<i64> {
    let count = match value {
        Value::Number(n) => match n.as_i64() {
            Some(v) => v,
            None => match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
                    f as i64
                }
                _ => {
                    return Err(BuyableError::invalid_value(
                        field,
                        format!("{} is not a whole number", n),
                    ))
                }
            },
        },
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| {
            BuyableError::invalid_value(field, format!("\"{}\" is not a whole number", s))
        })?,
        other => {
            return Err(BuyableError::invalid_value(
                field,
                format!("expected a number, got {}", type_name(other)),
            ))
        }
    };

    if count < 0 {
        return Err(BuyableError::invalid_value(field, "must not be negative"));
    }
    Ok(count)
}

fn coerce_text(field: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(BuyableError::invalid_value(
            field,
            format!("expected text, got {}", type_name(other)),
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn count_accepts_integers_and_numeric_strings() {
        assert_eq!(
            coerce("price", AttributeKind::Count, &json!(500)).unwrap(),
            AttrValue::Count(500)
        );
        assert_eq!(
            coerce("price", AttributeKind::Count, &json!("750")).unwrap(),
            AttrValue::Count(750)
        );
        assert_eq!(
            coerce("stock", AttributeKind::Count, &json!(3.0)).unwrap(),
            AttrValue::Count(3)
        );
    }

    #[test]
    fn count_rejects_fractions_and_negatives() {
        let err = coerce("price", AttributeKind::Count, &json!(1.5)).unwrap_err();
        assert!(err.is_invalid_argument());

        let err = coerce("stock", AttributeKind::Count, &json!(-1)).unwrap_err();
        assert!(err.to_string().contains("must not be negative"));
    }

    #[test]
    fn count_rejects_null() {
        let err = coerce("price", AttributeKind::Count, &Value::Null).unwrap_err();
        assert!(err.to_string().contains("got null"));
    }

    #[test]
    fn text_stringifies_scalars() {
        assert_eq!(
            coerce("sku", AttributeKind::Text, &json!(1001)).unwrap(),
            AttrValue::Text("1001".into())
        );
        assert_eq!(
            coerce("vendor", AttributeKind::Text, &json!("Acme")).unwrap(),
            AttrValue::Text("Acme".into())
        );
    }

    #[test]
    fn text_rejects_structures() {
        assert!(coerce("sku", AttributeKind::Text, &json!(["a"])).is_err());
        assert!(coerce("vendor", AttributeKind::Text, &json!({"a": 1})).is_err());
    }
}
