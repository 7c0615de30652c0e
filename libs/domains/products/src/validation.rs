//! Request-body validation for [`ProductInput`].
//!
//! Works on a raw `serde_json::Value` so that wrong types and missing keys
//! are reported per field instead of as a deserialization failure. No HTTP
//! types are involved; the axum extractor and the update handler both call
//! `ProductInput::try_from`.

use axum_helpers::FieldErrors;
use serde_json::{Map, Value};

use crate::models::{NAME_MAX_CHARS, ProductInput};

fn required(field: &str) -> String {
    format!("The {field} field is required.")
}

fn must_be_string(field: &str) -> String {
    format!("The {field} field must be a string.")
}

fn must_be_number(field: &str) -> String {
    format!("The {field} field must be a number.")
}

fn must_be_integer(field: &str) -> String {
    format!("The {field} field must be an integer.")
}

fn too_long(field: &str, max: u64) -> String {
    format!("The {field} field must not be greater than {max} characters.")
}

/// Value of `field` unless it counts as absent: missing, `null` or a blank string.
fn present<'a>(body: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    match body.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(value) => Some(value),
    }
}

fn string_field(
    body: &Map<String, Value>,
    field: &str,
    max_chars: Option<u64>,
    errors: &mut FieldErrors,
) -> Option<String> {
    let Some(value) = present(body, field) else {
        errors.add(field, required(field));
        return None;
    };
    let Value::String(raw) = value else {
        errors.add(field, must_be_string(field));
        return None;
    };

    let text = raw.trim();
    if let Some(max) = max_chars {
        if text.chars().count() as u64 > max {
            errors.add(field, too_long(field, max));
            return None;
        }
    }
    Some(text.to_string())
}

/// Digits, sign, decimal point and exponent only. Rules out `inf`, `NaN`
/// and hex, which `f64::from_str` would otherwise accept.
fn parse_numeric(text: &str) -> Option<f64> {
    let text = text.trim();
    if !text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn number_field(body: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<f64> {
    let Some(value) = present(body, field) else {
        errors.add(field, required(field));
        return None;
    };

    let parsed = match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => parse_numeric(s),
        _ => None,
    };
    if parsed.is_none() {
        errors.add(field, must_be_number(field));
    }
    parsed
}

fn integer_field(body: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<i32> {
    let Some(value) = present(body, field) else {
        errors.add(field, required(field));
        return None;
    };

    let parsed = match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i32::try_from(i).ok(),
            // 10.0 is still a whole number
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i32::MIN as f64 && *f <= i32::MAX as f64)
                .map(|f| f as i32),
        },
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    if parsed.is_none() {
        errors.add(field, must_be_integer(field));
    }
    parsed
}

impl TryFrom<Value> for ProductInput {
    type Error = FieldErrors;

    /// Apply the field rules in order: name, description, price, stock.
    ///
    /// Every failing field is reported, not just the first. A body that is
    /// not a JSON object fails all four fields as required.
    fn try_from(body: Value) -> Result<Self, Self::Error> {
        let empty = Map::new();
        let body = match &body {
            Value::Object(map) => map,
            _ => &empty,
        };

        let mut errors = FieldErrors::new();
        let name = string_field(body, "name", Some(NAME_MAX_CHARS), &mut errors);
        let description = string_field(body, "description", None, &mut errors);
        let price = number_field(body, "price", &mut errors);
        let stock = integer_field(body, "stock", &mut errors);

        match (name, description, price, stock) {
            (Some(name), Some(description), Some(price), Some(stock)) if errors.is_empty() => {
                Ok(ProductInput {
                    name,
                    description,
                    price,
                    stock,
                })
            }
            _ => Err(errors),
        }
    }
}
