//! Input-level validation for form fields.

use std::collections::BTreeMap;

use campus_lib::model::{Record, Value};
use email_address::EmailAddress;

use crate::schema::{Field, InputKind};

/// Characters a number input accepts while typing.
pub fn number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
}

/// Parse number input text.
///
/// Integral text without a fraction or exponent becomes `Int`; other numeric
/// text becomes `Float`. Returns `None` for text that is not a finite number.
pub fn parse_number(text: &str) -> Option<Value> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if !text.contains(['.', 'e', 'E'])
        && let Ok(n) = text.parse::<i64>()
    {
        return Some(Value::Int(n));
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(Value::Float(n)),
        _ => None,
    }
}

/// Returns `true` for a value a required field rejects.
pub fn is_blank(value: &Value) -> bool {
    value.is_null() || value.is_empty_string()
}

/// Validate one field against the working copy.
///
/// `bad_number` is set when a number input holds text that is not a number;
/// its value is then the empty string, like a browser number input.
pub fn validate_field(field: &Field, value: &Value, bad_number: bool) -> Option<String> {
    if field.disabled {
        return None;
    }
    if field.kind == InputKind::Number && bad_number {
        return Some("Enter a number".to_string());
    }
    if field.required && is_blank(value) {
        return Some(format!("{} is required", field.label));
    }
    match (field.kind, value) {
        (InputKind::Email, Value::String(s)) if !s.is_empty() && !EmailAddress::is_valid(s) => {
            Some("Enter a valid email address".to_string())
        }
        (InputKind::Select, Value::String(s)) if !s.is_empty() && !field.allows(s) => {
            Some(format!("Choose a {}", field.label.to_lowercase()))
        }
        _ => None,
    }
}

/// Validate every field; returns messages keyed by field key.
pub fn validate(
    fields: &[Field],
    values: &Record,
    bad_numbers: &dyn Fn(&str) -> bool,
) -> BTreeMap<String, String> {
    fields
        .iter()
        .filter_map(|field| {
            validate_field(field, values.value(&field.key), bad_numbers(&field.key))
                .map(|message| (field.key.clone(), message))
        })
        .collect()
}
