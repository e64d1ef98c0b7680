//! Value enum for dynamic field values

use std::fmt;

use serde::Serialize;

/// A dynamic scalar value held by a record field.
///
/// The API speaks JSON, so a field is a string, a number, a boolean or
/// absent. Which of these a given key carries is decided by the schema that
/// describes it, never by the value type itself.
///
/// # Type Mapping
///
/// | JSON | Rust Variant |
/// |------|--------------|
/// | null / missing | `Null` |
/// | true / false | `Bool` |
/// | integer number | `Int` |
/// | fractional number | `Float` |
/// | string | `String` |
///
/// Arrays and objects are kept as their compact JSON text in `String`.
///
/// # Example
///
/// ```
/// use campus_lib::model::Value;
///
/// let name = Value::from("Ada");
/// let age = Value::from(30);
/// let empty = Value::Null;
/// assert_eq!(age.as_f64(), Some(30.0));
/// assert!(empty.is_null());
/// assert_eq!(name.to_string(), "Ada");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Null/absent value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this is an empty string.
    pub fn is_empty_string(&self) -> bool {
        matches!(self, Value::String(s) if s.is_empty())
    }

    /// Returns the numeric value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string slice, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Converts a decoded JSON value into a field value.
    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::String(s),
            other => Value::String(other.to_string()),
        }
    }
}

/// Displays the value the way a cell shows it. `Null` displays as nothing;
/// callers choose their own placeholder.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::from_json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(Value::from_json(serde_json::json!(30)), Value::Int(30));
        assert_eq!(Value::from_json(serde_json::json!(2.5)), Value::Float(2.5));
    }

    #[test]
    fn test_from_json_nested_kept_as_text() {
        let value = Value::from_json(serde_json::json!({"a": 1}));
        assert_eq!(value, Value::String("{\"a\":1}".to_string()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Float(30.0).to_string(), "30");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::from("CSE").to_string(), "CSE");
    }

    #[test]
    fn test_serialize_untagged() {
        let json = serde_json::to_string(&Value::Int(7)).unwrap();
        assert_eq!(json, "7");
        let json = serde_json::to_string(&Value::Null).unwrap();
        assert_eq!(json, "null");
    }
}
