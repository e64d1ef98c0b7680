//! Custom serialization for Record to handle the API's document format.
//!
//! ## Write Format (Serialization)
//!
//! - Regular fields serialize normally: `"name": "Ada"`
//! - Null fields are skipped
//! - Metadata (`_id`, `__v`) is never written back
//!
//! ## Read Format (Deserialization)
//!
//! - `"_id"` is lifted into the record identifier (object ids such as
//!   `{"$oid": "..."}` keep their inner string)
//! - `"__v"` is lifted into the record version
//! - Everything else becomes a field

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Record;
use super::Value;
use super::record::INTERNAL_ID_KEY;
use super::record::VERSION_KEY;

// =============================================================================
// Serialization (for writes)
// =============================================================================

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let present = self.fields.values().filter(|v| !v.is_null()).count();
        let mut map = serializer.serialize_map(Some(present))?;

        for (key, value) in &self.fields {
            if value.is_null() {
                continue;
            }
            map.serialize_entry(key, value)?;
        }

        map.end()
    }
}

// =============================================================================
// Deserialization (from reads)
// =============================================================================

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing a record")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::new();

        while let Some(key) = map.next_key::<String>()? {
            let value: serde_json::Value = map.next_value()?;

            match key.as_str() {
                INTERNAL_ID_KEY => record.id = internal_id(value),
                VERSION_KEY => record.version = value.as_i64(),
                _ => {
                    record.fields.insert(key, Value::from_json(value));
                }
            }
        }

        Ok(record)
    }
}

fn internal_id(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Object(mut obj) => match obj.remove("$oid") {
            Some(serde_json::Value::String(s)) => Some(s),
            _ => Some(serde_json::Value::Object(obj).to_string()),
        },
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_lifts_metadata() {
        let json = r#"{"_id":"65f0","__v":0,"name":"Ada","age":30,"email":null}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.id(), Some("65f0"));
        assert_eq!(record.version(), Some(0));
        assert!(!record.contains("_id"));
        assert!(!record.contains("__v"));
        assert_eq!(record.get("age"), Some(&Value::Int(30)));
        assert_eq!(record.get("email"), Some(&Value::Null));
    }

    #[test]
    fn test_deserialize_object_id() {
        let json = r#"{"_id":{"$oid":"abc"},"name":"Ada"}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id(), Some("abc"));
    }

    #[test]
    fn test_serialize_skips_null_and_metadata() {
        let mut record = Record::new().set("name", "Ada").set("email", Value::Null);
        record.set_id("65f0");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Ada"}));
    }

    #[test]
    fn test_serialize_keeps_empty_strings() {
        let record = Record::new().set("name", "Ada").set("age", "");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Ada", "age": ""}));
    }
}
