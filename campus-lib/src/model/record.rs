//! Dynamic record

use std::collections::HashMap;

use super::Value;

/// Key the API uses for its internal document identifier.
pub const INTERNAL_ID_KEY: &str = "_id";

/// Key the API uses for its internal document version.
pub const VERSION_KEY: &str = "__v";

/// A dynamic record returned by, or sent to, the API.
///
/// Records hold field values as a `HashMap<String, Value>`. The storage
/// identifier (`_id`) and version counter (`__v`) are metadata and are kept
/// out of the field map, so schema-driven views never see them.
///
/// # Example
///
/// ```
/// use campus_lib::model::Record;
///
/// let record = Record::new()
///     .set("name", "Ada")
///     .set("age", 30);
///
/// assert_eq!(record.value("name").as_str(), Some("Ada"));
/// assert!(record.value("email").is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    /// The storage identifier, if the record came from the API.
    pub(crate) id: Option<String>,

    /// The storage version counter.
    pub(crate) version: Option<i64>,

    /// The field values.
    pub(crate) fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Metadata accessors
    // =========================================================================

    /// Returns the storage identifier, if set.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the storage version counter, if set.
    pub fn version(&self) -> Option<i64> {
        self.version
    }

    /// Sets the storage identifier.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the field value, treating a missing field as `Null`.
    pub fn value(&self, field: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.fields.get(field).unwrap_or(&NULL)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }

    /// Returns a copy of the record without the given field.
    ///
    /// Used to strip the identifier from update payloads.
    pub fn without(&self, field: &str) -> Self {
        let mut copy = self.clone();
        copy.fields.remove(field);
        copy
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}
