//! Resource descriptors

use url::Url;

use crate::error::ApiError;
use crate::model::Value;

/// A collection exposed by the API.
///
/// Records in a collection are addressed by their identifier field, whose
/// value is immutable once the record exists.
///
/// # Example
///
/// ```
/// use campus_lib::api::Resource;
///
/// let students = Resource::students();
/// assert_eq!(students.path(), "/api/student");
/// assert_eq!(students.id_field(), "registrationId");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    name: String,
    path: String,
    id_field: String,
}

impl Resource {
    /// Creates a descriptor for an arbitrary collection.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        id_field: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            id_field: id_field.into(),
        }
    }

    /// The student collection, keyed by registration id.
    pub fn students() -> Self {
        Self::new("students", "/api/student", "registrationId")
    }

    /// The teacher collection, keyed by teacher id.
    pub fn teachers() -> Self {
        Self::new("teachers", "/api/teacher", "teacherId")
    }

    /// Plural name used in logs and messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Collection path relative to the API root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Name of the identifier field.
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Builds the URL of a single record from its identifier value.
    pub(crate) fn item_url(&self, collection: &Url, id: &Value) -> Result<Url, ApiError> {
        if id.is_null() || id.is_empty_string() {
            return Err(ApiError::InvalidUrl(format!(
                "{}: missing {}",
                self.name, self.id_field
            )));
        }

        let mut url = collection.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(collection.to_string()))?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }
}
