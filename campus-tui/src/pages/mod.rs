//! Record pages: one generic controller, one [`PageSpec`] per resource.

mod controller;
mod students;
mod teachers;

pub use controller::{Completion, Effect, Mutation, PageController, Request};
pub use students::students;
pub use teachers::teachers;

use campus_lib::api::Resource;
use tablekit::detail::LabelMap;
use tablekit::schema::disable_field;
use tablekit::{Column, Field};

/// Departments offered by both record forms.
pub const DEPARTMENTS: [&str; 6] = ["CSE", "BBA", "MBA", "LAW", "PHARMACY", "ENGLISH"];

/// Everything that differs between the student and teacher pages.
#[derive(Debug, Clone)]
pub struct PageSpec {
    pub resource: Resource,
    /// Singular display name, e.g. "Student".
    pub kind: &'static str,
    /// Page heading, e.g. "Students".
    pub title: &'static str,
    pub subtitle: &'static str,
    pub columns: Vec<Column>,
    pub create_fields: Vec<Field>,
    pub labels: LabelMap,
    /// Field shown in the delete prompt.
    pub name_key: &'static str,
}

impl PageSpec {
    /// Create fields with the identifier locked.
    pub fn edit_fields(&self) -> Vec<Field> {
        disable_field(&self.create_fields, self.resource.id_field())
    }

    /// Plural used in messages, e.g. "students".
    pub fn records(&self) -> &str {
        self.resource.name()
    }

    pub fn create_title(&self) -> String {
        format!("Add {}", self.kind)
    }

    pub fn edit_title(&self) -> String {
        format!("Edit {}", self.kind)
    }

    pub fn detail_title(&self) -> String {
        format!("{} Details", self.kind)
    }

    pub fn delete_title(&self) -> String {
        format!("Delete {}", self.kind)
    }

    pub fn delete_description(&self, name: &str) -> String {
        format!("Are you sure you want to delete \"{name}\"? This action cannot be undone.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_fields_lock_identifier_only() {
        let spec = students();
        let locked: Vec<_> = spec
            .edit_fields()
            .into_iter()
            .filter(|f| f.disabled)
            .map(|f| f.key)
            .collect();
        assert_eq!(locked, vec!["registrationId"]);
        assert!(spec.create_fields.iter().all(|f| !f.disabled));
    }

    #[test]
    fn test_titles() {
        let spec = teachers();
        assert_eq!(spec.create_title(), "Add Teacher");
        assert_eq!(spec.edit_title(), "Edit Teacher");
        assert_eq!(spec.detail_title(), "Teacher Details");
        assert_eq!(spec.delete_title(), "Delete Teacher");
        assert_eq!(spec.records(), "teachers");
    }

    #[test]
    fn test_labels_cover_columns() {
        for spec in [students(), teachers()] {
            for column in &spec.columns {
                assert!(spec.labels.iter().any(|(key, _)| *key == column.key));
            }
        }
    }
}
