//! Form modal state.

use std::collections::{BTreeMap, HashSet};

use campus_lib::model::{Record, Value};
use log::debug;

use super::validate::{parse_number, validate};
use crate::schema::{Field, InputKind};
use crate::text_input::TextInputData;

/// The focusable control that receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(usize),
    Cancel,
    Submit,
}

/// A create/edit form driven by a field schema.
///
/// The working copy holds exactly one value per field key. It is seeded from
/// the initial record (or `""`) once per closed -> open transition and is
/// never touched by schema changes while open: [`set_fields`] on an open
/// form takes effect at the next open.
///
/// [`set_fields`]: FormModal::set_fields
///
/// # Example
///
/// ```
/// use campus_lib::model::{Record, Value};
/// use tablekit::Field;
/// use tablekit::form::FormModal;
///
/// let mut form = FormModal::new("Edit Student", vec![
///     Field::text("name", "Name"),
///     Field::number("age", "Age"),
/// ]);
/// form.open(Some(&Record::new().set("name", "Ada").set("age", 30)));
/// assert_eq!(form.working_copy().value("age"), &Value::Int(30));
///
/// form.set_text("age", "");
/// assert_eq!(form.working_copy().value("age"), &Value::from(""));
/// ```
#[derive(Debug, Clone)]
pub struct FormModal {
    pub(super) title: String,
    pub(super) fields: Vec<Field>,
    pending_fields: Option<Vec<Field>>,
    pub(super) open: bool,
    /// Opened with an initial record.
    pub(super) editing: bool,
    pub(super) values: Record,
    /// Raw text per field key, as typed.
    pub(super) inputs: BTreeMap<String, TextInputData>,
    /// Number fields whose text does not parse.
    pub(super) bad_numbers: HashSet<String>,
    pub(super) errors: BTreeMap<String, String>,
    pub(super) focus: FormFocus,
}

impl FormModal {
    pub fn new(title: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            title: title.into(),
            fields,
            pending_fields: None,
            open: false,
            editing: false,
            values: Record::new(),
            inputs: BTreeMap::new(),
            bad_numbers: HashSet::new(),
            errors: BTreeMap::new(),
            focus: FormFocus::Submit,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Replace the schema. While open the new schema waits for the next open.
    pub fn set_fields(&mut self, fields: Vec<Field>) {
        if self.open {
            self.pending_fields = Some(fields);
        } else {
            self.fields = fields;
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opened with an initial record; the submit button reads "Update".
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Open the form, seeding the working copy.
    ///
    /// Opening an already open form does nothing, so the working copy is
    /// seeded exactly once per open.
    pub fn open(&mut self, initial: Option<&Record>) {
        if self.open {
            return;
        }
        if let Some(fields) = self.pending_fields.take() {
            self.fields = fields;
        }

        self.open = true;
        self.editing = initial.is_some();
        self.values = Record::new();
        self.inputs.clear();
        self.bad_numbers.clear();
        self.errors.clear();

        for field in &self.fields {
            let value = match initial.and_then(|r| r.get(&field.key)) {
                Some(value) if !value.is_null() => value.clone(),
                _ => Value::from(""),
            };
            self.inputs
                .insert(field.key.clone(), TextInputData::new(value.to_string()));
            self.values.insert(field.key.clone(), value);
        }

        self.focus = self.first_editable().unwrap_or(FormFocus::Submit);
        debug!(
            "Opened form {:?} ({} fields, editing: {})",
            self.title,
            self.fields.len(),
            self.editing
        );
    }

    pub fn close(&mut self) {
        self.open = false;
        self.errors.clear();
        if let Some(fields) = self.pending_fields.take() {
            self.fields = fields;
        }
    }

    /// The current working copy: one value per field key.
    pub fn working_copy(&self) -> &Record {
        &self.values
    }

    /// Validation messages from the last rejected submit, by field key.
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Text currently shown in a field's input.
    pub fn text(&self, key: &str) -> &str {
        self.inputs.get(key).map(|i| i.text.as_str()).unwrap_or("")
    }

    /// Replace a text/email/number field's input text.
    ///
    /// Number fields store `""` for empty text and a number otherwise; text
    /// that is not a number stores `""` and fails validation until fixed.
    /// Returns `false` for unknown, disabled or select fields.
    pub fn set_text(&mut self, key: &str, text: impl Into<String>) -> bool {
        let text = text.into();
        let Some(kind) = self.field(key).filter(|f| !f.disabled).map(|f| f.kind) else {
            return false;
        };
        if kind == InputKind::Select {
            return false;
        }

        let value = if kind == InputKind::Number {
            match parse_number(&text) {
                Some(number) => {
                    self.bad_numbers.remove(key);
                    number
                }
                None => {
                    if text.trim().is_empty() {
                        self.bad_numbers.remove(key);
                    } else {
                        self.bad_numbers.insert(key.to_string());
                    }
                    Value::from("")
                }
            }
        } else {
            Value::from(text.as_str())
        };

        self.values.insert(key, value);
        self.errors.remove(key);
        let input = self.inputs.entry(key.to_string()).or_default();
        if input.text != text {
            input.set(text);
        }
        true
    }

    /// Choose an option of a select field. Non-members are refused.
    pub fn select(&mut self, key: &str, option: &str) -> bool {
        let Some(field) = self.field(key) else {
            return false;
        };
        if field.disabled || field.kind != InputKind::Select || !field.allows(option) {
            return false;
        }
        self.values.insert(key, option);
        self.inputs
            .insert(key.to_string(), TextInputData::new(option));
        self.errors.remove(key);
        true
    }

    /// Attempt a submission.
    ///
    /// Returns the full working copy when the form is open, not loading and
    /// every field passes validation. Otherwise records the validation
    /// messages, focuses the first invalid field and returns `None`. The form
    /// stays open either way; the caller closes it once the request succeeds.
    pub fn submit(&mut self, loading: bool) -> Option<Record> {
        if !self.open || loading {
            return None;
        }
        let bad_numbers = &self.bad_numbers;
        self.errors = validate(&self.fields, &self.values, &|key| bad_numbers.contains(key));
        if let Some(i) = self
            .fields
            .iter()
            .position(|f| self.errors.contains_key(&f.key))
        {
            debug!("Form {:?} rejected: {:?}", self.title, self.errors);
            self.focus = FormFocus::Field(i);
            return None;
        }
        Some(self.values.clone())
    }

    pub fn focus(&self) -> FormFocus {
        self.focus
    }

    pub(super) fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    fn first_editable(&self) -> Option<FormFocus> {
        self.fields
            .iter()
            .position(|f| !f.disabled)
            .map(FormFocus::Field)
    }

    /// Focus order: fields, then Cancel, then Submit.
    pub(super) fn focus_order(&self) -> Vec<FormFocus> {
        (0..self.fields.len())
            .map(FormFocus::Field)
            .chain([FormFocus::Cancel, FormFocus::Submit])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> Vec<Field> {
        vec![
            Field::text("name", "Name").required(),
            Field::number("age", "Age").required(),
        ]
    }

    #[test]
    fn test_create_seeds_empty_strings() {
        let mut form = FormModal::new("Add", fields());
        form.open(None);
        assert!(!form.is_editing());
        assert_eq!(form.working_copy().value("name"), &Value::from(""));
        assert_eq!(form.working_copy().value("age"), &Value::from(""));
        assert_eq!(form.working_copy().len(), 2);
    }

    #[test]
    fn test_seed_ignores_keys_outside_schema() {
        let mut form = FormModal::new("Edit", fields());
        let initial = Record::new().set("name", "Ada").set("extra", "x");
        form.open(Some(&initial));
        assert!(!form.working_copy().contains("extra"));
        assert_eq!(form.working_copy().value("age"), &Value::from(""));
    }

    #[test]
    fn test_reopen_while_open_keeps_edits() {
        let mut form = FormModal::new("Edit", fields());
        let initial = Record::new().set("name", "Ada");
        form.open(Some(&initial));
        form.set_text("name", "Grace");
        form.open(Some(&initial));
        assert_eq!(form.working_copy().value("name"), &Value::from("Grace"));

        form.close();
        form.open(Some(&initial));
        assert_eq!(form.working_copy().value("name"), &Value::from("Ada"));
    }

    #[test]
    fn test_schema_change_waits_for_next_open() {
        let mut form = FormModal::new("Add", fields());
        form.open(None);
        form.set_fields(vec![Field::text("title", "Title")]);
        assert!(form.working_copy().contains("name"));
        assert_eq!(form.fields().len(), 2);

        form.close();
        form.open(None);
        assert_eq!(form.fields().len(), 1);
        assert!(form.working_copy().contains("title"));
        assert!(!form.working_copy().contains("name"));
    }

    #[test]
    fn test_number_coercion() {
        let mut form = FormModal::new("Add", fields());
        form.open(None);
        form.set_text("age", "21");
        assert_eq!(form.working_copy().value("age"), &Value::Int(21));
        form.set_text("age", "");
        assert_eq!(form.working_copy().value("age"), &Value::from(""));
    }

    #[test]
    fn test_submit_blocked_by_required_and_loading() {
        let mut form = FormModal::new("Add", fields());
        form.open(None);
        form.set_text("name", "Ada");
        assert!(form.submit(false).is_none());
        assert!(form.errors().contains_key("age"));
        assert_eq!(form.focus(), FormFocus::Field(1));

        form.set_text("age", "30");
        assert!(form.submit(true).is_none());
        let payload = form.submit(false).expect("valid form submits");
        assert_eq!(payload.value("age"), &Value::Int(30));
    }

    #[test]
    fn test_disabled_field_is_submitted_but_not_editable() {
        let fields = vec![
            Field::number("registrationId", "Registration ID").required().disabled(),
            Field::text("name", "Name"),
        ];
        let mut form = FormModal::new("Edit", fields);
        form.open(Some(&Record::new().set("registrationId", 7).set("name", "Ada")));
        assert!(!form.set_text("registrationId", "8"));
        assert_eq!(form.focus(), FormFocus::Field(1));

        let payload = form.submit(false).expect("valid");
        assert_eq!(payload.value("registrationId"), &Value::Int(7));
    }

    #[test]
    fn test_select_refuses_non_members() {
        let fields = vec![Field::select("department", "Department", ["CSE", "BBA"])];
        let mut form = FormModal::new("Add", fields);
        form.open(None);
        assert!(!form.select("department", "ART"));
        assert!(form.select("department", "BBA"));
        assert_eq!(form.working_copy().value("department"), &Value::from("BBA"));
        assert!(!form.set_text("department", "CSE"));
    }
}
