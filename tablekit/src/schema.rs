//! Column and field schemas.
//!
//! Schemas are the only place per-key typing lives. Components read records
//! exclusively through them.

/// Column configuration for a [`Table`](crate::table::Table).
///
/// # Examples
///
/// ```
/// use tablekit::Column;
///
/// let columns = vec![
///     Column::new("name", "Name"),
///     Column::new("age", "Age").not_filterable(),
/// ];
/// assert!(columns[0].filterable);
/// assert!(!columns[1].filterable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Record key shown in this column.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Whether the column gets a filter input.
    pub filterable: bool,
}

impl Column {
    /// Create a filterable column.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            filterable: true,
        }
    }

    /// Remove the column's filter input.
    pub fn not_filterable(mut self) -> Self {
        self.filterable = false;
        self
    }
}

/// Kind of input a form field renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Email,
    Number,
    Select,
}

/// Field configuration for a [`FormModal`](crate::form::FormModal).
///
/// # Examples
///
/// ```
/// use tablekit::{Field, InputKind};
///
/// let department = Field::select("department", "Department", ["CSE", "BBA"]).required();
/// assert_eq!(department.kind, InputKind::Select);
/// assert_eq!(department.options, vec!["CSE", "BBA"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Record key edited by this field.
    pub key: String,
    /// Label text.
    pub label: String,
    /// Input kind.
    pub kind: InputKind,
    /// Must be non-empty to submit.
    pub required: bool,
    /// Read-only; still submitted.
    pub disabled: bool,
    /// Allowed values for [`InputKind::Select`].
    pub options: Vec<String>,
}

impl Field {
    /// Create a field of the given kind.
    pub fn new(key: impl Into<String>, label: impl Into<String>, kind: InputKind) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            required: false,
            disabled: false,
            options: Vec::new(),
        }
    }

    /// Create a text field.
    pub fn text(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, InputKind::Text)
    }

    /// Create an email field.
    pub fn email(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, InputKind::Email)
    }

    /// Create a number field.
    pub fn number(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(key, label, InputKind::Number)
    }

    /// Create a select field over a closed option set.
    pub fn select<I, S>(key: impl Into<String>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            ..Self::new(key, label, InputKind::Select)
        }
    }

    /// Mark the field required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Returns `true` if `option` is one of the field's options.
    pub fn allows(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }
}

/// Returns a copy of `fields` with the field named `key` disabled.
///
/// Used to lock identifier fields on edit forms.
pub fn disable_field(fields: &[Field], key: &str) -> Vec<Field> {
    fields
        .iter()
        .map(|f| {
            if f.key == key {
                f.clone().disabled()
            } else {
                f.clone()
            }
        })
        .collect()
}
