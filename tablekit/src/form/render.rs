//! View model for the form modal.

use super::state::{FormFocus, FormModal};
use crate::button::ButtonView;
use crate::schema::InputKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub key: String,
    pub label: String,
    pub kind: InputKind,
    pub required: bool,
    pub disabled: bool,
    /// Input text; for selects, the chosen option or `""`.
    pub text: String,
    /// Shown while `text` is empty.
    pub placeholder: String,
    pub options: Vec<String>,
    pub focused: bool,
    /// Cursor byte offset when a text input has focus.
    pub cursor: Option<usize>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub fields: Vec<FieldView>,
    pub cancel: ButtonView,
    /// "Update" or "Create"; disabled and busy while loading.
    pub submit: ButtonView,
}

impl FormModal {
    /// Label of the submit button.
    pub fn submit_label(&self) -> &'static str {
        if self.editing { "Update" } else { "Create" }
    }

    /// Build the view model, or `None` while closed.
    pub fn view(&self, loading: bool) -> Option<FormView> {
        if !self.open {
            return None;
        }

        let fields = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let focused = self.focus == FormFocus::Field(i);
                let input = self.inputs.get(&field.key);
                FieldView {
                    key: field.key.clone(),
                    label: field.label.clone(),
                    kind: field.kind,
                    required: field.required,
                    disabled: field.disabled,
                    text: input.map(|i| i.text.clone()).unwrap_or_default(),
                    placeholder: match field.kind {
                        InputKind::Select => format!("Select {}", field.label.to_lowercase()),
                        _ => String::new(),
                    },
                    options: field.options.clone(),
                    focused,
                    cursor: match (focused, field.kind, input) {
                        (true, InputKind::Select, _) | (false, _, _) => None,
                        (true, _, Some(input)) => Some(input.cursor),
                        (true, _, None) => Some(0),
                    },
                    error: self.errors.get(&field.key).cloned(),
                }
            })
            .collect();

        Some(FormView {
            title: self.title.clone(),
            fields,
            cancel: ButtonView::new("Cancel", true, self.focus == FormFocus::Cancel),
            submit: ButtonView::new(
                self.submit_label(),
                !loading,
                self.focus == FormFocus::Submit,
            )
            .busy(loading),
        })
    }
}
