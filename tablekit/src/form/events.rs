//! Key handling for the form modal.

use campus_lib::model::Record;

use super::state::{FormFocus, FormModal};
use super::validate::number_char;
use crate::event::{EventResult, Key, Modifiers};
use crate::schema::InputKind;
use crate::text_input::TextEditResult;

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// A valid working copy to create or update.
    Submit(Record),
    Cancel,
}

impl FormModal {
    /// Handle a key press. Closed forms ignore everything.
    pub fn handle_key(
        &mut self,
        key: Key,
        modifiers: Modifiers,
        loading: bool,
    ) -> EventResult<FormEvent> {
        if !self.open {
            return EventResult::Ignored;
        }
        if key == Key::Escape {
            return EventResult::Event(FormEvent::Cancel);
        }

        if let FormFocus::Field(i) = self.focus {
            let result = self.edit_field(i, key, modifiers);
            if !result.is_ignored() {
                return result;
            }
        }

        match key {
            Key::Enter => match self.focus {
                FormFocus::Cancel => EventResult::Event(FormEvent::Cancel),
                _ => self.try_submit(loading),
            },
            Key::Char('s') if modifiers.ctrl => self.try_submit(loading),
            Key::Tab | Key::Down => {
                self.step(true);
                EventResult::Consumed
            }
            Key::BackTab | Key::Up => {
                self.step(false);
                EventResult::Consumed
            }
            Key::Left if self.focus == FormFocus::Submit => {
                self.focus = FormFocus::Cancel;
                EventResult::Consumed
            }
            Key::Right if self.focus == FormFocus::Cancel => {
                self.focus = FormFocus::Submit;
                EventResult::Consumed
            }
            _ => EventResult::Consumed,
        }
    }

    fn try_submit(&mut self, loading: bool) -> EventResult<FormEvent> {
        match self.submit(loading) {
            Some(record) => EventResult::Event(FormEvent::Submit(record)),
            None => EventResult::Consumed,
        }
    }

    fn step(&mut self, forward: bool) {
        let order = self.focus_order();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let len = order.len();
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.focus = order[next];
    }

    fn edit_field(
        &mut self,
        index: usize,
        key: Key,
        modifiers: Modifiers,
    ) -> EventResult<FormEvent> {
        let Some(field) = self.fields.get(index) else {
            return EventResult::Ignored;
        };
        if field.disabled {
            return EventResult::Ignored;
        }
        let field_key = field.key.clone();

        if field.kind == InputKind::Select {
            let options = field.options.clone();
            if options.is_empty() {
                return EventResult::Ignored;
            }
            let current = options
                .iter()
                .position(|o| o.as_str() == self.text(&field_key));
            let next = match (key, current) {
                (Key::Right | Key::Char(' '), Some(i)) => (i + 1) % options.len(),
                (Key::Left, Some(i)) => (i + options.len() - 1) % options.len(),
                (Key::Right | Key::Char(' '), None) => 0,
                (Key::Left, None) => options.len() - 1,
                _ => return EventResult::Ignored,
            };
            self.select(&field_key, &options[next]);
            return EventResult::Consumed;
        }

        let number = field.kind == InputKind::Number;
        let mut input = self.inputs.get(&field_key).cloned().unwrap_or_default();
        input.clamp_cursor();
        let result = input.handle_key_filtered(key, modifiers, |c| !number || number_char(c));
        let text = input.text.clone();
        self.inputs.insert(field_key.clone(), input);

        match result {
            TextEditResult::Changed => {
                self.set_text(&field_key, text);
                EventResult::Consumed
            }
            TextEditResult::Handled => EventResult::Consumed,
            TextEditResult::Ignored => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use campus_lib::model::Value;

    use super::*;
    use crate::schema::Field;

    fn type_str(form: &mut FormModal, s: &str) {
        for c in s.chars() {
            form.handle_key(Key::Char(c), Modifiers::new(), false);
        }
    }

    #[test]
    fn test_typing_updates_working_copy() {
        let mut form = FormModal::new("Add", vec![Field::text("name", "Name")]);
        form.open(None);
        type_str(&mut form, "Ada");
        assert_eq!(form.working_copy().value("name"), &Value::from("Ada"));
    }

    #[test]
    fn test_number_input_swallows_letters() {
        let mut form = FormModal::new("Add", vec![Field::number("age", "Age")]);
        form.open(None);
        type_str(&mut form, "3x0");
        assert_eq!(form.text("age"), "30");
        assert_eq!(form.working_copy().value("age"), &Value::Int(30));
    }

    #[test]
    fn test_enter_submits_valid_form() {
        let mut form = FormModal::new("Add", vec![Field::text("name", "Name").required()]);
        form.open(None);
        assert_eq!(
            form.handle_key(Key::Enter, Modifiers::new(), false),
            EventResult::Consumed
        );
        type_str(&mut form, "Ada");
        match form.handle_key(Key::Enter, Modifiers::new(), false) {
            EventResult::Event(FormEvent::Submit(record)) => {
                assert_eq!(record.value("name"), &Value::from("Ada"));
            }
            other => panic!("expected submit, got {other:?}"),
        }
    }

    #[test]
    fn test_enter_while_loading_does_not_submit() {
        let mut form = FormModal::new("Add", vec![Field::text("name", "Name")]);
        form.open(None);
        assert_eq!(
            form.handle_key(Key::Enter, Modifiers::new(), true),
            EventResult::Consumed
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut form = FormModal::new("Add", vec![Field::text("name", "Name")]);
        form.open(None);
        assert_eq!(
            form.handle_key(Key::Escape, Modifiers::new(), false),
            EventResult::Event(FormEvent::Cancel)
        );
    }

    #[test]
    fn test_select_cycles_options() {
        let mut form = FormModal::new(
            "Add",
            vec![Field::select("department", "Department", ["CSE", "BBA"])],
        );
        form.open(None);
        form.handle_key(Key::Right, Modifiers::new(), false);
        assert_eq!(form.working_copy().value("department"), &Value::from("CSE"));
        form.handle_key(Key::Right, Modifiers::new(), false);
        assert_eq!(form.working_copy().value("department"), &Value::from("BBA"));
        form.handle_key(Key::Right, Modifiers::new(), false);
        assert_eq!(form.working_copy().value("department"), &Value::from("CSE"));
    }

    #[test]
    fn test_tab_reaches_cancel() {
        let mut form = FormModal::new("Add", vec![Field::text("name", "Name")]);
        form.open(None);
        form.handle_key(Key::Tab, Modifiers::new(), false);
        assert_eq!(form.focus(), FormFocus::Cancel);
        assert_eq!(
            form.handle_key(Key::Enter, Modifiers::new(), false),
            EventResult::Event(FormEvent::Cancel)
        );
    }

    #[test]
    fn test_closed_form_ignores_keys() {
        let mut form = FormModal::new("Add", vec![Field::text("name", "Name")]);
        assert!(form.handle_key(Key::Char('a'), Modifiers::new(), false).is_ignored());
    }
}
