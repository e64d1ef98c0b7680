//! Confirmation prompt for destructive actions.

use crate::button::ButtonView;
use crate::event::{EventResult, Key, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmEvent {
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmFocus {
    Cancel,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmView {
    pub title: String,
    pub description: String,
    pub cancel: ButtonView,
    /// Disabled and busy while loading.
    pub delete: ButtonView,
}

/// A Cancel / Delete prompt.
///
/// The dialog only signals intent. While the caller reports loading, Delete
/// cannot be activated, so one request per confirmation is all it can cause.
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    open: bool,
    title: String,
    description: String,
    focus: ConfirmFocus,
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmDialog {
    pub fn new() -> Self {
        Self {
            open: false,
            title: String::new(),
            description: String::new(),
            focus: ConfirmFocus::Cancel,
        }
    }

    pub fn open(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.open = true;
        self.title = title.into();
        self.description = description.into();
        self.focus = ConfirmFocus::Cancel;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// `y` or Enter on Delete confirms; Escape, `n` or Enter on Cancel cancels.
    pub fn handle_key(
        &mut self,
        key: Key,
        _modifiers: Modifiers,
        loading: bool,
    ) -> EventResult<ConfirmEvent> {
        if !self.open {
            return EventResult::Ignored;
        }
        match key {
            Key::Escape | Key::Char('n') => EventResult::Event(ConfirmEvent::Cancel),
            Key::Char('y') => self.confirm(loading),
            Key::Enter | Key::Char(' ') => match self.focus {
                ConfirmFocus::Cancel => EventResult::Event(ConfirmEvent::Cancel),
                ConfirmFocus::Delete => self.confirm(loading),
            },
            Key::Left | Key::Right | Key::Tab | Key::BackTab => {
                self.focus = match self.focus {
                    ConfirmFocus::Cancel => ConfirmFocus::Delete,
                    ConfirmFocus::Delete => ConfirmFocus::Cancel,
                };
                EventResult::Consumed
            }
            _ => EventResult::Consumed,
        }
    }

    fn confirm(&self, loading: bool) -> EventResult<ConfirmEvent> {
        if loading {
            EventResult::Consumed
        } else {
            EventResult::Event(ConfirmEvent::Confirm)
        }
    }

    pub fn view(&self, loading: bool) -> Option<ConfirmView> {
        self.open.then(|| ConfirmView {
            title: self.title.clone(),
            description: self.description.clone(),
            cancel: ButtonView::new("Cancel", true, self.focus == ConfirmFocus::Cancel),
            delete: ButtonView::new("Delete", !loading, self.focus == ConfirmFocus::Delete)
                .busy(loading),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_unreachable_while_loading() {
        let mut dialog = ConfirmDialog::new();
        dialog.open("Delete Student", "Sure?");
        assert_eq!(
            dialog.handle_key(Key::Char('y'), Modifiers::new(), true),
            EventResult::Consumed
        );
        dialog.handle_key(Key::Right, Modifiers::new(), true);
        assert_eq!(
            dialog.handle_key(Key::Enter, Modifiers::new(), true),
            EventResult::Consumed
        );
        assert_eq!(
            dialog.handle_key(Key::Enter, Modifiers::new(), false),
            EventResult::Event(ConfirmEvent::Confirm)
        );
    }

    #[test]
    fn test_enter_defaults_to_cancel() {
        let mut dialog = ConfirmDialog::new();
        dialog.open("Delete Student", "Sure?");
        assert_eq!(
            dialog.handle_key(Key::Enter, Modifiers::new(), false),
            EventResult::Event(ConfirmEvent::Cancel)
        );
    }

    #[test]
    fn test_loading_view() {
        let mut dialog = ConfirmDialog::new();
        dialog.open("Delete Student", "Sure?");
        let view = dialog.view(true).expect("open");
        assert!(!view.delete.enabled);
        assert!(view.delete.busy);
        assert!(view.cancel.enabled);
    }
}
