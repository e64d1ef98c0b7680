use crate::event::{Key, Modifiers};

/// Outcome of feeding a key to a [`TextInputData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEditResult {
    /// The text changed.
    Changed,
    /// The key was consumed without changing the text (cursor moved).
    Handled,
    /// The key is not a text-editing key.
    Ignored,
}

/// Data for a single text input: text content and cursor state.
///
/// The cursor is a byte offset that always sits on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInputData {
    pub text: String,
    pub cursor: usize,
}

impl TextInputData {
    /// Create input data with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    /// Replace the text, placing the cursor at the end.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    /// Clamp the cursor after the text was replaced externally.
    pub fn clamp_cursor(&mut self) {
        if self.cursor > self.text.len() {
            self.cursor = self.text.len();
        }
        while !self.text.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    /// Handle a key press for text editing.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> TextEditResult {
        self.handle_key_filtered(key, modifiers, |_| true)
    }

    /// Handle a key press, inserting only characters accepted by `accept`.
    ///
    /// Rejected characters are consumed without effect, like a browser number
    /// input swallowing letters.
    pub fn handle_key_filtered(
        &mut self,
        key: Key,
        modifiers: Modifiers,
        accept: impl Fn(char) -> bool,
    ) -> TextEditResult {
        match key {
            Key::Char('u') if modifiers.ctrl => {
                if self.text.is_empty() {
                    TextEditResult::Handled
                } else {
                    self.set(String::new());
                    TextEditResult::Changed
                }
            }

            Key::Char(c) if modifiers.typing() => {
                if accept(c) {
                    self.insert_char(c);
                    TextEditResult::Changed
                } else {
                    TextEditResult::Handled
                }
            }

            Key::Backspace => {
                if self.delete_back() {
                    TextEditResult::Changed
                } else {
                    TextEditResult::Handled
                }
            }

            Key::Delete => {
                if self.delete_forward() {
                    TextEditResult::Changed
                } else {
                    TextEditResult::Handled
                }
            }

            Key::Left if modifiers.none() => {
                self.cursor = self.prev_boundary();
                TextEditResult::Handled
            }

            Key::Right if modifiers.none() => {
                self.cursor = self.next_boundary();
                TextEditResult::Handled
            }

            Key::Home => {
                self.cursor = 0;
                TextEditResult::Handled
            }

            Key::End => {
                self.cursor = self.text.len();
                TextEditResult::Handled
            }

            _ => TextEditResult::Ignored,
        }
    }

    fn insert_char(&mut self, c: char) {
        self.clamp_cursor();
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn delete_back(&mut self) -> bool {
        self.clamp_cursor();
        if self.cursor == 0 {
            return false;
        }
        let start = self.prev_boundary();
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
        true
    }

    fn delete_forward(&mut self) -> bool {
        self.clamp_cursor();
        if self.cursor >= self.text.len() {
            return false;
        }
        let end = self.next_boundary();
        self.text.replace_range(self.cursor..end, "");
        true
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor.min(self.text.len())]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        let cursor = self.cursor.min(self.text.len());
        self.text[cursor..]
            .chars()
            .next()
            .map(|c| cursor + c.len_utf8())
            .unwrap_or(self.text.len())
    }
}
