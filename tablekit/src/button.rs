//! Push buttons shared by every component view.

/// A push button as the painter needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: String,
    pub enabled: bool,
    pub focused: bool,
    /// Draw a spinner before the label.
    pub busy: bool,
}

impl ButtonView {
    pub fn new(label: impl Into<String>, enabled: bool, focused: bool) -> Self {
        Self {
            label: label.into(),
            enabled,
            focused,
            busy: false,
        }
    }

    pub fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }
}
