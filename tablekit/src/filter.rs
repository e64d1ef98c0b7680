//! Caller-owned filter state.

use std::collections::BTreeMap;

/// Free-text filters keyed by column.
///
/// The table never stores filters itself: it reads a `&FilterState` when
/// building its view and reports keystrokes as
/// [`TableEvent::FilterChanged`](crate::table::TableEvent::FilterChanged).
/// The caller applies the change and decides when to fetch.
///
/// # Example
///
/// ```
/// use tablekit::filter::FilterState;
///
/// let mut filters = FilterState::new();
/// filters.set("name", "  ada ");
/// filters.set("email", "   ");
///
/// let active: Vec<_> = filters.active().collect();
/// assert_eq!(active, vec![("name", "ada")]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    values: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text for a column, or `""`.
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// Set the text for a column. Text is stored verbatim.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Remove every filter.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Returns `true` if no key has any text, blank or not.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Filters with non-blank text, trimmed, in key order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), v.trim()))
            .filter(|(_, v)| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_is_empty() {
        assert_eq!(FilterState::new().get("name"), "");
    }

    #[test]
    fn test_set_keeps_raw_text() {
        let mut filters = FilterState::new();
        filters.set("name", " a ");
        assert_eq!(filters.get("name"), " a ");
    }
}
