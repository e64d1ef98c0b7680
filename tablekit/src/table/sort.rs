//! Client-side sorting.

use std::cmp::Ordering;

use campus_lib::model::{Record, Value};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// The table's sort: a column key and direction, or unsorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<(String, SortDirection)>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorted by `key` in `direction`.
    pub fn by(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            active: Some((key.into(), direction)),
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.active.as_ref().map(|(k, _)| k.as_str())
    }

    pub fn direction(&self) -> Option<SortDirection> {
        self.active.as_ref().map(|(_, d)| *d)
    }

    /// Direction `key` is sorted in, if it is the active column.
    pub fn direction_of(&self, key: &str) -> Option<SortDirection> {
        match &self.active {
            Some((k, d)) if k == key => Some(*d),
            _ => None,
        }
    }

    pub fn is_sorted(&self) -> bool {
        self.active.is_some()
    }

    /// Advance the cycle for a header activation on `key`.
    ///
    /// Same column: ascending -> descending -> unsorted. Another column:
    /// ascending, replacing the previous sort.
    pub fn toggle(&mut self, key: &str) {
        self.active = match self.active.take() {
            Some((k, SortDirection::Ascending)) if k == key => {
                Some((k, SortDirection::Descending))
            }
            Some((k, SortDirection::Descending)) if k == key => None,
            _ => Some((key.to_string(), SortDirection::Ascending)),
        };
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Hint describing what the next activation on `key` does.
    pub fn hint(&self, key: &str) -> &'static str {
        match self.direction_of(key) {
            None => "Sort ascending",
            Some(SortDirection::Ascending) => "Sort descending",
            Some(SortDirection::Descending) => "Reset to original order",
        }
    }
}

/// Compare two values in ascending order.
///
/// Null is greater than any defined value. Two numbers compare numerically;
/// any other pair compares as text with [`collate`].
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }

    collate(&a.to_string(), &b.to_string())
}

/// Case-insensitive text order that files accented letters with their base
/// letter: `"Émile" < "Zoe"`, and `"e" < "é" < "f"`.
pub fn collate(a: &str, b: &str) -> Ordering {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    fold(&a).cmp(fold(&b)).then_with(|| a.cmp(&b))
}

/// Strip combining marks after canonical decomposition.
fn fold(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().filter(|c| !is_combining_mark(*c))
}

/// Indices of `records` in display order.
///
/// Unsorted yields the natural order. Sorting is stable and never touches
/// the input; a key missing from a record compares as null. Descending is
/// the exact mirror of ascending, so nulls lead.
pub fn sorted_indices(records: &[Record], sort: &SortState) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..records.len()).collect();

    let Some((key, direction)) = &sort.active else {
        return indices;
    };

    indices.sort_by(|&i, &j| {
        let ord = compare_values(records[i].value(key), records[j].value(key));
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    indices
}

/// Records in display order, borrowed from `records`.
pub fn sorted<'a>(records: &'a [Record], sort: &SortState) -> Vec<&'a Record> {
    sorted_indices(records, sort)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_cycle() {
        let mut sort = SortState::new();
        sort.toggle("name");
        assert_eq!(sort.direction_of("name"), Some(SortDirection::Ascending));
        sort.toggle("name");
        assert_eq!(sort.direction_of("name"), Some(SortDirection::Descending));
        sort.toggle("name");
        assert!(!sort.is_sorted());
    }

    #[test]
    fn test_toggle_other_column_restarts_ascending() {
        let mut sort = SortState::by("name", SortDirection::Descending);
        sort.toggle("age");
        assert_eq!(sort.key(), Some("age"));
        assert_eq!(sort.direction(), Some(SortDirection::Ascending));
        assert_eq!(sort.direction_of("name"), None);
    }

    #[test]
    fn test_compare_nulls_greatest() {
        assert_eq!(compare_values(&Value::Null, &Value::Int(1)), Ordering::Greater);
        assert_eq!(compare_values(&Value::from("a"), &Value::Null), Ordering::Less);
        assert_eq!(compare_values(&Value::Null, &Value::Null), Ordering::Equal);
    }

    #[test]
    fn test_compare_numbers_numerically() {
        assert_eq!(compare_values(&Value::Int(9), &Value::Int(10)), Ordering::Less);
        assert_eq!(
            compare_values(&Value::Float(2.5), &Value::Int(2)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_compare_text_case_insensitive() {
        assert_eq!(
            compare_values(&Value::from("alice"), &Value::from("Bob")),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&Value::from("ADA"), &Value::from("ada")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_accented_text_sorts_with_base_letter() {
        assert_eq!(collate("Émile", "Zoe"), Ordering::Less);
        assert_eq!(collate("zoë", "Zoe"), Ordering::Greater);
        assert_eq!(collate("e", "é"), Ordering::Less);
        assert_eq!(collate("é", "f"), Ordering::Less);
        assert_eq!(collate("ÉMILE", "émile"), Ordering::Equal);
    }

    #[test]
    fn test_mixed_number_and_text_compare_as_text() {
        // "10" < "9" as text
        assert_eq!(
            compare_values(&Value::Int(10), &Value::from("9")),
            Ordering::Less
        );
    }

    #[test]
    fn test_hint_follows_cycle() {
        let mut sort = SortState::new();
        assert_eq!(sort.hint("name"), "Sort ascending");
        sort.toggle("name");
        assert_eq!(sort.hint("name"), "Sort descending");
        sort.toggle("name");
        assert_eq!(sort.hint("name"), "Reset to original order");
    }
}
