//! Read-only record projection.

use campus_lib::model::{INTERNAL_ID_KEY, Record, VERSION_KEY};

use crate::event::{EventResult, Key, Modifiers};
use crate::table::cell_text;

/// Ordered key -> label pairs.
pub type LabelMap = Vec<(String, String)>;

/// Build a [`LabelMap`] from borrowed pairs.
pub fn label_map<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> LabelMap {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub key: String,
    pub label: String,
    pub value: String,
}

/// Project `record` through `labels`.
///
/// `None` renders nothing. Storage keys `_id` and `__v` are never shown;
/// missing and null values read as the placeholder.
///
/// ```
/// use campus_lib::model::{Record, Value};
/// use tablekit::detail::{detail_rows, label_map};
///
/// let labels = label_map([("name", "Name"), ("email", "Email")]);
/// let record = Record::new().set("name", "Ada").set("email", Value::Null);
/// let rows = detail_rows(&labels, Some(&record)).unwrap();
/// assert_eq!(rows[0].value, "Ada");
/// assert_eq!(rows[1].value, tablekit::PLACEHOLDER);
/// ```
pub fn detail_rows(labels: &[(String, String)], record: Option<&Record>) -> Option<Vec<DetailRow>> {
    let record = record?;
    Some(
        labels
            .iter()
            .filter(|(key, _)| key != INTERNAL_ID_KEY && key != VERSION_KEY)
            .map(|(key, label)| DetailRow {
                key: key.clone(),
                label: label.clone(),
                value: cell_text(record.get(key)),
            })
            .collect(),
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub rows: Vec<DetailRow>,
}

/// Modal showing one record.
#[derive(Debug, Clone)]
pub struct DetailModal {
    title: String,
    labels: LabelMap,
    record: Option<Record>,
}

impl DetailModal {
    pub fn new(title: impl Into<String>, labels: LabelMap) -> Self {
        Self {
            title: title.into(),
            labels,
            record: None,
        }
    }

    pub fn open(&mut self, record: Record) {
        self.record = Some(record);
    }

    pub fn close(&mut self) {
        self.record = None;
    }

    pub fn is_open(&self) -> bool {
        self.record.is_some()
    }

    pub fn record(&self) -> Option<&Record> {
        self.record.as_ref()
    }

    /// Escape, Enter or `q` closes.
    pub fn handle_key(&mut self, key: Key, _modifiers: Modifiers) -> EventResult<()> {
        if !self.is_open() {
            return EventResult::Ignored;
        }
        match key {
            Key::Escape | Key::Enter | Key::Char('q') => {
                self.close();
                EventResult::Event(())
            }
            _ => EventResult::Consumed,
        }
    }

    pub fn view(&self) -> Option<DetailView> {
        detail_rows(&self.labels, self.record.as_ref()).map(|rows| DetailView {
            title: self.title.clone(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use campus_lib::model::Value;

    use super::*;
    use crate::PLACEHOLDER;

    #[test]
    fn test_none_renders_nothing() {
        assert!(detail_rows(&label_map([("name", "Name")]), None).is_none());
    }

    #[test]
    fn test_storage_keys_excluded() {
        let labels = label_map([("_id", "Id"), ("name", "Name"), ("__v", "Version")]);
        let rows = detail_rows(&labels, Some(&Record::new().set("name", "Ada"))).expect("record");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "Name");
    }

    #[test]
    fn test_label_order_kept_and_placeholders() {
        let labels = label_map([("email", "Email"), ("age", "Age"), ("name", "Name")]);
        let record = Record::new().set("name", "Ada").set("age", Value::Null);
        let rows = detail_rows(&labels, Some(&record)).expect("record");
        let values: Vec<_> = rows.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec![PLACEHOLDER, PLACEHOLDER, "Ada"]);
    }

    #[test]
    fn test_modal_closes_on_escape() {
        let mut modal = DetailModal::new("Student Details", label_map([("name", "Name")]));
        modal.open(Record::new());
        assert_eq!(
            modal.handle_key(Key::Escape, Modifiers::new()),
            EventResult::Event(())
        );
        assert!(modal.view().is_none());
    }
}
