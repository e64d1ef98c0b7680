//! View model for the Table component.

use campus_lib::model::Value;

use super::sort::SortDirection;
use super::state::{RowAction, Table, TableFocus, TableProps, filter_text};
use crate::PLACEHOLDER;
use crate::button::ButtonView;
use crate::pagination::PAGE_SIZES;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub sort: Option<SortDirection>,
    /// What activating the header does next.
    pub hint: &'static str,
    pub focused: bool,
}

impl HeaderCell {
    /// Arrow shown after the label.
    pub fn indicator(&self) -> &'static str {
        match self.sort {
            Some(SortDirection::Ascending) => "▲",
            Some(SortDirection::Descending) => "▼",
            None => "↕",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCell {
    pub key: String,
    /// "Filter <label>..."
    pub placeholder: String,
    pub text: String,
    /// Cursor byte offset when the input has focus.
    pub cursor: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Index into the caller's records.
    pub record_index: usize,
    /// Stable row key: the record id, else its index.
    pub key: String,
    pub cells: Vec<String>,
    pub focused_action: Option<RowAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    Loading,
    Empty,
    Rows(Vec<RowView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterView {
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub page_sizes: &'static [usize],
    pub page_size_focused: bool,
    pub previous: ButtonView,
    pub next: ButtonView,
}

impl FooterView {
    pub fn status(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

/// Everything needed to draw one frame of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub header: Vec<HeaderCell>,
    /// One slot per column; `None` for non-filterable columns.
    pub filters: Vec<Option<FilterCell>>,
    pub apply: Option<ButtonView>,
    pub clear: Option<ButtonView>,
    pub body: TableBody,
    /// Present only when there is at least one page.
    pub footer: Option<FooterView>,
}

impl TableView {
    /// Rows on the current page, or none while loading or empty.
    pub fn rows(&self) -> &[RowView] {
        match &self.body {
            TableBody::Rows(rows) => rows,
            _ => &[],
        }
    }

    pub fn has_filters(&self) -> bool {
        self.filters.iter().any(Option::is_some)
    }
}

/// Display text for a cell.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => PLACEHOLDER.to_string(),
        Some(value) => value.to_string(),
    }
}

impl Table {
    /// Build the view model for the current props.
    pub fn view(&self, props: &TableProps) -> TableView {
        let focus = self.focus(props);
        let sort = self.sort(props.columns);

        let header = props
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| HeaderCell {
                key: column.key.clone(),
                label: column.label.clone(),
                sort: sort.direction_of(&column.key),
                hint: sort.hint(&column.key),
                focused: focus == Some(TableFocus::Header(i)),
            })
            .collect();

        let filters = props
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                column.filterable.then(|| {
                    let slot = TableFocus::Filter(i);
                    FilterCell {
                        key: column.key.clone(),
                        placeholder: format!("Filter {}...", column.label),
                        text: filter_text(slot, props).to_string(),
                        cursor: (focus == Some(slot)).then_some(self.filter_cursor),
                    }
                })
            })
            .collect();

        let apply = self.apply_filters.then(|| {
            ButtonView::new(
                "Filter",
                !props.loading,
                focus == Some(TableFocus::ApplyFilters),
            )
        });
        let clear = self.clear_filters.then(|| {
            ButtonView::new("Clear", true, focus == Some(TableFocus::ClearFilters))
        });

        let body = if props.loading {
            TableBody::Loading
        } else if props.records.is_empty() {
            TableBody::Empty
        } else {
            let rows = self
                .page_indices(props)
                .into_iter()
                .enumerate()
                .map(|(row, index)| {
                    let record = &props.records[index];
                    RowView {
                        record_index: index,
                        key: record
                            .id()
                            .map(str::to_string)
                            .unwrap_or_else(|| index.to_string()),
                        cells: props
                            .columns
                            .iter()
                            .map(|c| cell_text(record.get(&c.key)))
                            .collect(),
                        focused_action: match focus {
                            Some(TableFocus::Row { row: r, action }) if r == row => Some(action),
                            _ => None,
                        },
                    }
                })
                .collect();
            TableBody::Rows(rows)
        };

        let len = props.records.len();
        let total_pages = props.pagination.total_pages(len);
        let footer = (total_pages > 0).then(|| FooterView {
            page: props.pagination.page,
            total_pages,
            page_size: props.pagination.page_size,
            page_sizes: &PAGE_SIZES,
            page_size_focused: focus == Some(TableFocus::PageSize),
            previous: ButtonView::new(
                "Previous",
                props.pagination.has_previous(),
                focus == Some(TableFocus::Previous),
            ),
            next: ButtonView::new(
                "Next",
                props.pagination.has_next(len),
                focus == Some(TableFocus::Next),
            ),
        });

        TableView {
            header,
            filters,
            apply,
            clear,
            body,
            footer,
        }
    }
}
