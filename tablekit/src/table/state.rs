//! Table component state.

use campus_lib::model::Record;

use super::sort::{SortState, sorted_indices};
use crate::filter::FilterState;
use crate::pagination::Pagination;
use crate::schema::Column;

/// Everything the caller owns and lends to the table for one frame.
#[derive(Debug, Clone, Copy)]
pub struct TableProps<'a> {
    pub columns: &'a [Column],
    /// Records in fetched order.
    pub records: &'a [Record],
    pub loading: bool,
    pub filters: &'a FilterState,
    pub pagination: Pagination,
}

/// Per-row action buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    View,
    Edit,
    Delete,
}

impl RowAction {
    pub const ALL: [RowAction; 3] = [RowAction::View, RowAction::Edit, RowAction::Delete];

    pub fn label(self) -> &'static str {
        match self {
            RowAction::View => "View",
            RowAction::Edit => "Edit",
            RowAction::Delete => "Delete",
        }
    }
}

/// The focusable control that receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFocus {
    /// Sort control of the column at this index.
    Header(usize),
    /// Filter input of the column at this index.
    Filter(usize),
    ApplyFilters,
    ClearFilters,
    /// Action button of a row; `row` indexes the visible page slice.
    Row { row: usize, action: RowAction },
    PageSize,
    Previous,
    Next,
}

/// A sortable, filterable, paginated record table.
///
/// The table owns only its sort and keyboard focus. Records, filters,
/// pagination and loading are passed in through [`TableProps`] on every call,
/// and everything the caller must act on comes back as a
/// [`TableEvent`](super::TableEvent).
///
/// # Example
///
/// ```
/// use campus_lib::model::Record;
/// use tablekit::filter::FilterState;
/// use tablekit::pagination::Pagination;
/// use tablekit::table::{Table, TableProps};
/// use tablekit::{Column, Key, Modifiers};
///
/// let columns = vec![Column::new("name", "Name")];
/// let records = vec![Record::new().set("name", "Grace"), Record::new().set("name", "Ada")];
/// let filters = FilterState::new();
/// let props = TableProps {
///     columns: &columns,
///     records: &records,
///     loading: false,
///     filters: &filters,
///     pagination: Pagination::default(),
/// };
///
/// let mut table = Table::new().with_filter_actions();
/// table.toggle_sort("name", &columns);
/// assert_eq!(table.display_order(&props), vec![1, 0]);
/// # let _ = (Key::Enter, Modifiers::new());
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    pub(super) sort: SortState,
    pub(super) focus: Option<TableFocus>,
    /// Byte cursor inside the focused filter input.
    pub(super) filter_cursor: usize,
    pub(super) apply_filters: bool,
    pub(super) clear_filters: bool,
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    pub fn new() -> Self {
        Self {
            sort: SortState::new(),
            focus: None,
            filter_cursor: 0,
            apply_filters: false,
            clear_filters: false,
        }
    }

    /// Show the "Filter" button and let Enter in a filter input apply.
    pub fn with_apply_filters(mut self) -> Self {
        self.apply_filters = true;
        self
    }

    /// Show the "Clear" button.
    pub fn with_clear_filters(mut self) -> Self {
        self.clear_filters = true;
        self
    }

    /// Enable both filter buttons.
    pub fn with_filter_actions(self) -> Self {
        self.with_apply_filters().with_clear_filters()
    }

    // -------------------------------------------------------------------------
    // Sort
    // -------------------------------------------------------------------------

    /// The current sort, as seen against `columns`.
    ///
    /// A sort on a key that left the schema reads as unsorted.
    pub fn sort(&self, columns: &[Column]) -> SortState {
        match self.sort.key() {
            Some(key) if !columns.iter().any(|c| c.key == key) => SortState::new(),
            _ => self.sort.clone(),
        }
    }

    /// Activate the sort control of `key`. Keys outside `columns` are ignored.
    pub fn toggle_sort(&mut self, key: &str, columns: &[Column]) -> bool {
        if !columns.iter().any(|c| c.key == key) {
            return false;
        }
        if self.sort(columns).key().is_none() {
            self.sort.clear();
        }
        self.sort.toggle(key);
        true
    }

    /// Indices into `props.records` in sorted order.
    pub fn display_order(&self, props: &TableProps) -> Vec<usize> {
        sorted_indices(props.records, &self.sort(props.columns))
    }

    /// Indices into `props.records` of the visible page.
    pub fn page_indices(&self, props: &TableProps) -> Vec<usize> {
        let order = self.display_order(props);
        let range = props.pagination.range(order.len());
        order[range].to_vec()
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    /// The focused control, resolved against the current props.
    pub fn focus(&self, props: &TableProps) -> Option<TableFocus> {
        let grid = self.grid(props);
        self.resolve(&grid).map(|(r, c)| grid[r][c])
    }

    /// Move focus to a control; ignored if it is not focusable right now.
    pub fn set_focus(&mut self, focus: TableFocus, props: &TableProps) -> bool {
        let grid = self.grid(props);
        if grid.iter().flatten().any(|f| *f == focus) {
            self.focus_on(focus, props);
            true
        } else {
            false
        }
    }

    /// Returns `true` while a filter input has focus and captures typing.
    pub fn is_editing(&self, props: &TableProps) -> bool {
        matches!(self.focus(props), Some(TableFocus::Filter(_)))
    }

    pub(super) fn focus_on(&mut self, focus: TableFocus, props: &TableProps) {
        if Some(focus) != self.focus {
            // entering a filter input puts the cursor at the end
            self.filter_cursor = filter_text(focus, props).len();
        }
        self.focus = Some(focus);
    }

    /// Focusable controls laid out as rows: header, filters, one per visible
    /// record, footer. Empty rows are omitted.
    pub(super) fn grid(&self, props: &TableProps) -> Vec<Vec<TableFocus>> {
        let mut grid = Vec::new();

        let header: Vec<_> = (0..props.columns.len()).map(TableFocus::Header).collect();
        grid.push(header);

        let mut filters: Vec<_> = props
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.filterable)
            .map(|(i, _)| TableFocus::Filter(i))
            .collect();
        if self.apply_filters {
            filters.push(TableFocus::ApplyFilters);
        }
        if self.clear_filters {
            filters.push(TableFocus::ClearFilters);
        }
        grid.push(filters);

        if !props.loading {
            let visible = props.pagination.range(props.records.len()).len();
            for row in 0..visible {
                grid.push(
                    RowAction::ALL
                        .iter()
                        .map(|&action| TableFocus::Row { row, action })
                        .collect(),
                );
            }
        }

        if props.pagination.total_pages(props.records.len()) > 0 {
            grid.push(vec![
                TableFocus::PageSize,
                TableFocus::Previous,
                TableFocus::Next,
            ]);
        }

        grid.retain(|row| !row.is_empty());
        grid
    }

    /// Grid position of the focus, repairing focus that no longer exists.
    pub(super) fn resolve(&self, grid: &[Vec<TableFocus>]) -> Option<(usize, usize)> {
        let position = |target: TableFocus| {
            grid.iter().enumerate().find_map(|(r, row)| {
                row.iter().position(|f| *f == target).map(|c| (r, c))
            })
        };

        let Some(focus) = self.focus else {
            // nothing focused yet: start on the first row, else the first control
            let first_row = grid
                .iter()
                .position(|row| matches!(row.first(), Some(TableFocus::Row { .. })));
            return match first_row {
                Some(r) => Some((r, 0)),
                None if grid.is_empty() => None,
                None => Some((0, 0)),
            };
        };
        if let Some(pos) = position(focus) {
            return Some(pos);
        }

        // a row that scrolled away: fall back to the last visible row
        if let TableFocus::Row { action, .. } = focus {
            let last_row = grid.iter().enumerate().rev().find_map(|(r, row)| {
                matches!(row.first(), Some(TableFocus::Row { .. })).then_some(r)
            });
            if let Some(r) = last_row {
                let c = RowAction::ALL.iter().position(|a| *a == action).unwrap_or(0);
                return Some((r, c.min(grid[r].len() - 1)));
            }
        }

        if grid.is_empty() { None } else { Some((0, 0)) }
    }
}

/// Current text of the filter input behind `focus`, or `""`.
pub(super) fn filter_text<'a>(focus: TableFocus, props: &TableProps<'a>) -> &'a str {
    match focus {
        TableFocus::Filter(i) => props
            .columns
            .get(i)
            .map(|c| props.filters.get(&c.key))
            .unwrap_or(""),
        _ => "",
    }
}
