//! Sortable, filterable, paginated record table.
//!
//! Sorting is applied to the records handed in; filtering and pagination
//! are owned by the caller, who usually fetches with the filters as query
//! parameters and slices nothing itself.

mod events;
mod render;
mod sort;
mod state;

pub use events::TableEvent;
pub use render::{
    FilterCell, FooterView, HeaderCell, RowView, TableBody, TableView, cell_text,
};
pub use sort::{SortDirection, SortState, collate, compare_values, sorted, sorted_indices};
pub use state::{RowAction, Table, TableFocus, TableProps};
