//! Key handling for the Table component.

use log::debug;

use super::state::{RowAction, Table, TableFocus, TableProps, filter_text};
use crate::event::{EventResult, Key, Modifiers};
use crate::pagination::next_page_size;
use crate::text_input::{TextEditResult, TextInputData};

/// What the caller must do after a table key.
///
/// Record indices refer to the caller's `records` slice, not to display
/// positions, so they survive any sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// A filter input's text changed.
    FilterChanged { key: String, value: String },
    /// Apply the current filters (fetch).
    ApplyFilters,
    /// Reset every filter to empty and fetch.
    ClearFilters,
    /// Go to this 1-based page.
    PageChanged(usize),
    /// Use this page size.
    PageSizeChanged(usize),
    View(usize),
    Edit(usize),
    Delete(usize),
}

impl Table {
    /// Handle a key press against the current props.
    pub fn handle_key(
        &mut self,
        key: Key,
        modifiers: Modifiers,
        props: &TableProps,
    ) -> EventResult<TableEvent> {
        let grid = self.grid(props);
        let Some((r, c)) = self.resolve(&grid) else {
            return EventResult::Ignored;
        };
        let focus = grid[r][c];
        // repair focus that pointed at a control which went away
        self.focus_on(focus, props);

        if let TableFocus::Filter(col) = focus {
            let result = self.edit_filter(col, key, modifiers, props);
            if !result.is_ignored() {
                return result;
            }
        }

        match key {
            Key::PageUp => return self.go_previous(props),
            Key::PageDown => return self.go_next(props),
            _ => {}
        }

        if let TableFocus::Row { row, .. } = focus
            && modifiers.none()
        {
            let shortcut = match key {
                Key::Char('v') => Some(RowAction::View),
                Key::Char('e') => Some(RowAction::Edit),
                Key::Char('d') => Some(RowAction::Delete),
                _ => None,
            };
            if let Some(action) = shortcut {
                return self.row_event(row, action, props);
            }
        }

        match key {
            Key::Enter | Key::Char(' ') => self.activate(focus, props),
            Key::Up => self.move_to(&grid, r.checked_sub(1), c, props),
            Key::Down => self.move_to(&grid, Some(r + 1), c, props),
            Key::Left => match c.checked_sub(1) {
                Some(c) => {
                    self.focus_on(grid[r][c], props);
                    EventResult::Consumed
                }
                None => EventResult::Consumed,
            },
            Key::Right => {
                if c + 1 < grid[r].len() {
                    self.focus_on(grid[r][c + 1], props);
                }
                EventResult::Consumed
            }
            Key::Tab => self.step(&grid, r, c, true, props),
            Key::BackTab => self.step(&grid, r, c, false, props),
            Key::Home => {
                self.focus_on(grid[0][0], props);
                EventResult::Consumed
            }
            Key::End => {
                let last = &grid[grid.len() - 1];
                self.focus_on(last[last.len() - 1], props);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn edit_filter(
        &mut self,
        col: usize,
        key: Key,
        modifiers: Modifiers,
        props: &TableProps,
    ) -> EventResult<TableEvent> {
        if key == Key::Enter {
            return if self.apply_filters {
                EventResult::Event(TableEvent::ApplyFilters)
            } else {
                EventResult::Consumed
            };
        }

        let Some(column) = props.columns.get(col) else {
            return EventResult::Ignored;
        };
        let mut input = TextInputData {
            text: filter_text(TableFocus::Filter(col), props).to_string(),
            cursor: self.filter_cursor,
        };
        input.clamp_cursor();

        let result = input.handle_key(key, modifiers);
        self.filter_cursor = input.cursor;
        match result {
            TextEditResult::Changed => EventResult::Event(TableEvent::FilterChanged {
                key: column.key.clone(),
                value: input.text,
            }),
            TextEditResult::Handled => EventResult::Consumed,
            TextEditResult::Ignored => EventResult::Ignored,
        }
    }

    fn activate(&mut self, focus: TableFocus, props: &TableProps) -> EventResult<TableEvent> {
        match focus {
            TableFocus::Header(col) => {
                if let Some(column) = props.columns.get(col) {
                    self.toggle_sort(&column.key, props.columns);
                    debug!("Sort is now {:?}", self.sort);
                }
                EventResult::Consumed
            }
            TableFocus::Filter(_) => EventResult::Consumed,
            TableFocus::ApplyFilters => EventResult::Event(TableEvent::ApplyFilters),
            TableFocus::ClearFilters => {
                self.filter_cursor = 0;
                EventResult::Event(TableEvent::ClearFilters)
            }
            TableFocus::Row { row, action } => self.row_event(row, action, props),
            TableFocus::PageSize => EventResult::Event(TableEvent::PageSizeChanged(
                next_page_size(props.pagination.page_size),
            )),
            TableFocus::Previous => self.go_previous(props),
            TableFocus::Next => self.go_next(props),
        }
    }

    fn row_event(
        &self,
        row: usize,
        action: RowAction,
        props: &TableProps,
    ) -> EventResult<TableEvent> {
        if props.loading {
            return EventResult::Consumed;
        }
        let Some(&index) = self.page_indices(props).get(row) else {
            return EventResult::Consumed;
        };
        EventResult::Event(match action {
            RowAction::View => TableEvent::View(index),
            RowAction::Edit => TableEvent::Edit(index),
            RowAction::Delete => TableEvent::Delete(index),
        })
    }

    fn go_previous(&self, props: &TableProps) -> EventResult<TableEvent> {
        if props.pagination.has_previous() {
            EventResult::Event(TableEvent::PageChanged(props.pagination.page - 1))
        } else {
            EventResult::Consumed
        }
    }

    fn go_next(&self, props: &TableProps) -> EventResult<TableEvent> {
        if props.pagination.has_next(props.records.len()) {
            EventResult::Event(TableEvent::PageChanged(props.pagination.page + 1))
        } else {
            EventResult::Consumed
        }
    }

    fn move_to(
        &mut self,
        grid: &[Vec<TableFocus>],
        row: Option<usize>,
        col: usize,
        props: &TableProps,
    ) -> EventResult<TableEvent> {
        if let Some(target) = row.and_then(|r| grid.get(r)) {
            self.focus_on(target[col.min(target.len() - 1)], props);
        }
        EventResult::Consumed
    }

    fn step(
        &mut self,
        grid: &[Vec<TableFocus>],
        r: usize,
        c: usize,
        forward: bool,
        props: &TableProps,
    ) -> EventResult<TableEvent> {
        let flat: Vec<TableFocus> = grid.iter().flatten().copied().collect();
        let current = grid[..r].iter().map(Vec::len).sum::<usize>() + c;
        let next = if forward {
            (current + 1) % flat.len()
        } else {
            (current + flat.len() - 1) % flat.len()
        };
        self.focus_on(flat[next], props);
        EventResult::Consumed
    }
}

#[cfg(test)]
mod tests {
    use campus_lib::model::Record;

    use super::*;
    use crate::filter::FilterState;
    use crate::pagination::Pagination;
    use crate::schema::Column;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name"),
            Column::new("age", "Age").not_filterable(),
        ]
    }

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record::new().set("name", format!("r{i}")).set("age", i as i64))
            .collect()
    }

    #[test]
    fn test_header_enter_cycles_sort() {
        let columns = columns();
        let records = records(3);
        let filters = FilterState::new();
        let props = TableProps {
            columns: &columns,
            records: &records,
            loading: false,
            filters: &filters,
            pagination: Pagination::default(),
        };
        let mut table = Table::new();
        assert!(table.set_focus(TableFocus::Header(1), &props));

        assert_eq!(
            table.handle_key(Key::Enter, Modifiers::new(), &props),
            EventResult::Consumed
        );
        assert_eq!(table.display_order(&props), vec![0, 1, 2]);
        table.handle_key(Key::Enter, Modifiers::new(), &props);
        assert_eq!(table.display_order(&props), vec![2, 1, 0]);
        table.handle_key(Key::Enter, Modifiers::new(), &props);
        assert!(!table.sort(&columns).is_sorted());
    }

    #[test]
    fn test_typing_in_filter_reports_full_text() {
        let columns = columns();
        let records = records(1);
        let mut filters = FilterState::new();
        filters.set("name", "ad");
        let props = TableProps {
            columns: &columns,
            records: &records,
            loading: false,
            filters: &filters,
            pagination: Pagination::default(),
        };
        let mut table = Table::new().with_filter_actions();
        table.set_focus(TableFocus::Filter(0), &props);

        let result = table.handle_key(Key::Char('a'), Modifiers::new(), &props);
        assert_eq!(
            result,
            EventResult::Event(TableEvent::FilterChanged {
                key: "name".into(),
                value: "ada".into()
            })
        );
    }

    #[test]
    fn test_enter_in_filter_applies_only_when_enabled() {
        let columns = columns();
        let records = records(1);
        let filters = FilterState::new();
        let props = TableProps {
            columns: &columns,
            records: &records,
            loading: false,
            filters: &filters,
            pagination: Pagination::default(),
        };

        let mut plain = Table::new();
        plain.set_focus(TableFocus::Filter(0), &props);
        assert_eq!(
            plain.handle_key(Key::Enter, Modifiers::new(), &props),
            EventResult::Consumed
        );

        let mut with_apply = Table::new().with_apply_filters();
        with_apply.set_focus(TableFocus::Filter(0), &props);
        assert_eq!(
            with_apply.handle_key(Key::Enter, Modifiers::new(), &props),
            EventResult::Event(TableEvent::ApplyFilters)
        );
    }

    #[test]
    fn test_row_shortcuts_report_record_index_under_sort() {
        let columns = columns();
        let records = records(3);
        let filters = FilterState::new();
        let props = TableProps {
            columns: &columns,
            records: &records,
            loading: false,
            filters: &filters,
            pagination: Pagination::default(),
        };
        let mut table = Table::new();
        table.toggle_sort("age", &columns);
        table.toggle_sort("age", &columns);
        table.set_focus(
            TableFocus::Row {
                row: 0,
                action: RowAction::View,
            },
            &props,
        );

        assert_eq!(
            table.handle_key(Key::Char('d'), Modifiers::new(), &props),
            EventResult::Event(TableEvent::Delete(2))
        );
        assert_eq!(
            table.handle_key(Key::Enter, Modifiers::new(), &props),
            EventResult::Event(TableEvent::View(2))
        );
    }

    #[test]
    fn test_page_keys_respect_bounds() {
        let columns = columns();
        let records = records(25);
        let filters = FilterState::new();
        let mut props = TableProps {
            columns: &columns,
            records: &records,
            loading: false,
            filters: &filters,
            pagination: Pagination::new(1, 10),
        };
        let mut table = Table::new();

        assert_eq!(
            table.handle_key(Key::PageUp, Modifiers::new(), &props),
            EventResult::Consumed
        );
        assert_eq!(
            table.handle_key(Key::PageDown, Modifiers::new(), &props),
            EventResult::Event(TableEvent::PageChanged(2))
        );

        props.pagination = Pagination::new(3, 10);
        assert_eq!(
            table.handle_key(Key::PageDown, Modifiers::new(), &props),
            EventResult::Consumed
        );
    }

    #[test]
    fn test_page_size_cycles() {
        let columns = columns();
        let records = records(5);
        let filters = FilterState::new();
        let props = TableProps {
            columns: &columns,
            records: &records,
            loading: false,
            filters: &filters,
            pagination: Pagination::new(1, 10),
        };
        let mut table = Table::new();
        assert!(table.set_focus(TableFocus::PageSize, &props));
        assert_eq!(
            table.handle_key(Key::Enter, Modifiers::new(), &props),
            EventResult::Event(TableEvent::PageSizeChanged(20))
        );
    }

    #[test]
    fn test_rows_not_focusable_while_loading() {
        let columns = columns();
        let records = records(2);
        let filters = FilterState::new();
        let props = TableProps {
            columns: &columns,
            records: &records,
            loading: true,
            filters: &filters,
            pagination: Pagination::default(),
        };
        let mut table = Table::new();
        assert!(!table.set_focus(
            TableFocus::Row {
                row: 0,
                action: RowAction::Edit
            },
            &props
        ));
    }

    #[test]
    fn test_focus_falls_back_when_rows_shrink() {
        let columns = columns();
        let many = records(5);
        let few = records(2);
        let filters = FilterState::new();
        let mut props = TableProps {
            columns: &columns,
            records: &many,
            loading: false,
            filters: &filters,
            pagination: Pagination::default(),
        };
        let mut table = Table::new();
        table.set_focus(
            TableFocus::Row {
                row: 4,
                action: RowAction::Edit,
            },
            &props,
        );

        props.records = &few;
        assert_eq!(
            table.focus(&props),
            Some(TableFocus::Row {
                row: 1,
                action: RowAction::Edit
            })
        );
    }

    #[test]
    fn test_tab_wraps_around() {
        let columns = columns();
        let records = records(0);
        let filters = FilterState::new();
        let props = TableProps {
            columns: &columns,
            records: &records,
            loading: false,
            filters: &filters,
            pagination: Pagination::default(),
        };
        let mut table = Table::new();
        table.set_focus(TableFocus::Filter(0), &props);
        table.handle_key(Key::Tab, Modifiers::new(), &props);
        assert_eq!(table.focus(&props), Some(TableFocus::Header(0)));
    }
}
