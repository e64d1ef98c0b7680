//! Draw component view models into a [`Buffer`].
//!
//! Painters are plain functions of (buffer, area, view, theme). They never
//! look at component state, only at the view models the components build.

use crate::buffer::Buffer;
use crate::button::ButtonView;
use crate::confirm::ConfirmView;
use crate::detail::DetailView;
use crate::form::{FieldView, FormView};
use crate::layout::Rect;
use crate::schema::InputKind;
use crate::table::{RowAction, TableBody, TableView};
use crate::text::{display_width, truncate_to_width, wrap_words};
use crate::theme::{Brush, TextStyle, Theme};

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Width of the fixed Actions column.
const ACTIONS_WIDTH: u16 = 24;

/// Spinner glyph for animation frame `tick`.
pub fn spinner(tick: usize) -> char {
    SPINNER[tick % SPINNER.len()]
}

/// Draw a bordered box with a title and return its interior.
pub fn frame(buf: &mut Buffer, area: Rect, title: &str, theme: &Theme) -> Rect {
    if area.width < 2 || area.height < 2 {
        return Rect::default();
    }
    buf.fill(area, theme.surface);
    let border = Brush::new(theme.border, theme.surface);
    let right = area.right() - 1;
    let bottom = area.bottom() - 1;

    for x in area.x + 1..right {
        buf.write_str(x, area.y, x + 1, "─", border);
        buf.write_str(x, bottom, x + 1, "─", border);
    }
    for y in area.y + 1..bottom {
        buf.write_str(area.x, y, area.x + 1, "│", border);
        buf.write_str(right, y, right + 1, "│", border);
    }
    buf.write_str(area.x, area.y, area.x + 1, "╭", border);
    buf.write_str(right, area.y, right + 1, "╮", border);
    buf.write_str(area.x, bottom, area.x + 1, "╰", border);
    buf.write_str(right, bottom, right + 1, "╯", border);

    if !title.is_empty() {
        let title = format!(" {title} ");
        buf.write_str(
            area.x + 2,
            area.y,
            right,
            &title,
            Brush::new(theme.text, theme.surface).style(TextStyle::new().bold()),
        );
    }
    area.shrink(1, 2, 1, 2)
}

/// Draw a button; returns the column after it.
pub fn button(
    buf: &mut Buffer,
    x: u16,
    y: u16,
    max_x: u16,
    view: &ButtonView,
    theme: &Theme,
    tick: usize,
) -> u16 {
    let label = if view.busy {
        format!("[{} {}]", spinner(tick), view.label)
    } else {
        format!("[{}]", view.label)
    };
    let fg = if view.enabled { theme.text } else { theme.disabled };
    let mut style = TextStyle::new();
    if view.focused {
        style = style.reverse();
    }
    if !view.enabled {
        style = style.dim();
    }
    buf.write_str(x, y, max_x, &label, Brush::new(fg, theme.surface).style(style))
}

fn column_widths(count: usize, available: u16) -> Vec<u16> {
    if count == 0 {
        return Vec::new();
    }
    let share = (available / count as u16).max(6);
    vec![share; count]
}

/// Draw a table view into `area`.
pub fn paint_table(buf: &mut Buffer, area: Rect, view: &TableView, theme: &Theme, tick: usize) {
    if area.is_empty() {
        return;
    }
    buf.fill(area, theme.surface);
    let normal = Brush::new(theme.text, theme.surface);
    let muted = Brush::new(theme.muted, theme.surface);

    let data_width = area.width.saturating_sub(ACTIONS_WIDTH);
    let widths = column_widths(view.header.len(), data_width);
    let actions_x = area.x + widths.iter().sum::<u16>().min(data_width);
    let max_x = area.right();

    // header
    let mut x = area.x;
    for (cell, &w) in view.header.iter().zip(&widths) {
        let text = format!("{} {}", cell.label, cell.indicator());
        let mut style = TextStyle::new().bold();
        if cell.focused {
            style = style.reverse();
        }
        let end = (x + w).min(max_x);
        buf.write_str(
            x,
            area.y,
            end,
            &truncate_to_width(&text, w.saturating_sub(1) as usize),
            normal.style(style),
        );
        x = end;
    }
    let bold = normal.style(TextStyle::new().bold());
    buf.write_str(actions_x, area.y, max_x, "Actions", bold);

    // filters
    let filter_y = area.y + 1;
    if view.has_filters() || view.apply.is_some() || view.clear.is_some() {
        let mut x = area.x;
        for (cell, &w) in view.filters.iter().zip(&widths) {
            let end = (x + w).min(max_x);
            if let Some(cell) = cell {
                let inner = w.saturating_sub(1) as usize;
                let (text, brush) = if cell.text.is_empty() && cell.cursor.is_none() {
                    (cell.placeholder.as_str(), muted)
                } else {
                    (cell.text.as_str(), normal)
                };
                let style = if cell.cursor.is_some() {
                    TextStyle::new().underline()
                } else {
                    TextStyle::new()
                };
                buf.fill(Rect::new(x, filter_y, w.saturating_sub(1), 1), theme.background);
                buf.write_str(
                    x,
                    filter_y,
                    end.saturating_sub(1),
                    &truncate_to_width(text, inner),
                    Brush::new(brush.fg, theme.background).style(style),
                );
                if let Some(cursor) = cell.cursor {
                    let col = x + display_width(&cell.text[..cursor.min(cell.text.len())]) as u16;
                    if col < end.saturating_sub(1) {
                        let caret = Brush::new(theme.focus, theme.background);
                        buf.write_str(col, filter_y, col + 1, "▏", caret);
                    }
                }
            }
            x = end;
        }
        let mut bx = actions_x;
        for b in [&view.apply, &view.clear].into_iter().flatten() {
            bx = button(buf, bx, filter_y, max_x, b, theme, tick) + 1;
        }
    }

    // separator
    let sep_y = area.y + 2;
    for x in area.x..max_x {
        buf.write_str(x, sep_y, x + 1, "─", Brush::new(theme.border, theme.surface));
    }

    let footer_rows = if view.footer.is_some() { 2 } else { 0 };
    let body = Rect::new(
        area.x,
        sep_y + 1,
        area.width,
        area.height.saturating_sub(3 + footer_rows),
    );

    match &view.body {
        TableBody::Loading => {
            let text = format!("{} Loading...", spinner(tick));
            centered_line(buf, body.row(0), &text, muted);
        }
        TableBody::Empty => centered_line(buf, body.row(0), "No records found", muted),
        TableBody::Rows(rows) => {
            for (i, row) in rows.iter().enumerate().take(body.height as usize) {
                let y = body.y + i as u16;
                let mut x = area.x;
                for (cell, &w) in row.cells.iter().zip(&widths) {
                    let end = (x + w).min(max_x);
                    let text = truncate_to_width(cell, w.saturating_sub(1) as usize);
                    buf.write_str(x, y, end, &text, normal);
                    x = end;
                }
                let mut ax = actions_x;
                for action in RowAction::ALL {
                    let mut style = TextStyle::new();
                    if row.focused_action == Some(action) {
                        style = style.reverse();
                    }
                    let fg = match action {
                        RowAction::Delete => theme.danger,
                        _ => theme.primary,
                    };
                    let brush = Brush::new(fg, theme.surface).style(style);
                    ax = buf.write_str(ax, y, max_x, action.label(), brush) + 2;
                }
            }
        }
    }

    if let Some(footer) = &view.footer {
        let y = area.bottom().saturating_sub(1);
        let sizes = footer
            .page_sizes
            .iter()
            .map(|s| {
                if *s == footer.page_size {
                    format!("[{s}]")
                } else {
                    s.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        let mut style = TextStyle::new();
        if footer.page_size_focused {
            style = style.reverse();
        }
        let x = buf.write_str(area.x, y, max_x, "Rows per page: ", muted);
        buf.write_str(x, y, max_x, &sizes, normal.style(style));

        let status = footer.status();
        let right_width = display_width(&status) as u16
            + display_width(&footer.previous.label) as u16
            + display_width(&footer.next.label) as u16
            + 8;
        let mut x = max_x.saturating_sub(right_width).max(area.x);
        x = buf.write_str(x, y, max_x, &status, muted) + 2;
        x = button(buf, x, y, max_x, &footer.previous, theme, tick) + 1;
        button(buf, x, y, max_x, &footer.next, theme, tick);
    }

    // what the focused header does next, on the spare row above the footer
    if let Some(cell) = view.header.iter().find(|c| c.focused) {
        let y = area.bottom().saturating_sub(footer_rows.max(1));
        if y > body.y {
            buf.write_str(area.x, y, max_x, cell.hint, muted);
        }
    }
}

fn centered_line(buf: &mut Buffer, row: Rect, text: &str, brush: Brush) {
    let width = display_width(text) as u16;
    let x = row.x + row.width.saturating_sub(width) / 2;
    buf.write_str(x, row.y, row.right(), text, brush);
}

fn field_line(field: &FieldView) -> String {
    match field.kind {
        InputKind::Select if field.text.is_empty() => format!("‹ {} ›", field.placeholder),
        InputKind::Select => format!("‹ {} ›", field.text),
        _ => field.text.clone(),
    }
}

/// Draw a form modal centered in `area`.
pub fn paint_form(buf: &mut Buffer, area: Rect, view: &FormView, theme: &Theme, tick: usize) {
    let height = (view.fields.len() as u16) * 3 + 4;
    let inner = frame(buf, area.centered(56, height), &view.title, theme);
    let normal = Brush::new(theme.text, theme.surface);
    let muted = Brush::new(theme.muted, theme.surface);

    for (i, field) in view.fields.iter().enumerate() {
        let y = inner.y + (i as u16) * 3;
        let label = if field.required {
            format!("{} *", field.label)
        } else {
            field.label.clone()
        };
        let bold = normal.style(TextStyle::new().bold());
        buf.write_str(inner.x, y, inner.right(), &label, bold);

        let input = Rect::new(inner.x, y + 1, inner.width, 1);
        let bg = if field.disabled { theme.surface } else { theme.background };
        buf.fill(input, bg);
        let fg = if field.disabled { theme.disabled } else { theme.text };
        let mut style = TextStyle::new();
        if field.focused {
            style = style.underline();
        }
        let line = field_line(field);
        let line = truncate_to_width(&line, input.width as usize);
        buf.write_str(input.x, input.y, input.right(), &line, Brush::new(fg, bg).style(style));
        if let Some(cursor) = field.cursor {
            let col = input.x + display_width(&field.text[..cursor.min(field.text.len())]) as u16;
            if col < input.right() {
                buf.write_str(col, input.y, col + 1, "▏", Brush::new(theme.focus, bg));
            }
        }

        if let Some(error) = &field.error {
            let brush = Brush::new(theme.danger, theme.surface);
            buf.write_str(inner.x, y + 2, inner.right(), error, brush);
        } else if field.focused && field.kind == InputKind::Select {
            buf.write_str(inner.x, y + 2, inner.right(), "←/→ to choose", muted);
        }
    }

    let y = inner.bottom().saturating_sub(1);
    let width =
        display_width(&view.cancel.label) as u16 + display_width(&view.submit.label) as u16 + 8;
    let x = inner.right().saturating_sub(width);
    let x = button(buf, x, y, inner.right(), &view.cancel, theme, tick) + 1;
    button(buf, x, y, inner.right(), &view.submit, theme, tick);
}

/// Draw a detail modal centered in `area`.
pub fn paint_detail(buf: &mut Buffer, area: Rect, view: &DetailView, theme: &Theme) {
    let height = view.rows.len() as u16 + 4;
    let inner = frame(buf, area.centered(56, height), &view.title, theme);
    let label_width = view
        .rows
        .iter()
        .map(|r| display_width(&r.label) as u16)
        .max()
        .unwrap_or(0)
        + 2;

    for (i, row) in view.rows.iter().enumerate() {
        let y = inner.y + 1 + i as u16;
        let label = Brush::new(theme.muted, theme.surface);
        buf.write_str(inner.x, y, inner.right(), &row.label, label);
        let value_x = inner.x + label_width;
        let width = inner.right().saturating_sub(value_x) as usize;
        let value = truncate_to_width(&row.value, width);
        let x = inner
            .right()
            .saturating_sub(display_width(&value) as u16)
            .max(value_x);
        buf.write_str(x, y, inner.right(), &value, Brush::new(theme.text, theme.surface));
    }
}

/// Draw a confirm dialog centered in `area`.
pub fn paint_confirm(buf: &mut Buffer, area: Rect, view: &ConfirmView, theme: &Theme, tick: usize) {
    let lines = wrap_words(&view.description, 44);
    let height = lines.len() as u16 + 5;
    let inner = frame(buf, area.centered(50, height), &view.title, theme);
    for (i, line) in lines.iter().enumerate() {
        let brush = Brush::new(theme.muted, theme.surface);
        buf.write_str(inner.x, inner.y + 1 + i as u16, inner.right(), line, brush);
    }

    let y = inner.bottom().saturating_sub(1);
    let width =
        display_width(&view.cancel.label) as u16 + display_width(&view.delete.label) as u16 + 8;
    let x = inner.right().saturating_sub(width);
    let x = button(buf, x, y, inner.right(), &view.cancel, theme, tick) + 1;
    let danger = Theme {
        text: theme.danger,
        ..*theme
    };
    button(buf, x, y, inner.right(), &view.delete, &danger, tick);
}
