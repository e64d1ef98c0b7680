//! Cell buffer painted each frame and diffed against the previous one.

use crate::layout::Rect;
use crate::text::char_width;
use crate::theme::{Brush, Rgb, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: TextStyle,
    /// Right half of a double-width character.
    pub wide_continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            style: TextStyle::new(),
            wide_continuation: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Paint the background of `rect`.
    pub fn fill(&mut self, rect: Rect, bg: Rgb) {
        for y in rect.y..rect.bottom().min(self.height) {
            for x in rect.x..rect.right().min(self.width) {
                let idx = self.index(x, y);
                self.cells[idx] = Cell {
                    bg,
                    ..Cell::default()
                };
            }
        }
    }

    /// Write `text` at (x, y), clipped at `max_x`. Returns the column after
    /// the last written character.
    pub fn write_str(&mut self, x: u16, y: u16, max_x: u16, text: &str, brush: Brush) -> u16 {
        let Brush { fg, bg, style } = brush;
        let max_x = max_x.min(self.width);
        let mut col = x;
        for ch in text.chars() {
            let w = char_width(ch) as u16;
            if w == 0 {
                continue;
            }
            if col + w > max_x {
                break;
            }
            self.set(
                col,
                y,
                Cell {
                    char: ch,
                    fg,
                    bg,
                    style,
                    wide_continuation: false,
                },
            );
            if w == 2 {
                self.set(
                    col + 1,
                    y,
                    Cell {
                        char: ' ',
                        fg,
                        bg,
                        style,
                        wide_continuation: true,
                    },
                );
            }
            col += w;
        }
        col
    }

    /// Text of row `y`, for tests and snapshots.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|c| !c.wide_continuation)
            .map(|c| c.char)
            .collect()
    }

    /// Cells that differ from `other`, with their positions.
    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_str_clips() {
        let mut buf = Buffer::new(5, 1);
        let end = buf.write_str(0, 0, 5, "abcdefg", Brush::default());
        assert_eq!(end, 5);
        assert_eq!(buf.row_text(0), "abcde");
    }

    #[test]
    fn test_diff_reports_changes_only() {
        let a = Buffer::new(3, 1);
        let mut b = Buffer::new(3, 1);
        b.write_str(1, 0, 3, "x", Brush::default());
        let changed: Vec<_> = b.diff(&a).map(|(x, y, c)| (x, y, c.char)).collect();
        assert_eq!(changed, vec![(1, 0, 'x')]);
    }
}
