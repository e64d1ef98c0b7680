//! Raw-mode terminal that flushes only changed cells.

use std::io::{self, Write};

use crossterm::{
    cursor, execute, queue,
    style::{
        Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal,
};

use crate::buffer::{Buffer, Cell};
use crate::text::char_width;
use crate::theme::{Rgb, TextStyle};

/// Owns the terminal for the lifetime of the app.
///
/// Entering raw mode and the alternate screen happens in [`Terminal::new`];
/// both are undone on drop.
pub struct Terminal {
    stdout: io::Stdout,
    current: Buffer,
    previous: Buffer,
    /// Force a full repaint on the next draw.
    dirty: bool,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout,
            current: Buffer::new(width, height),
            previous: Buffer::new(width, height),
            dirty: true,
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current.width(), self.current.height())
    }

    /// Paint a frame with `paint` and write the cells that changed.
    pub fn draw(&mut self, paint: impl FnOnce(&mut Buffer)) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        if width != self.current.width() || height != self.current.height() {
            self.current = Buffer::new(width, height);
            self.previous = Buffer::new(width, height);
            self.dirty = true;
        }

        self.current.clear();
        paint(&mut self.current);

        if self.dirty {
            execute!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
            // everything differs from a blank previous frame except blanks
            self.previous = Buffer::new(width, height);
            self.flush_all()?;
            self.dirty = false;
        } else {
            self.flush_diff()?;
        }

        std::mem::swap(&mut self.current, &mut self.previous);
        Ok(())
    }

    fn flush_all(&mut self) -> io::Result<()> {
        let cells: Vec<_> = (0..self.current.height())
            .flat_map(|y| (0..self.current.width()).map(move |x| (x, y)))
            .filter_map(|(x, y)| self.current.get(x, y).map(|c| (x, y, *c)))
            .collect();
        self.write_cells(cells)
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        let cells: Vec<_> = self
            .current
            .diff(&self.previous)
            .map(|(x, y, c)| (x, y, *c))
            .collect();
        self.write_cells(cells)
    }

    fn write_cells(&mut self, cells: Vec<(u16, u16, Cell)>) -> io::Result<()> {
        let mut last_x = u16::MAX;
        let mut last_y = u16::MAX;
        let mut last_width: u16 = 1;
        let mut last_fg: Option<Rgb> = None;
        let mut last_bg: Option<Rgb> = None;
        let mut last_style = TextStyle::new();

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in cells {
            if cell.wide_continuation {
                continue;
            }

            if y != last_y || x != last_x.wrapping_add(last_width) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }

            if last_fg != Some(cell.fg) {
                queue!(self.stdout, SetForegroundColor(color(cell.fg)))?;
                last_fg = Some(cell.fg);
            }
            if last_bg != Some(cell.bg) {
                queue!(self.stdout, SetBackgroundColor(color(cell.bg)))?;
                last_bg = Some(cell.bg);
            }

            if cell.style != last_style {
                queue!(self.stdout, SetAttribute(Attribute::Reset))?;
                queue!(
                    self.stdout,
                    SetForegroundColor(color(cell.fg)),
                    SetBackgroundColor(color(cell.bg))
                )?;
                if cell.style.bold {
                    queue!(self.stdout, SetAttribute(Attribute::Bold))?;
                }
                if cell.style.dim {
                    queue!(self.stdout, SetAttribute(Attribute::Dim))?;
                }
                if cell.style.underline {
                    queue!(self.stdout, SetAttribute(Attribute::Underlined))?;
                }
                if cell.style.reverse {
                    queue!(self.stdout, SetAttribute(Attribute::Reverse))?;
                }
                last_style = cell.style;
            }

            queue!(self.stdout, Print(cell.char))?;

            last_x = x;
            last_y = y;
            last_width = char_width(cell.char).max(1) as u16;
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

fn color(rgb: Rgb) -> CtColor {
    CtColor::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
