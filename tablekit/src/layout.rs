//! Screen rectangles.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn right(&self) -> u16 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> u16 {
        self.y + self.height
    }

    pub fn shrink(self, top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            x: self.x.saturating_add(left),
            y: self.y.saturating_add(top),
            width: self.width.saturating_sub(left.saturating_add(right)),
            height: self.height.saturating_sub(top.saturating_add(bottom)),
        }
    }

    /// Split off `height` rows from the top; returns (top, rest).
    pub fn split_top(self, height: u16) -> (Self, Self) {
        let height = height.min(self.height);
        (
            Self { height, ..self },
            Self {
                y: self.y + height,
                height: self.height - height,
                ..self
            },
        )
    }

    /// Split off `width` columns from the left; returns (left, rest).
    pub fn split_left(self, width: u16) -> (Self, Self) {
        let width = width.min(self.width);
        (
            Self { width, ..self },
            Self {
                x: self.x + width,
                width: self.width - width,
                ..self
            },
        )
    }

    /// A `width` x `height` rectangle centered in `self`, clamped to fit.
    pub fn centered(self, width: u16, height: u16) -> Self {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Self {
            x: self.x + (self.width - width) / 2,
            y: self.y + (self.height - height) / 2,
            width,
            height,
        }
    }

    /// Row `offset` of `self` as a one-row rectangle.
    pub fn row(self, offset: u16) -> Self {
        Self {
            y: self.y.saturating_add(offset),
            height: 1,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_clamps() {
        let area = Rect::from_size(80, 24);
        assert_eq!(area.centered(40, 10), Rect::new(20, 7, 40, 10));
        assert_eq!(area.centered(100, 30), area);
    }

    #[test]
    fn test_split_top() {
        let (top, rest) = Rect::new(0, 2, 10, 5).split_top(2);
        assert_eq!(top, Rect::new(0, 2, 10, 2));
        assert_eq!(rest, Rect::new(0, 4, 10, 3));
    }
}
