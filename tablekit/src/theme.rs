//! Colors and text styles.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub dim: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl TextStyle {
    pub const fn new() -> Self {
        Self {
            bold: false,
            dim: false,
            underline: false,
            reverse: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub const fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

/// Semantic palette used by the painter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb,
    pub surface: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub border: Rgb,
    pub primary: Rgb,
    pub focus: Rgb,
    pub danger: Rgb,
    pub success: Rgb,
    pub disabled: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Rgb::new(17, 24, 39),
            surface: Rgb::new(31, 41, 55),
            text: Rgb::new(243, 244, 246),
            muted: Rgb::new(156, 163, 175),
            border: Rgb::new(75, 85, 99),
            primary: Rgb::new(99, 102, 241),
            focus: Rgb::new(129, 140, 248),
            danger: Rgb::new(239, 68, 68),
            success: Rgb::new(34, 197, 94),
            disabled: Rgb::new(107, 114, 128),
        }
    }
}

/// Foreground, background and style applied to written text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Brush {
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: TextStyle,
}

impl Brush {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            style: TextStyle::new(),
        }
    }

    pub const fn style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }
}
