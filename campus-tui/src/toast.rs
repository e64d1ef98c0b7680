//! Transient notifications.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tablekit::buffer::Buffer;
use tablekit::layout::Rect;
use tablekit::paint::frame;
use tablekit::text::truncate_to_width;
use tablekit::theme::{Brush, Theme};

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Toasts shown at once; older ones are dropped.
pub const MAX_TOASTS: usize = 5;

const TOAST_WIDTH: u16 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub duration: Duration,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
            duration: TOAST_DURATION,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
            duration: TOAST_DURATION,
        }
    }
}

/// Visible toasts, newest first.
#[derive(Debug, Default)]
pub struct Toasts {
    shown: VecDeque<(Toast, Instant)>,
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, toast: Toast, now: Instant) {
        log::debug!("Toast ({:?}): {}", toast.kind, toast.message);
        let until = now + toast.duration;
        self.shown.push_front((toast, until));
        self.shown.truncate(MAX_TOASTS);
    }

    /// Drop expired toasts. Returns `true` if any were removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.shown.len();
        self.shown.retain(|(_, until)| *until > now);
        self.shown.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.shown.iter().map(|(toast, _)| toast)
    }

    pub fn len(&self) -> usize {
        self.shown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }
}

/// Draw toasts stacked down from the top-right corner of `area`.
pub fn paint_toasts(buf: &mut Buffer, area: Rect, toasts: &Toasts, theme: &Theme) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.right().saturating_sub(width + 1);
    let mut y = area.y + 1;

    for toast in toasts.iter() {
        if y + 3 > area.bottom() {
            break;
        }
        let inner = frame(buf, Rect::new(x, y, width, 3), "", theme);
        let (mark, color) = match toast.kind {
            ToastKind::Success => ("✓ ", theme.success),
            ToastKind::Error => ("✗ ", theme.danger),
        };
        let text = truncate_to_width(&toast.message, inner.width.saturating_sub(2) as usize);
        let mark_brush = Brush::new(color, theme.surface);
        let after = buf.write_str(inner.x, inner.y, inner.right(), mark, mark_brush);
        let text_brush = Brush::new(theme.text, theme.surface);
        buf.write_str(after, inner.y, inner.right(), &text, text_brush);
        y += 3;
    }
}
