//! Display-width aware text helpers.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Cut `s` to `max_width` columns, ending in an ellipsis when shortened.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target = max_width - 1;
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = char_width(ch);
        if width + w > target {
            break;
        }
        result.push(ch);
        width += w;
    }
    result.push('…');
    result
}

/// Greedy word wrap. Words longer than a line are split.
pub fn wrap_words(s: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut line = String::new();
    let mut width = 0;

    for word in s.split_whitespace() {
        let mut word = word.to_string();
        loop {
            let w = display_width(&word);
            let gap = usize::from(!line.is_empty());
            if width + gap + w <= max_width {
                if gap == 1 {
                    line.push(' ');
                }
                line.push_str(&word);
                width += gap + w;
                break;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                width = 0;
                continue;
            }
            // a single word wider than the line
            let head = truncate_chars(&word, max_width);
            word = word[head.len()..].to_string();
            lines.push(head);
            if word.is_empty() {
                break;
            }
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn truncate_chars(s: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = char_width(ch);
        if width + w > max_width && !out.is_empty() {
            break;
        }
        out.push(ch);
        width += w;
    }
    out
}
