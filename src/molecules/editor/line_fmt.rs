//! Line-level Markdown prefixes: headings, block quotes and lists.
use std::sync::LazyLock;

use regex::Regex;

use super::boundaries::{char_len, get_line_boundaries, slice_chars};
use super::markdown_fmt::FormatResult;
use crate::types::Selection;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+").expect("heading pattern"));
static QUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>\s*").expect("quote pattern"));
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([-*+])\s+").expect("bullet pattern"));
static ORDERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)([.)])\s+").expect("ordered pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading(u8),
    Quote,
    Bullet(char),
    Ordered { number: u64, delim: char },
    Plain,
}

/// Classify a line and return the char length of its matched prefix.
pub fn classify_line_prefix(line: &str) -> (LineKind, usize) {
    if let Some(caps) = HEADING_RE.captures(line) {
        let level = caps[1].len() as u8;
        return (LineKind::Heading(level), char_len(&caps[0]));
    }
    if let Some(m) = QUOTE_RE.find(line) {
        return (LineKind::Quote, char_len(m.as_str()));
    }
    if let Some(caps) = BULLET_RE.captures(line) {
        let marker = caps[1].chars().next().unwrap_or('-');
        return (LineKind::Bullet(marker), char_len(&caps[0]));
    }
    if let Some(caps) = ORDERED_RE.captures(line)
        && let Ok(number) = caps[1].parse::<u64>()
    {
        let delim = caps[2].chars().next().unwrap_or('.');
        return (LineKind::Ordered { number, delim }, char_len(&caps[0]));
    }
    (LineKind::Plain, 0)
}

pub fn classify_line(line: &str) -> LineKind {
    classify_line_prefix(line).0
}

/// Cycle the heading level of the line under `pos`:
/// plain → `#` → `##` … `######` → plain.
pub fn cycle_heading(text: &str, pos: usize) -> FormatResult {
    let bounds = get_line_boundaries(text, pos);
    let (kind, prefix_len) = classify_line_prefix(&bounds.line);
    let new_prefix = match kind {
        LineKind::Heading(6) => String::new(),
        LineKind::Heading(level) => format!("{} ", "#".repeat(level as usize + 1)),
        _ => "# ".to_string(),
    };
    let old_len = if matches!(kind, LineKind::Heading(_)) {
        prefix_len
    } else {
        0
    };
    replace_prefix(text, pos, bounds.line_start, old_len, &new_prefix)
}

/// Add or remove a `> ` quote prefix on the line under `pos`.
pub fn toggle_quote(text: &str, pos: usize) -> FormatResult {
    let bounds = get_line_boundaries(text, pos);
    match classify_line_prefix(&bounds.line) {
        (LineKind::Quote, len) => replace_prefix(text, pos, bounds.line_start, len, ""),
        _ => replace_prefix(text, pos, bounds.line_start, 0, "> "),
    }
}

/// Add or remove a `- ` bullet on the line under `pos`. Ordered items are
/// converted to bullets.
pub fn toggle_bullet(text: &str, pos: usize) -> FormatResult {
    let bounds = get_line_boundaries(text, pos);
    match classify_line_prefix(&bounds.line) {
        (LineKind::Bullet(_), len) => replace_prefix(text, pos, bounds.line_start, len, ""),
        (LineKind::Ordered { .. }, len) => replace_prefix(text, pos, bounds.line_start, len, "- "),
        _ => replace_prefix(text, pos, bounds.line_start, 0, "- "),
    }
}

fn replace_prefix(
    text: &str,
    pos: usize,
    line_start: usize,
    old_len: usize,
    new_prefix: &str,
) -> FormatResult {
    let total = char_len(text);
    let pos = pos.min(total);
    let prefix_end = line_start + old_len;

    let mut result = String::with_capacity(text.len() + new_prefix.len());
    result.push_str(slice_chars(text, 0, line_start));
    result.push_str(new_prefix);
    result.push_str(slice_chars(text, prefix_end, total));

    let new_len = char_len(new_prefix);
    let cursor = if pos < prefix_end {
        line_start + new_len
    } else {
        pos - old_len + new_len
    };

    FormatResult {
        text: result,
        selection: Selection::cursor(cursor),
    }
}
