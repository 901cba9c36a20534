// Pure functions for detecting and toggling Markdown inline formatting markers.

use super::boundaries::{char_len, find_word_boundaries};
use crate::types::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkdownFormat {
    Bold,          // **
    Italic,        // *
    Strikethrough, // ~~
    InlineCode,    // `
}

impl MarkdownFormat {
    /// Returns the delimiter string for this format.
    pub fn marker(&self) -> &'static str {
        match self {
            MarkdownFormat::Bold => "**",
            MarkdownFormat::Italic => "*",
            MarkdownFormat::Strikethrough => "~~",
            MarkdownFormat::InlineCode => "`",
        }
    }

    pub fn markers(&self) -> Markers<'static> {
        Markers::symmetric(self.marker())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarkdownFormat::Bold => "bold",
            MarkdownFormat::Italic => "italic",
            MarkdownFormat::Strikethrough => "strikethrough",
            MarkdownFormat::InlineCode => "inline code",
        }
    }
}

/// Open/close strings delimiting a formatted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers<'a> {
    pub open: &'a str,
    pub close: &'a str,
}

impl<'a> Markers<'a> {
    pub fn new(open: &'a str, close: &'a str) -> Self {
        Self { open, close }
    }

    pub fn symmetric(marker: &'a str) -> Self {
        Self {
            open: marker,
            close: marker,
        }
    }
}

/// Rewritten text plus where the selection (or bare cursor) ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatResult {
    pub text: String,
    pub selection: Selection,
}

/// Whether `candidate` is already wrapped by `open`/`close`.
///
/// Three overlapping checks, in order: the trimmed candidate starts and ends
/// with the markers; the raw candidate does; or only whitespace sits outside
/// the markers with non-empty content between them.
pub fn is_formatted(candidate: &str, open: &str, close: &str) -> bool {
    let needed = char_len(open) + char_len(close);
    if char_len(candidate) < needed {
        return false;
    }

    let trimmed = candidate.trim();
    if char_len(trimmed) >= needed && trimmed.starts_with(open) && trimmed.ends_with(close) {
        return true;
    }

    if candidate.starts_with(open) && candidate.ends_with(close) {
        return true;
    }

    candidate
        .trim_start()
        .strip_prefix(open)
        .and_then(|rest| rest.trim_end().strip_suffix(close))
        .is_some_and(|interior| !interior.trim().is_empty())
}

/// Apply or remove `markers` around the selection, or around the word under
/// a bare cursor.
///
/// Offsets are clamped to the text first; this never panics.
pub fn toggle_format(text: &str, selection: Selection, markers: Markers<'_>) -> FormatResult {
    let chars: Vec<char> = text.chars().collect();
    let selection = selection.clamped(chars.len());
    let open: Vec<char> = markers.open.chars().collect();
    let close: Vec<char> = markers.close.chars().collect();

    if selection.is_empty() {
        toggle_at_cursor(text, &chars, selection.start, &open, &close)
    } else {
        toggle_selection(&chars, selection, &open, &close)
    }
}

pub fn toggle_markdown(text: &str, selection: Selection, format: MarkdownFormat) -> FormatResult {
    toggle_format(text, selection, format.markers())
}

fn toggle_selection(chars: &[char], sel: Selection, open: &[char], close: &[char]) -> FormatResult {
    let selected = &chars[sel.start..sel.end];

    // Markers sit just outside the selection.
    if ends_at(chars, sel.start, open) && starts_at(chars, sel.end, close) {
        let new_start = sel.start - open.len();
        let text = splice(chars, new_start, sel.end + close.len(), &[selected]);
        return FormatResult {
            text,
            selection: Selection::new(new_start, new_start + selected.len()),
        };
    }

    let selected_text: String = selected.iter().collect();
    let open_str: String = open.iter().collect();
    let close_str: String = close.iter().collect();
    if is_formatted(&selected_text, &open_str, &close_str)
        && let Some((inner_start, inner_end)) = inner_range(selected, open, close)
    {
        let lead = &selected[..inner_start - open.len()];
        let inner = &selected[inner_start..inner_end];
        let trail = &selected[inner_end + close.len()..];
        let text = splice(chars, sel.start, sel.end, &[lead, inner, trail]);
        let new_len = lead.len() + inner.len() + trail.len();
        return FormatResult {
            text,
            selection: Selection::new(sel.start, sel.start + new_len),
        };
    }

    let text = splice(chars, sel.start, sel.end, &[open, selected, close]);
    FormatResult {
        text,
        selection: Selection::new(sel.start + open.len(), sel.end + open.len()),
    }
}

fn toggle_at_cursor(
    text: &str,
    chars: &[char],
    pos: usize,
    open: &[char],
    close: &[char],
) -> FormatResult {
    // Cursor between an empty marker pair: collapse it.
    if ends_at(chars, pos, open) && starts_at(chars, pos, close) {
        let start = pos - open.len();
        return FormatResult {
            text: splice(chars, start, pos + close.len(), &[]),
            selection: Selection::cursor(start),
        };
    }

    let Some(word) = find_word_boundaries(text, pos) else {
        return FormatResult {
            text: splice(chars, pos, pos, &[open, close]),
            selection: Selection::cursor(pos + open.len()),
        };
    };

    let word_chars = &chars[word.start..word.end];
    if ends_at(chars, word.start, open) && starts_at(chars, word.end, close) {
        let start = word.start - open.len();
        FormatResult {
            text: splice(chars, start, word.end + close.len(), &[word_chars]),
            selection: Selection::cursor(pos - open.len()),
        }
    } else {
        FormatResult {
            text: splice(chars, word.start, word.end, &[open, word_chars, close]),
            selection: Selection::cursor(pos + open.len()),
        }
    }
}

/// Char range of the content between the markers inside `selected`, trying
/// the whitespace-trimmed span first.
fn inner_range(selected: &[char], open: &[char], close: &[char]) -> Option<(usize, usize)> {
    let lead = selected.iter().take_while(|c| c.is_whitespace()).count();
    let trail = selected[lead..]
        .iter()
        .rev()
        .take_while(|c| c.is_whitespace())
        .count();

    for (lo, hi) in [(lead, selected.len() - trail), (0, selected.len())] {
        let span = &selected[lo..hi];
        if span.len() >= open.len() + close.len()
            && span.starts_with(open)
            && span.ends_with(close)
        {
            return Some((lo + open.len(), hi - close.len()));
        }
    }
    None
}

fn starts_at(chars: &[char], pos: usize, pat: &[char]) -> bool {
    chars.get(pos..pos + pat.len()) == Some(pat)
}

fn ends_at(chars: &[char], pos: usize, pat: &[char]) -> bool {
    pos >= pat.len() && chars.get(pos - pat.len()..pos) == Some(pat)
}

/// Replace `chars[start..end]` with the concatenation of `parts`.
fn splice(chars: &[char], start: usize, end: usize, parts: &[&[char]]) -> String {
    chars[..start]
        .iter()
        .chain(parts.iter().flat_map(|p| p.iter()))
        .chain(chars[end..].iter())
        .collect()
}
