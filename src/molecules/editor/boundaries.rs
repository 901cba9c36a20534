//! Word, line and code-fence detection over character offsets.
//!
//! Every offset in this module counts `char`s, and every function clamps its
//! position argument to the text length instead of panicking.

use crate::types::{LineBoundary, WordBoundary};

const FENCE: &str = "```";

/// ASCII letters and digits, plus the Cyrillic block (U+0400..=U+04FF),
/// which carries both the Russian and the Ukrainian alphabets.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ('\u{0400}'..='\u{04FF}').contains(&c)
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the `pos`-th char, or `text.len()` past the end.
pub fn byte_offset(text: &str, pos: usize) -> usize {
    text.char_indices()
        .nth(pos)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Substring by char offsets, clamped.
pub fn slice_chars(text: &str, start: usize, end: usize) -> &str {
    let start_byte = byte_offset(text, start);
    let end_byte = byte_offset(text, end.max(start));
    &text[start_byte..end_byte]
}

/// Find the run of word characters touching `pos`.
///
/// Returns `None` when neither the character before `pos` nor the one at
/// `pos` is a word character.
pub fn find_word_boundaries(text: &str, pos: usize) -> Option<WordBoundary> {
    let chars: Vec<char> = text.chars().collect();
    let pos = pos.min(chars.len());

    let touches_before = pos > 0 && is_word_char(chars[pos - 1]);
    let touches_after = pos < chars.len() && is_word_char(chars[pos]);
    if !touches_before && !touches_after {
        return None;
    }

    let mut start = pos;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = pos;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }

    Some(WordBoundary { start, end })
}

/// Locate the line containing `pos`. `line_end` points at the terminating
/// newline (or the end of text) and is exclusive.
pub fn get_line_boundaries(text: &str, pos: usize) -> LineBoundary {
    let chars: Vec<char> = text.chars().collect();
    let pos = pos.min(chars.len());

    let mut line_start = pos;
    while line_start > 0 && chars[line_start - 1] != '\n' {
        line_start -= 1;
    }
    let mut line_end = pos;
    while line_end < chars.len() && chars[line_end] != '\n' {
        line_end += 1;
    }

    LineBoundary {
        line_start,
        line_end,
        line: chars[line_start..line_end].iter().collect(),
    }
}

/// A line opening or closing a fenced code block: leading whitespace, then
/// a triple backtick (an info string may follow).
pub fn is_fence_line(line: &str) -> bool {
    line.trim_start().starts_with(FENCE)
}

/// Char offsets of the start of every fence line.
fn fence_line_starts(text: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut offset = 0;
    for line in text.split('\n') {
        if is_fence_line(line) {
            starts.push(offset);
        }
        offset += char_len(line) + 1;
    }
    starts
}

/// Whether `pos` sits inside a fenced code block.
///
/// The nearest fence before the cursor's line must be unmatched (an odd
/// number of fence lines precede the line), and a closing fence line must
/// exist on the cursor's line or after it. An unterminated fence does not
/// count as a block.
pub fn is_in_code_block(text: &str, pos: usize) -> bool {
    let cursor_line = get_line_boundaries(text, pos).line_start;
    let fences = fence_line_starts(text);

    let before = fences.iter().filter(|&&s| s < cursor_line).count();
    if before % 2 == 0 {
        return false;
    }
    fences.iter().any(|&s| s >= cursor_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── find_word_boundaries ──────────────────────────────────────

    #[test]
    fn test_word_inside() {
        let b = find_word_boundaries("hello world", 2).unwrap();
        assert_eq!((b.start, b.end), (0, 5));
    }

    #[test]
    fn test_word_cursor_at_end_of_word() {
        let b = find_word_boundaries("hello world", 5).unwrap();
        assert_eq!((b.start, b.end), (0, 5));
    }

    #[test]
    fn test_word_cursor_at_start_of_word() {
        let b = find_word_boundaries("hello world", 6).unwrap();
        assert_eq!((b.start, b.end), (6, 11));
    }

    #[test]
    fn test_word_none_in_whitespace() {
        assert!(find_word_boundaries("a   b", 2).is_none());
        assert!(find_word_boundaries("", 0).is_none());
    }

    #[test]
    fn test_word_stops_at_markers() {
        let b = find_word_boundaries("**bold**", 4).unwrap();
        assert_eq!((b.start, b.end), (2, 6));
    }

    #[test]
    fn test_word_cyrillic() {
        let b = find_word_boundaries("скажи привет", 8).unwrap();
        assert_eq!((b.start, b.end), (6, 12));
    }

    #[test]
    fn test_word_pos_past_end_is_clamped() {
        let b = find_word_boundaries("abc", 99).unwrap();
        assert_eq!((b.start, b.end), (0, 3));
    }

    // ── get_line_boundaries ───────────────────────────────────────

    #[test]
    fn test_line_middle() {
        let b = get_line_boundaries("line1\nline2\nline3", 8);
        assert_eq!(b.line_start, 6);
        assert_eq!(b.line_end, 11);
        assert_eq!(b.line, "line2");
    }

    #[test]
    fn test_line_cursor_on_newline() {
        let b = get_line_boundaries("line1\nline2", 5);
        assert_eq!((b.line_start, b.line_end), (0, 5));
        assert_eq!(b.line, "line1");
    }

    #[test]
    fn test_line_empty_last_line() {
        let b = get_line_boundaries("abc\n", 4);
        assert_eq!((b.line_start, b.line_end), (4, 4));
        assert_eq!(b.line, "");
    }

    // ── is_in_code_block ──────────────────────────────────────────

    #[test]
    fn test_inside_fence() {
        let text = "intro\n```rust\nlet x = 1;\n```\noutro";
        assert!(is_in_code_block(text, 16));
    }

    #[test]
    fn test_outside_after_fence() {
        let text = "intro\n```\ncode\n```\noutro";
        assert!(!is_in_code_block(text, 21));
        assert!(!is_in_code_block(text, 2));
    }

    #[test]
    fn test_unterminated_fence_is_not_block() {
        let text = "```\nstill typing";
        assert!(!is_in_code_block(text, 8));
    }

    #[test]
    fn test_on_opening_fence_line_is_outside() {
        let text = "```\ncode\n```";
        assert!(!is_in_code_block(text, 1));
    }

    #[test]
    fn test_is_fence_line() {
        assert!(is_fence_line("```"));
        assert!(is_fence_line("  ```rust"));
        assert!(is_fence_line("``` "));
        assert!(!is_fence_line("``"));
        assert!(!is_fence_line("text ```"));
    }

    #[test]
    fn test_ukrainian_letters_are_word_chars() {
        for c in ['і', 'ї', 'є', 'ґ', 'ё'] {
            assert!(is_word_char(c), "{c}");
        }
        let b = find_word_boundaries("нові їжаки", 2).unwrap();
        assert_eq!((b.start, b.end), (0, 4));
        assert!(!is_word_char('_'));
    }

    // ── char helpers ──────────────────────────────────────────────

    #[test]
    fn test_slice_chars_multibyte() {
        assert_eq!(slice_chars("привет мир", 7, 10), "мир");
        assert_eq!(slice_chars("abc", 2, 1), "");
        assert_eq!(byte_offset("é", 5), 2);
    }
}
