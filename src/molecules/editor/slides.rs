//! Splitting presentation Markdown into slides on `---` separator lines.

use super::boundaries::{char_len, is_fence_line};

const SEPARATOR: &str = "---";

/// A slide's character range in the full document, excluding separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideSpan {
    pub start: usize,
    pub end: usize,
}

/// Separator lines inside fenced code blocks are ignored.
pub fn slide_spans(text: &str) -> Vec<SlideSpan> {
    let mut spans = Vec::new();
    let mut in_fence = false;
    let mut slide_start: usize = 0;
    let mut offset: usize = 0;

    for line in text.split('\n') {
        let len = char_len(line);
        if is_fence_line(line) {
            in_fence = !in_fence;
        } else if !in_fence && line.trim() == SEPARATOR {
            // Drop the newline that precedes the separator.
            spans.push(SlideSpan {
                start: slide_start,
                end: offset.saturating_sub(1).max(slide_start),
            });
            slide_start = offset + len + 1;
        }
        offset += len + 1;
    }

    let total = char_len(text);
    spans.push(SlideSpan {
        start: slide_start.min(total),
        end: total,
    });
    spans
}

pub fn split_slides(text: &str) -> Vec<String> {
    slide_spans(text)
        .into_iter()
        .map(|span| text.chars().skip(span.start).take(span.end - span.start).collect())
        .collect()
}

pub fn slide_count(text: &str) -> usize {
    slide_spans(text).len()
}

/// Index of the slide containing `pos`. A cursor on a separator line belongs
/// to the slide before it.
pub fn slide_index_at(text: &str, pos: usize) -> usize {
    slide_spans(text)
        .iter()
        .take_while(|span| span.start <= pos)
        .count()
        .saturating_sub(1)
}
