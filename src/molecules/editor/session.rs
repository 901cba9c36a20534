use tracing::{debug, trace};
use unicode_segmentation::UnicodeSegmentation;

use super::boundaries::{char_len, get_line_boundaries, is_in_code_block, slice_chars};
use super::history::{HistoryAction, HistoryState};
use super::line_fmt;
use super::markdown_fmt::{self, FormatResult, MarkdownFormat};
use super::slides;
use crate::types::{Presentation, Selection};

/// Line-level formatting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormat {
    Heading,
    Quote,
    Bullet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatOutcome {
    Applied,
    /// Formatting is suppressed inside fenced code blocks.
    InCodeBlock,
}

/// One open document: its undo history, the selection, and the typing
/// trackers that bridge continuous edits and undo.
#[derive(Debug, Clone)]
pub struct EditorSession {
    history: HistoryState,
    anchor: usize,
    head: usize,
    is_typing: bool,
    pending_value: Option<String>,
    /// Column kept across consecutive up/down moves.
    preferred_col: Option<usize>,
}

impl EditorSession {
    pub fn new(initial: &str, max_history: usize) -> Self {
        Self {
            history: HistoryState::with_max_size(initial, max_history),
            anchor: 0,
            head: 0,
            is_typing: false,
            pending_value: None,
            preferred_col: None,
        }
    }

    pub fn text(&self) -> &str {
        self.history.current_value()
    }

    pub fn history(&self) -> &HistoryState {
        &self.history
    }

    pub fn selection(&self) -> Selection {
        Selection::new(self.anchor, self.head).clamped(char_len(self.text()))
    }

    /// Position of the moving end of the selection.
    pub fn head(&self) -> usize {
        self.head.min(char_len(self.text()))
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    pub fn set_selection(&mut self, selection: Selection) {
        let sel = selection.clamped(char_len(self.text()));
        self.anchor = sel.start;
        self.head = sel.end;
        self.preferred_col = None;
    }

    pub fn set_cursor(&mut self, pos: usize) {
        self.set_selection(Selection::cursor(pos));
    }

    /// Typing write: every call is its own undo step.
    pub fn handle_change(&mut self, value: String, selection: Selection) {
        self.is_typing = true;
        self.pending_value = Some(value.clone());
        self.history.apply(HistoryAction::Write(value));
        self.set_selection(selection);
    }

    /// Command write from a toolbar or shortcut. Without a target selection
    /// the current one is kept (clamped to the new text).
    pub fn execute_command(&mut self, value: String, selection: Option<Selection>) {
        self.is_typing = false;
        self.pending_value = None;
        self.history.apply(HistoryAction::Write(value));
        let sel = selection.unwrap_or_else(|| Selection::new(self.anchor, self.head));
        self.set_selection(sel);
    }

    pub fn undo(&mut self) -> bool {
        let pending = if self.is_typing {
            self.pending_value.take()
        } else {
            None
        };
        self.is_typing = false;
        let changed = self.history.apply(HistoryAction::Undo { pending });
        trace!(cursor = self.history.cursor(), changed, "undo");
        self.clamp_selection();
        changed
    }

    pub fn redo(&mut self) -> bool {
        self.is_typing = false;
        let changed = self.history.apply(HistoryAction::Redo);
        trace!(cursor = self.history.cursor(), changed, "redo");
        self.clamp_selection();
        changed
    }

    /// Load a different document, discarding all history.
    pub fn reset(&mut self, value: &str) {
        self.history.apply(HistoryAction::Reset(value.to_string()));
        self.is_typing = false;
        self.pending_value = None;
        self.anchor = 0;
        self.head = 0;
        self.preferred_col = None;
    }

    pub fn apply_format(&mut self, format: MarkdownFormat) -> FormatOutcome {
        if is_in_code_block(self.text(), self.head()) {
            debug!(format = format.as_str(), "formatting suppressed in code block");
            return FormatOutcome::InCodeBlock;
        }
        let result = markdown_fmt::toggle_markdown(self.text(), self.selection(), format);
        debug!(format = format.as_str(), "inline format toggled");
        self.commit(result);
        FormatOutcome::Applied
    }

    pub fn apply_line_format(&mut self, format: LineFormat) -> FormatOutcome {
        let pos = self.head();
        if is_in_code_block(self.text(), pos) {
            return FormatOutcome::InCodeBlock;
        }
        let result = match format {
            LineFormat::Heading => line_fmt::cycle_heading(self.text(), pos),
            LineFormat::Quote => line_fmt::toggle_quote(self.text(), pos),
            LineFormat::Bullet => line_fmt::toggle_bullet(self.text(), pos),
        };
        debug!(?format, "line format toggled");
        self.commit(result);
        FormatOutcome::Applied
    }

    fn commit(&mut self, result: FormatResult) {
        self.execute_command(result.text, Some(result.selection));
    }

    fn clamp_selection(&mut self) {
        let len = char_len(self.text());
        self.anchor = self.anchor.min(len);
        self.head = self.head.min(len);
        self.preferred_col = None;
    }

    // ── Typing ────────────────────────────────────────────────────

    /// Replace the selection with `insert` and place the cursor after it.
    pub fn insert_str(&mut self, insert: &str) {
        let sel = self.selection();
        let new_text = self.splice(sel.start, sel.end, insert);
        self.handle_change(new_text, Selection::cursor(sel.start + char_len(insert)));
    }

    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    pub fn insert_newline(&mut self) {
        self.insert_str("\n");
    }

    pub fn backspace(&mut self) {
        let sel = self.selection();
        if !sel.is_empty() {
            self.insert_str("");
            return;
        }
        if sel.start == 0 {
            return;
        }
        let start = prev_grapheme_boundary(self.text(), sel.start);
        let new_text = self.splice(start, sel.start, "");
        self.handle_change(new_text, Selection::cursor(start));
    }

    pub fn delete_forward(&mut self) {
        let sel = self.selection();
        if !sel.is_empty() {
            self.insert_str("");
            return;
        }
        let end = next_grapheme_boundary(self.text(), sel.start);
        if end == sel.start {
            return;
        }
        let new_text = self.splice(sel.start, end, "");
        self.handle_change(new_text, Selection::cursor(sel.start));
    }

    fn splice(&self, start: usize, end: usize, insert: &str) -> String {
        let text = self.text();
        let total = char_len(text);
        let mut out = String::with_capacity(text.len() + insert.len());
        out.push_str(slice_chars(text, 0, start));
        out.push_str(insert);
        out.push_str(slice_chars(text, end, total));
        out
    }

    // ── Movement ──────────────────────────────────────────────────

    fn move_head(&mut self, pos: usize, extend: bool) {
        self.head = pos.min(char_len(self.text()));
        if !extend {
            self.anchor = self.head;
        }
        self.preferred_col = None;
    }

    fn move_vertical(&mut self, pos: usize, col: usize, extend: bool) {
        self.move_head(pos, extend);
        self.preferred_col = Some(col);
    }

    pub fn move_left(&mut self, extend: bool) {
        let sel = self.selection();
        if !extend && !sel.is_empty() {
            self.move_head(sel.start, false);
            return;
        }
        let pos = prev_grapheme_boundary(self.text(), self.head());
        self.move_head(pos, extend);
    }

    pub fn move_right(&mut self, extend: bool) {
        let sel = self.selection();
        if !extend && !sel.is_empty() {
            self.move_head(sel.end, false);
            return;
        }
        let pos = next_grapheme_boundary(self.text(), self.head());
        self.move_head(pos, extend);
    }

    pub fn move_up(&mut self, extend: bool) {
        let line = get_line_boundaries(self.text(), self.head());
        if line.line_start == 0 {
            self.move_head(0, extend);
            return;
        }
        let col = self.preferred_col.unwrap_or(self.head() - line.line_start);
        let prev = get_line_boundaries(self.text(), line.line_start - 1);
        let target = (prev.line_start + col).min(prev.line_end);
        self.move_vertical(target, col, extend);
    }

    pub fn move_down(&mut self, extend: bool) {
        let total = char_len(self.text());
        let line = get_line_boundaries(self.text(), self.head());
        if line.line_end >= total {
            self.move_head(total, extend);
            return;
        }
        let col = self.preferred_col.unwrap_or(self.head() - line.line_start);
        let next = get_line_boundaries(self.text(), line.line_end + 1);
        let target = (next.line_start + col).min(next.line_end);
        self.move_vertical(target, col, extend);
    }

    pub fn move_to_line_start(&mut self, extend: bool) {
        let line = get_line_boundaries(self.text(), self.head());
        self.move_head(line.line_start, extend);
    }

    pub fn move_to_line_end(&mut self, extend: bool) {
        let line = get_line_boundaries(self.text(), self.head());
        self.move_head(line.line_end, extend);
    }

    pub fn select_all(&mut self) {
        self.anchor = 0;
        self.head = char_len(self.text());
        self.preferred_col = None;
    }

    // ── Presentation info ─────────────────────────────────────────

    /// `(current slide, total slides)`, 1-based.
    pub fn slide_position(&self) -> (usize, usize) {
        let text = self.text();
        (
            slides::slide_index_at(text, self.head()) + 1,
            slides::slide_count(text),
        )
    }

    /// Title of the slide under the cursor.
    pub fn current_slide_title(&self) -> String {
        let text = self.text();
        let index = slides::slide_index_at(text, self.head());
        slides::split_slides(text)
            .get(index)
            .map(|slide| Presentation::extract_title(slide))
            .unwrap_or_else(|| Presentation::extract_title(""))
    }

    /// Row and char column of the cursor, for rendering.
    pub fn cursor_row_col(&self) -> (usize, usize) {
        let head = self.head();
        let line = get_line_boundaries(self.text(), head);
        let row = self.text().chars().take(line.line_start).filter(|&c| c == '\n').count();
        (row, head - line.line_start)
    }
}

/// Char offset of the grapheme boundary before `pos`.
fn prev_grapheme_boundary(text: &str, pos: usize) -> usize {
    let mut offset = 0;
    let mut prev = 0;
    for g in text.graphemes(true) {
        if offset >= pos {
            break;
        }
        prev = offset;
        offset += char_len(g);
    }
    prev
}

/// Char offset of the grapheme boundary after `pos`.
fn next_grapheme_boundary(text: &str, pos: usize) -> usize {
    let mut offset = 0;
    for g in text.graphemes(true) {
        offset += char_len(g);
        if offset > pos {
            return offset;
        }
    }
    offset
}
