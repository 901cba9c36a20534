//! Linear undo/redo history over full-text snapshots.

use tracing::trace;

pub const DEFAULT_MAX_HISTORY: usize = 500;

/// One step of input into [`HistoryState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryAction {
    /// Append a snapshot. Both command writes and typing writes use this.
    Write(String),
    /// Step back. `pending` carries the last continuously typed value, if the
    /// caller is mid-typing; it is committed first when it differs from the
    /// current snapshot.
    Undo { pending: Option<String> },
    Redo,
    /// Discard everything and seed with a new value.
    Reset(String),
}

/// Ordered snapshots plus a cursor into them.
///
/// `entries` is never empty and `cursor < entries.len()` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryState {
    entries: Vec<String>,
    cursor: usize,
    max_size: usize,
}

impl HistoryState {
    pub fn new(initial: impl Into<String>) -> Self {
        Self::with_max_size(initial, DEFAULT_MAX_HISTORY)
    }

    /// A `max_size` of 0 is treated as 1 so the seed snapshot always fits.
    pub fn with_max_size(initial: impl Into<String>, max_size: usize) -> Self {
        Self {
            entries: vec![initial.into()],
            cursor: 0,
            max_size: max_size.max(1),
        }
    }

    pub fn current_value(&self) -> &str {
        &self.entries[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Record a new snapshot. Returns false when `value` equals the current
    /// snapshot and nothing was recorded.
    pub fn write(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if value == self.entries[self.cursor] {
            return false;
        }

        self.entries.truncate(self.cursor + 1);
        self.entries.push(value);
        self.cursor = self.entries.len() - 1;

        if self.entries.len() > self.max_size {
            let overflow = self.entries.len() - self.max_size;
            self.entries.drain(..overflow);
            self.cursor = self.cursor.saturating_sub(overflow);
            trace!(dropped = overflow, "history trimmed");
        }
        true
    }

    pub fn undo(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Undo after committing `pending` if it differs from the current snapshot.
    pub fn undo_with_pending(&mut self, pending: Option<&str>) -> bool {
        if let Some(value) = pending
            && value != self.current_value()
        {
            self.write(value);
        }
        self.undo()
    }

    pub fn redo(&mut self) -> bool {
        if self.can_redo() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self, value: impl Into<String>) {
        *self = Self::with_max_size(value, self.max_size);
    }

    /// Reducer entry point. Returns whether the visible value may have changed.
    pub fn apply(&mut self, action: HistoryAction) -> bool {
        match action {
            HistoryAction::Write(value) => self.write(value),
            HistoryAction::Undo { pending } => self.undo_with_pending(pending.as_deref()),
            HistoryAction::Redo => self.redo(),
            HistoryAction::Reset(value) => {
                self.reset(value);
                true
            }
        }
    }
}

impl Default for HistoryState {
    fn default() -> Self {
        Self::new(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_single_entry() {
        let history = HistoryState::new("seed");
        assert_eq!(history.entries(), &["seed".to_string()]);
        assert_eq!(history.current_value(), "seed");
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_write_advances_cursor() {
        let mut history = HistoryState::new("a");
        assert!(history.write("ab"));
        assert_eq!(history.cursor(), 1);
        assert_eq!(history.current_value(), "ab");
        assert!(history.can_undo());
    }

    #[test]
    fn test_duplicate_write_is_noop() {
        let mut history = HistoryState::new("a");
        history.write("b");
        let before = history.clone();
        assert!(!history.write("b"));
        assert_eq!(history, before);
    }

    #[test]
    fn test_bounds_after_many_writes() {
        let max = 10;
        for n in [3usize, 9, 10, 25] {
            let mut history = HistoryState::with_max_size("seed", max);
            for i in 0..n {
                history.write(format!("v{}", i));
            }
            assert_eq!(history.entries().len(), (n + 1).min(max));
            assert_eq!(history.current_value(), format!("v{}", n - 1));
            assert_eq!(history.cursor(), history.entries().len() - 1);
        }
    }

    #[test]
    fn test_default_cap_is_500() {
        let mut history = HistoryState::new("");
        for i in 0..600 {
            history.write(i.to_string());
        }
        assert_eq!(history.entries().len(), DEFAULT_MAX_HISTORY);
        assert_eq!(history.entries()[0], "100");
        assert_eq!(history.current_value(), "599");
    }

    #[test]
    fn test_zero_max_size_keeps_one_entry() {
        let mut history = HistoryState::with_max_size("a", 0);
        history.write("b");
        assert_eq!(history.entries(), &["b".to_string()]);
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_undo_redo_inverse() {
        let mut history = HistoryState::new("a");
        history.write("b");
        history.write("c");
        history.undo();
        let (cursor, value) = (history.cursor(), history.current_value().to_string());
        assert!(history.can_redo());
        assert!(history.undo());
        assert!(history.redo());
        assert_eq!(history.cursor(), cursor);
        assert_eq!(history.current_value(), value);
    }

    #[test]
    fn test_undo_at_start_is_noop() {
        let mut history = HistoryState::new("a");
        assert!(!history.undo());
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_redo_at_end_is_noop() {
        let mut history = HistoryState::new("a");
        history.write("b");
        assert!(!history.redo());
        assert_eq!(history.current_value(), "b");
    }

    #[test]
    fn test_branch_truncation() {
        let mut history = HistoryState::new("seed");
        history.write("A");
        history.write("B");
        history.undo();
        history.write("C");
        assert_eq!(
            history.entries(),
            &["seed".to_string(), "A".to_string(), "C".to_string()]
        );
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_commits_pending_value() {
        let mut history = HistoryState::new("a");
        history.write("ab");
        assert!(history.undo_with_pending(Some("abc")));
        assert_eq!(history.current_value(), "ab");
        assert_eq!(history.entries().len(), 3);
        assert!(history.redo());
        assert_eq!(history.current_value(), "abc");
    }

    #[test]
    fn test_undo_ignores_pending_equal_to_current() {
        let mut history = HistoryState::new("a");
        history.write("ab");
        history.undo_with_pending(Some("ab"));
        assert_eq!(history.current_value(), "a");
        assert_eq!(history.entries().len(), 2);
    }

    #[test]
    fn test_reset_keeps_max_size() {
        let mut history = HistoryState::with_max_size("a", 7);
        history.write("b");
        history.reset("fresh");
        assert_eq!(history.entries(), &["fresh".to_string()]);
        assert_eq!(history.max_size(), 7);
    }

    #[test]
    fn test_apply_reducer() {
        let mut history = HistoryState::new("a");
        history.apply(HistoryAction::Write("b".to_string()));
        history.apply(HistoryAction::Undo { pending: None });
        assert_eq!(history.current_value(), "a");
        history.apply(HistoryAction::Redo);
        assert_eq!(history.current_value(), "b");
        history.apply(HistoryAction::Reset("z".to_string()));
        assert_eq!(history.current_value(), "z");
        assert!(!history.can_undo());
    }
}
