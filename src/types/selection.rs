/// Half-open character range `start..end` into a document.
///
/// `start == end` is a bare cursor. Offsets count Unicode scalar values, not
/// bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn cursor(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Order the endpoints and clamp both to `[0, len]`.
    pub fn clamped(&self, len: usize) -> Self {
        let a = self.start.min(len);
        let b = self.end.min(len);
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }
}

/// Delimits a maximal run of word characters around a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordBoundary {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBoundary {
    pub line_start: usize,
    pub line_end: usize,
    pub line: String,
}
