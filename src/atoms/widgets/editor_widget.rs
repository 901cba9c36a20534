use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::molecules::editor::boundaries::is_fence_line;
use crate::molecules::editor::line_fmt::{classify_line, LineKind};
use crate::types::Selection;

/// Re-merge consecutive same-style chars into Spans to form a display Line.
fn build_display_line(chars: &[(char, Style)]) -> Line<'static> {
    let Some(&(_, first_style)) = chars.first() else {
        return Line::from("");
    };

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut current_text = String::new();
    let mut current_style = first_style;

    for &(c, style) in chars {
        if style != current_style {
            spans.push(Span::styled(std::mem::take(&mut current_text), current_style));
            current_style = style;
        }
        current_text.push(c);
    }

    if !current_text.is_empty() {
        spans.push(Span::styled(current_text, current_style));
    }

    Line::from(spans)
}

fn line_style(kind: LineKind, in_fence: bool) -> Style {
    if in_fence {
        return Style::default().fg(Color::Green);
    }
    match kind {
        LineKind::Heading(_) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        LineKind::Quote => Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::ITALIC),
        LineKind::Bullet(_) | LineKind::Ordered { .. } => Style::default().fg(Color::Yellow),
        LineKind::Plain => Style::default(),
    }
}

/// Markdown source view with a line-kind highlight, selection and slide
/// separators.
pub struct EditorWidget<'a> {
    content: &'a str,
    selection: Selection,
    cursor_pos: (usize, usize),
    title: &'a str,
    scroll_offset: usize,
}

impl<'a> EditorWidget<'a> {
    pub fn new(content: &'a str, cursor_pos: (usize, usize), title: &'a str) -> Self {
        Self {
            content,
            selection: Selection::default(),
            cursor_pos,
            title,
            scroll_offset: 0,
        }
    }

    pub fn selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Terminal position of the cursor inside `area`, if visible.
    pub fn cursor_screen_position(&self, area: Rect) -> Option<Position> {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        let (row, col) = self.cursor_pos;
        if row < self.scroll_offset {
            return None;
        }
        let y = inner.y as usize + row - self.scroll_offset;
        let line = self.content.split('\n').nth(row).unwrap_or("");
        let width: usize = line.chars().take(col).filter_map(|c| c.width()).sum();
        let x = inner.x as usize + width;
        if y >= (inner.y + inner.height) as usize || x >= (inner.x + inner.width) as usize {
            return None;
        }
        Some(Position::new(x as u16, y as u16))
    }

    fn display_lines(&self) -> Vec<Line<'static>> {
        let selected = Style::default().add_modifier(Modifier::REVERSED);
        let mut lines = Vec::new();
        let mut offset = 0;
        let mut in_fence = false;

        for line in self.content.split('\n') {
            let is_fence = is_fence_line(line);
            let base = if line.trim() == "---" && !in_fence {
                Style::default().fg(Color::Magenta).add_modifier(Modifier::DIM)
            } else {
                line_style(classify_line(line), in_fence || is_fence)
            };
            if is_fence {
                in_fence = !in_fence;
            }

            let styled: Vec<(char, Style)> = line
                .chars()
                .enumerate()
                .map(|(i, c)| {
                    let pos = offset + i;
                    let style = if pos >= self.selection.start && pos < self.selection.end {
                        base.patch(selected)
                    } else {
                        base
                    };
                    (c, style)
                })
                .collect();
            offset += styled.len() + 1;
            lines.push(build_display_line(&styled));
        }
        lines
    }
}

impl Widget for EditorWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.title))
            .title_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .display_lines()
            .into_iter()
            .skip(self.scroll_offset)
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}
