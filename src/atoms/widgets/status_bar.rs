use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct StatusBar<'a> {
    message: &'a str,
    file_name: &'a str,
    slide: (usize, usize),
    slide_title: &'a str,
    can_undo: bool,
    can_redo: bool,
    dirty: bool,
}

impl<'a> StatusBar<'a> {
    pub fn new(file_name: &'a str) -> Self {
        Self {
            message: "",
            file_name,
            slide: (1, 1),
            slide_title: "",
            can_undo: false,
            can_redo: false,
            dirty: false,
        }
    }

    pub fn message(mut self, message: &'a str) -> Self {
        self.message = message;
        self
    }

    pub fn slide(mut self, current: usize, total: usize) -> Self {
        self.slide = (current, total);
        self
    }

    pub fn slide_title(mut self, title: &'a str) -> Self {
        self.slide_title = title;
        self
    }

    fn slide_label(&self) -> String {
        if self.slide_title.is_empty() {
            format!(" slide {}/{} ", self.slide.0, self.slide.1)
        } else {
            format!(" slide {}/{} \u{00b7} {} ", self.slide.0, self.slide.1, self.slide_title)
        }
    }

    pub fn history(mut self, can_undo: bool, can_redo: bool) -> Self {
        self.can_undo = can_undo;
        self.can_redo = can_redo;
        self
    }

    pub fn dirty(mut self, dirty: bool) -> Self {
        self.dirty = dirty;
        self
    }

    fn history_label(&self) -> String {
        let undo = if self.can_undo { "undo" } else { "----" };
        let redo = if self.can_redo { "redo" } else { "----" };
        format!(" {} {} ", undo, redo)
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);
        let panel = Style::default().bg(Color::Black);

        Paragraph::new(Line::from(Span::styled(
            self.message.to_string(),
            Style::default().fg(Color::White),
        )))
        .style(panel)
        .render(chunks[0], buf);

        let name = if self.dirty {
            format!(" {} [+] ", self.file_name)
        } else {
            format!(" {} ", self.file_name)
        };

        let status_line = Line::from(vec![
            Span::styled(
                " SLIDEMARK ",
                Style::default()
                    .bg(Color::Cyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(name, Style::default().bg(Color::DarkGray).fg(Color::White)),
            Span::styled(self.slide_label(), Style::default().fg(Color::Magenta)),
            Span::styled(self.history_label(), Style::default().fg(Color::Gray)),
        ]);

        Paragraph::new(status_line).style(panel).render(chunks[1], buf);
    }
}
