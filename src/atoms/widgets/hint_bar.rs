use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::types::KeyboardConfig;

/// One-line cheat sheet built from the configured shortcuts.
pub struct HintBar<'a> {
    keys: &'a KeyboardConfig,
}

impl<'a> HintBar<'a> {
    pub fn new(keys: &'a KeyboardConfig) -> Self {
        Self { keys }
    }

    fn hints(&self) -> Vec<(&'a str, &'static str)> {
        vec![
            (self.keys.bold.as_str(), "Bold"),
            (self.keys.italic.as_str(), "Italic"),
            (self.keys.strikethrough.as_str(), "Strike"),
            (self.keys.inline_code.as_str(), "Code"),
            (self.keys.heading.as_str(), "Heading"),
            (self.keys.quote.as_str(), "Quote"),
            (self.keys.bullet_list.as_str(), "List"),
            (self.keys.undo.as_str(), "Undo"),
            (self.keys.redo.as_str(), "Redo"),
            (self.keys.open.as_str(), "Open"),
            (self.keys.save.as_str(), "Save"),
            (self.keys.quit.as_str(), "Quit"),
        ]
    }
}

impl Widget for HintBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let sep_style = Style::default().fg(Color::DarkGray);
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(Color::Gray);

        let mut spans: Vec<Span> = vec![Span::styled(" ", sep_style)];
        for (i, (key, desc)) in self.hints().into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" \u{2502} ", sep_style));
            }
            spans.push(Span::styled(key, key_style));
            spans.push(Span::styled(format!(" {}", desc), desc_style));
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(Color::Black))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_follow_config() {
        let keys = KeyboardConfig {
            bold: "alt+b".to_string(),
            ..Default::default()
        };
        let bar = HintBar::new(&keys);
        assert_eq!(bar.hints()[0], ("alt+b", "Bold"));
    }
}
