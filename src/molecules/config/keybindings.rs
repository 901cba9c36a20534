use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::molecules::editor::{LineFormat, MarkdownFormat};
use crate::types::KeyboardConfig;

/// Editor commands reachable through configurable shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Undo,
    Redo,
    Inline(MarkdownFormat),
    Line(LineFormat),
    SelectAll,
    /// Prompt for a presentation name and switch to it.
    Open,
    Save,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Parse strings like `"ctrl+b"`, `"alt+shift+h"` or `"ctrl+enter"`.
    pub fn parse(spec: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let mut parts: Vec<&str> = spec.split('+').map(str::trim).collect();
        let key = parts.pop()?;

        for part in parts {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" | "meta" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key.to_lowercase().as_str() {
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "space" => KeyCode::Char(' '),
            _ => {
                let mut chars = key.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                if c.is_uppercase() {
                    modifiers |= KeyModifiers::SHIFT;
                }
                KeyCode::Char(c.to_ascii_lowercase())
            }
        };

        Some(Self { code, modifiers })
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        let relevant = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        let mut modifiers = key.modifiers & relevant;
        let code = match key.code {
            KeyCode::Char(c) => {
                if c.is_uppercase() {
                    modifiers |= KeyModifiers::SHIFT;
                }
                KeyCode::Char(c.to_ascii_lowercase())
            }
            other => other,
        };
        code == self.code && modifiers == self.modifiers
    }
}

pub struct Keybindings {
    bindings: Vec<(KeyBinding, EditorAction)>,
}

impl Keybindings {
    /// Unparseable entries are skipped with a warning.
    pub fn from_config(config: &KeyboardConfig) -> Self {
        let entries = [
            (&config.undo, EditorAction::Undo),
            (&config.redo, EditorAction::Redo),
            (&config.bold, EditorAction::Inline(MarkdownFormat::Bold)),
            (&config.italic, EditorAction::Inline(MarkdownFormat::Italic)),
            (
                &config.strikethrough,
                EditorAction::Inline(MarkdownFormat::Strikethrough),
            ),
            (
                &config.inline_code,
                EditorAction::Inline(MarkdownFormat::InlineCode),
            ),
            (&config.heading, EditorAction::Line(LineFormat::Heading)),
            (&config.quote, EditorAction::Line(LineFormat::Quote)),
            (&config.bullet_list, EditorAction::Line(LineFormat::Bullet)),
            (&config.select_all, EditorAction::SelectAll),
            (&config.open, EditorAction::Open),
            (&config.save, EditorAction::Save),
            (&config.quit, EditorAction::Quit),
        ];

        let bindings = entries
            .into_iter()
            .filter_map(|(spec, action)| match KeyBinding::parse(spec) {
                Some(binding) => Some((binding, action)),
                None => {
                    tracing::warn!(spec = %spec, ?action, "ignoring invalid key binding");
                    None
                }
            })
            .collect();

        Self { bindings }
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<EditorAction> {
        self.bindings
            .iter()
            .find(|(binding, _)| binding.matches(key))
            .map(|(_, action)| *action)
    }
}

impl Default for Keybindings {
    fn default() -> Self {
        Self::from_config(&KeyboardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_parse_ctrl_letter() {
        let b = KeyBinding::parse("ctrl+b").unwrap();
        assert_eq!(b.code, KeyCode::Char('b'));
        assert_eq!(b.modifiers, KeyModifiers::CONTROL);
    }

    #[test]
    fn test_parse_named_and_combined() {
        let b = KeyBinding::parse("Ctrl+Shift+Enter").unwrap();
        assert_eq!(b.code, KeyCode::Enter);
        assert_eq!(b.modifiers, KeyModifiers::CONTROL | KeyModifiers::SHIFT);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(KeyBinding::parse("hyper+x").is_none());
        assert!(KeyBinding::parse("ctrl+xy").is_none());
        assert!(KeyBinding::parse("").is_none());
    }

    #[test]
    fn test_uppercase_implies_shift() {
        let b = KeyBinding::parse("ctrl+Z").unwrap();
        assert!(b.matches(&key(KeyCode::Char('Z'), KeyModifiers::CONTROL)));
        assert!(b.matches(&key(
            KeyCode::Char('z'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        )));
        assert!(!b.matches(&key(KeyCode::Char('z'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_default_resolution() {
        let keys = Keybindings::default();
        assert_eq!(
            keys.resolve(&key(KeyCode::Char('b'), KeyModifiers::CONTROL)),
            Some(EditorAction::Inline(MarkdownFormat::Bold))
        );
        assert_eq!(
            keys.resolve(&key(KeyCode::Char('z'), KeyModifiers::CONTROL)),
            Some(EditorAction::Undo)
        );
        assert_eq!(
            keys.resolve(&key(KeyCode::Char('h'), KeyModifiers::ALT)),
            Some(EditorAction::Line(LineFormat::Heading))
        );
        assert_eq!(
            keys.resolve(&key(KeyCode::Char('o'), KeyModifiers::CONTROL)),
            Some(EditorAction::Open)
        );
        assert_eq!(keys.resolve(&key(KeyCode::Char('b'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_custom_config_overrides() {
        let config = KeyboardConfig {
            bold: "alt+b".to_string(),
            ..Default::default()
        };
        let keys = Keybindings::from_config(&config);
        assert_eq!(
            keys.resolve(&key(KeyCode::Char('b'), KeyModifiers::ALT)),
            Some(EditorAction::Inline(MarkdownFormat::Bold))
        );
        assert_eq!(keys.resolve(&key(KeyCode::Char('b'), KeyModifiers::CONTROL)), None);
    }
}
