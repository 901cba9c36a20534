use serde::{Deserialize, Serialize};

use crate::molecules::editor::DEFAULT_MAX_HISTORY;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub keyboard: KeyboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub data_dir: Option<String>,
    /// Owner key under which presentations are stored.
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default = "default_max_history")]
    pub max_history: usize,
    #[serde(default = "default_auto_save_interval")]
    pub auto_save_interval_ms: u64,
    #[serde(default = "default_show_hints")]
    pub show_hints: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_owner() -> String {
    "local".to_string()
}

fn default_max_history() -> usize {
    DEFAULT_MAX_HISTORY
}

fn default_auto_save_interval() -> u64 {
    5000
}

fn default_show_hints() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            owner: default_owner(),
            max_history: default_max_history(),
            auto_save_interval_ms: default_auto_save_interval(),
            show_hints: default_show_hints(),
            log_level: default_log_level(),
        }
    }
}

/// Key strings such as `"ctrl+b"` or `"alt+shift+h"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardConfig {
    #[serde(default = "default_undo")]
    pub undo: String,
    #[serde(default = "default_redo")]
    pub redo: String,

    // Inline formatting
    #[serde(default = "default_bold")]
    pub bold: String,
    #[serde(default = "default_italic")]
    pub italic: String,
    #[serde(default = "default_strikethrough")]
    pub strikethrough: String,
    #[serde(default = "default_inline_code")]
    pub inline_code: String,

    // Line formatting
    #[serde(default = "default_heading")]
    pub heading: String,
    #[serde(default = "default_quote")]
    pub quote: String,
    #[serde(default = "default_bullet_list")]
    pub bullet_list: String,

    // Other
    #[serde(default = "default_select_all")]
    pub select_all: String,
    #[serde(default = "default_open")]
    pub open: String,
    #[serde(default = "default_save")]
    pub save: String,
    #[serde(default = "default_quit")]
    pub quit: String,
}

fn default_undo() -> String { "ctrl+z".to_string() }
fn default_redo() -> String { "ctrl+y".to_string() }

fn default_bold() -> String { "ctrl+b".to_string() }
fn default_italic() -> String { "ctrl+t".to_string() }
fn default_strikethrough() -> String { "ctrl+d".to_string() }
fn default_inline_code() -> String { "ctrl+e".to_string() }

fn default_heading() -> String { "alt+h".to_string() }
fn default_quote() -> String { "alt+q".to_string() }
fn default_bullet_list() -> String { "alt+l".to_string() }

fn default_select_all() -> String { "ctrl+a".to_string() }
fn default_open() -> String { "ctrl+o".to_string() }
fn default_save() -> String { "ctrl+s".to_string() }
fn default_quit() -> String { "ctrl+q".to_string() }

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            undo: default_undo(),
            redo: default_redo(),
            bold: default_bold(),
            italic: default_italic(),
            strikethrough: default_strikethrough(),
            inline_code: default_inline_code(),
            heading: default_heading(),
            quote: default_quote(),
            bullet_list: default_bullet_list(),
            select_all: default_select_all(),
            open: default_open(),
            save: default_save(),
            quit: default_quit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [general]
            max_history = 42

            [keyboard]
            bold = "alt+b"
            "#,
        )
        .unwrap();
        assert_eq!(config.general.max_history, 42);
        assert_eq!(config.general.owner, "local");
        assert_eq!(config.keyboard.bold, "alt+b");
        assert_eq!(config.keyboard.undo, "ctrl+z");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.general.max_history, DEFAULT_MAX_HISTORY);
        assert_eq!(config.general.auto_save_interval_ms, 5000);
    }
}
