use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use crate::molecules::config::EditorAction;
use crate::molecules::editor::FormatOutcome;

const TAB_TEXT: &str = "  ";

pub struct EventDispatcher;

impl EventDispatcher {
    pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
        if app.open_prompt.is_some() {
            return Self::handle_open_prompt(app, key);
        }
        if let Some(action) = app.keybindings.resolve(&key) {
            Self::handle_action(app, action)?;
        } else {
            Self::handle_editing(app, key);
        }
        app.refresh_dirty();
        Ok(())
    }

    fn handle_action(app: &mut App, action: EditorAction) -> Result<()> {
        match action {
            EditorAction::Undo => {
                if !app.session.undo() {
                    app.set_message("Already at oldest change");
                }
            }
            EditorAction::Redo => {
                if !app.session.redo() {
                    app.set_message("Already at newest change");
                }
            }
            EditorAction::Inline(format) => {
                if app.session.apply_format(format) == FormatOutcome::InCodeBlock {
                    app.set_message("Formatting is disabled inside code blocks");
                }
            }
            EditorAction::Line(format) => {
                if app.session.apply_line_format(format) == FormatOutcome::InCodeBlock {
                    app.set_message("Formatting is disabled inside code blocks");
                }
            }
            EditorAction::SelectAll => app.session.select_all(),
            EditorAction::Open => app.open_prompt = Some(String::new()),
            EditorAction::Save => app.save_current()?,
            EditorAction::Quit => {
                if app.dirty {
                    app.save_current()?;
                }
                app.should_quit = true;
            }
        }
        Ok(())
    }

    fn handle_open_prompt(app: &mut App, key: KeyEvent) -> Result<()> {
        let Some(input) = app.open_prompt.as_mut() else {
            return Ok(());
        };
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                input.push(c);
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Esc => {
                app.open_prompt = None;
                app.clear_message();
            }
            KeyCode::Enter => {
                let name = app.open_prompt.take().unwrap_or_default();
                let name = name.trim();
                if name.is_empty() {
                    app.clear_message();
                } else {
                    app.open_presentation(name)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_editing(app: &mut App, key: KeyEvent) {
        let extend = key.modifiers.contains(KeyModifiers::SHIFT);
        let session = &mut app.session;

        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                session.insert_char(c);
            }
            KeyCode::Enter => session.insert_newline(),
            KeyCode::Tab => session.insert_str(TAB_TEXT),
            KeyCode::Backspace => session.backspace(),
            KeyCode::Delete => session.delete_forward(),
            KeyCode::Left => session.move_left(extend),
            KeyCode::Right => session.move_right(extend),
            KeyCode::Up => session.move_up(extend),
            KeyCode::Down => session.move_down(extend),
            KeyCode::Home => session.move_to_line_start(extend),
            KeyCode::End => session.move_to_line_end(extend),
            KeyCode::Esc => {
                let head = session.head();
                session.set_cursor(head);
                app.clear_message();
            }
            _ => {}
        }
    }
}
