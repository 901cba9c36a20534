use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor::SetCursorStyle,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Frame, Terminal,
};

use slidemark::atoms::storage::{load_config, resolve_data_dir, FileStore, PresentationStore};
use slidemark::atoms::widgets::{EditorWidget, HintBar, StatusBar};
use slidemark::coordinator::{App, EventDispatcher};

const DEFAULT_NAME: &str = "untitled";

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("--list") {
        return list_presentations();
    }
    let name = if args.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        args.join(" ")
    };

    let mut app = App::new(&name)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetCursorStyle::BlinkingBar)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        SetCursorStyle::DefaultUserShape
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
    }

    Ok(())
}

fn list_presentations() -> Result<()> {
    let config = load_config()?;
    let store = FileStore::new(&resolve_data_dir(config.general.data_dir.as_deref()));
    for p in store.list(&config.general.owner)? {
        println!(
            "{:<24} {:<32} {}",
            p.slug,
            p.name,
            p.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(tick_rate)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            EventDispatcher::handle_key(app, key)?;
        }

        app.auto_save_if_needed()?;

        if app.should_quit {
            if app.dirty {
                app.save_current()?;
            }
            break;
        }
    }

    Ok(())
}

fn ui(frame: &mut Frame, app: &App) {
    let hint_height = if app.show_hints { 1 } else { 0 };
    let chunks = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(2),
        Constraint::Length(hint_height),
    ])
    .split(frame.area());

    let text = app.session.text();
    let title = app.title();
    let editor = EditorWidget::new(text, app.session.cursor_row_col(), &title)
        .selection(app.session.selection())
        .scroll_offset(app.scroll_offset(chunks[0].height));

    if let Some(pos) = editor.cursor_screen_position(chunks[0]) {
        frame.set_cursor_position(pos);
    }
    frame.render_widget(editor, chunks[0]);

    let (slide, total) = app.session.slide_position();
    let message = app.message_line();
    let slide_title = app.session.current_slide_title();
    let status = StatusBar::new(&app.presentation.slug)
        .message(&message)
        .slide(slide, total)
        .slide_title(&slide_title)
        .history(app.session.can_undo(), app.session.can_redo())
        .dirty(app.dirty);
    frame.render_widget(status, chunks[1]);

    if app.show_hints {
        frame.render_widget(HintBar::new(&app.config.keyboard), chunks[2]);
    }
}
