use std::time::Instant;

use anyhow::Result;
use tracing::info;

use crate::atoms::logging;
use crate::atoms::storage::{
    ensure_config_dir, load_config, resolve_data_dir, FileStore, PresentationStore,
};
use crate::molecules::config::Keybindings;
use crate::molecules::editor::EditorSession;
use crate::types::{slugify, Config, Presentation};

pub struct App {
    pub config: Config,
    pub keybindings: Keybindings,

    pub session: EditorSession,
    pub presentation: Presentation,
    store: Box<dyn PresentationStore>,

    pub command_message: String,
    pub show_hints: bool,
    /// Name typed so far while the open prompt is active.
    pub open_prompt: Option<String>,

    pub should_quit: bool,
    pub dirty: bool,
    pub last_save: Instant,
}

impl App {
    /// Load the user config and open (or create) the named presentation.
    pub fn new(name: &str) -> Result<Self> {
        let config_dir = ensure_config_dir()?;
        let config = load_config()?;
        logging::init(&config_dir, &config.general.log_level)?;

        let data_dir = resolve_data_dir(config.general.data_dir.as_deref());
        let store = FileStore::new(&data_dir);
        info!(data_dir = %data_dir.display(), "starting slidemark");
        Self::with_store(config, Box::new(store), name)
    }

    pub fn with_store(
        config: Config,
        store: Box<dyn PresentationStore>,
        name: &str,
    ) -> Result<Self> {
        let presentation = open_or_create(store.as_ref(), &config.general.owner, name)?;
        let session = EditorSession::new(&presentation.markdown, config.general.max_history);
        let keybindings = Keybindings::from_config(&config.keyboard);
        let show_hints = config.general.show_hints;

        Ok(Self {
            config,
            keybindings,
            session,
            presentation,
            store,
            command_message: String::new(),
            show_hints,
            open_prompt: None,
            should_quit: false,
            dirty: false,
            last_save: Instant::now(),
        })
    }

    pub fn set_message(&mut self, msg: &str) {
        self.command_message = msg.to_string();
    }

    pub fn clear_message(&mut self) {
        self.command_message.clear();
    }

    /// Text for the message row: the open prompt while it is active.
    pub fn message_line(&self) -> String {
        match &self.open_prompt {
            Some(input) => format!("Open presentation: {}", input),
            None => self.command_message.clone(),
        }
    }

    pub fn title(&self) -> String {
        format!("{} ({})", self.presentation.name, self.presentation.slug)
    }

    /// Switch to another presentation, replacing the undo history.
    pub fn open_presentation(&mut self, name: &str) -> Result<()> {
        if self.dirty {
            self.save_current()?;
        }
        let presentation =
            open_or_create(self.store.as_ref(), &self.config.general.owner, name)?;
        self.session.reset(&presentation.markdown);
        self.presentation = presentation;
        self.dirty = false;
        self.set_message(&format!("Opened {}", self.presentation.slug));
        Ok(())
    }

    pub fn refresh_dirty(&mut self) {
        self.dirty = self.session.text() != self.presentation.markdown;
    }

    pub fn save_current(&mut self) -> Result<()> {
        self.presentation.update_markdown(self.session.text().to_string());
        self.store.update(&self.presentation)?;
        self.dirty = false;
        self.last_save = Instant::now();
        self.set_message("Saved");
        info!(slug = %self.presentation.slug, "presentation saved");
        Ok(())
    }

    pub fn auto_save_if_needed(&mut self) -> Result<()> {
        if self.dirty
            && self.last_save.elapsed().as_millis()
                >= self.config.general.auto_save_interval_ms as u128
        {
            self.save_current()?;
        }
        Ok(())
    }

    /// First visible row so the cursor stays inside a view of `area_height`.
    pub fn scroll_offset(&self, area_height: u16) -> usize {
        let inner_height = area_height.saturating_sub(2) as usize;
        if inner_height == 0 {
            return 0;
        }
        let (row, _) = self.session.cursor_row_col();
        if row >= inner_height {
            row - inner_height + 1
        } else {
            0
        }
    }
}

fn open_or_create(store: &dyn PresentationStore, owner: &str, name: &str) -> Result<Presentation> {
    let slug = slugify(name);
    if store.exists(owner, &slug)? {
        return store.read(owner, &slug);
    }
    info!(owner, slug = %slug, "creating new presentation");
    let presentation = Presentation::new(owner, name, format!("# {}\n", name));
    store.create(&presentation)?;
    Ok(presentation)
}
