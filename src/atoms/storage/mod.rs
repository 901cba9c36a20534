mod config_io;
mod presentation_store;

pub use config_io::{
    config_dir, ensure_config_dir, expand_tilde, load_config, load_config_from, resolve_data_dir,
    save_config,
};
pub use presentation_store::{FileStore, PresentationStore};
