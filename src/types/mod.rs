mod config;
mod presentation;
mod selection;

pub use config::{Config, GeneralConfig, KeyboardConfig};
pub use presentation::{slugify, Presentation};
pub use selection::{LineBoundary, Selection, WordBoundary};
