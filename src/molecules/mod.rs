pub mod config;
pub mod editor;
