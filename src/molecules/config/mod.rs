mod keybindings;

pub use keybindings::{EditorAction, KeyBinding, Keybindings};
