mod editor_widget;
mod hint_bar;
mod status_bar;

pub use editor_widget::EditorWidget;
pub use hint_bar::HintBar;
pub use status_bar::StatusBar;
