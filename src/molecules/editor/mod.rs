pub mod boundaries;
mod history;
pub mod line_fmt;
pub mod markdown_fmt;
mod session;
pub mod slides;

pub use history::{HistoryAction, HistoryState, DEFAULT_MAX_HISTORY};
pub use markdown_fmt::{FormatResult, MarkdownFormat, Markers};
pub use session::{EditorSession, FormatOutcome, LineFormat};
