mod app;
mod event_dispatcher;

pub use app::App;
pub use event_dispatcher::EventDispatcher;
