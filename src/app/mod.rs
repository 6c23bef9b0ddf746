mod event_handler;
mod recording;
mod state;

pub use event_handler::handle_app_event;
pub use recording::shutdown;
pub use state::{AppEvent, AppState};
