//! View-state controllers. Nothing in here touches GTK, so every transition
//! rule can be exercised from plain unit tests.

pub mod chat;
pub mod error;
pub mod navigation;
pub mod recording;
pub mod theme;
pub mod writing;

pub use chat::ChatController;
pub use error::MediaAccessError;
pub use navigation::{NavigationController, Section};
pub use recording::{MediaCapture, RecordingController, RecordingState, RequestTicket, StreamHandle};
pub use theme::{ThemeContext, ThemeController, ThemeMode, ThemeSink};
pub use writing::WritingPad;
