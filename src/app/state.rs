use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::camera::{CameraStream, V4l2Camera};
use crate::config::Config;
use crate::controllers::{
    ChatController, MediaAccessError, NavigationController, RecordingController, RequestTicket,
    Section, ThemeController, ThemeSink, WritingPad,
};
use crate::ui::window::MainWindow;

/// Events delivered to the GTK main thread, from widgets and from the
/// camera task.
#[derive(Debug)]
pub enum AppEvent {
    DraftChanged(String),
    SendClicked,
    ThemeSwitched(bool),
    ThemeToggled,
    NavOpened,
    NavToggled,
    NavDismissed,
    LinkActivated(Section),
    WritingChanged(String),
    SaveDraftClicked,
    RecordClicked,
    StopClicked,
    CameraResolved(RequestTicket, Result<CameraStream, MediaAccessError>),
}

/// Every controller composed side by side. Lives on the GTK main thread
/// inside Rc<RefCell<>>.
pub struct AppState {
    pub chat: ChatController,
    pub theme: ThemeController,
    pub nav: NavigationController,
    pub recording: RecordingController<CameraStream>,
    pub writing: WritingPad,
    pub camera: Arc<V4l2Camera>,
    pub tokio_rt: tokio::runtime::Runtime,
    pub sender: async_channel::Sender<AppEvent>,

    // UI handles
    pub window: Option<MainWindow>,
}

impl AppState {
    pub fn new(
        config: Config,
        theme_sink: impl ThemeSink + 'static,
        sender: async_channel::Sender<AppEvent>,
    ) -> std::io::Result<Self> {
        let tokio_rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("camera-worker")
            .enable_all()
            .build()?;

        Ok(Self {
            chat: ChatController::new(),
            theme: ThemeController::new(config.theme, theme_sink),
            nav: NavigationController::new(config.close_nav_on_navigate),
            recording: RecordingController::new(),
            writing: WritingPad::new(),
            camera: Arc::new(V4l2Camera::new(config.camera_device)),
            tokio_rt,
            sender,
            window: None,
        })
    }
}

pub type SharedState = Rc<RefCell<AppState>>;
