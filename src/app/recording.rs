use crate::camera::CameraStream;
use crate::controllers::{MediaAccessError, MediaCapture, RecordingState, RequestTicket};
use crate::ui::recording::{attach_stream, sync_recording_panel};

use super::state::{AppEvent, SharedState};

/// Ask the host for the camera. The answer comes back as
/// `AppEvent::CameraResolved` once the device open finishes.
pub fn request_camera(state: &SharedState) {
    let mut s = state.borrow_mut();
    let Some(ticket) = s.recording.request() else {
        return;
    };
    render(&s);

    let camera = s.camera.clone();
    let sender = s.sender.clone();
    s.tokio_rt.spawn(async move {
        let result = camera.request_camera().await;
        if let Err(e) = sender.send(AppEvent::CameraResolved(ticket, result)).await {
            // Main loop is gone; the stream inside the event is dropped and released.
            log::debug!("Camera result undelivered: {e}");
        }
    });
}

/// Apply the host's answer on the main thread.
pub fn on_camera_resolved(
    state: &SharedState,
    ticket: RequestTicket,
    result: Result<CameraStream, MediaAccessError>,
) {
    let mut s = state.borrow_mut();
    if !s.recording.resolve(ticket, result) {
        return;
    }
    if s.recording.state() == RecordingState::Active {
        if let (Some(window), Some(stream)) = (&s.window, s.recording.stream()) {
            attach_stream(&window.recording, stream);
        }
    }
    render(&s);
}

pub fn stop_camera(state: &SharedState) {
    let mut s = state.borrow_mut();
    if s.recording.stop() {
        render(&s);
    }
}

/// Release the camera when the application quits.
pub fn shutdown(state: &SharedState) {
    log::info!("Shutting down");
    state.borrow_mut().recording.stop();
}

fn render(s: &super::AppState) {
    if let Some(ref window) = s.window {
        sync_recording_panel(&window.recording, &s.recording);
    }
}
