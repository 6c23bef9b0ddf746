use gtk4::prelude::*;

use crate::app::AppEvent;
use crate::camera::{CameraStream, Frame};
use crate::controllers::{RecordingController, RecordingState};

use super::emit;

/// Handles returned from building the recording panel.
pub struct RecordingPanel {
    pub root: libadwaita::Clamp,
    pub video_surface: gtk4::Overlay,
    pub picture: gtk4::Picture,
    pub placeholder: gtk4::Box,
    pub surface_label: gtk4::Label,
    pub live_badge: gtk4::Label,
    pub record_button: gtk4::Button,
    pub record_label: gtk4::Label,
    pub stop_button: gtk4::Button,
    pub error_box: gtk4::Box,
    pub error_title: gtk4::Label,
    pub error_detail: gtk4::Label,
}

pub fn build_recording_panel(sender: async_channel::Sender<AppEvent>) -> RecordingPanel {
    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 12);

    // --- Video surface: camera frames, with a placeholder while off ---
    let picture = gtk4::Picture::new();
    picture.set_content_fit(gtk4::ContentFit::Cover);
    picture.set_can_shrink(true);
    picture.set_height_request(300);

    let placeholder = gtk4::Box::new(gtk4::Orientation::Vertical, 8);
    placeholder.set_halign(gtk4::Align::Center);
    placeholder.set_valign(gtk4::Align::Center);
    let camera_icon = gtk4::Image::from_icon_name("camera-web-symbolic");
    camera_icon.set_pixel_size(64);
    let surface_label = gtk4::Label::new(Some("Camera off"));
    placeholder.append(&camera_icon);
    placeholder.append(&surface_label);

    let live_badge = gtk4::Label::new(Some("\u{25CF} LIVE"));
    live_badge.add_css_class("live-badge");
    live_badge.set_halign(gtk4::Align::Start);
    live_badge.set_valign(gtk4::Align::Start);
    live_badge.set_visible(false);

    let video_surface = gtk4::Overlay::new();
    video_surface.add_css_class("video-surface");
    video_surface.set_overflow(gtk4::Overflow::Hidden);
    video_surface.set_child(Some(&picture));
    video_surface.add_overlay(&placeholder);
    video_surface.add_overlay(&live_badge);
    content.append(&video_surface);

    let controls = gtk4::Box::new(gtk4::Orientation::Horizontal, 8);
    let heading = gtk4::Label::new(Some("Start Recording"));
    heading.add_css_class("title-2");
    heading.set_hexpand(true);
    heading.set_xalign(0.0);

    let record_inner = gtk4::Box::new(gtk4::Orientation::Horizontal, 6);
    record_inner.append(&gtk4::Image::from_icon_name("media-record-symbolic"));
    let record_label = gtk4::Label::new(Some("Record"));
    record_inner.append(&record_label);
    let record_button = gtk4::Button::builder().child(&record_inner).build();
    record_button.add_css_class("suggested-action");

    let stop_button = gtk4::Button::from_icon_name("media-playback-stop-symbolic");
    stop_button.set_tooltip_text(Some("Stop recording"));
    stop_button.set_visible(false);

    controls.append(&heading);
    controls.append(&stop_button);
    controls.append(&record_button);
    content.append(&controls);

    let error_box = gtk4::Box::new(gtk4::Orientation::Vertical, 4);
    error_box.add_css_class("camera-error");
    let error_title = gtk4::Label::new(None);
    error_title.add_css_class("heading");
    error_title.set_xalign(0.0);
    let error_detail = gtk4::Label::new(None);
    error_detail.set_wrap(true);
    error_detail.set_xalign(0.0);
    error_box.append(&error_title);
    error_box.append(&error_detail);
    error_box.set_visible(false);
    content.append(&error_box);

    {
        let sender = sender.clone();
        record_button.connect_clicked(move |_| {
            emit(&sender, AppEvent::RecordClicked);
        });
    }
    stop_button.connect_clicked(move |_| {
        emit(&sender, AppEvent::StopClicked);
    });

    RecordingPanel {
        root: super::card(&content, 720),
        video_surface,
        picture,
        placeholder,
        surface_label,
        live_badge,
        record_button,
        record_label,
        stop_button,
        error_box,
        error_title,
        error_detail,
    }
}

/// Show the stream's frames on the panel until the stream is released.
pub fn attach_stream(panel: &RecordingPanel, stream: &CameraStream) {
    let frames = stream.frames();
    let picture = panel.picture.clone();
    gtk4::glib::spawn_future_local(async move {
        while let Ok(frame) = frames.recv().await {
            picture.set_paintable(Some(&frame_texture(frame)));
        }
        picture.set_paintable(None::<&gtk4::gdk::Paintable>);
    });
}

fn frame_texture(frame: Frame) -> gtk4::gdk::MemoryTexture {
    let stride = frame.width as usize * 3;
    gtk4::gdk::MemoryTexture::new(
        frame.width as i32,
        frame.height as i32,
        gtk4::gdk::MemoryFormat::R8g8b8,
        &gtk4::glib::Bytes::from_owned(frame.rgb),
        stride,
    )
}

/// Update the panel widgets to reflect the recording state.
pub fn sync_recording_panel(panel: &RecordingPanel, recording: &RecordingController<CameraStream>) {
    let state = recording.state();
    let live = state == RecordingState::Active;
    panel.record_label.set_text(recording.button_label());
    panel.record_button.set_sensitive(!recording.is_busy());
    panel.stop_button.set_visible(live);
    panel.placeholder.set_visible(!live);
    panel.live_badge.set_visible(live);

    if live {
        panel.record_button.remove_css_class("suggested-action");
        panel.record_button.add_css_class("destructive-action");
        panel.video_surface.add_css_class("live");
    } else {
        panel.record_button.remove_css_class("destructive-action");
        panel.record_button.add_css_class("suggested-action");
        panel.video_surface.remove_css_class("live");
    }

    let surface_text = match (state, recording.stream()) {
        (RecordingState::Active, Some(stream)) if stream.is_live() => {
            let (width, height) = stream.size();
            format!("{} \u{00b7} {width}\u{00d7}{height}", stream.device().display())
        }
        (RecordingState::Requesting, _) => "Waiting for camera permission\u{2026}".to_string(),
        _ => "Camera off".to_string(),
    };
    panel.surface_label.set_text(&surface_text);
    panel.live_badge.set_tooltip_text(Some(&surface_text));

    match recording.error() {
        Some(err) => {
            panel.error_title.set_text(err.title());
            panel
                .error_detail
                .set_text(&format!("{err}. {}.", err.suggested_action()));
            panel.error_box.set_visible(true);
        }
        None => panel.error_box.set_visible(false),
    }
}
