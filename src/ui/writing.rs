use gtk4::prelude::*;

use crate::app::AppEvent;
use crate::controllers::WritingPad;

use super::emit;

/// Handles returned from building the writing panel.
pub struct WritingPanel {
    pub root: libadwaita::Clamp,
    pub status_label: gtk4::Label,
}

pub fn build_writing_panel(sender: async_channel::Sender<AppEvent>) -> WritingPanel {
    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 12);

    let text_view = gtk4::TextView::builder()
        .wrap_mode(gtk4::WrapMode::WordChar)
        .left_margin(12)
        .right_margin(12)
        .top_margin(12)
        .bottom_margin(12)
        .build();
    text_view.add_css_class("writing-area");

    let scroller = gtk4::ScrolledWindow::builder()
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .min_content_height(256)
        .vexpand(true)
        .child(&text_view)
        .build();
    scroller.add_css_class("inset-pane");
    content.append(&scroller);

    let footer = gtk4::Box::new(gtk4::Orientation::Horizontal, 8);
    let status_label = gtk4::Label::new(Some("Start writing..."));
    status_label.add_css_class("dim-label");
    status_label.set_hexpand(true);
    status_label.set_xalign(0.0);
    let save_button = gtk4::Button::with_label("Save Draft");
    save_button.add_css_class("suggested-action");
    footer.append(&status_label);
    footer.append(&save_button);
    content.append(&footer);

    {
        let sender = sender.clone();
        text_view.buffer().connect_changed(move |buffer| {
            let text = buffer.text(&buffer.start_iter(), &buffer.end_iter(), false);
            emit(&sender, AppEvent::WritingChanged(text.to_string()));
        });
    }
    save_button.connect_clicked(move |_| {
        emit(&sender, AppEvent::SaveDraftClicked);
    });

    WritingPanel {
        root: super::card(&content, 720),
        status_label,
    }
}

pub fn sync_writing_panel(panel: &WritingPanel, pad: &WritingPad) {
    let status = match pad.saved() {
        Some(saved) if !pad.is_dirty() => format!(
            "Saved at {} \u{00b7} {} words",
            saved.saved_at.format("%H:%M:%S"),
            saved.word_count()
        ),
        Some(_) => "Unsaved changes".to_string(),
        None if pad.is_dirty() => "Not saved yet".to_string(),
        None => "Start writing...".to_string(),
    };
    panel.status_label.set_text(&status);
}
