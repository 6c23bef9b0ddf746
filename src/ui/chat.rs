use std::cell::Cell;

use gtk4::prelude::*;

use crate::app::AppEvent;
use crate::controllers::ChatController;

use super::emit;

/// Handles returned from building the chat panel.
pub struct ChatPanel {
    pub root: libadwaita::Clamp,
    pub transcript: gtk4::ListBox,
    pub scroller: gtk4::ScrolledWindow,
    pub entry: gtk4::Entry,
    rendered: Cell<usize>,
}

/// Build the chat panel. Typing and sending are forwarded as events.
pub fn build_chat_panel(sender: async_channel::Sender<AppEvent>) -> ChatPanel {
    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 12);

    let transcript = gtk4::ListBox::new();
    transcript.set_selection_mode(gtk4::SelectionMode::None);
    transcript.add_css_class("transcript");

    let scroller = gtk4::ScrolledWindow::builder()
        .hscrollbar_policy(gtk4::PolicyType::Never)
        .min_content_height(256)
        .vexpand(true)
        .child(&transcript)
        .build();
    scroller.add_css_class("inset-pane");
    content.append(&scroller);

    let input_row = gtk4::Box::new(gtk4::Orientation::Horizontal, 8);
    let entry = gtk4::Entry::builder()
        .placeholder_text("Type your message...")
        .hexpand(true)
        .build();
    let send_button = gtk4::Button::with_label("Send");
    send_button.add_css_class("suggested-action");
    input_row.append(&entry);
    input_row.append(&send_button);
    content.append(&input_row);

    {
        let sender = sender.clone();
        entry.connect_changed(move |entry| {
            emit(&sender, AppEvent::DraftChanged(entry.text().to_string()));
        });
    }
    {
        let sender = sender.clone();
        entry.connect_activate(move |_| {
            emit(&sender, AppEvent::SendClicked);
        });
    }
    send_button.connect_clicked(move |_| {
        emit(&sender, AppEvent::SendClicked);
    });

    ChatPanel {
        root: super::card(&content, 720),
        transcript,
        scroller,
        entry,
        rendered: Cell::new(0),
    }
}

/// Append rows for messages not shown yet and mirror the draft.
pub fn sync_chat_panel(panel: &ChatPanel, chat: &ChatController) {
    let messages = chat.transcript();
    let shown = panel.rendered.get();
    for message in &messages[shown.min(messages.len())..] {
        panel.transcript.append(&message_row(message));
    }
    if messages.len() > shown {
        panel.rendered.set(messages.len());
        let adj = panel.scroller.vadjustment();
        adj.set_value(adj.upper());
    }

    if panel.entry.text().as_str() != chat.draft() {
        panel.entry.set_text(chat.draft());
    }
}

fn message_row(message: &str) -> gtk4::ListBoxRow {
    let bubble = gtk4::Label::new(Some(message));
    bubble.set_wrap(true);
    bubble.set_xalign(0.0);
    bubble.set_selectable(true);
    bubble.add_css_class("chat-bubble");
    bubble.set_halign(gtk4::Align::End);
    bubble.set_width_request(280);

    let row = gtk4::ListBoxRow::builder()
        .activatable(false)
        .child(&bubble)
        .build();
    row.set_margin_bottom(6);
    row
}
