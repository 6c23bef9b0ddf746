pub mod chat;
pub mod landing;
pub mod recording;
pub mod window;
pub mod writing;

/// Wrap a panel in the rounded translucent card used by every section.
pub(crate) fn card(child: &impl gtk4::prelude::IsA<gtk4::Widget>, max_width: i32) -> libadwaita::Clamp {
    use gtk4::prelude::*;

    let frame = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    frame.add_css_class("glass-card");
    frame.append(child);

    libadwaita::Clamp::builder()
        .maximum_size(max_width)
        .margin_top(24)
        .margin_bottom(24)
        .margin_start(16)
        .margin_end(16)
        .child(&frame)
        .build()
}

/// Forward a widget event to the handler; a closed channel means we are shutting down.
pub(crate) fn emit(sender: &async_channel::Sender<crate::app::AppEvent>, event: crate::app::AppEvent) {
    if let Err(e) = sender.try_send(event) {
        log::warn!("Dropped UI event: {e}");
    }
}
