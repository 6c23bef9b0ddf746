use gtk4::prelude::*;

use crate::app::AppEvent;
use crate::controllers::Section;

use super::emit;

struct Service {
    icon: &'static str,
    title: &'static str,
    description: &'static str,
}

const SERVICES: [Service; 3] = [
    Service {
        icon: "camera-video-symbolic",
        title: "Live Streaming",
        description: "Stream your content to a global audience",
    },
    Service {
        icon: "user-available-symbolic",
        title: "AI Chat",
        description: "Engage with our intelligent chatbot",
    },
    Service {
        icon: "document-edit-symbolic",
        title: "Writing Tools",
        description: "Create and edit your content",
    },
];

/// Hero page. "Get Started" jumps to the chat section.
pub fn build_home_page(sender: async_channel::Sender<AppEvent>) -> libadwaita::Clamp {
    let content = gtk4::Box::new(gtk4::Orientation::Vertical, 16);
    content.set_valign(gtk4::Align::Center);

    let title = gtk4::Label::new(Some("Welcome to LiveStream Platform"));
    title.add_css_class("title-1");
    title.set_wrap(true);
    let tagline = gtk4::Label::new(Some("Stream, Chat, Create, and Connect"));
    tagline.add_css_class("title-4");

    let start_button = gtk4::Button::with_label("Get Started");
    start_button.add_css_class("suggested-action");
    start_button.add_css_class("pill");
    start_button.set_halign(gtk4::Align::Center);
    start_button.connect_clicked(move |_| {
        emit(&sender, AppEvent::LinkActivated(Section::Chat));
    });

    content.append(&title);
    content.append(&tagline);
    content.append(&start_button);

    super::card(&content, 960)
}

pub fn build_services_page() -> libadwaita::Clamp {
    let grid = gtk4::FlowBox::builder()
        .selection_mode(gtk4::SelectionMode::None)
        .homogeneous(true)
        .max_children_per_line(3)
        .min_children_per_line(1)
        .column_spacing(16)
        .row_spacing(16)
        .build();

    for service in &SERVICES {
        let tile = gtk4::Box::new(gtk4::Orientation::Vertical, 12);
        tile.add_css_class("service-tile");

        let icon = gtk4::Image::from_icon_name(service.icon);
        icon.set_pixel_size(48);
        let title = gtk4::Label::new(Some(service.title));
        title.add_css_class("title-3");
        let description = gtk4::Label::new(Some(service.description));
        description.set_wrap(true);
        description.set_justify(gtk4::Justification::Center);

        tile.append(&icon);
        tile.append(&title);
        tile.append(&description);
        grid.insert(&tile, -1);
    }

    super::card(&grid, 960)
}
