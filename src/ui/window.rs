use gtk4::prelude::*;
use libadwaita::prelude::*;

use crate::app::AppEvent;
use crate::controllers::{NavigationController, Section, ThemeContext};

use super::chat::{build_chat_panel, ChatPanel};
use super::emit;
use super::landing::{build_home_page, build_services_page};
use super::recording::{build_recording_panel, RecordingPanel};
use super::writing::{build_writing_panel, WritingPanel};

/// Width below which the inline links collapse into the overlay menu.
const NARROW_WIDTH_SP: f64 = 720.0;

const STYLE: &str = r#"
.studio-root {
    background-image: linear-gradient(135deg, #ffffff, #dbeafe 50%, #bfdbfe);
}
.studio-root.dark {
    background-image: linear-gradient(135deg, #111827, #1e3a8a 50%, #1d4ed8);
}
.glass-card {
    background-color: alpha(@window_bg_color, 0.35);
    border-radius: 24px;
    padding: 32px;
}
.service-tile {
    background-color: alpha(@window_bg_color, 0.35);
    border-radius: 24px;
    padding: 32px;
}
.inset-pane {
    background-color: alpha(@view_bg_color, 0.5);
    border-radius: 16px;
}
.transcript {
    background-color: transparent;
    padding: 12px;
}
.chat-bubble {
    background-color: alpha(@view_bg_color, 0.8);
    border-radius: 8px;
    padding: 8px;
}
.video-surface {
    background-color: rgba(0, 0, 0, 0.5);
    border-radius: 16px;
    color: white;
}
.video-surface.live {
    box-shadow: inset 0 0 0 3px #ef4444;
}
.live-badge {
    background-color: #ef4444;
    border-radius: 6px;
    margin: 12px;
    padding: 2px 8px;
    font-weight: bold;
}
.camera-error {
    background-color: alpha(@error_bg_color, 0.2);
    border-radius: 12px;
    padding: 12px;
}
"#;

/// Handles returned from building the main window.
pub struct MainWindow {
    pub window: libadwaita::ApplicationWindow,
    pub root: libadwaita::ToolbarView,
    pub split_view: libadwaita::OverlaySplitView,
    pub stack: gtk4::Stack,
    pub theme_switch: gtk4::Switch,
    pub theme: ThemeContext,
    pub chat: ChatPanel,
    pub writing: WritingPanel,
    pub recording: RecordingPanel,
}

/// Build the main window. Every widget signal is forwarded through `sender`.
pub fn build_window(
    app: &libadwaita::Application,
    sender: async_channel::Sender<AppEvent>,
    theme: ThemeContext,
) -> MainWindow {
    load_style();

    let window = libadwaita::ApplicationWindow::builder()
        .application(app)
        .title("LiveStream Platform")
        .default_width(1024)
        .default_height(760)
        .build();

    let root = libadwaita::ToolbarView::new();
    root.add_css_class("studio-root");
    let header = libadwaita::HeaderBar::new();

    // --- Navigation ---
    let nav_button = gtk4::Button::from_icon_name("open-menu-symbolic");
    nav_button.set_tooltip_text(Some("Navigation"));
    nav_button.set_visible(false);
    {
        let sender = sender.clone();
        nav_button.connect_clicked(move |_| {
            emit(&sender, AppEvent::NavOpened);
        });
    }
    header.pack_start(&nav_button);

    let inline_nav = gtk4::Box::new(gtk4::Orientation::Horizontal, 4);
    for section in Section::ALL {
        inline_nav.append(&link_button(section, &sender));
    }
    header.set_title_widget(Some(&inline_nav));

    // --- Theme switch ---
    let theme_box = gtk4::Box::new(gtk4::Orientation::Horizontal, 6);
    let theme_switch = gtk4::Switch::new();
    theme_switch.set_valign(gtk4::Align::Center);
    theme_switch.set_active(theme.mode().is_dark());
    theme_switch.set_tooltip_text(Some("Dark mode"));
    {
        let sender = sender.clone();
        theme_switch.connect_state_set(move |_, active| {
            emit(&sender, AppEvent::ThemeSwitched(active));
            gtk4::glib::Propagation::Proceed
        });
    }
    theme_box.append(&gtk4::Image::from_icon_name("weather-clear-symbolic"));
    theme_box.append(&theme_switch);
    theme_box.append(&gtk4::Image::from_icon_name("weather-clear-night-symbolic"));
    header.pack_end(&theme_box);

    root.add_top_bar(&header);

    // --- Sections ---
    let chat = build_chat_panel(sender.clone());
    let writing = build_writing_panel(sender.clone());
    let recording = build_recording_panel(sender.clone());

    let stack = gtk4::Stack::new();
    stack.set_transition_type(gtk4::StackTransitionType::Crossfade);
    for section in Section::ALL {
        let page: gtk4::Widget = match section {
            Section::Home => build_home_page(sender.clone()).upcast(),
            Section::Services => build_services_page().upcast(),
            Section::Chat => chat.root.clone().upcast(),
            Section::Writing => writing.root.clone().upcast(),
            Section::Recording => recording.root.clone().upcast(),
        };
        let scrolled = gtk4::ScrolledWindow::builder()
            .hscrollbar_policy(gtk4::PolicyType::Never)
            .child(&page)
            .build();
        stack.add_titled(&scrolled, Some(section.id()), section.title());
    }

    // --- Overlay navigation for narrow windows ---
    let sidebar = gtk4::Box::new(gtk4::Orientation::Vertical, 4);
    sidebar.set_margin_top(12);
    sidebar.set_margin_start(12);
    sidebar.set_margin_end(12);
    for section in Section::ALL {
        sidebar.append(&link_button(section, &sender));
    }

    let split_view = libadwaita::OverlaySplitView::builder()
        .collapsed(true)
        .show_sidebar(false)
        .sidebar(&sidebar)
        .content(&stack)
        .build();
    // Clicking outside the overlay hides it without going through the handler.
    {
        let sender = sender.clone();
        split_view.connect_show_sidebar_notify(move |view| {
            if !view.property::<bool>("show-sidebar") {
                emit(&sender, AppEvent::NavDismissed);
            }
        });
    }
    root.set_content(Some(&split_view));
    window.set_content(Some(&root));

    // Inline links vs. menu button is a width rule, not state.
    let breakpoint = libadwaita::Breakpoint::new(libadwaita::BreakpointCondition::new_length(
        libadwaita::BreakpointConditionLengthType::MaxWidth,
        NARROW_WIDTH_SP,
        libadwaita::LengthUnit::Sp,
    ));
    {
        let (inline_nav, nav_button) = (inline_nav.clone(), nav_button.clone());
        breakpoint.connect_apply(move |_| {
            inline_nav.set_visible(false);
            nav_button.set_visible(true);
        });
    }
    {
        let (inline_nav, nav_button) = (inline_nav.clone(), nav_button.clone());
        breakpoint.connect_unapply(move |_| {
            inline_nav.set_visible(true);
            nav_button.set_visible(false);
        });
    }
    window.add_breakpoint(breakpoint);
    window.add_controller(build_shortcuts(sender));

    let main_window = MainWindow {
        window,
        root,
        split_view,
        stack,
        theme_switch,
        theme,
        chat,
        writing,
        recording,
    };
    sync_theme(&main_window);
    main_window
}

fn link_button(section: Section, sender: &async_channel::Sender<AppEvent>) -> gtk4::Button {
    let button = gtk4::Button::with_label(section.title());
    button.add_css_class("flat");
    let sender = sender.clone();
    button.connect_clicked(move |_| {
        emit(&sender, AppEvent::LinkActivated(section));
    });
    button
}

/// Window-wide keyboard shortcuts: Ctrl+Shift+D flips the theme, F9 the overlay menu.
fn build_shortcuts(sender: async_channel::Sender<AppEvent>) -> gtk4::ShortcutController {
    let shortcuts: [(&str, fn() -> AppEvent); 2] = [
        ("<Control><Shift>d", || AppEvent::ThemeToggled),
        ("F9", || AppEvent::NavToggled),
    ];
    let controller = gtk4::ShortcutController::new();
    controller.set_scope(gtk4::ShortcutScope::Global);
    for (accel, event) in shortcuts {
        let Some(trigger) = gtk4::ShortcutTrigger::parse_string(accel) else {
            log::warn!("Invalid shortcut trigger {accel:?}");
            continue;
        };
        let sender = sender.clone();
        let action = gtk4::CallbackAction::new(move |_, _| {
            emit(&sender, event());
            gtk4::glib::Propagation::Stop
        });
        controller.add_shortcut(gtk4::Shortcut::new(Some(trigger), Some(action)));
    }
    controller
}

fn load_style() {
    let Some(display) = gtk4::gdk::Display::default() else {
        log::warn!("No display; skipping stylesheet");
        return;
    };
    let css_provider = gtk4::CssProvider::new();
    css_provider.load_from_string(STYLE);
    gtk4::style_context_add_provider_for_display(
        &display,
        &css_provider,
        gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

/// Themed surfaces read the shared theme context; the style manager handles the rest.
pub fn sync_theme(window: &MainWindow) {
    let mode = window.theme.mode();
    if window.theme_switch.is_active() != mode.is_dark() {
        window.theme_switch.set_active(mode.is_dark());
    }
    if mode.is_dark() {
        window.root.add_css_class("dark");
    } else {
        window.root.remove_css_class("dark");
    }
}

pub fn sync_navigation(window: &MainWindow, nav: &NavigationController) {
    window.split_view.set_show_sidebar(nav.is_open());
    let current = nav.current().id();
    if window.stack.visible_child_name().as_deref() != Some(current) {
        window.stack.set_visible_child_name(current);
    }
}
