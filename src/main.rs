mod app;
mod camera;
mod config;
mod controllers;
mod ui;

use std::cell::RefCell;
use std::rc::Rc;

use gtk4::prelude::*;

use app::{AppEvent, AppState};
use config::Config;
use controllers::ThemeMode;

fn main() -> gtk4::glib::ExitCode {
    env_logger::init();
    log::info!("LiveStream Studio starting");

    let application = libadwaita::Application::builder()
        .application_id("io.github.livestream.Studio")
        .build();

    application.connect_activate(on_activate);
    application.run()
}

fn on_activate(app: &libadwaita::Application) {
    if let Some(window) = app.active_window() {
        window.present();
        return;
    }

    let config = Config::load();
    log::info!("Config: {config:?}");

    // Widgets and the camera task report here; handled on the GTK main thread.
    let (sender, receiver) = async_channel::unbounded::<AppEvent>();

    let style_manager = libadwaita::StyleManager::default();
    let theme_sink = move |mode: ThemeMode| {
        style_manager.set_color_scheme(if mode.is_dark() {
            libadwaita::ColorScheme::ForceDark
        } else {
            libadwaita::ColorScheme::ForceLight
        });
    };

    let state = match AppState::new(config, theme_sink, sender.clone()) {
        Ok(state) => Rc::new(RefCell::new(state)),
        Err(e) => {
            log::error!("Failed to start async runtime: {e}");
            app.quit();
            return;
        }
    };

    let theme = state.borrow().theme.context();
    let window = ui::window::build_window(app, sender, theme);
    window.window.present();
    state.borrow_mut().window = Some(window);

    // Stream handles must not outlive the application.
    {
        let state_clone = state.clone();
        app.connect_shutdown(move |_| {
            app::shutdown(&state_clone);
        });
    }

    // Attach event handler
    {
        let state_clone = state.clone();
        gtk4::glib::spawn_future_local(async move {
            while let Ok(event) = receiver.recv().await {
                app::handle_app_event(&state_clone, event);
            }
        });
    }
}
