use crate::controllers::ThemeMode;
use crate::ui::chat::sync_chat_panel;
use crate::ui::window::{sync_navigation, sync_theme};
use crate::ui::writing::sync_writing_panel;

use super::recording::{on_camera_resolved, request_camera, stop_camera};
use super::state::{AppEvent, SharedState};

/// Handle an app event. Every state transition goes through here.
pub fn handle_app_event(state: &SharedState, event: AppEvent) {
    match event {
        AppEvent::DraftChanged(text) => {
            state.borrow_mut().chat.update_draft(text);
        }
        AppEvent::SendClicked => {
            let mut s = state.borrow_mut();
            s.chat.submit();
            if let Some(ref window) = s.window {
                sync_chat_panel(&window.chat, &s.chat);
            }
        }
        AppEvent::ThemeSwitched(dark) => {
            let mut s = state.borrow_mut();
            s.theme.set_mode(ThemeMode::from_dark(dark));
            if let Some(ref window) = s.window {
                sync_theme(window);
            }
        }
        AppEvent::ThemeToggled => {
            let mut s = state.borrow_mut();
            s.theme.toggle();
            if let Some(ref window) = s.window {
                sync_theme(window);
            }
        }
        AppEvent::NavOpened => {
            let mut s = state.borrow_mut();
            s.nav.open();
            if let Some(ref window) = s.window {
                sync_navigation(window, &s.nav);
            }
        }
        AppEvent::NavToggled => {
            let mut s = state.borrow_mut();
            s.nav.toggle();
            if let Some(ref window) = s.window {
                sync_navigation(window, &s.nav);
            }
        }
        AppEvent::NavDismissed => {
            state.borrow_mut().nav.close();
        }
        AppEvent::LinkActivated(section) => {
            let mut s = state.borrow_mut();
            s.nav.activate_link(section);
            if let Some(ref window) = s.window {
                sync_navigation(window, &s.nav);
            }
        }
        AppEvent::WritingChanged(text) => {
            let mut s = state.borrow_mut();
            s.writing.update_text(text);
            if let Some(ref window) = s.window {
                sync_writing_panel(&window.writing, &s.writing);
            }
        }
        AppEvent::SaveDraftClicked => {
            let mut s = state.borrow_mut();
            s.writing.save();
            if let Some(ref window) = s.window {
                sync_writing_panel(&window.writing, &s.writing);
            }
        }
        AppEvent::RecordClicked => request_camera(state),
        AppEvent::StopClicked => stop_camera(state),
        AppEvent::CameraResolved(ticket, result) => {
            on_camera_resolved(state, ticket, result);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::app::AppState;
    use crate::config::Config;

    fn headless_state() -> SharedState {
        let (sender, _receiver) = async_channel::unbounded();
        let state = AppState::new(Config::default(), |_: ThemeMode| {}, sender).unwrap();
        Rc::new(RefCell::new(state))
    }

    #[test]
    fn test_theme_shortcut_toggles_mode() {
        let state = headless_state();
        assert_eq!(state.borrow().theme.mode(), ThemeMode::Light);
        handle_app_event(&state, AppEvent::ThemeToggled);
        assert_eq!(state.borrow().theme.mode(), ThemeMode::Dark);
        handle_app_event(&state, AppEvent::ThemeToggled);
        assert_eq!(state.borrow().theme.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_menu_button_opens_overlay() {
        let state = headless_state();
        handle_app_event(&state, AppEvent::NavOpened);
        assert!(state.borrow().nav.is_open());
        // A second press keeps it open; only F9 or a dismissal closes it.
        handle_app_event(&state, AppEvent::NavOpened);
        assert!(state.borrow().nav.is_open());
        handle_app_event(&state, AppEvent::NavToggled);
        assert!(!state.borrow().nav.is_open());
    }

    #[test]
    fn test_blank_send_keeps_draft() {
        let state = headless_state();
        handle_app_event(&state, AppEvent::DraftChanged("   ".to_string()));
        handle_app_event(&state, AppEvent::SendClicked);
        let s = state.borrow();
        assert_eq!(s.chat.draft(), "   ");
        assert!(s.chat.transcript().is_empty());
    }
}
