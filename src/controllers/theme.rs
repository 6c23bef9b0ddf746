use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Global light/dark presentation flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn toggled(self) -> Self {
        Self::from_dark(!self.is_dark())
    }
}

/// Receives the theme whenever it changes, e.g. the toolkit style manager.
pub trait ThemeSink {
    fn apply(&self, mode: ThemeMode);
}

impl<F: Fn(ThemeMode)> ThemeSink for F {
    fn apply(&self, mode: ThemeMode) {
        self(mode)
    }
}

/// Read handle on the process-wide theme value.
///
/// Created once by [`ThemeController::new`]; clones observe every later
/// change. Only the controller can write it.
#[derive(Debug, Clone)]
pub struct ThemeContext {
    mode: Rc<Cell<ThemeMode>>,
}

impl ThemeContext {
    pub fn mode(&self) -> ThemeMode {
        self.mode.get()
    }
}

/// Owns the theme flag and pushes every change to the presentation sink.
pub struct ThemeController {
    context: ThemeContext,
    sink: Box<dyn ThemeSink>,
}

impl ThemeController {
    /// Set the startup theme and apply it to the sink once.
    pub fn new(initial: ThemeMode, sink: impl ThemeSink + 'static) -> Self {
        sink.apply(initial);
        Self {
            context: ThemeContext {
                mode: Rc::new(Cell::new(initial)),
            },
            sink: Box::new(sink),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.context.mode()
    }

    pub fn context(&self) -> ThemeContext {
        self.context.clone()
    }

    pub fn toggle(&mut self) {
        self.set_mode(self.mode().toggled());
    }

    /// Set the mode explicitly. Setting the current mode does nothing.
    pub fn set_mode(&mut self, mode: ThemeMode) {
        if self.context.mode.get() == mode {
            return;
        }
        log::debug!("Theme -> {mode:?}");
        self.context.mode.set(mode);
        self.sink.apply(mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recording_sink() -> (Rc<RefCell<Vec<ThemeMode>>>, impl Fn(ThemeMode)) {
        let applied = Rc::new(RefCell::new(Vec::new()));
        let sink_log = applied.clone();
        (applied, move |mode| sink_log.borrow_mut().push(mode))
    }

    #[test]
    fn test_startup_mode_is_applied() {
        let (applied, sink) = recording_sink();
        let theme = ThemeController::new(ThemeMode::Dark, sink);
        assert_eq!(theme.mode(), ThemeMode::Dark);
        assert_eq!(*applied.borrow(), vec![ThemeMode::Dark]);
    }

    #[test]
    fn test_toggle_twice_restores_mode() {
        let (applied, sink) = recording_sink();
        let mut theme = ThemeController::new(ThemeMode::default(), sink);
        theme.toggle();
        assert_eq!(theme.mode(), ThemeMode::Dark);
        theme.toggle();
        assert_eq!(theme.mode(), ThemeMode::Light);
        assert_eq!(
            *applied.borrow(),
            vec![ThemeMode::Light, ThemeMode::Dark, ThemeMode::Light]
        );
    }

    #[test]
    fn test_set_same_mode_does_not_notify() {
        let (applied, sink) = recording_sink();
        let mut theme = ThemeController::new(ThemeMode::Light, sink);
        theme.set_mode(ThemeMode::Light);
        assert_eq!(applied.borrow().len(), 1);
        theme.set_mode(ThemeMode::Dark);
        assert_eq!(applied.borrow().len(), 2);
    }

    #[test]
    fn test_context_follows_controller() {
        let mut theme = ThemeController::new(ThemeMode::Light, |_: ThemeMode| {});
        let reader = theme.context();
        theme.set_mode(ThemeMode::Dark);
        assert!(reader.mode().is_dark());
    }

    #[test]
    fn test_mode_serde() {
        assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), "\"dark\"");
        let mode: ThemeMode = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(mode, ThemeMode::Light);
    }
}
