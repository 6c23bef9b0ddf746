/// Top-level page sections reachable from the navigation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    Services,
    Chat,
    Writing,
    Recording,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::Services,
        Section::Chat,
        Section::Writing,
        Section::Recording,
    ];

    /// Stable identifier, also used as the page name in the view stack.
    pub fn id(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Services => "services",
            Section::Chat => "ai-chat",
            Section::Writing => "writing",
            Section::Recording => "recording",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Services => "Services",
            Section::Chat => "AI Chat",
            Section::Writing => "Writing",
            Section::Recording => "Recording",
        }
    }
}

/// Open/closed flag of the narrow-window navigation overlay, plus the
/// section currently shown.
#[derive(Debug)]
pub struct NavigationController {
    open: bool,
    current: Section,
    close_on_navigate: bool,
}

impl NavigationController {
    pub fn new(close_on_navigate: bool) -> Self {
        Self {
            open: false,
            current: Section::Home,
            close_on_navigate,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn current(&self) -> Section {
        self.current
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Follow a navigation link. Closes the overlay when configured to.
    pub fn activate_link(&mut self, section: Section) {
        log::debug!("Navigating to {}", section.id());
        self.current = section;
        if self.close_on_navigate {
            self.close();
        }
    }
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed_on_home() {
        let nav = NavigationController::default();
        assert!(!nav.is_open());
        assert_eq!(nav.current(), Section::Home);
    }

    #[test]
    fn test_open_close_toggle() {
        let mut nav = NavigationController::default();
        nav.open();
        assert!(nav.is_open());
        nav.open();
        assert!(nav.is_open());
        nav.close();
        assert!(!nav.is_open());
        nav.toggle();
        assert!(nav.is_open());
        nav.toggle();
        assert!(!nav.is_open());
    }

    #[test]
    fn test_activate_link_closes_overlay() {
        let mut nav = NavigationController::new(true);
        nav.open();
        nav.activate_link(Section::Recording);
        assert!(!nav.is_open());
        assert_eq!(nav.current(), Section::Recording);
    }

    #[test]
    fn test_activate_link_can_keep_overlay_open() {
        let mut nav = NavigationController::new(false);
        nav.open();
        nav.activate_link(Section::Writing);
        assert!(nav.is_open());
        assert_eq!(nav.current(), Section::Writing);
    }

    #[test]
    fn test_section_ids_are_unique() {
        let mut ids: Vec<_> = Section::ALL.iter().map(|s| s.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), Section::ALL.len());
        assert_eq!(Section::Chat.id(), "ai-chat");
    }
}
