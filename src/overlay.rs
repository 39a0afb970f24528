//! Overlay state for the mobile menu, the about modal and the event modal.
//!
//! Pure state, no DOM access. The components read it to pick classes and the
//! app root mirrors [`Overlays::scroll_locked`] onto `body.style.overflow`.

/// State of the event detail panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EventPanel {
    #[default]
    Closed,
    /// Fragment fetch in flight; nothing is shown yet.
    Loading { index: usize },
    Open { index: usize, html: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Overlays {
    menu_open: bool,
    about_open: bool,
    event: EventPanel,
}

impl Overlays {
    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn about_open(&self) -> bool {
        self.about_open
    }

    pub fn event(&self) -> &EventPanel {
        &self.event
    }

    pub fn event_open(&self) -> bool {
        matches!(self.event, EventPanel::Open { .. })
    }

    /// Body scrolling is disabled while any modal is visible.
    pub fn scroll_locked(&self) -> bool {
        self.about_open || self.event_open()
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Nav link clicked or click landed outside the menu.
    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn open_about(&mut self) {
        self.menu_open = false;
        self.about_open = true;
    }

    pub fn close_about(&mut self) {
        self.about_open = false;
    }

    /// A card was clicked and its fragment is being fetched.
    pub fn begin_event(&mut self, index: usize) {
        if !self.event_open() {
            self.event = EventPanel::Loading { index };
        }
    }

    /// Fragment arrived. Returns true when the panel just became visible and
    /// a history entry should be pushed for back-button support.
    ///
    /// Late results for a card that is no longer pending are dropped.
    pub fn event_loaded(&mut self, index: usize, html: String) -> bool {
        match self.event {
            EventPanel::Loading { index: pending } if pending == index => {
                self.event = EventPanel::Open { index, html };
                true
            }
            _ => false,
        }
    }

    /// Fetch failed: abort, leave the page as it was.
    pub fn event_failed(&mut self, index: usize) {
        if self.event == (EventPanel::Loading { index }) {
            self.event = EventPanel::Closed;
        }
    }

    pub fn close_event(&mut self) {
        self.event = EventPanel::Closed;
    }

    /// Escape key closes every open modal.
    pub fn escape(&mut self) {
        self.about_open = false;
        if self.event_open() {
            self.event = EventPanel::Closed;
        }
    }

    /// Browser back button. Returns true when the event modal was closed.
    pub fn history_back(&mut self) -> bool {
        if self.event_open() {
            self.event = EventPanel::Closed;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_toggle_and_close() {
        let mut o = Overlays::default();
        o.toggle_menu();
        assert!(o.menu_open());
        o.toggle_menu();
        assert!(!o.menu_open());
        o.toggle_menu();
        o.close_menu();
        assert!(!o.menu_open());
    }

    #[test]
    fn test_about_locks_scroll() {
        let mut o = Overlays::default();
        o.toggle_menu();
        o.open_about();
        assert!(o.about_open());
        assert!(!o.menu_open());
        assert!(o.scroll_locked());
        o.close_about();
        assert!(!o.scroll_locked());
    }

    #[test]
    fn test_loading_event_is_not_visible() {
        let mut o = Overlays::default();
        o.begin_event(2);
        assert!(!o.event_open());
        assert!(!o.scroll_locked());
        assert!(o.event_loaded(2, "<h2>Hackathon</h2>".into()));
        assert!(o.event_open());
        assert!(o.scroll_locked());
    }

    #[test]
    fn test_failed_event_leaves_page_unchanged() {
        let mut o = Overlays::default();
        o.begin_event(0);
        o.event_failed(0);
        assert_eq!(o, Overlays::default());
    }

    #[test]
    fn test_stale_fragment_is_dropped() {
        let mut o = Overlays::default();
        o.begin_event(0);
        o.begin_event(1);
        assert!(!o.event_loaded(0, "old".into()));
        assert!(o.event_loaded(1, "new".into()));
        assert_eq!(
            o.event(),
            &EventPanel::Open {
                index: 1,
                html: "new".into()
            }
        );
    }

    #[test]
    fn test_escape_closes_both_modals() {
        let mut o = Overlays::default();
        o.open_about();
        o.begin_event(1);
        o.event_loaded(1, "x".into());
        o.escape();
        assert!(!o.about_open());
        assert!(!o.event_open());
        assert!(!o.scroll_locked());
    }

    #[test]
    fn test_history_back_closes_only_event_modal() {
        let mut o = Overlays::default();
        o.open_about();
        assert!(!o.history_back());
        assert!(o.about_open());

        o.close_about();
        o.begin_event(0);
        o.event_loaded(0, "x".into());
        assert!(o.history_back());
        assert!(!o.event_open());
    }
}
