//! ThemeController - owns the selected preference and applies it.
//!
//! All transitions run synchronously on the UI thread. The store write in
//! [`ThemeController::set_preference`] is best-effort: a failure is logged and
//! the in-memory selection still drives the page.

use tracing::{debug, warn};

use super::{
    AppearanceSignal, EffectiveMode, PreferenceStore, PresentationSink, ThemePreference,
};

/// Key the preference is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "theme";

pub struct ThemeController<S, A, P> {
    selected: ThemePreference,
    storage_key: String,
    store: S,
    appearance: A,
    sink: P,
}

impl<S, A, P> ThemeController<S, A, P>
where
    S: PreferenceStore,
    A: AppearanceSignal,
    P: PresentationSink,
{
    /// Create a controller with `selected = system`. Nothing is applied
    /// until [`initialize`](Self::initialize) runs.
    pub fn new(store: S, appearance: A, sink: P) -> Self {
        Self {
            selected: ThemePreference::System,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            store,
            appearance,
            sink,
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn selected(&self) -> ThemePreference {
        self.selected
    }

    /// Mode currently rendered, re-queried from the signal for `system`.
    pub fn effective(&self) -> EffectiveMode {
        self.selected.resolve(self.appearance.is_dark_preferred())
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn appearance(&self) -> &A {
        &self.appearance
    }

    pub fn sink(&self) -> &P {
        &self.sink
    }

    /// Page-load entry: read the stored preference and apply it.
    /// Never writes the store.
    pub fn initialize(&mut self) -> EffectiveMode {
        self.selected = match self.store.get(&self.storage_key) {
            Ok(Some(value)) => ThemePreference::parse(&value),
            Ok(None) => ThemePreference::System,
            Err(e) => {
                warn!("Theme preference unreadable, using system: {}", e);
                ThemePreference::System
            }
        };
        self.apply()
    }

    /// Store `choice` and apply it.
    pub fn set_preference(&mut self, choice: ThemePreference) -> EffectiveMode {
        self.selected = choice;
        if let Err(e) = self.store.set(&self.storage_key, choice.as_str()) {
            warn!("Theme preference not persisted ({}), keeping it for this page", e);
        }
        self.apply()
    }

    /// Advance along `system -> light -> dark -> system`.
    pub fn cycle(&mut self) -> ThemePreference {
        let next = self.selected.next();
        self.set_preference(next);
        next
    }

    /// Called when the OS appearance flips. Explicit light/dark masks it.
    ///
    /// Returns the newly applied mode, or `None` when the notification was
    /// ignored.
    pub fn reconcile_system_signal(&mut self) -> Option<EffectiveMode> {
        if self.selected != ThemePreference::System {
            debug!(selected = %self.selected, "Ignoring system appearance change");
            return None;
        }
        Some(self.apply())
    }

    /// Forced re-apply of the current selection (deferred after load).
    pub fn reapply(&mut self) -> EffectiveMode {
        self.apply()
    }

    fn apply(&mut self) -> EffectiveMode {
        let effective = self.effective();
        self.sink.apply_mode(effective);
        self.sink.set_icon(effective.icon());
        self.sink.set_logo_visibility(effective.logos());
        debug!(selected = %self.selected, effective = %effective, "Theme applied");
        effective
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{FixedAppearance, MemoryStore, RecordingSink, ThemeIcon};

    type TestController = ThemeController<MemoryStore, FixedAppearance, RecordingSink>;

    fn controller(stored: Option<&str>, os_dark: bool) -> TestController {
        let store = MemoryStore::new();
        if let Some(value) = stored {
            store.seed(DEFAULT_STORAGE_KEY, value);
        }
        ThemeController::new(store, FixedAppearance::new(os_dark), RecordingSink::default())
    }

    #[test]
    fn test_new_defaults_to_system() {
        let c = controller(None, false);
        assert_eq!(c.selected(), ThemePreference::System);
        assert!(c.sink().modes.is_empty());
    }

    #[test]
    fn test_initialize_empty_store_does_not_write() {
        let mut c = controller(None, true);
        let mode = c.initialize();

        assert_eq!(c.selected(), ThemePreference::System);
        assert_eq!(mode, EffectiveMode::Dark);
        assert_eq!(c.store().write_count(), 0);
        assert_eq!(c.store().value(DEFAULT_STORAGE_KEY), None);
    }

    #[test]
    fn test_initialize_reads_stored_choice() {
        let mut c = controller(Some("light"), true);
        assert_eq!(c.initialize(), EffectiveMode::Light);
        assert_eq!(c.selected(), ThemePreference::Light);
        assert_eq!(c.store().write_count(), 0);
    }

    #[test]
    fn test_initialize_unknown_token_falls_back_to_system() {
        let mut c = controller(Some("black"), false);
        assert_eq!(c.initialize(), EffectiveMode::Light);
        assert_eq!(c.selected(), ThemePreference::System);
    }

    #[test]
    fn test_initialize_unreadable_store() {
        let store = MemoryStore::unavailable();
        let mut c =
            ThemeController::new(store, FixedAppearance::new(true), RecordingSink::default());
        assert_eq!(c.initialize(), EffectiveMode::Dark);
        assert_eq!(c.selected(), ThemePreference::System);
    }

    #[test]
    fn test_set_preference_persists_selected_not_effective() {
        let mut c = controller(None, true);
        c.initialize();
        c.set_preference(ThemePreference::System);
        assert_eq!(
            c.store().value(DEFAULT_STORAGE_KEY).as_deref(),
            Some("system")
        );
        assert_eq!(c.sink().last_mode(), Some(EffectiveMode::Dark));
    }

    #[test]
    fn test_set_preference_survives_store_failure() {
        let store = MemoryStore::read_only();
        let mut c =
            ThemeController::new(store, FixedAppearance::new(true), RecordingSink::default());
        c.initialize();

        assert_eq!(c.set_preference(ThemePreference::Light), EffectiveMode::Light);
        assert_eq!(c.selected(), ThemePreference::Light);
        assert_eq!(c.sink().last_mode(), Some(EffectiveMode::Light));
        assert_eq!(c.store().value(DEFAULT_STORAGE_KEY), None);
    }

    #[test]
    fn test_cycle_three_times_returns_to_start() {
        for start in ThemePreference::ROTATION {
            let mut c = controller(Some(start.as_str()), false);
            c.initialize();
            c.cycle();
            c.cycle();
            c.cycle();
            assert_eq!(c.selected(), start);
        }
    }

    #[test]
    fn test_explicit_choice_masks_system_signal() {
        let mut c = controller(None, false);
        c.initialize();
        c.set_preference(ThemePreference::Light);
        let applied = c.sink().modes.len();

        c.appearance().set_dark(true);
        assert_eq!(c.reconcile_system_signal(), None);
        assert_eq!(c.effective(), EffectiveMode::Light);
        assert_eq!(c.sink().modes.len(), applied);
    }

    #[test]
    fn test_system_choice_follows_signal() {
        let mut c = controller(None, false);
        assert_eq!(c.initialize(), EffectiveMode::Light);

        c.appearance().set_dark(true);
        assert_eq!(c.reconcile_system_signal(), Some(EffectiveMode::Dark));
        assert_eq!(c.sink().last_mode(), Some(EffectiveMode::Dark));

        // Same boolean again: re-applied but unchanged
        assert_eq!(c.reconcile_system_signal(), Some(EffectiveMode::Dark));

        c.appearance().set_dark(false);
        assert_eq!(c.reconcile_system_signal(), Some(EffectiveMode::Light));
    }

    #[test]
    fn test_reapply_does_not_touch_store() {
        let mut c = controller(Some("dark"), false);
        c.initialize();
        assert_eq!(c.reapply(), EffectiveMode::Dark);
        assert_eq!(c.store().write_count(), 0);
        assert_eq!(c.sink().modes.len(), 2);
    }

    #[test]
    fn test_exactly_one_logo_visible_after_every_apply() {
        let mut c = controller(None, true);
        c.initialize();
        for _ in 0..6 {
            c.cycle();
        }
        c.appearance().set_dark(false);
        c.reconcile_system_signal();
        assert!(!c.sink().logos.is_empty());
        assert!(c.sink().logos.iter().all(|l| l.visible_count() == 1));
    }

    #[test]
    fn test_custom_storage_key() {
        let mut c = controller(None, false).with_storage_key("campus-theme");
        c.set_preference(ThemePreference::Dark);
        assert_eq!(c.store().value("campus-theme").as_deref(), Some("dark"));
        assert_eq!(c.store().value(DEFAULT_STORAGE_KEY), None);
    }

    #[test]
    fn test_fresh_profile_scenario() {
        // Fresh profile, OS prefers dark
        let mut c = controller(None, true);
        assert_eq!(c.initialize(), EffectiveMode::Dark);
        assert_eq!(c.sink().last_icon(), Some(ThemeIcon::Moon));
        assert_eq!(c.sink().last_logos().map(|l| l.on_dark), Some(1));

        // First click: light
        assert_eq!(c.cycle(), ThemePreference::Light);
        assert_eq!(c.effective(), EffectiveMode::Light);
        assert_eq!(c.sink().last_icon(), Some(ThemeIcon::Sun));
        assert_eq!(c.sink().last_logos().map(|l| l.on_light), Some(1));
        assert_eq!(c.store().value(DEFAULT_STORAGE_KEY).as_deref(), Some("light"));

        // Second click: dark
        assert_eq!(c.cycle(), ThemePreference::Dark);
        assert_eq!(c.sink().last_mode(), Some(EffectiveMode::Dark));

        // Third click: back to system, resolved from the OS
        assert_eq!(c.cycle(), ThemePreference::System);
        assert_eq!(c.effective(), EffectiveMode::Dark);
        assert_eq!(c.store().value(DEFAULT_STORAGE_KEY).as_deref(), Some("system"));
    }
}
