//! In-process adapters for the theme traits.
//!
//! Used on native hosts (where there is no browser storage or media query)
//! and by the tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::{
    AppearanceSignal, EffectiveMode, LogoVisibility, PreferenceStore, PresentationSink,
    StoreError, ThemeIcon,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Failure {
    #[default]
    None,
    Reads,
    Writes,
}

/// HashMap-backed preference store. Lives for the process only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    failure: Failure,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store where every read and write fails.
    pub fn unavailable() -> Self {
        Self {
            failure: Failure::Reads,
            ..Self::default()
        }
    }

    /// Store that reads fine but rejects writes (quota, private mode).
    pub fn read_only() -> Self {
        Self {
            failure: Failure::Writes,
            ..Self::default()
        }
    }

    /// Insert a value without counting it as a write.
    pub fn seed(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    /// Successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.failure == Failure::Reads {
            return Err(StoreError::Unavailable("memory store disabled".into()));
        }
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        match self.failure {
            Failure::Reads => Err(StoreError::Unavailable("memory store disabled".into())),
            Failure::Writes => Err(StoreError::Rejected("memory store is read-only".into())),
            Failure::None => {
                self.seed(key, value);
                self.writes.set(self.writes.get() + 1);
                Ok(())
            }
        }
    }
}

/// Appearance signal with a manually flipped boolean.
#[derive(Debug, Default)]
pub struct FixedAppearance {
    dark: Cell<bool>,
}

impl FixedAppearance {
    pub fn new(dark: bool) -> Self {
        Self {
            dark: Cell::new(dark),
        }
    }

    pub fn set_dark(&self, dark: bool) {
        self.dark.set(dark);
    }
}

impl AppearanceSignal for FixedAppearance {
    fn is_dark_preferred(&self) -> bool {
        self.dark.get()
    }
}

/// Sink that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub modes: Vec<EffectiveMode>,
    pub icons: Vec<ThemeIcon>,
    pub logos: Vec<LogoVisibility>,
}

impl RecordingSink {
    pub fn last_mode(&self) -> Option<EffectiveMode> {
        self.modes.last().copied()
    }

    pub fn last_icon(&self) -> Option<ThemeIcon> {
        self.icons.last().copied()
    }

    pub fn last_logos(&self) -> Option<LogoVisibility> {
        self.logos.last().copied()
    }
}

impl PresentationSink for RecordingSink {
    fn apply_mode(&mut self, mode: EffectiveMode) {
        self.modes.push(mode);
    }

    fn set_icon(&mut self, icon: ThemeIcon) {
        self.icons.push(icon);
    }

    fn set_logo_visibility(&mut self, logos: LogoVisibility) {
        self.logos.push(logos);
    }
}
