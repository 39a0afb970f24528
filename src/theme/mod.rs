//! Theme preference engine.
//!
//! The user picks one of three preferences (`system`, `light`, `dark`). The
//! controller resolves it against the OS appearance signal into an effective
//! light/dark mode and pushes that mode to a presentation sink.
//!
//! # Modules
//! - [`controller`] - [`ThemeController`], the single owner of the preference
//! - [`memory`] - in-process adapters for native hosts and tests

pub mod controller;
pub mod memory;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use controller::{ThemeController, DEFAULT_STORAGE_KEY};
pub use memory::{FixedAppearance, MemoryStore, RecordingSink};

/// The user's explicit three-way choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemePreference {
    /// Rotation order used by the toggle button.
    pub const ROTATION: [ThemePreference; 3] = [
        ThemePreference::System,
        ThemePreference::Light,
        ThemePreference::Dark,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::System => "system",
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Parse a stored token. Anything unrecognised falls back to `System`.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "light" => ThemePreference::Light,
            "dark" => ThemePreference::Dark,
            _ => ThemePreference::System,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThemePreference::System => "System",
            ThemePreference::Light => "Light",
            ThemePreference::Dark => "Dark",
        }
    }

    /// Next value in `system -> light -> dark -> system`.
    pub fn next(self) -> Self {
        match self {
            ThemePreference::System => ThemePreference::Light,
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::System,
        }
    }

    /// Resolve to the mode actually rendered.
    pub fn resolve(self, system_prefers_dark: bool) -> EffectiveMode {
        match self {
            ThemePreference::Light => EffectiveMode::Light,
            ThemePreference::Dark => EffectiveMode::Dark,
            ThemePreference::System => EffectiveMode::from_dark_flag(system_prefers_dark),
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The concrete mode written to the page. Never `system`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveMode {
    Light,
    #[default]
    Dark,
}

impl EffectiveMode {
    pub fn from_dark_flag(is_dark: bool) -> Self {
        if is_dark {
            EffectiveMode::Dark
        } else {
            EffectiveMode::Light
        }
    }

    /// Value of the root `data-theme` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectiveMode::Light => "light",
            EffectiveMode::Dark => "dark",
        }
    }

    pub fn icon(&self) -> ThemeIcon {
        match self {
            EffectiveMode::Light => ThemeIcon::Sun,
            EffectiveMode::Dark => ThemeIcon::Moon,
        }
    }

    pub fn logos(&self) -> LogoVisibility {
        LogoVisibility::for_mode(*self)
    }
}

impl fmt::Display for EffectiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Glyph shown inside the theme toggle button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeIcon {
    Sun,
    Moon,
}

impl ThemeIcon {
    /// Font Awesome class list for the `<i>` element.
    pub fn css_class(&self) -> &'static str {
        match self {
            ThemeIcon::Sun => "fas fa-sun",
            ThemeIcon::Moon => "fas fa-moon",
        }
    }
}

/// Opacities of the two logo variants.
///
/// `on_light` is the dark-ink logo (`#logoDark`) shown on light pages,
/// `on_dark` is the light-ink logo (`#logoLight`) shown on dark pages.
/// Exactly one of them is 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogoVisibility {
    pub on_light: u8,
    pub on_dark: u8,
}

impl LogoVisibility {
    pub fn for_mode(mode: EffectiveMode) -> Self {
        match mode {
            EffectiveMode::Light => LogoVisibility {
                on_light: 1,
                on_dark: 0,
            },
            EffectiveMode::Dark => LogoVisibility {
                on_light: 0,
                on_dark: 1,
            },
        }
    }

    pub fn visible_count(&self) -> u8 {
        self.on_light + self.on_dark
    }
}

/// Errors from a preference store. Callers treat every variant as
/// "preference will not survive reload".
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("preference store unavailable: {0}")]
    Unavailable(String),
    #[error("preference store rejected write: {0}")]
    Rejected(String),
}

/// Origin-scoped durable key-value persistence.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// OS-level appearance. Change notifications are delivered by the host,
/// which then calls [`ThemeController::reconcile_system_signal`].
pub trait AppearanceSignal {
    fn is_dark_preferred(&self) -> bool;
}

/// Rendering side of the theme engine.
pub trait PresentationSink {
    /// Write the mode onto the document root.
    fn apply_mode(&mut self, mode: EffectiveMode);
    fn set_icon(&mut self, icon: ThemeIcon);
    fn set_logo_visibility(&mut self, logos: LogoVisibility);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_parse() {
        assert_eq!(ThemePreference::parse("light"), ThemePreference::Light);
        assert_eq!(ThemePreference::parse("dark"), ThemePreference::Dark);
        assert_eq!(ThemePreference::parse("system"), ThemePreference::System);
        assert_eq!(ThemePreference::parse("oled"), ThemePreference::System);
        assert_eq!(ThemePreference::parse(""), ThemePreference::System);
    }

    #[test]
    fn test_resolution_table() {
        for dark in [false, true] {
            assert_eq!(ThemePreference::Light.resolve(dark), EffectiveMode::Light);
            assert_eq!(ThemePreference::Dark.resolve(dark), EffectiveMode::Dark);
        }
        assert_eq!(ThemePreference::System.resolve(true), EffectiveMode::Dark);
        assert_eq!(ThemePreference::System.resolve(false), EffectiveMode::Light);
    }

    #[test]
    fn test_rotation_is_three_cycle() {
        for start in ThemePreference::ROTATION {
            assert_eq!(start.next().next().next(), start);
            assert_ne!(start.next(), start);
        }
    }

    #[test]
    fn test_icon_and_logos() {
        assert_eq!(EffectiveMode::Light.icon(), ThemeIcon::Sun);
        assert_eq!(EffectiveMode::Dark.icon(), ThemeIcon::Moon);
        for mode in [EffectiveMode::Light, EffectiveMode::Dark] {
            assert_eq!(mode.logos().visible_count(), 1);
        }
        assert_eq!(EffectiveMode::Light.logos().on_light, 1);
        assert_eq!(EffectiveMode::Dark.logos().on_dark, 1);
    }

    #[test]
    fn test_preference_serialization() {
        assert_eq!(
            serde_json::to_string(&ThemePreference::System).unwrap(),
            "\"system\""
        );
        let parsed: EffectiveMode = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(parsed, EffectiveMode::Light);
    }
}
