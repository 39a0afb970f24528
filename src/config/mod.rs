//! Configuration management

use anyhow::Result;
use serde::Deserialize;

use crate::events::EventCard;
use crate::theme::DEFAULT_STORAGE_KEY;

/// Site configuration baked into the bundle at compile time.
pub const EMBEDDED_SITE_TOML: &str = include_str!("../../Site.toml");

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteInfo,

    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub events: EventsConfig,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteInfo::default(),
            theme: ThemeConfig::default(),
            events: EventsConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl SiteConfig {
    /// Parsed log level, `INFO` when unrecognised.
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SiteInfo {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub about: Vec<String>,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: default_title(),
            tagline: String::new(),
            about: Vec::new(),
        }
    }
}

fn default_title() -> String {
    "Campus Events".to_string()
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ThemeConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Delay before the post-load forced re-apply
    #[serde(default = "default_reapply_delay_ms")]
    pub reapply_delay_ms: u32,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            reapply_delay_ms: default_reapply_delay_ms(),
        }
    }
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_reapply_delay_ms() -> u32 {
    100
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EventsConfig {
    #[serde(default = "default_fragment_dir")]
    pub fragment_dir: String,
    #[serde(default)]
    pub cards: Vec<EventCard>,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            fragment_dir: default_fragment_dir(),
            cards: Vec::new(),
        }
    }
}

fn default_fragment_dir() -> String {
    "events".to_string()
}

/// Load the embedded site configuration.
pub fn load_config() -> Result<SiteConfig> {
    load_config_from(EMBEDDED_SITE_TOML)
}

/// Layer defaults, the given TOML document and (native only) `SITE__*`
/// environment variables.
pub fn load_config_from(toml: &str) -> Result<SiteConfig> {
    let builder = ::config::Config::builder()
        // Start with defaults
        .set_default("theme.storage_key", DEFAULT_STORAGE_KEY)?
        .set_default("theme.reapply_delay_ms", i64::from(default_reapply_delay_ms()))?
        .set_default("events.fragment_dir", default_fragment_dir())?
        .add_source(::config::File::from_str(toml, ::config::FileFormat::Toml));

    // Override with environment variables (SITE__LOG_LEVEL, SITE__THEME__STORAGE_KEY, etc.)
    #[cfg(not(target_arch = "wasm32"))]
    let builder = builder.add_source(
        ::config::Environment::with_prefix("SITE")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    Ok(config.try_deserialize()?)
}
