//! Dioxus application entry point.
//!
//! This module provides the root App component: it loads the site
//! configuration and installs the theme and overlay contexts before
//! rendering the page.

use dioxus::prelude::*;
use tracing::warn;

pub mod components;
pub mod pages;

use crate::config::{self, SiteConfig};
use components::modal::use_overlay_provider;
use components::theme::use_theme_provider;
use pages::Home;

/// Load configuration, falling back to defaults so the page still renders.
pub fn site_config() -> SiteConfig {
    config::load_config().unwrap_or_else(|e| {
        warn!("Invalid site configuration, using defaults: {:#}", e);
        SiteConfig::default()
    })
}

/// Root app component
#[component]
pub fn App() -> Element {
    let config = use_hook(site_config);
    use_context_provider(|| config.clone());

    use_theme_provider(config.theme.clone());
    use_overlay_provider();

    rsx! {
        Home {}
    }
}
