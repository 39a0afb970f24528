//! Layout component wrapping the page with head elements, nav and modals.

use dioxus::prelude::*;

use super::modal::{use_overlays, AboutModal, EventModal};
use super::nav::Nav;
use super::theme::theme_boot_script;
use crate::config::SiteConfig;

const FONT_AWESOME: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";

/// CSS styles for the application. Colours hang off `[data-theme]`.
const CUSTOM_STYLES: &str = r#"
:root, [data-theme="dark"] {
    --bg: #0f1115; --card: #181b22; --text: #e8e8ec; --muted: #9aa0ab; --accent: #6c8cff;
    --overlay: rgba(0,0,0,.7);
}
[data-theme="light"] {
    --bg: #f7f7fa; --card: #ffffff; --text: #16181d; --muted: #5b6170; --accent: #3352e0;
    --overlay: rgba(0,0,0,.45);
}
body { margin: 0; background: var(--bg); color: var(--text); font-family: system-ui, sans-serif; }
.site-header { display: flex; align-items: center; justify-content: space-between; padding: 1rem 1.5rem; }
.brand { position: relative; display: inline-block; width: 140px; height: 40px; }
.brand img { position: absolute; inset: 0; height: 40px; transition: opacity .2s; }
.nav-menu { display: flex; gap: 1rem; list-style: none; margin: 0; padding: 0; }
.nav-menu a { color: var(--text); text-decoration: none; }
.mobile-menu-toggle { display: none; background: none; border: 0; color: var(--text); font-size: 1.25rem; }
.theme-toggle { background: none; border: 0; color: var(--text); font-size: 1.1rem; cursor: pointer; }
@media (max-width: 768px) {
    .mobile-menu-toggle { display: block; }
    .nav-menu { display: none; position: absolute; top: 4rem; left: 0; right: 0; flex-direction: column; background: var(--card); padding: 1rem 1.5rem; }
    .nav-menu.active { display: flex; }
}
.event-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1rem; padding: 0 1.5rem 2rem; }
.event-card { background: var(--card); border-radius: 12px; padding: 1.25rem; cursor: pointer; }
.event-card small { color: var(--muted); }
.modal { display: none; position: fixed; inset: 0; background: var(--overlay); align-items: center; justify-content: center; z-index: 50; }
.modal.active { display: flex; }
.modal-content, .event-modal { background: var(--card); border-radius: 12px; padding: 1.5rem; max-width: 640px; width: 90%; max-height: 85vh; overflow-y: auto; position: relative; }
.modal-close { position: absolute; top: .75rem; right: .75rem; background: none; border: 0; color: var(--muted); font-size: 1.25rem; cursor: pointer; }
"#;

#[derive(Props, Clone, PartialEq)]
pub struct LayoutProps {
    /// Page content
    pub children: Element,
}

/// Main layout component wrapping all pages.
#[component]
pub fn Layout(props: LayoutProps) -> Element {
    let config = use_context::<SiteConfig>();
    let mut overlays = use_overlays();
    let boot_script = theme_boot_script(&config.theme.storage_key);
    let title = config.site.title.clone();

    rsx! {
        // Head elements - Dioxus hoists these to the real <head>
        document::Title { "{title}" }
        document::Link { rel: "stylesheet", href: FONT_AWESOME }
        document::Style { {CUSTOM_STYLES} }
        // Theme init runs immediately (no DOM needed) to prevent flash
        document::Script { {boot_script} }

        // Any click that reaches the root landed outside the mobile menu
        div {
            class: "page",
            onclick: move |_| {
                if overlays.peek().menu_open() {
                    overlays.write().close_menu();
                }
            },
            Nav {}
            main { {props.children} }
            footer { class: "site-footer",
                small { "{title}" }
            }
            AboutModal {}
            EventModal {}
        }
    }
}
