//! Navigation bar: logo pair, links, mobile toggle and theme toggle.

use dioxus::prelude::*;

use super::modal::use_overlays;
use super::theme::{use_theme, ThemeToggle};
use crate::config::SiteConfig;

/// Header navigation with mobile toggle.
#[component]
pub fn Nav() -> Element {
    let config = use_context::<SiteConfig>();
    let theme = use_theme();
    let mut overlays = use_overlays();

    let logos = theme.view().logos;
    let menu_open = overlays.read().menu_open();
    let menu_class = if menu_open { "nav-menu active" } else { "nav-menu" };

    rsx! {
        header { class: "site-header",
            a { class: "brand", href: "#",
                // Dark ink for light pages, light ink for dark pages
                img {
                    id: "logoDark",
                    src: "/assets/logo-dark.png",
                    alt: "{config.site.title}",
                    style: "opacity:{logos.on_light}",
                }
                img {
                    id: "logoLight",
                    src: "/assets/logo-light.png",
                    alt: "{config.site.title}",
                    style: "opacity:{logos.on_dark}",
                }
            }

            nav {
                ul {
                    class: "{menu_class}",
                    id: "navMenu",
                    onclick: move |evt| evt.stop_propagation(),
                    li { a { href: "#events", onclick: move |_| overlays.write().close_menu(), "Events" } }
                    li {
                        a {
                            href: "#about",
                            onclick: move |evt| {
                                evt.prevent_default();
                                overlays.write().open_about();
                            },
                            "About"
                        }
                    }
                    li { a { href: "#contact", onclick: move |_| overlays.write().close_menu(), "Contact" } }
                }
            }

            div { class: "header-actions",
                ThemeToggle {}
                button {
                    class: "mobile-menu-toggle",
                    id: "mobileMenuToggle",
                    r#type: "button",
                    aria_label: "Toggle menu",
                    onclick: move |evt| {
                        evt.prevent_default();
                        evt.stop_propagation();
                        overlays.write().toggle_menu();
                    },
                    i { class: if menu_open { "fas fa-times" } else { "fas fa-bars" } }
                }
            }
        }
    }
}
