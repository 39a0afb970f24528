//! Home page: hero and event cards.

use dioxus::prelude::*;

use crate::app::components::modal::{open_event, use_overlays};
use crate::app::components::Layout;
use crate::config::SiteConfig;

/// Home page component.
#[component]
pub fn Home() -> Element {
    let config = use_context::<SiteConfig>();
    let overlays = use_overlays();
    let cards = config.events.cards.clone();
    let fragment_dir = config.events.fragment_dir.clone();

    rsx! {
        Layout {
            section { class: "hero",
                h1 { "{config.site.title}" }
                if !config.site.tagline.is_empty() {
                    p { "{config.site.tagline}" }
                }
            }

            section { id: "events",
                if cards.is_empty() {
                    p { class: "empty", "No upcoming events yet." }
                }
                div { class: "event-grid",
                    for (index, card) in cards.into_iter().enumerate() {
                        article {
                            key: "{index}",
                            class: "event-card",
                            onclick: {
                                let fragment_dir = fragment_dir.clone();
                                move |_| open_event(overlays, fragment_dir.clone(), index)
                            },
                            h3 { "{card.title}" }
                            if !card.date.is_empty() || !card.location.is_empty() {
                                small { "{card.date} · {card.location}" }
                            }
                            p { "{card.summary}" }
                        }
                    }
                }
            }
        }
    }
}
