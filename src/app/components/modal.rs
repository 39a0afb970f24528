//! About and event modals plus the overlay context they share with the nav.

use dioxus::prelude::*;
use tracing::{info, warn};

use crate::config::SiteConfig;
use crate::events::{load_event_detail, EventDetail, FragmentError, LOAD_FAILED_MESSAGE};
use crate::overlay::{EventPanel, Overlays};

/// Element id of the event modal body; fragment buttons are wired inside it.
pub const EVENT_CONTENT_ID: &str = "eventModalContent";

/// Provide the overlay signal and install page-lifetime listeners
/// (Escape key, back button, body scroll lock).
pub fn use_overlay_provider() -> Signal<Overlays> {
    let overlays = use_signal(Overlays::default);
    use_context_provider(|| overlays);

    #[cfg(target_arch = "wasm32")]
    use_hook(move || {
        let mut on_key = overlays;
        crate::web::on_document_keydown(move |key| {
            if key == "Escape" {
                on_key.write().escape();
            }
        });
        let mut on_back = overlays;
        crate::web::on_popstate(move || {
            on_back.write().history_back();
        });
    });

    // Mirror modal visibility onto body overflow
    use_effect(move || {
        let locked = overlays.read().scroll_locked();
        #[cfg(target_arch = "wasm32")]
        crate::web::set_body_scroll_locked(locked);
        #[cfg(not(target_arch = "wasm32"))]
        let _ = locked;
    });

    overlays
}

pub fn use_overlays() -> Signal<Overlays> {
    use_context::<Signal<Overlays>>()
}

#[cfg(target_arch = "wasm32")]
async fn fetch_event(dir: &str, index: usize) -> Result<EventDetail, FragmentError> {
    load_event_detail(&crate::web::FetchFragments, dir, index).await
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_event(dir: &str, index: usize) -> Result<EventDetail, FragmentError> {
    load_event_detail(&crate::events::FileFragments::new("."), dir, index).await
}

fn notify_user(message: &str) {
    #[cfg(target_arch = "wasm32")]
    crate::web::alert(message);
    #[cfg(not(target_arch = "wasm32"))]
    warn!("{}", message);
}

/// Card click: fetch the fragment, then show it. On failure the user is
/// told once and nothing is shown.
pub fn open_event(mut overlays: Signal<Overlays>, fragment_dir: String, index: usize) {
    overlays.write().begin_event(index);

    spawn(async move {
        match fetch_event(&fragment_dir, index).await {
            Ok(detail) => {
                let shown = overlays.write().event_loaded(detail.index, detail.html);
                if shown {
                    info!("Opened event {}", index + 1);
                    #[cfg(target_arch = "wasm32")]
                    {
                        if let Err(e) = crate::web::push_history_state("event", "#event") {
                            warn!("pushState failed: {}", e);
                        }
                    }
                }
            }
            Err(_) => {
                overlays.write().event_failed(index);
                notify_user(LOAD_FAILED_MESSAGE);
            }
        }
    });
}

/// "About" panel opened from the nav.
#[component]
pub fn AboutModal() -> Element {
    let config = use_context::<SiteConfig>();
    let mut overlays = use_overlays();
    let open = overlays.read().about_open();

    rsx! {
        div {
            class: if open { "modal active" } else { "modal" },
            id: "aboutModal",
            onclick: move |evt| {
                // Only the backdrop itself closes; content clicks stop below
                evt.stop_propagation();
                overlays.write().close_about();
            },
            div {
                class: "modal-content",
                onclick: move |evt| evt.stop_propagation(),
                button {
                    class: "modal-close",
                    id: "modalClose",
                    r#type: "button",
                    aria_label: "Close",
                    onclick: move |_| overlays.write().close_about(),
                    i { class: "fas fa-times" }
                }
                h2 { "About {config.site.title}" }
                for paragraph in config.site.about.iter() {
                    p { "{paragraph}" }
                }
            }
        }
    }
}

/// Event detail panel filled from a fetched fragment.
#[component]
pub fn EventModal() -> Element {
    let mut overlays = use_overlays();
    let html = match overlays.read().event() {
        EventPanel::Open { html, .. } => Some(html.clone()),
        _ => None,
    };
    let open = html.is_some();

    // Fragment buttons are plain HTML; wire them after each render that shows one
    use_effect(move || {
        if overlays.read().event_open() {
            #[cfg(target_arch = "wasm32")]
            crate::web::attach_fragment_actions(EVENT_CONTENT_ID);
        }
    });

    rsx! {
        div {
            class: if open { "modal active" } else { "modal" },
            id: "eventModal",
            onclick: move |evt| {
                evt.stop_propagation();
                overlays.write().close_event();
            },
            div {
                class: "event-modal",
                id: EVENT_CONTENT_ID,
                onclick: move |evt| evt.stop_propagation(),
                dangerous_inner_html: html.unwrap_or_default(),
            }
        }
    }
}
