//! Browser adapters (wasm32 only).
//!
//! Thin wrappers over `web_sys` for the theme traits, the document root,
//! page-lifetime listeners, history, alerts and fragment fetching.
//! Listeners registered here are leaked on purpose: they live as long as the
//! page does.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::events::{FragmentError, FragmentSource};
use crate::theme::{AppearanceSignal, EffectiveMode, PreferenceStore, StoreError};

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

// ============ Preference store ============

/// `window.localStorage`, looked up on every call (it can be revoked).
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage(&self) -> Result<web_sys::Storage, StoreError> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".into()))?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            Ok(None) => Err(StoreError::Unavailable("localStorage disabled".into())),
            Err(e) => Err(StoreError::Unavailable(js_error(e))),
        }
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(js_error(e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Rejected(js_error(e)))
    }
}

// ============ System appearance ============

/// `matchMedia("(prefers-color-scheme: dark)")`. Reports light when the
/// query is unsupported.
#[derive(Clone, Debug, Default)]
pub struct MediaQueryAppearance {
    list: Option<web_sys::MediaQueryList>,
}

impl MediaQueryAppearance {
    pub fn new() -> Self {
        let list = web_sys::window().and_then(|w| w.match_media(DARK_QUERY).ok().flatten());
        if list.is_none() {
            warn!("matchMedia unsupported, system appearance fixed to light");
        }
        Self { list }
    }

    /// Call `on_change` whenever the OS preference flips. The callback gets
    /// no payload; re-query [`AppearanceSignal::is_dark_preferred`].
    pub fn watch(&self, mut on_change: impl FnMut() + 'static) {
        let Some(list) = &self.list else {
            return;
        };
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            on_change();
        });
        if let Err(e) =
            list.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
        {
            warn!("Failed to watch system appearance: {}", js_error(e));
        }
        closure.forget();
    }
}

impl AppearanceSignal for MediaQueryAppearance {
    fn is_dark_preferred(&self) -> bool {
        self.list.as_ref().map(|l| l.matches()).unwrap_or(false)
    }
}

// ============ Document ============

/// Set `data-theme` on `<html>`.
pub fn apply_root_theme(mode: EffectiveMode) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        if let Err(e) = root.set_attribute("data-theme", mode.as_str()) {
            warn!("Failed to set data-theme: {}", js_error(e));
        }
    }
}

/// `body.style.overflow = "hidden"` while a modal is open.
pub fn set_body_scroll_locked(locked: bool) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let style = body.style();
    let result = if locked {
        style.set_property("overflow", "hidden")
    } else {
        style.remove_property("overflow").map(|_| ())
    };
    if let Err(e) = result {
        warn!("Failed to update body overflow: {}", js_error(e));
    }
}

/// Page-lifetime `keydown` listener on the document; passes `event.key`.
pub fn on_document_keydown(mut handler: impl FnMut(&str) + 'static) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let closure =
        Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |event: web_sys::KeyboardEvent| {
            handler(&event.key());
        });
    if let Err(e) =
        document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
    {
        warn!("Failed to install keydown listener: {}", js_error(e));
    }
    closure.forget();
}

/// Page-lifetime `popstate` listener on the window.
pub fn on_popstate(mut handler: impl FnMut() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        handler();
    });
    if let Err(e) =
        window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
    {
        warn!("Failed to install popstate listener: {}", js_error(e));
    }
    closure.forget();
}

#[derive(Serialize)]
struct HistoryState<'a> {
    modal: &'a str,
}

/// `history.pushState({ modal }, '', hash)` so the back button closes the modal.
pub fn push_history_state(modal: &str, hash: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let state = serde_wasm_bindgen::to_value(&HistoryState { modal }).map_err(|e| e.to_string())?;
    window
        .history()
        .and_then(|h| h.push_state_with_url(&state, "", Some(hash)))
        .map_err(js_error)
}

/// Blocking `window.alert`.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.alert_with_message(message) {
            warn!("alert failed: {}", js_error(e));
        }
    }
}

/// Resolve after `ms` milliseconds via `setTimeout`.
pub async fn sleep_ms(ms: u32) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let timeout = i32::try_from(ms).unwrap_or(i32::MAX);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Err(e) =
            window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout)
        {
            warn!("setTimeout failed: {}", js_error(e));
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = JsFuture::from(promise).await;
}

// ============ Fragments ============

/// `fetch()` relative to the page.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchFragments;

#[async_trait(?Send)]
impl FragmentSource for FetchFragments {
    async fn fetch(&self, path: &str) -> Result<String, FragmentError> {
        let window = web_sys::window().ok_or_else(|| FragmentError::Network("no window".into()))?;
        let value = JsFuture::from(window.fetch_with_str(path))
            .await
            .map_err(|e| FragmentError::Network(js_error(e)))?;
        let response: web_sys::Response = value
            .dyn_into()
            .map_err(|e| FragmentError::Network(js_error(e)))?;
        if !response.ok() {
            return Err(FragmentError::Status(response.status()));
        }
        let text = response
            .text()
            .map_err(|e| FragmentError::Body(js_error(e)))?;
        let text = JsFuture::from(text)
            .await
            .map_err(|e| FragmentError::Body(js_error(e)))?;
        text.as_string()
            .ok_or_else(|| FragmentError::Body("response text is not a string".into()))
    }
}

/// Wire the action buttons inside a freshly loaded event fragment.
///
/// `.btn-primary` shows the calendar placeholder, `.btn-secondary` shares the
/// page (native share sheet, or copies the URL when sharing is unsupported).
pub fn attach_fragment_actions(container_id: &str) {
    let Some(container) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(container_id))
    else {
        return;
    };

    if let Ok(Some(primary)) = container.query_selector(".btn-primary") {
        on_click(&primary, || alert("Calendar integration coming soon!"));
    }
    if let Ok(Some(secondary)) = container.query_selector(".btn-secondary") {
        on_click(&secondary, share_current_page);
    }
}

fn on_click(element: &web_sys::Element, mut handler: impl FnMut() + 'static) {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        handler();
    });
    if let Err(e) =
        element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
    {
        warn!("Failed to attach click handler: {}", js_error(e));
    }
    closure.forget();
}

fn share_current_page() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let url = match window.location().href() {
        Ok(url) => url,
        Err(e) => {
            warn!("Cannot read page URL: {}", js_error(e));
            return;
        }
    };
    let navigator = window.navigator();

    // navigator.share is missing on most desktop browsers
    let share = js_sys::Reflect::get(&navigator, &JsValue::from_str("share"))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
    if let Some(share) = share {
        let data = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&data, &"title".into(), &"College Event".into());
        let _ = js_sys::Reflect::set(&data, &"text".into(), &"Check out this exciting event!".into());
        let _ = js_sys::Reflect::set(&data, &"url".into(), &JsValue::from_str(&url));
        if let Err(e) = share.call1(&navigator, &data) {
            debug!("Share dismissed: {}", js_error(e));
        }
        return;
    }

    let write_text = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .ok()
        .filter(|c| !c.is_undefined())
        .and_then(|clipboard| {
            js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
                .ok()
                .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
                .map(|f| (clipboard, f))
        });
    let Some((clipboard, write_text)) = write_text else {
        warn!("Neither share nor clipboard available");
        return;
    };
    match write_text.call1(&clipboard, &JsValue::from_str(&url)) {
        Ok(promise) => {
            let promise: js_sys::Promise = promise.unchecked_into();
            wasm_bindgen_futures::spawn_local(async move {
                match JsFuture::from(promise).await {
                    Ok(_) => alert("Event URL copied to clipboard!"),
                    Err(e) => warn!("Clipboard write failed: {}", js_error(e)),
                }
            });
        }
        Err(e) => warn!("Clipboard write failed: {}", js_error(e)),
    }
}
