//! Theme toggle component and the theme context shared across the page.

use dioxus::prelude::*;

use crate::config::ThemeConfig;
use crate::theme::{
    EffectiveMode, LogoVisibility, PresentationSink, ThemeController, ThemeIcon, ThemePreference,
};

#[cfg(target_arch = "wasm32")]
pub type HostStore = crate::web::LocalStorageStore;
#[cfg(not(target_arch = "wasm32"))]
pub type HostStore = crate::theme::MemoryStore;

#[cfg(target_arch = "wasm32")]
pub type HostAppearance = crate::web::MediaQueryAppearance;
#[cfg(not(target_arch = "wasm32"))]
pub type HostAppearance = crate::theme::FixedAppearance;

pub type HostThemeController = ThemeController<HostStore, HostAppearance, PageSink>;

/// What the components render for the current effective mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeView {
    pub mode: EffectiveMode,
    pub icon: ThemeIcon,
    pub logos: LogoVisibility,
}

impl Default for ThemeView {
    fn default() -> Self {
        let mode = EffectiveMode::default();
        Self {
            mode,
            icon: mode.icon(),
            logos: mode.logos(),
        }
    }
}

/// Presentation sink writing into a signal (icon, logos) and, in the
/// browser, onto the `<html data-theme>` attribute.
pub struct PageSink {
    view: Signal<ThemeView>,
}

impl PresentationSink for PageSink {
    fn apply_mode(&mut self, mode: EffectiveMode) {
        self.view.write().mode = mode;
        #[cfg(target_arch = "wasm32")]
        crate::web::apply_root_theme(mode);
    }

    fn set_icon(&mut self, icon: ThemeIcon) {
        self.view.write().icon = icon;
    }

    fn set_logo_visibility(&mut self, logos: LogoVisibility) {
        self.view.write().logos = logos;
    }
}

/// Global theme state shared via context
#[derive(Clone, Copy)]
pub struct ThemeContext {
    controller: Signal<HostThemeController>,
    pub view: Signal<ThemeView>,
}

impl ThemeContext {
    pub fn selected(&self) -> ThemePreference {
        self.controller.read().selected()
    }

    pub fn view(&self) -> ThemeView {
        (self.view)()
    }

    /// Toggle button handler
    pub fn cycle(&self) -> ThemePreference {
        let mut controller = self.controller;
        let next = controller.write().cycle();
        next
    }

    pub fn set(&self, choice: ThemePreference) {
        let mut controller = self.controller;
        controller.write().set_preference(choice);
    }

    fn initialize(&self) {
        let mut controller = self.controller;
        controller.write().initialize();
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    fn reapply(&self) {
        let mut controller = self.controller;
        controller.write().reapply();
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    fn reconcile_system_signal(&self) {
        let mut controller = self.controller;
        controller.write().reconcile_system_signal();
    }
}

#[cfg(target_arch = "wasm32")]
fn host_adapters() -> (HostStore, HostAppearance) {
    (
        crate::web::LocalStorageStore,
        crate::web::MediaQueryAppearance::new(),
    )
}

#[cfg(not(target_arch = "wasm32"))]
fn host_adapters() -> (HostStore, HostAppearance) {
    (crate::theme::MemoryStore::new(), crate::theme::FixedAppearance::default())
}

/// Initialize theme context provider - call once at app root
pub fn use_theme_provider(config: ThemeConfig) -> ThemeContext {
    let view = use_signal(ThemeView::default);
    let storage_key = config.storage_key.clone();
    let controller = use_signal(move || {
        let (store, appearance) = host_adapters();
        ThemeController::new(store, appearance, PageSink { view }).with_storage_key(storage_key)
    });

    let ctx = use_context_provider(|| ThemeContext { controller, view });

    // Follow OS appearance changes for the lifetime of the page
    #[cfg(target_arch = "wasm32")]
    use_hook(move || {
        let appearance = controller.peek().appearance().clone();
        appearance.watch(move || ctx.reconcile_system_signal());
    });

    let reapply_delay_ms = config.reapply_delay_ms;
    use_effect(move || {
        ctx.initialize();

        // Second pass shortly after load, for logos attached late
        #[cfg(target_arch = "wasm32")]
        spawn(async move {
            crate::web::sleep_ms(reapply_delay_ms).await;
            ctx.reapply();
        });
        #[cfg(not(target_arch = "wasm32"))]
        let _ = reapply_delay_ms;
    });

    ctx
}

/// Get theme context - use in any component
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>()
}

/// Head script applying the stored theme before the bundle loads, so the
/// first paint already has the right `data-theme`.
pub fn theme_boot_script(storage_key: &str) -> String {
    // JSON string literals are valid JS string literals
    let key = serde_json::to_string(storage_key).unwrap_or_else(|_| "\"theme\"".to_string());
    format!(
        r#"
(function(){{
    var t = null;
    try {{ t = localStorage.getItem({key}); }} catch (e) {{}}
    var dark = !!(window.matchMedia && window.matchMedia('(prefers-color-scheme: dark)').matches);
    var m = (t === 'light' || t === 'dark') ? t : (dark ? 'dark' : 'light');
    document.documentElement.setAttribute('data-theme', m);
}})();
"#
    )
}

/// Single toggle cycling system -> light -> dark.
#[component]
pub fn ThemeToggle() -> Element {
    let theme = use_theme();
    let view = theme.view();
    let selected = theme.selected();
    let title = format!("Theme: {} (click to change)", selected.label());

    rsx! {
        button {
            class: "theme-toggle",
            id: "themeToggle",
            r#type: "button",
            title: "{title}",
            aria_label: "{title}",
            onclick: move |evt| {
                evt.stop_propagation();
                theme.cycle();
            },
            i { class: view.icon.css_class() }
        }
    }
}
