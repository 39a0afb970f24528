//! Campus Events Site - web entry point.
//!
//! Built with `dx build --features web`; the bundle is served as static files.

fn main() {
    let config = campus_events_site::app::site_config();

    // Initialize logging (falls back to dioxus' default if already set)
    if dioxus::logger::init(config.tracing_level()).is_err() {
        tracing::debug!("Logger already initialized");
    }
    tracing::info!("Starting {}", config.site.title);

    dioxus::launch(campus_events_site::app::App);
}
