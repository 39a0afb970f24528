//! Event detail fragments.
//!
//! Each event card maps to a static HTML fragment under the fragment
//! directory: card 0 is `events/event1.html`, card 1 is `events/event2.html`
//! and so on. Failures are reported once and never retried.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

/// Message shown to the user when a fragment cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load event details. Please try again.";

/// One card on the home page.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct EventCard {
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub summary: String,
}

/// Loaded detail panel content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventDetail {
    pub index: usize,
    pub html: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FragmentError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("unreadable response body: {0}")]
    Body(String),
}

/// Something that can fetch a fragment by relative path.
///
/// Futures are not `Send`: the browser implementation holds JS values.
#[async_trait(?Send)]
pub trait FragmentSource {
    async fn fetch(&self, path: &str) -> Result<String, FragmentError>;
}

/// Reads fragments from a directory on disk (native hosts, previews).
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct FileFragments {
    root: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileFragments {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl FragmentSource for FileFragments {
    async fn fetch(&self, path: &str) -> Result<String, FragmentError> {
        let full = self.root.join(path);
        match std::fs::read_to_string(&full) {
            Ok(html) => Ok(html),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(FragmentError::Status(404)),
            Err(e) => Err(FragmentError::Body(e.to_string())),
        }
    }
}

/// Relative path of the fragment for a zero-based card index.
pub fn fragment_path(dir: &str, index: usize) -> String {
    let dir = dir.trim_end_matches('/');
    if dir.is_empty() {
        format!("event{}.html", index + 1)
    } else {
        format!("{}/event{}.html", dir, index + 1)
    }
}

/// Fetch the detail fragment for one card.
pub async fn load_event_detail<F>(
    source: &F,
    dir: &str,
    index: usize,
) -> Result<EventDetail, FragmentError>
where
    F: FragmentSource + ?Sized,
{
    let path = fragment_path(dir, index);
    debug!("Loading event fragment {}", path);

    match source.fetch(&path).await {
        Ok(html) => Ok(EventDetail { index, html }),
        Err(e) => {
            warn!("Error loading event details from {}: {}", path, e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Serves fixed fragments and records requested paths.
    #[derive(Default)]
    struct StaticFragments {
        files: HashMap<String, String>,
        requested: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl FragmentSource for StaticFragments {
        async fn fetch(&self, path: &str) -> Result<String, FragmentError> {
            self.requested.borrow_mut().push(path.to_string());
            self.files
                .get(path)
                .cloned()
                .ok_or(FragmentError::Status(404))
        }
    }

    #[test]
    fn test_fragment_path_is_one_based() {
        assert_eq!(fragment_path("events", 0), "events/event1.html");
        assert_eq!(fragment_path("events/", 4), "events/event5.html");
        assert_eq!(fragment_path("", 1), "event2.html");
    }

    #[test]
    fn test_load_event_detail_success() {
        let mut source = StaticFragments::default();
        source
            .files
            .insert("events/event2.html".into(), "<h2>Robotics Expo</h2>".into());

        let detail = tokio_test::block_on(load_event_detail(&source, "events", 1)).unwrap();
        assert_eq!(detail.index, 1);
        assert_eq!(detail.html, "<h2>Robotics Expo</h2>");
    }

    #[test]
    fn test_load_event_detail_failure_is_not_retried() {
        let source = StaticFragments::default();

        let err = tokio_test::block_on(load_event_detail(&source, "events", 7)).unwrap_err();
        assert_eq!(err, FragmentError::Status(404));
        assert_eq!(source.requested.borrow().as_slice(), ["events/event8.html"]);
    }

    #[test]
    fn test_file_fragments() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("events")).unwrap();
        std::fs::write(
            dir.path().join("events/event1.html"),
            "<h2>Freshers</h2>",
        )
        .unwrap();
        let source = FileFragments::new(dir.path());

        let detail = tokio_test::block_on(load_event_detail(&source, "events", 0)).unwrap();
        assert_eq!(detail.html, "<h2>Freshers</h2>");

        let err = tokio_test::block_on(load_event_detail(&source, "events", 1)).unwrap_err();
        assert_eq!(err, FragmentError::Status(404));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FragmentError::Status(500).to_string(),
            "unexpected HTTP status 500"
        );
        assert!(FragmentError::Network("offline".into())
            .to_string()
            .contains("offline"));
    }
}
