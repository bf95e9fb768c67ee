//! Capability interface for the external media fetch/convert collaborator
//!
//! The orchestrator only talks to `MediaProvider`, so tests can substitute a
//! deterministic fake instead of invoking real network or transcoding.

use crate::error::FetchError;
use std::path::{Path, PathBuf};

/// One downloadable media unit: a single video, or one entry of a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub url: String,
    pub title: String,
}

impl MediaItem {
    pub fn new<U: Into<String>, T: Into<String>>(url: U, title: T) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// Result of classifying a URL.
#[derive(Debug, Clone)]
pub enum Resolved {
    Single(MediaItem),
    /// Items keep the source listing order.
    Playlist {
        title: String,
        items: Vec<MediaItem>,
    },
}

/// External media fetch/convert collaborator.
pub trait MediaProvider {
    /// Classify a URL as a single item or a playlist.
    ///
    /// Failures are `FetchError::Resolution` and are treated as permanent.
    fn resolve(&self, url: &str) -> Result<Resolved, FetchError>;

    /// Fetch one item and transcode it to MP3 at 192 kbps into `output_dir`.
    /// Returns the path of the written file.
    fn fetch_audio(&self, item: &MediaItem, output_dir: &Path) -> Result<PathBuf, FetchError>;
}
