use std::io;
use thiserror::Error;

/// Custom error type for the download-and-convert pipeline
#[derive(Error, Debug)]
pub enum FetchError {
    /// The URL could not be classified as a video or playlist.
    /// Never retried: a URL that does not resolve now will not resolve later.
    #[error("could not resolve URL: {0}")]
    Resolution(String),

    /// Transient network failure while fetching the media stream.
    #[error("network failure: {0}")]
    Network(String),

    /// Transient failure while extracting or transcoding the audio.
    #[error("audio extraction failed: {0}")]
    Transcode(String),

    /// The item is gone for good (removed, private, region-locked).
    #[error("item unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl FetchError {
    /// Create a resolution error
    pub fn resolution<S: Into<String>>(msg: S) -> Self {
        FetchError::Resolution(msg.into())
    }

    /// Create a transient network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        FetchError::Network(msg.into())
    }

    /// Create a transient transcode error
    pub fn transcode<S: Into<String>>(msg: S) -> Self {
        FetchError::Transcode(msg.into())
    }

    /// Create a permanent unavailable-item error
    pub fn unavailable<S: Into<String>>(msg: S) -> Self {
        FetchError::Unavailable(msg.into())
    }
}
