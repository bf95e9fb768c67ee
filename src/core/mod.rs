// Core pipeline logic

pub mod config;
pub mod downloader;
pub mod media;
pub mod retry;
pub mod sanitizer;
pub mod validation;
pub mod yt_dlp;
pub mod yt_dlp_manager;

// Re-export commonly used items
pub use config::Config;
pub use downloader::{DownloadReport, Downloader, ItemFailure};
pub use media::{MediaItem, MediaProvider, Resolved};
pub use retry::{run_with_retry, RetryConfig, Retryable};
pub use sanitizer::{sanitize_file_name, tidy_directory, TidyReport};
pub use yt_dlp::YtDlpProvider;
pub use yt_dlp_manager::YtDlpManager;
