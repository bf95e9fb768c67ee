// Tunefetch Library - Public API

// Re-export error types
pub mod error;
pub use error::FetchError;

// Module declarations
pub mod commands;
pub mod core;
pub mod logging;

// Re-export commonly used types
pub use core::config::Config;

/// Initialize logging to the console and to `logs/tunefetch.log`.
pub fn init_logging() -> anyhow::Result<()> {
    logging::init(std::path::Path::new("logs"))
}
