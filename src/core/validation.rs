// Validation module for URL input sanitization
// The URL ends up as an argument to an external process, so it is checked
// before anything is spawned.

use anyhow::{ensure, Context, Result};
use url::Url;

/// Maximum URL length to prevent DoS attacks
const MAX_URL_LENGTH: usize = 2048;

/// Validates a URL for the fetch command
///
/// Uses the `url` crate for robust parsing, plus a character blocklist:
/// even though `Command::arg()` never goes through a shell, the URL is also
/// logged and stored, so injection characters are rejected outright.
pub fn validate_url(url_str: &str) -> Result<()> {
    let trimmed = url_str.trim();

    ensure!(!trimmed.is_empty(), "URL cannot be empty");
    ensure!(
        url_str.len() <= MAX_URL_LENGTH,
        "URL is too long ({} characters, max {})",
        url_str.len(),
        MAX_URL_LENGTH
    );

    ensure!(
        url_str.starts_with("http://") || url_str.starts_with("https://"),
        "URL must start with http:// or https://"
    );

    ensure!(
        !url_str.contains('\0'),
        "URL contains null byte - security risk"
    );

    const DANGEROUS_CHARS: &[(&str, &str)] = &[
        (";", "command separator"),
        ("|", "pipe operator"),
        ("`", "command substitution"),
        ("$(", "command substitution"),
        ("\n", "newline"),
        ("\r", "carriage return"),
    ];

    for (ch, reason) in DANGEROUS_CHARS {
        ensure!(
            !url_str.contains(ch),
            "URL contains dangerous character '{}' - {}",
            ch,
            reason
        );
    }

    let url = Url::parse(url_str).context("Invalid URL format")?;

    let scheme = url.scheme();
    ensure!(
        scheme == "http" || scheme == "https",
        "URL must use http or https protocol, got: {}",
        scheme
    );

    ensure!(url.host_str().is_some(), "URL has no hostname");

    Ok(())
}
