//! Filename sanitizer
//!
//! Pure text normalization applied to every regular file of a directory
//! (non-recursive): case folding, punctuation stripping, whitespace
//! collapsing, sentence-casing. The extension is reattached untouched.

use anyhow::{ensure, Result};
use std::fs;
use std::path::Path;

/// Quote characters stripped from the ends of a name, straight or curly.
const QUOTES: [char; 6] = ['\'', '"', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}'];

/// Statistics from a tidy run
#[derive(Debug, Default)]
pub struct TidyReport {
    pub renamed: usize,
    pub unchanged: usize,
    pub skipped: usize,
}

/// Normalize a filename. Deterministic and idempotent:
/// `sanitize_file_name(sanitize_file_name(x)) == sanitize_file_name(x)`.
///
/// Steps, in order: strip surrounding quotes/whitespace, split off the
/// extension at the last `.`, lower-case the base, replace every character
/// that is not alphanumeric or a space with a space, collapse space runs,
/// trim, upper-case the first character, reattach the extension unchanged.
pub fn sanitize_file_name(name: &str) -> String {
    let stripped = name.trim_matches(|c: char| c.is_whitespace() || QUOTES.contains(&c));

    let (base, extension) = match stripped.rfind('.') {
        Some(idx) => (&stripped[..idx], &stripped[idx..]),
        None => (stripped, ""),
    };

    let lowered = base.to_lowercase();
    let mut cleaned = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        if c.is_alphanumeric() || c == ' ' {
            cleaned.push(c);
        } else {
            cleaned.push(' ');
        }
    }

    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    let mut chars = collapsed.chars();
    let cased = match chars.next() {
        Some(first) => {
            // Some uppercase expansions are multi-char (ß -> SS); keep only
            // the first char so a second pass maps the name to itself
            let head = first.to_uppercase().next().unwrap_or(first);
            let mut result = String::with_capacity(collapsed.len());
            result.push(head);
            result.push_str(chars.as_str());
            result
        }
        None => String::new(),
    };

    format!("{}{}", cased, extension)
}

/// Rename every regular file in `dir` to its sanitized name.
///
/// Non-regular entries (directories, symlinks) are skipped. A file whose
/// name is already sanitized triggers no rename and no log line. Two files
/// sanitizing to the same name collide: the rename silently overwrites, so
/// the last processed file wins.
pub fn tidy_directory(dir: &Path) -> Result<TidyReport> {
    ensure!(dir.is_dir(), "Target directory does not exist: {}", dir.display());

    let mut report = TidyReport::default();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            report.skipped += 1;
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let cleaned = sanitize_file_name(&name);
        if cleaned == name {
            report.unchanged += 1;
            continue;
        }

        fs::rename(entry.path(), dir.join(&cleaned))?;
        log::info!("Renamed '{}' -> '{}'", name, cleaned);
        report.renamed += 1;
    }

    Ok(report)
}
