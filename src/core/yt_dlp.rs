//! `MediaProvider` implementation backed by the yt-dlp binary
//!
//! Resolution runs `yt-dlp -J --flat-playlist` and parses the JSON dump;
//! fetching runs `yt-dlp -x --audio-format mp3` and reads the final file path
//! from `--print after_move:filepath`.

use crate::core::media::{MediaItem, MediaProvider, Resolved};
use crate::error::FetchError;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;

pub struct YtDlpProvider {
    binary: PathBuf,
}

impl YtDlpProvider {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl MediaProvider for YtDlpProvider {
    fn resolve(&self, url: &str) -> Result<Resolved, FetchError> {
        log::debug!("Resolving URL with yt-dlp: {}", url);

        let output = Command::new(&self.binary)
            .arg("-J")
            .arg("--flat-playlist")
            .arg(url)
            .output()
            .map_err(|e| FetchError::resolution(format!("failed to run yt-dlp: {}", e)))?;

        if !output.status.success() {
            return Err(FetchError::resolution(last_error_line(&output.stderr)));
        }

        let info: Value = serde_json::from_slice(&output.stdout)
            .map_err(|e| FetchError::resolution(format!("unparseable yt-dlp metadata: {}", e)))?;

        Ok(parse_resolved(url, &info))
    }

    fn fetch_audio(&self, item: &MediaItem, output_dir: &Path) -> Result<PathBuf, FetchError> {
        let template = output_dir.join("%(title)s.%(ext)s");

        let output = Command::new(&self.binary)
            .arg("-f")
            .arg("bestaudio/best")
            .arg("-x")
            .arg("--audio-format")
            .arg("mp3")
            .arg("--audio-quality")
            .arg("192K")
            .arg("--no-playlist")
            .arg("-o")
            .arg(&template)
            .arg("--no-simulate")
            .arg("--print")
            .arg("after_move:filepath")
            .arg(&item.url)
            .output()?;

        if !output.status.success() {
            return Err(classify_failure(&String::from_utf8_lossy(&output.stderr)));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match stdout.lines().rev().find(|line| !line.trim().is_empty()) {
            Some(path) => Ok(PathBuf::from(path.trim())),
            None => Err(FetchError::transcode("yt-dlp did not report an output file")),
        }
    }
}

/// Build `Resolved` from a `-J --flat-playlist` dump.
fn parse_resolved(url: &str, info: &Value) -> Resolved {
    if info.get("_type").and_then(Value::as_str) == Some("playlist") {
        let title = info
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("playlist")
            .to_string();

        let items = info
            .get("entries")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    // yt-dlp reports removed playlist entries as null
                    .filter(|entry| !entry.is_null())
                    .filter_map(|entry| {
                        let item_url = entry
                            .get("url")
                            .or_else(|| entry.get("webpage_url"))
                            .and_then(Value::as_str)?;
                        let item_title = entry
                            .get("title")
                            .and_then(Value::as_str)
                            .unwrap_or(item_url);
                        Some(MediaItem::new(item_url, item_title))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Resolved::Playlist { title, items }
    } else {
        let item_url = info
            .get("webpage_url")
            .and_then(Value::as_str)
            .unwrap_or(url);
        let title = info.get("title").and_then(Value::as_str).unwrap_or(item_url);
        Resolved::Single(MediaItem::new(item_url, title))
    }
}

/// Map a failed yt-dlp run to the retry taxonomy by inspecting stderr.
fn classify_failure(stderr: &str) -> FetchError {
    let line = last_error_line(stderr.as_bytes());

    if stderr.contains("Video unavailable")
        || stderr.contains("Private video")
        || stderr.contains("has been removed")
    {
        FetchError::unavailable(line)
    } else if stderr.contains("Permission denied") || stderr.contains("No space left") {
        FetchError::Io(std::io::Error::other(line))
    } else if stderr.contains("ffmpeg") || stderr.contains("Postprocessing") {
        FetchError::transcode(line)
    } else {
        // Anything else from a run that got past resolution is assumed to be
        // a network blip worth retrying
        FetchError::network(line)
    }
}

fn last_error_line(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    text.lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("yt-dlp failed without output")
        .trim()
        .to_string()
}
