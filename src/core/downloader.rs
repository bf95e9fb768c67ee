//! Download-convert orchestrator
//!
//! Resolves a URL into items, runs the retry policy around each fetch, and
//! aggregates per-item outcomes. One bad item never aborts the batch; only a
//! resolution failure does.

use crate::core::media::{MediaProvider, Resolved};
use crate::core::retry::{run_with_retry, RetryConfig};
use crate::error::FetchError;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Injected delay port; production uses `thread::sleep`, tests a recorder.
pub type SleepFn = Box<dyn FnMut(Duration)>;

/// One item that exhausted its attempts or failed permanently.
#[derive(Debug)]
pub struct ItemFailure {
    pub title: String,
    pub attempts: u32,
    pub reason: String,
}

/// Summary of one orchestrator run.
#[derive(Debug, Default)]
pub struct DownloadReport {
    pub total: usize,
    pub succeeded: usize,
    /// Downloads whose content matched an existing MP3 and were removed.
    pub duplicates: usize,
    pub failures: Vec<ItemFailure>,
}

impl DownloadReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

pub struct Downloader<P> {
    provider: P,
    output_dir: PathBuf,
    retry: RetryConfig,
    sleep: SleepFn,
}

impl<P: MediaProvider> Downloader<P> {
    pub fn new(provider: P, output_dir: impl Into<PathBuf>, retry: RetryConfig) -> Self {
        Self {
            provider,
            output_dir: output_dir.into(),
            retry,
            sleep: Box::new(std::thread::sleep),
        }
    }

    /// Replace the backoff wait, used by tests to avoid wall-clock sleeps.
    pub fn with_sleep(mut self, sleep: SleepFn) -> Self {
        self.sleep = sleep;
        self
    }

    /// Download every resolvable item behind `url` and convert it to MP3.
    ///
    /// Resolution failures abort the run; per-item failures are recorded in
    /// the report and the remaining items are still attempted. Partially
    /// written files from a failed attempt are not cleaned up.
    pub fn run(&mut self, url: &str) -> Result<DownloadReport, FetchError> {
        fs::create_dir_all(&self.output_dir)?;

        let items = match self.provider.resolve(url)? {
            Resolved::Single(item) => {
                log::info!("Detected single video URL: {}", item.title);
                vec![item]
            }
            Resolved::Playlist { title, items } => {
                log::info!("Detected playlist '{}' with {} item(s)", title, items.len());
                if items.is_empty() {
                    log::warn!("Playlist '{}' is empty, nothing to download", title);
                }
                items
            }
        };

        let mut report = DownloadReport {
            total: items.len(),
            ..Default::default()
        };

        for (index, item) in items.iter().enumerate() {
            log::info!("[{}/{}] Downloading '{}'", index + 1, report.total, item.title);

            let provider = &self.provider;
            let output_dir = &self.output_dir;
            let result = run_with_retry(&self.retry, &mut *self.sleep, || {
                provider.fetch_audio(item, output_dir)
            });

            match result {
                Ok((path, attempts)) => {
                    log::info!("Saved {} (attempt {})", path.display(), attempts);
                    report.succeeded += 1;
                    match find_duplicate(&path, &self.output_dir) {
                        Ok(Some(existing)) => {
                            log::warn!(
                                "Removing duplicate file: {} matches {}",
                                path.display(),
                                existing.display()
                            );
                            match fs::remove_file(&path) {
                                Ok(()) => report.duplicates += 1,
                                Err(e) => log::error!(
                                    "Failed to remove duplicate {}: {}",
                                    path.display(),
                                    e
                                ),
                            }
                        }
                        Ok(None) => {}
                        Err(e) => {
                            // The file is kept; deduplication is best-effort
                            log::warn!("Duplicate check failed for {}: {}", path.display(), e);
                        }
                    }
                }
                Err(failure) => {
                    log::error!(
                        "'{}' failed after {} attempt(s): {}",
                        item.title,
                        failure.attempts,
                        failure.error
                    );
                    report.failures.push(ItemFailure {
                        title: item.title.clone(),
                        attempts: failure.attempts,
                        reason: failure.error.to_string(),
                    });
                }
            }
        }

        log::info!(
            "Run complete: {} total, {} succeeded, {} failed, {} duplicate(s) removed",
            report.total,
            report.succeeded,
            report.failed(),
            report.duplicates
        );

        Ok(report)
    }
}

/// Content hash of a file, streamed so large MP3s are not held in memory.
fn file_digest(path: &Path) -> io::Result<Vec<u8>> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hasher.finalize().to_vec())
}

/// Look for another MP3 in `dir` with the same content as `path`.
fn find_duplicate(path: &Path, dir: &Path) -> io::Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }

    let digest = file_digest(path)?;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let candidate = entry.path();
        if candidate == path
            || !entry.file_type()?.is_file()
            || candidate.extension().and_then(|e| e.to_str()) != Some("mp3")
        {
            continue;
        }
        if file_digest(&candidate)? == digest {
            return Ok(Some(candidate));
        }
    }

    Ok(None)
}
