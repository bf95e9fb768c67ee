use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use tunefetch::core::{Downloader, MediaItem, MediaProvider, Resolved, RetryConfig};
use tunefetch::FetchError;

/// Provider that "downloads" by writing a small file, with a scripted number
/// of transient failures per item. Each item gets distinct content unless
/// `fixed_content` forces identical bytes.
struct WritingProvider {
    items: Vec<MediaItem>,
    flaky_url: Option<String>,
    flaky_budget: RefCell<u32>,
    broken_url: Option<String>,
    fixed_content: Option<Vec<u8>>,
}

impl MediaProvider for WritingProvider {
    fn resolve(&self, _url: &str) -> Result<Resolved, FetchError> {
        Ok(Resolved::Playlist {
            title: "test mix".into(),
            items: self.items.clone(),
        })
    }

    fn fetch_audio(&self, item: &MediaItem, output_dir: &Path) -> Result<PathBuf, FetchError> {
        if self.broken_url.as_deref() == Some(item.url.as_str()) {
            return Err(FetchError::unavailable("gone"));
        }
        if self.flaky_url.as_deref() == Some(item.url.as_str()) {
            let mut budget = self.flaky_budget.borrow_mut();
            if *budget > 0 {
                *budget -= 1;
                return Err(FetchError::network("flaky"));
            }
        }

        let path = output_dir.join(format!("{}.mp3", item.title));
        let content = match &self.fixed_content {
            Some(bytes) => bytes.clone(),
            None => item.title.clone().into_bytes(),
        };
        fs::write(&path, content).map_err(FetchError::Io)?;
        Ok(path)
    }
}

fn items(n: usize) -> Vec<MediaItem> {
    (1..=n)
        .map(|i| MediaItem::new(format!("https://example.com/v{}", i), format!("track {}", i)))
        .collect()
}

#[test]
fn test_batch_writes_one_file_per_item() {
    let dir = tempfile::tempdir().unwrap();
    let provider = WritingProvider {
        items: items(3),
        flaky_url: None,
        flaky_budget: RefCell::new(0),
        broken_url: None,
        fixed_content: None,
    };

    let mut downloader = Downloader::new(provider, dir.path(), RetryConfig::with_max_retries(0))
        .with_sleep(Box::new(|_| {}));
    let report = downloader.run("https://example.com/playlist").unwrap();

    assert_eq!(report.succeeded, 3);
    for i in 1..=3 {
        assert!(dir.path().join(format!("track {}.mp3", i)).exists());
    }
}

#[test]
fn test_flaky_item_recovers_and_waits_backoff() {
    let dir = tempfile::tempdir().unwrap();
    let provider = WritingProvider {
        items: items(1),
        flaky_url: Some("https://example.com/v1".into()),
        flaky_budget: RefCell::new(2),
        broken_url: None,
        fixed_content: None,
    };

    let waits = Rc::new(RefCell::new(Vec::new()));
    let recorder = Rc::clone(&waits);
    let mut downloader = Downloader::new(
        provider,
        dir.path(),
        RetryConfig {
            max_retries: 3,
            base_delay: Duration::from_millis(5),
            multiplier: 2,
        },
    )
    .with_sleep(Box::new(move |d| recorder.borrow_mut().push(d)));

    let report = downloader.run("https://example.com/playlist").unwrap();

    assert_eq!(report.succeeded, 1);
    assert_eq!(
        *waits.borrow(),
        vec![Duration::from_millis(5), Duration::from_millis(10)]
    );
    assert!(dir.path().join("track 1.mp3").exists());
}

#[test]
fn test_broken_item_leaves_the_rest_of_the_batch_intact() {
    let dir = tempfile::tempdir().unwrap();
    let provider = WritingProvider {
        items: items(3),
        flaky_url: None,
        flaky_budget: RefCell::new(0),
        broken_url: Some("https://example.com/v2".into()),
        fixed_content: None,
    };

    let mut downloader = Downloader::new(provider, dir.path(), RetryConfig::default())
        .with_sleep(Box::new(|_| {}));
    let report = downloader.run("https://example.com/playlist").unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed(), 1);
    assert!(dir.path().join("track 1.mp3").exists());
    assert!(!dir.path().join("track 2.mp3").exists());
    assert!(dir.path().join("track 3.mp3").exists());
}

#[test]
fn test_identical_downloads_are_deduplicated() {
    let dir = tempfile::tempdir().unwrap();
    let provider = WritingProvider {
        items: items(3),
        flaky_url: None,
        flaky_budget: RefCell::new(0),
        broken_url: None,
        fixed_content: Some(b"identical audio".to_vec()),
    };

    let mut downloader = Downloader::new(provider, dir.path(), RetryConfig::default())
        .with_sleep(Box::new(|_| {}));
    let report = downloader.run("https://example.com/playlist").unwrap();

    // Every download succeeded, but only the first copy is kept
    assert_eq!(report.succeeded, 3);
    assert_eq!(report.duplicates, 2);
    let remaining: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(remaining.len(), 1);
}

#[test]
fn test_distinct_downloads_are_all_kept() {
    let dir = tempfile::tempdir().unwrap();
    let provider = WritingProvider {
        items: items(3),
        flaky_url: None,
        flaky_budget: RefCell::new(0),
        broken_url: None,
        fixed_content: None,
    };

    let mut downloader = Downloader::new(provider, dir.path(), RetryConfig::default())
        .with_sleep(Box::new(|_| {}));
    let report = downloader.run("https://example.com/playlist").unwrap();

    assert_eq!(report.succeeded, 3);
    assert_eq!(report.duplicates, 0);
}
