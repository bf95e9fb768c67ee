use crate::core::yt_dlp_manager::ensure_ffmpeg;
use crate::core::{validation, Downloader, RetryConfig, YtDlpManager, YtDlpProvider};
use anyhow::{Context, Result};
use colored::Colorize;

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    // 1. Extract arguments
    let url = matches
        .get_one::<String>("url")
        .context("URL is required")?;
    let output_dir = matches
        .get_one::<String>("output-dir")
        .context("output directory has a default")?;
    let max_retries = *matches
        .get_one::<u32>("max-retries")
        .context("max-retries has a default")?;

    // 2. Validate URL
    validation::validate_url(url).with_context(|| format!("Invalid URL: {}", url))?;

    // 3. Make sure the external tools are in place
    ensure_ffmpeg()?;
    let mut manager = YtDlpManager::new()?;
    let yt_dlp_path = manager.ensure_yt_dlp()?;

    // 4. Run the pipeline
    let provider = YtDlpProvider::new(yt_dlp_path);
    let mut downloader = Downloader::new(
        provider,
        output_dir,
        RetryConfig::with_max_retries(max_retries),
    );

    let report = downloader.run(url)?;

    // 5. Print the summary; detailed reasons live in the log
    println!();
    if report.failures.is_empty() {
        println!(
            "{} {} of {} item(s) downloaded",
            "✓".green().bold(),
            report.succeeded,
            report.total
        );
    } else {
        println!(
            "{} {} of {} item(s) downloaded, {} failed",
            "⚠".yellow().bold(),
            report.succeeded,
            report.total,
            report.failed()
        );
        for failure in &report.failures {
            println!(
                "  {} {} ({} attempt(s)): {}",
                "✗".red(),
                failure.title,
                failure.attempts,
                failure.reason
            );
        }
    }
    if report.duplicates > 0 {
        println!(
            "{} {} duplicate file(s) removed",
            "⚠".yellow(),
            report.duplicates
        );
    }

    // Per-item failures do not change the exit code; only a failed
    // resolution aborts the run
    Ok(())
}
