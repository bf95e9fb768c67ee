use crate::core::sanitizer::tidy_directory;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

pub fn execute(matches: &clap::ArgMatches) -> Result<()> {
    let dir = matches
        .get_one::<String>("dir")
        .map(String::as_str)
        .unwrap_or(".");

    let report = tidy_directory(Path::new(dir))?;

    println!(
        "{} {} renamed, {} unchanged, {} skipped",
        "✓".green().bold(),
        report.renamed,
        report.unchanged,
        report.skipped
    );

    Ok(())
}
