use anyhow::Result;
use clap::{Arg, Command};

use tunefetch::commands;

fn main() -> Result<()> {
    let matches = Command::new("tunefetch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Download videos or playlists and convert them to MP3")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(clap::ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("fetch")
                .about("Download a video or playlist and convert it to MP3")
                .arg(
                    Arg::new("url")
                        .help("URL of the video or playlist to download")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("output-dir")
                        .short('o')
                        .long("output-dir")
                        .value_name("DIR")
                        .help("Directory to save downloaded files")
                        .default_value("downloads"),
                )
                .arg(
                    Arg::new("max-retries")
                        .long("max-retries")
                        .value_name("N")
                        .help("Maximum number of retry attempts per item")
                        .value_parser(clap::value_parser!(u32))
                        .default_value("3"),
                ),
        )
        .subcommand(
            Command::new("tidy")
                .about("Normalize the filenames in a directory")
                .arg(
                    Arg::new("dir")
                        .help("Directory to tidy (defaults to the current directory)")
                        .index(1),
                ),
        )
        .get_matches();

    if matches.get_flag("version") {
        println!("tunefetch version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    tunefetch::init_logging()?;

    match matches.subcommand() {
        Some(("fetch", sub_matches)) => {
            commands::fetch(sub_matches)?;
        }
        Some(("tidy", sub_matches)) => {
            commands::tidy(sub_matches)?;
        }
        _ => {
            println!("Welcome to tunefetch!");
            println!("Use 'tunefetch --help' for more information.");
        }
    }

    Ok(())
}
