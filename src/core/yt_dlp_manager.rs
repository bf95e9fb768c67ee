//! External tool bootstrap: ffmpeg detection and yt-dlp installation.

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::Config;

/// Verify that ffmpeg is reachable; the MP3 transcode depends on it.
pub fn ensure_ffmpeg() -> Result<PathBuf> {
    which::which("ffmpeg").map_err(|_| {
        anyhow!(
            "FFmpeg is not installed or not in PATH. Please install FFmpeg:\n\
             Windows: download from https://ffmpeg.org/download.html and add it to PATH\n\
             Linux: sudo apt install ffmpeg\n\
             macOS: brew install ffmpeg"
        )
    })
}

pub struct YtDlpManager {
    config: Config,
}

impl YtDlpManager {
    pub fn new() -> Result<Self> {
        Ok(Self {
            config: Config::load()?,
        })
    }

    /// True when a binary we installed ourselves is still present
    pub fn is_installed(&self) -> bool {
        match self.config.get_yt_dlp_path() {
            Some(path) => Path::new(path).exists(),
            None => false,
        }
    }

    pub fn get_binary_path(&self) -> Option<PathBuf> {
        self.config.get_yt_dlp_path().map(PathBuf::from)
    }

    /// Latest released yt-dlp version, read from the /releases/latest redirect
    pub fn get_latest_version() -> Result<String> {
        println!("{}", "Checking the latest yt-dlp version...".cyan());

        let client = reqwest::blocking::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let response = client
            .get("https://github.com/yt-dlp/yt-dlp/releases/latest")
            .send()?;

        if let Some(location) = response.headers().get("Location") {
            let location_str = location.to_str()?;

            // https://github.com/yt-dlp/yt-dlp/releases/tag/2025.11.12 -> 2025.11.12
            if let Some(version) = location_str.split("/tag/").nth(1) {
                println!(
                    "{} {}",
                    "Latest version found:".green(),
                    version.yellow().bold()
                );
                return Ok(version.to_string());
            }
        }

        Err(anyhow!("Could not determine the latest yt-dlp version"))
    }

    /// Download the release binary for this platform from GitHub
    pub fn download_binary(version: &str) -> Result<Vec<u8>> {
        let download_url = format!(
            "https://github.com/yt-dlp/yt-dlp/releases/download/{}/{}",
            version,
            release_asset_name()
        );

        println!("{}", "Downloading yt-dlp...".cyan());
        println!("{} {}", "URL:".dimmed(), download_url.dimmed());

        let response =
            reqwest::blocking::get(&download_url).context("Failed to download yt-dlp")?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error {}: could not download yt-dlp",
                response.status()
            ));
        }

        let bytes = response.bytes()?.to_vec();

        println!("{} {} bytes", "Downloaded:".green(), bytes.len());

        Ok(bytes)
    }

    /// Install yt-dlp into the application directory
    pub fn install(&mut self) -> Result<PathBuf> {
        let version = Self::get_latest_version()?;
        let binary_data = Self::download_binary(&version)?;

        let install_dir = Self::get_install_dir()?;
        fs::create_dir_all(&install_dir)?;

        let binary_path = install_dir.join(release_asset_name());
        fs::write(&binary_path, binary_data).context("Failed to write the yt-dlp binary")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&binary_path, fs::Permissions::from_mode(0o755))
                .context("Failed to mark yt-dlp as executable")?;
        }

        self.config
            .set_yt_dlp_path(binary_path.to_string_lossy().to_string());
        self.config.set_yt_dlp_installed_by_tunefetch(true);
        self.config.save()?;

        println!("{}", "✓ yt-dlp ready".green());
        println!();

        Ok(binary_path)
    }

    fn get_install_dir() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("tunefetch").join("bin"))
    }

    fn check_system_yt_dlp() -> Option<PathBuf> {
        which::which("yt-dlp").ok()
    }

    /// Make sure yt-dlp is available and return its path.
    /// Priority: system PATH, then a binary we installed earlier, then a
    /// fresh install (with a short message only on that first run).
    pub fn ensure_yt_dlp(&mut self) -> Result<PathBuf> {
        if let Some(system_path) = Self::check_system_yt_dlp() {
            return Ok(system_path);
        }

        if self.is_installed() {
            if let Some(path) = self.get_binary_path() {
                return Ok(path);
            }
        }

        println!();
        println!("{}", "Setting up yt-dlp (first run)...".cyan());
        self.install()
    }
}

fn release_asset_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "yt-dlp.exe"
    } else if cfg!(target_os = "macos") {
        "yt-dlp_macos"
    } else {
        "yt-dlp"
    }
}
