use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Path of a yt-dlp binary we installed ourselves.
    #[serde(default)]
    pub yt_dlp_path: Option<String>,
    #[serde(default)]
    pub yt_dlp_installed_by_tunefetch: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        // An empty or corrupted file falls back to defaults
        if data.is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_json::from_slice(&data).unwrap_or_default())
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, data)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("tunefetch").join("config.json"))
    }

    pub fn set_yt_dlp_path(&mut self, path: String) {
        self.yt_dlp_path = Some(path);
    }

    pub fn get_yt_dlp_path(&self) -> Option<&String> {
        self.yt_dlp_path.as_ref()
    }

    pub fn set_yt_dlp_installed_by_tunefetch(&mut self, installed: bool) {
        self.yt_dlp_installed_by_tunefetch = installed;
    }
}
