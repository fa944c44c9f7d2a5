use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_cdn_hints() -> Vec<String> {
    // substrings of real CDN stream locators; anything carrying one is raw
    // video traffic
    ["video/tos/cn", "douyinvod.com", "mime_type=video_mp4"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_media_poll_ms() -> u64 {
    500
}

fn default_context_poll_ms() -> u64 {
    300
}

/// Global configuration loaded from `~/.config/vidsniff/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SniffConfig {
    /// CDN/content-type hint substrings that mark raw video traffic.
    #[serde(default = "default_cdn_hints")]
    pub cdn_hints: Vec<String>,
    /// Live media-element poll cadence in milliseconds.
    #[serde(default = "default_media_poll_ms")]
    pub media_poll_ms: u64,
    /// Active-context poll cadence in milliseconds.
    #[serde(default = "default_context_poll_ms")]
    pub context_poll_ms: u64,
}

impl Default for SniffConfig {
    fn default() -> Self {
        Self {
            cdn_hints: default_cdn_hints(),
            media_poll_ms: default_media_poll_ms(),
            context_poll_ms: default_context_poll_ms(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vidsniff")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SniffConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SniffConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SniffConfig = toml::from_str(&data)?;
    Ok(cfg)
}
