use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use screen_capture_core::RecorderConfiguration;
use screen_capture_linux::FfmpegOptions;

/// `~/.config/screen-capture-kit/recorder.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub recorder: RecorderConfiguration,
    pub ffmpeg: FfmpegOptions,
    /// Directory the save dialog opens in.
    pub save_directory: Option<PathBuf>,
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|d| d.join("screen-capture-kit").join("recorder.json"))
    }

    /// Load from `path`. A missing file yields defaults; a malformed one is
    /// reported and also yields defaults.
    pub fn load_from(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::debug!("No config at {} ({}); using defaults", path.display(), e);
                return Self::default();
            }
        };
        match serde_json::from_str(&text) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load() -> Self {
        Self::default_path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Where the save dialog starts.
    pub fn save_directory(&self) -> PathBuf {
        self.save_directory
            .clone()
            .or_else(dirs_next::video_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
