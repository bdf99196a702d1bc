use serde::{Deserialize, Serialize};

/// Settings for the ffmpeg/X11 tool chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FfmpegOptions {
    pub ffmpeg_path: String,
    pub ffplay_path: String,
    pub xrandr_path: String,
    pub wmctrl_path: String,

    /// X display to grab from. Falls back to `$DISPLAY`.
    pub display: Option<String>,

    pub framerate: u32,

    /// Target bitrate passed to libvpx-vp9 (`-b:v`).
    pub bitrate: String,

    /// libvpx `-deadline` (`realtime`, `good`, `best`).
    pub deadline: String,

    /// libvpx `-cpu-used`; higher is faster.
    pub cpu_used: u8,

    /// Size of each stdout read, i.e. the upper bound of one data chunk.
    pub chunk_size: usize,
}

impl Default for FfmpegOptions {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".into(),
            ffplay_path: "ffplay".into(),
            xrandr_path: "xrandr".into(),
            wmctrl_path: "wmctrl".into(),
            display: None,
            framerate: 30,
            bitrate: "2M".into(),
            deadline: "realtime".into(),
            cpu_used: 8,
            chunk_size: 64 * 1024,
        }
    }
}

impl FfmpegOptions {
    /// The display to grab, if one is configured or exported.
    pub fn resolved_display(&self) -> Option<String> {
        self.display
            .clone()
            .or_else(|| std::env::var("DISPLAY").ok())
            .filter(|d| !d.is_empty())
    }
}
