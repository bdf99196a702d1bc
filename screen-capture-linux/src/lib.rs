//! # screen-capture-linux
//!
//! Linux X11 backend for screen-capture-kit, driving the ffmpeg tool chain.
//!
//! Provides:
//! - `X11SourceEnumerator` — Windows via `wmctrl -l`, monitors via `xrandr --listmonitors`
//! - `X11Acquirer` — Resolves a picked source into an x11grab target
//! - `FfplayPreview` — Live preview window via ffplay
//! - `FfmpegEncoderFactory` — VP9/WebM encoding via ffmpeg, streamed from stdout
//!
//! ## Platform Requirements
//! - An X11 session (`DISPLAY` set); Wayland only through XWayland
//! - `ffmpeg`/`ffplay` built with x11grab and libvpx, `xrandr`, optionally `wmctrl`
//!
//! ## Usage
//! ```ignore
//! use screen_capture_linux::{linux_platform, FfmpegOptions};
//!
//! let (enumerator, acquirer, preview, encoders) = linux_platform(FfmpegOptions::default());
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod stream;
pub mod x11_parse;

#[cfg(target_os = "linux")]
pub mod acquirer;
#[cfg(target_os = "linux")]
pub mod display;
#[cfg(target_os = "linux")]
pub mod ffmpeg_encoder;
#[cfg(target_os = "linux")]
pub mod preview;
#[cfg(target_os = "linux")]
pub mod source_enumerator;

pub use config::FfmpegOptions;
pub use error::BackendError;
pub use stream::{GrabTarget, X11Stream};

#[cfg(target_os = "linux")]
pub use acquirer::X11Acquirer;
#[cfg(target_os = "linux")]
pub use ffmpeg_encoder::{FfmpegEncoder, FfmpegEncoderFactory};
#[cfg(target_os = "linux")]
pub use preview::FfplayPreview;
#[cfg(target_os = "linux")]
pub use source_enumerator::X11SourceEnumerator;

/// The four capture collaborators, all sharing `options`.
#[cfg(target_os = "linux")]
pub fn linux_platform(
    options: FfmpegOptions,
) -> (X11SourceEnumerator, X11Acquirer, FfplayPreview, FfmpegEncoderFactory) {
    (
        X11SourceEnumerator::new(options.clone()),
        X11Acquirer::new(options.clone()),
        FfplayPreview::new(options.clone()),
        FfmpegEncoderFactory::new(options),
    )
}
