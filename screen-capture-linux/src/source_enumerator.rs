//! X11 window and monitor enumeration.

use screen_capture_core::models::error::RecorderError;
use screen_capture_core::models::source::{CaptureSource, SourceKind};
use screen_capture_core::traits::source_provider::SourceEnumerator;

use crate::config::FfmpegOptions;
use crate::display;
use crate::x11_parse;

pub struct X11SourceEnumerator {
    options: FfmpegOptions,
}

impl X11SourceEnumerator {
    pub fn new(options: FfmpegOptions) -> Self {
        Self { options }
    }
}

impl SourceEnumerator for X11SourceEnumerator {
    fn list_sources(&self, kinds: &[SourceKind]) -> Result<Vec<CaptureSource>, RecorderError> {
        let display = display::require_display(&self.options)?;

        let windows = if kinds.contains(&SourceKind::Window) {
            display::query_windows(&self.options, &display)?
        } else {
            Vec::new()
        };
        let monitors = if kinds.contains(&SourceKind::Screen) {
            display::query_monitors(&self.options, &display)?
        } else {
            Vec::new()
        };

        log::debug!(
            "Enumerated {} windows and {} monitors on {}",
            windows.len(),
            monitors.len(),
            display
        );
        Ok(x11_parse::to_sources(&windows, &monitors))
    }
}
