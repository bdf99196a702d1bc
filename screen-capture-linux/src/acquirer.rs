//! Resolves capture constraints into X11 grab targets.

use screen_capture_core::models::config::AcquisitionStrategy;
use screen_capture_core::models::error::RecorderError;
use screen_capture_core::models::source::SourceKind;
use screen_capture_core::traits::media::{CaptureConstraints, MediaAcquirer, MediaStream};

use crate::config::FfmpegOptions;
use crate::display;
use crate::stream::{GrabTarget, X11Stream};

pub struct X11Acquirer {
    options: FfmpegOptions,
}

impl X11Acquirer {
    pub fn new(options: FfmpegOptions) -> Self {
        Self { options }
    }

    fn resolve_target(&self, source_id: &str, display: &str) -> Result<GrabTarget, RecorderError> {
        let (prefix, rest) = source_id
            .split_once(':')
            .ok_or_else(|| RecorderError::Capture(format!("unrecognized source id: {}", source_id)))?;

        if prefix == SourceKind::Window.id_prefix() {
            return Ok(GrabTarget::Window(rest.to_string()));
        }
        if prefix != SourceKind::Screen.id_prefix() {
            return Err(RecorderError::Capture(format!("unrecognized source id: {}", source_id)));
        }

        let index: usize = rest
            .parse()
            .map_err(|_| RecorderError::Capture(format!("invalid screen id: {}", source_id)))?;
        let monitors = display::query_monitors(&self.options, display)?;
        monitors
            .into_iter()
            .find(|m| m.index == index)
            .map(|m| GrabTarget::Region(m.geometry))
            .ok_or_else(|| RecorderError::Capture(format!("screen {} is no longer connected", index)))
    }
}

impl MediaAcquirer for X11Acquirer {
    fn acquire(&self, constraints: &CaptureConstraints) -> Result<Box<dyn MediaStream>, RecorderError> {
        if constraints.strategy == AcquisitionStrategy::DisplayMedia {
            return Err(RecorderError::Capture(
                "display-media acquisition needs the desktop portal, which the X11 backend does not provide".into(),
            ));
        }

        let source_id = constraints
            .source_id
            .as_deref()
            .ok_or_else(|| RecorderError::Capture("desktop capture requires a source id".into()))?;
        let display = display::require_display(&self.options)?;
        let target = self.resolve_target(source_id, &display)?;

        log::info!("Acquired {} on {} as {:?}", source_id, display, target);
        Ok(Box::new(X11Stream::new(source_id, display, target, constraints.audio)))
    }
}
