use std::any::Any;

use crate::models::config::AcquisitionStrategy;
use crate::models::error::RecorderError;
use crate::models::source::CaptureSource;

/// What to ask the platform for when acquiring a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConstraints {
    pub strategy: AcquisitionStrategy,
    /// Target source; always set for `DesktopSource`, informational for
    /// `DisplayMedia`.
    pub source_id: Option<String>,
    pub audio: bool,
}

impl CaptureConstraints {
    pub fn for_source(strategy: AcquisitionStrategy, source: &CaptureSource, audio: bool) -> Self {
        Self {
            strategy,
            source_id: Some(source.id.clone()),
            audio,
        }
    }
}

/// A live audio/video stream handed out by a `MediaAcquirer`.
pub trait MediaStream: Send {
    /// Platform id of the captured surface.
    fn source_id(&self) -> &str;

    fn has_audio(&self) -> bool;

    /// Release the capture. Called once when the session ends.
    fn stop(&mut self);

    /// Backends downcast their own stream type through this.
    fn as_any(&self) -> &dyn Any;
}

/// Turns constraints into a live stream.
pub trait MediaAcquirer: Send + Sync {
    /// Fails with `RecorderError::Capture` on unsatisfiable constraints and
    /// `RecorderError::PermissionDenied` when the platform refuses.
    fn acquire(&self, constraints: &CaptureConstraints) -> Result<Box<dyn MediaStream>, RecorderError>;
}

/// Live preview surface. Playback starts on `attach`, with no buffering.
pub trait PreviewSink: Send + Sync {
    fn attach(&self, stream: &dyn MediaStream) -> Result<(), RecorderError>;

    fn detach(&self);
}
