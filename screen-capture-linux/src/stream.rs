use std::any::Any;

use screen_capture_core::traits::media::MediaStream;

use crate::x11_parse::Geometry;

/// What x11grab reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrabTarget {
    /// A region of the root window (one monitor).
    Region(Geometry),
    /// A single client window by X id.
    Window(String),
}

/// A "live stream" on X11 is a resolved grab target: ffplay and ffmpeg each
/// open their own x11grab input against it, so nothing is held open here.
#[derive(Debug, Clone)]
pub struct X11Stream {
    source_id: String,
    display: String,
    target: GrabTarget,
    audio: bool,
    active: bool,
}

impl X11Stream {
    pub fn new(source_id: impl Into<String>, display: impl Into<String>, target: GrabTarget, audio: bool) -> Self {
        Self {
            source_id: source_id.into(),
            display: display.into(),
            target,
            audio,
            active: true,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn target(&self) -> &GrabTarget {
        &self.target
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Downcast a core stream handle to an X11 stream.
    pub fn from_stream(stream: &dyn MediaStream) -> Option<&X11Stream> {
        stream.as_any().downcast_ref::<X11Stream>()
    }
}

impl MediaStream for X11Stream {
    fn source_id(&self) -> &str {
        &self.source_id
    }

    fn has_audio(&self) -> bool {
        self.audio
    }

    fn stop(&mut self) {
        if self.active {
            log::debug!("Released X11 stream {}", self.source_id);
        }
        self.active = false;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
