use super::source::CaptureSource;

/// Recorder state machine.
///
/// State transitions:
/// ```text
/// idle → source_selected → previewing → recording → stopping → stopped
///              ↓ (acquisition failed)                              │
///             idle                          previewing/stopped ←───┘ start again
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    SourceSelected(CaptureSource),
    Previewing(CaptureSource),
    Recording { source: CaptureSource, chunks: usize },
    Stopping(CaptureSource),
    Stopped(CaptureSource),
}

impl RecorderState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording { .. })
    }

    pub fn is_stopping(&self) -> bool {
        matches!(self, Self::Stopping(_))
    }

    /// Whether `start()` may begin a new recording.
    pub fn can_start(&self) -> bool {
        matches!(self, Self::Previewing(_) | Self::Stopped(_))
    }

    /// The source bound to the current session, if any.
    pub fn source(&self) -> Option<&CaptureSource> {
        match self {
            Self::Idle => None,
            Self::SourceSelected(s)
            | Self::Previewing(s)
            | Self::Stopping(s)
            | Self::Stopped(s) => Some(s),
            Self::Recording { source, .. } => Some(source),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::SourceSelected(_) => "source_selected",
            Self::Previewing(_) => "previewing",
            Self::Recording { .. } => "recording",
            Self::Stopping(_) => "stopping",
            Self::Stopped(_) => "stopped",
        }
    }
}

/// Presentational state of the three controls, derived from `RecorderState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsView {
    pub source_label: String,
    pub start_label: &'static str,
    pub start_is_danger: bool,
    pub stop_visible: bool,
}

impl From<&RecorderState> for ControlsView {
    fn from(state: &RecorderState) -> Self {
        let recording = state.is_recording();
        Self {
            source_label: state
                .source()
                .map(|s| s.name.clone())
                .unwrap_or_else(|| "Select video source".into()),
            start_label: if recording { "Recording" } else { "Start" },
            start_is_danger: recording,
            stop_visible: recording,
        }
    }
}
