use std::sync::Arc;

use screen_capture_core::{ControlsView, RecorderDelegate, RecorderError, RecorderState, SavedRecording};

/// Prints recorder notifications and the control bar to the terminal.
pub struct ConsoleDelegate;

impl ConsoleDelegate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self)
    }
}

pub fn render_controls(controls: &ControlsView) -> String {
    let start = if controls.start_is_danger {
        format!("[!{}!]", controls.start_label)
    } else {
        format!("[{}]", controls.start_label)
    };
    let stop = if controls.stop_visible { " [Stop]" } else { "" };
    format!("[{}] {}{}", controls.source_label, start, stop)
}

impl RecorderDelegate for ConsoleDelegate {
    fn on_state_changed(&self, state: &RecorderState) {
        log::debug!("state: {}", state.name());
        println!("{}", render_controls(&ControlsView::from(state)));
    }

    fn on_chunk_received(&self, index: usize, len: usize) {
        log::trace!("chunk #{} ({} bytes)", index, len);
    }

    fn on_error(&self, error: &RecorderError) {
        log::debug!("error surfaced ({:?}): {}", error.category(), error);
    }

    fn on_recording_saved(&self, saved: &SavedRecording) {
        println!(
            "Saved {} ({} bytes, sha256 {})",
            saved.path.display(),
            saved.size_bytes,
            saved.checksum
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screen_capture_core::{CaptureSource, SourceKind};

    #[test]
    fn renders_recording_controls() {
        let source = CaptureSource::new("screen:0", "Entire Screen", SourceKind::Screen);
        let state = RecorderState::Recording { source, chunks: 2 };
        assert_eq!(
            render_controls(&ControlsView::from(&state)),
            "[Entire Screen] [!Recording!] [Stop]"
        );
        assert_eq!(
            render_controls(&ControlsView::from(&RecorderState::Idle)),
            "[Select video source] [Start]"
        );
    }
}
