//! Live preview in an ffplay window.

use std::process::{Child, Command, Stdio};

use parking_lot::Mutex;

use screen_capture_core::models::error::RecorderError;
use screen_capture_core::traits::media::{MediaStream, PreviewSink};

use crate::commands::FfmpegCommandBuilder;
use crate::config::FfmpegOptions;
use crate::error::BackendError;
use crate::stream::X11Stream;

/// Shows the captured surface in an ffplay window.
///
/// One preview at a time; attaching replaces the previous window.
pub struct FfplayPreview {
    options: FfmpegOptions,
    child: Mutex<Option<Child>>,
}

impl FfplayPreview {
    pub fn new(options: FfmpegOptions) -> Self {
        Self {
            options,
            child: Mutex::new(None),
        }
    }
}

fn terminate(mut child: Child) {
    if let Err(e) = child.kill() {
        log::debug!("ffplay already exited: {}", e);
    }
    let _ = child.wait();
}

impl PreviewSink for FfplayPreview {
    fn attach(&self, stream: &dyn MediaStream) -> Result<(), RecorderError> {
        let x11 = X11Stream::from_stream(stream)
            .ok_or_else(|| BackendError::UnsupportedStream(stream.source_id().to_string()))?;

        let args = FfmpegCommandBuilder::new(x11.display(), x11.target().clone())
            .with_options(&self.options)
            .build_preview(&format!("Preview: {}", stream.source_id()));

        let child = Command::new(&self.options.ffplay_path)
            .args(&args)
            .env("DISPLAY", x11.display())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| BackendError::Spawn {
                tool: self.options.ffplay_path.clone(),
                source,
            })?;

        log::debug!("ffplay preview started (pid {})", child.id());
        if let Some(previous) = self.child.lock().replace(child) {
            terminate(previous);
        }
        Ok(())
    }

    fn detach(&self) {
        if let Some(child) = self.child.lock().take() {
            terminate(child);
            log::debug!("ffplay preview closed");
        }
    }
}

impl Drop for FfplayPreview {
    fn drop(&mut self) {
        self.detach();
    }
}
