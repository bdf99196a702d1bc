use std::io;

use thiserror::Error;

use screen_capture_core::models::error::RecorderError;

/// Failures of the external X11/ffmpeg tools.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("no X display available (DISPLAY is not set)")]
    NoDisplay,

    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("unsupported stream: {0}")]
    UnsupportedStream(String),
}

impl From<BackendError> for RecorderError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::NoDisplay => RecorderError::PermissionDenied(e.to_string()),
            BackendError::Spawn { .. } | BackendError::ToolFailed { .. } => {
                RecorderError::Platform(e.to_string())
            }
            BackendError::UnsupportedStream(_) => RecorderError::Capture(e.to_string()),
        }
    }
}
