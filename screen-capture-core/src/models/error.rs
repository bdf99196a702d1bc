use thiserror::Error;

/// Errors that can occur while enumerating, capturing, recording or saving.
///
/// A dismissed dialog is not an error: pickers and save prompts report it as
/// `None`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecorderError {
    #[error("platform error: {0}")]
    Platform(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("capture failed: {0}")]
    Capture(String),

    #[error("Please select video source first")]
    NoSourceSelected,

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("timeout: {0}")]
    Timeout(String),
}

/// Coarse error classes, used to decide how a failure is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Enumeration or permission failures.
    Platform,
    /// Stream acquisition and encoder failures.
    Capture,
    /// File write failures.
    Io,
    /// Operation not valid in the current state (including no source).
    Usage,
}

impl RecorderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Platform(_) | Self::PermissionDenied(_) => ErrorCategory::Platform,
            Self::Capture(_) | Self::Timeout(_) => ErrorCategory::Capture,
            Self::StorageError(_) => ErrorCategory::Io,
            Self::NoSourceSelected | Self::InvalidState(_) | Self::ConfigurationFailed(_) => {
                ErrorCategory::Usage
            }
        }
    }

    /// Title for the blocking error dialog.
    pub fn dialog_title(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Platform => "Source Error",
            ErrorCategory::Capture => "Capture Error",
            ErrorCategory::Io => "Save Error",
            ErrorCategory::Usage => "Error",
        }
    }
}

impl From<std::io::Error> for RecorderError {
    fn from(e: std::io::Error) -> Self {
        Self::StorageError(e.to_string())
    }
}
