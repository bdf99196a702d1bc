use std::path::Path;

use crate::models::error::RecorderError;

/// Destination for finalized recordings.
///
/// Default implementation: `AtomicFileSink`.
pub trait FileSink: Send + Sync {
    /// Write `data` as the complete contents of `path`.
    fn write(&self, path: &Path, data: &[u8]) -> Result<(), RecorderError>;
}
