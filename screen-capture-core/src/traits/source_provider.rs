use crate::models::error::RecorderError;
use crate::models::source::{CaptureSource, SourceKind};

/// Platform enumeration of capturable windows and screens.
///
/// Implemented by:
/// - `X11SourceEnumerator` (Linux)
pub trait SourceEnumerator: Send + Sync {
    /// List every source of the requested kinds in one call.
    ///
    /// Ordering is platform-defined and may change between calls. Fails with
    /// `RecorderError::Platform` or `RecorderError::PermissionDenied` when
    /// enumeration is unsupported or denied.
    fn list_sources(&self, kinds: &[SourceKind]) -> Result<Vec<CaptureSource>, RecorderError>;
}
