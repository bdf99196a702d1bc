use std::path::PathBuf;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::source::CaptureSource;

/// A stopped recording whose chunks have been concatenated into one blob.
///
/// Kept in memory until it is saved and discarded, or replaced by the next
/// recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedRecording {
    pub id: Uuid,
    pub source: CaptureSource,
    pub mime_type: String,
    pub chunk_count: usize,
    pub created_at: DateTime<Utc>,
    pub suggested_file_name: String,
    pub blob: Vec<u8>,
}

impl FinalizedRecording {
    pub fn size_bytes(&self) -> usize {
        self.blob.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blob.is_empty()
    }
}

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedRecording {
    pub recording_id: Uuid,
    pub path: PathBuf,
    pub size_bytes: u64,
    /// SHA-256 of the written bytes, lowercase hex.
    pub checksum: String,
}

/// Suggested file name: `{prefix}-{unix millis}.{extension}`.
pub fn default_file_name(prefix: &str, extension: &str, at: DateTime<Utc>) -> String {
    format!("{}-{}.{}", prefix, at.timestamp_millis(), extension)
}
