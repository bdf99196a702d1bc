use std::path::{Path, PathBuf};

use crate::models::error::RecorderError;
use crate::models::recording::{FinalizedRecording, SavedRecording};
use crate::processing::chunk_buffer::ChunkBuffer;
use crate::storage::atomic_writer::sha256_hex;
use crate::traits::dialogs::SaveDialog;
use crate::traits::file_sink::FileSink;

/// Concatenate a recording's chunks in arrival order.
pub fn finalize(chunks: ChunkBuffer) -> Vec<u8> {
    let mut blob = Vec::with_capacity(chunks.total_bytes());
    for chunk in chunks.into_chunks() {
        blob.extend_from_slice(&chunk);
    }
    blob
}

/// Prompt-then-write flow for a finalized recording.
pub struct SavePipeline<'a> {
    dialog: &'a dyn SaveDialog,
    sink: &'a dyn FileSink,
    button_label: &'a str,
}

impl<'a> SavePipeline<'a> {
    pub fn new(dialog: &'a dyn SaveDialog, sink: &'a dyn FileSink, button_label: &'a str) -> Self {
        Self {
            dialog,
            sink,
            button_label,
        }
    }

    /// Ask the user where to save. `None` means cancelled.
    pub fn prompt_destination(&self, default_name: &str) -> Option<PathBuf> {
        self.dialog.prompt(self.button_label, default_name)
    }

    /// Write the blob and return its checksum.
    pub fn persist(&self, blob: &[u8], path: &Path) -> Result<String, RecorderError> {
        self.sink.write(path, blob)?;
        Ok(sha256_hex(blob))
    }

    /// Prompt for a destination and write the recording there.
    ///
    /// Returns `Ok(None)` when the user cancels; the recording is left
    /// untouched so the caller can offer the save again.
    pub fn save(&self, recording: &FinalizedRecording) -> Result<Option<SavedRecording>, RecorderError> {
        let Some(path) = self.prompt_destination(&recording.suggested_file_name) else {
            log::info!("Save cancelled for recording {}", recording.id);
            return Ok(None);
        };

        let checksum = self.persist(&recording.blob, &path)?;
        log::info!(
            "Saved recording {} ({} bytes) to {}",
            recording.id,
            recording.size_bytes(),
            path.display()
        );

        Ok(Some(SavedRecording {
            recording_id: recording.id,
            path,
            size_bytes: recording.size_bytes() as u64,
            checksum,
        }))
    }
}
