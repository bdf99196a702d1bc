use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::config::RecorderConfiguration;
use crate::models::error::RecorderError;
use crate::models::recording::{default_file_name, FinalizedRecording};
use crate::models::source::CaptureSource;
use crate::processing::chunk_buffer::ChunkBuffer;
use crate::storage::save_pipeline;
use crate::traits::encoder::{EncoderCallback, MediaEncoder};

/// Identifies one recording; encoder events carry it so stale events from
/// an earlier recording can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One encoder plus the chunks it has produced.
///
/// Created when a source is selected (or re-armed after a stop) and consumed
/// by `finalize`, so its buffer never outlives the recording.
pub struct RecordingSession {
    id: SessionId,
    encoder: Box<dyn MediaEncoder>,
    chunks: ChunkBuffer,
    started: bool,
    stop_requested: bool,
}

impl RecordingSession {
    pub fn new(encoder: Box<dyn MediaEncoder>) -> Self {
        Self {
            id: SessionId::new(),
            encoder,
            chunks: ChunkBuffer::new(),
            started: false,
            stop_requested: false,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Start the encoder. A recording can only be started once.
    pub fn start(&mut self, callback: EncoderCallback) -> Result<(), RecorderError> {
        if self.started {
            return Err(RecorderError::InvalidState("recording already started".into()));
        }
        self.encoder.start(callback)?;
        self.started = true;
        Ok(())
    }

    /// Ask the encoder to flush. Repeated calls are no-ops.
    pub fn request_stop(&mut self) -> Result<(), RecorderError> {
        if !self.started || self.stop_requested {
            return Ok(());
        }
        self.stop_requested = true;
        self.encoder.stop()
    }

    pub fn push_chunk(&mut self, data: Vec<u8>) -> Result<usize, RecorderError> {
        self.chunks.push(data)?;
        Ok(self.chunks.len())
    }

    /// Seal the buffer and concatenate it into a `FinalizedRecording`.
    pub fn finalize(
        mut self,
        source: &CaptureSource,
        config: &RecorderConfiguration,
        now: DateTime<Utc>,
    ) -> FinalizedRecording {
        self.chunks.seal();
        let chunk_count = self.chunks.len();
        let mime_type = self.encoder.mime_type().to_string();
        let blob = save_pipeline::finalize(self.chunks);

        FinalizedRecording {
            id: self.id.as_uuid(),
            source: source.clone(),
            mime_type,
            chunk_count,
            created_at: now,
            suggested_file_name: default_file_name(
                &config.file_name_prefix,
                &config.output_format.extension,
                now,
            ),
            blob,
        }
    }
}

impl fmt::Debug for RecordingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingSession")
            .field("id", &self.id)
            .field("chunks", &self.chunks.len())
            .field("started", &self.started)
            .field("stop_requested", &self.stop_requested)
            .finish()
    }
}
