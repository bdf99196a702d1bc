use std::sync::Arc;

use crate::models::config::OutputFormat;
use crate::models::error::RecorderError;
use crate::traits::media::MediaStream;

/// Notifications emitted by a running encoder.
///
/// For one recording, every `DataAvailable` precedes the single `Stopped`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncoderEvent {
    DataAvailable(Vec<u8>),
    Error(String),
    Stopped,
}

/// Callback invoked for each encoder event.
///
/// May fire on a backend thread; implementations only forward the event.
pub type EncoderCallback = Arc<dyn Fn(EncoderEvent) + Send + Sync + 'static>;

/// A recorder bound to one live stream.
pub trait MediaEncoder: Send {
    /// Begin encoding, delivering slices via `callback`.
    fn start(&mut self, callback: EncoderCallback) -> Result<(), RecorderError>;

    /// Request the encoder to flush and emit `Stopped`.
    fn stop(&mut self) -> Result<(), RecorderError>;

    fn mime_type(&self) -> &str;
}

/// Creates encoders for streams.
pub trait EncoderFactory: Send + Sync {
    fn create(
        &self,
        stream: &dyn MediaStream,
        format: &OutputFormat,
    ) -> Result<Box<dyn MediaEncoder>, RecorderError>;
}
