//! # screen-capture-core
//!
//! Platform-agnostic screen recorder core library.
//!
//! Lets a user pick a window or screen, previews it live, records it into
//! encoder chunks and saves the concatenated recording through a save dialog.
//! Platform backends (X11/ffmpeg on Linux) implement the collaborator traits
//! and plug into the generic `RecorderController`.
//!
//! ## Architecture
//!
//! ```text
//! screen-capture-core (this crate)
//! ├── traits/       ← SourceEnumerator, MediaAcquirer, PreviewSink, MediaEncoder, dialogs, FileSink
//! ├── models/       ← RecorderError, RecorderState, RecorderConfiguration, CaptureSource, etc.
//! ├── processing/   ← ChunkBuffer
//! ├── session/      ← RecorderController, EventLoop, CaptureSession, RecordingSession
//! └── storage/      ← SavePipeline, AtomicFileSink
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod storage;
pub mod traits;

#[cfg(test)]
mod testing;

// Re-export key types at crate root for convenience.
pub use models::config::{AcquisitionStrategy, OutputFormat, RecorderConfiguration};
pub use models::error::{ErrorCategory, RecorderError};
pub use models::recording::{FinalizedRecording, SavedRecording};
pub use models::source::{CaptureSource, SourceKind};
pub use models::state::{ControlsView, RecorderState};
pub use processing::chunk_buffer::ChunkBuffer;
pub use session::controller::{Platform, RecorderController};
pub use session::dispatch::{event_channel, EventLoop, RecorderEvent};
pub use session::recording::SessionId;
pub use storage::atomic_writer::AtomicFileSink;
pub use traits::dialogs::{ErrorPresenter, SaveDialog, SelectionCallback, SourcePicker};
pub use traits::encoder::{EncoderCallback, EncoderEvent, EncoderFactory, MediaEncoder};
pub use traits::file_sink::FileSink;
pub use traits::media::{CaptureConstraints, MediaAcquirer, MediaStream, PreviewSink};
pub use traits::recorder_delegate::RecorderDelegate;
pub use traits::source_provider::SourceEnumerator;
