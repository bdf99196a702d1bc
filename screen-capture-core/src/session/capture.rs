use crate::models::config::OutputFormat;
use crate::models::error::RecorderError;
use crate::models::source::CaptureSource;
use crate::session::recording::RecordingSession;
use crate::traits::encoder::EncoderFactory;
use crate::traits::media::{CaptureConstraints, MediaAcquirer, MediaStream, PreviewSink};

/// A selected source bound to a live, previewed stream.
///
/// Owns the stream handle and the recorder for the next (or current)
/// recording. Lives from source selection until another source is selected
/// or the app shuts down; `end` releases everything.
pub struct CaptureSession {
    source: CaptureSource,
    stream: Box<dyn MediaStream>,
    recorder: Option<RecordingSession>,
}

impl CaptureSession {
    /// Acquire a stream for `source`, start the preview and create the
    /// recorder.
    ///
    /// Anything acquired before a failure is released again.
    pub fn begin(
        source: CaptureSource,
        constraints: &CaptureConstraints,
        acquirer: &dyn MediaAcquirer,
        preview: &dyn PreviewSink,
        encoders: &dyn EncoderFactory,
        format: &OutputFormat,
    ) -> Result<Self, RecorderError> {
        let mut stream = acquirer.acquire(constraints)?;

        if let Err(e) = preview.attach(stream.as_ref()) {
            stream.stop();
            return Err(e);
        }

        let encoder = match encoders.create(stream.as_ref(), format) {
            Ok(encoder) => encoder,
            Err(e) => {
                preview.detach();
                stream.stop();
                return Err(e);
            }
        };

        log::info!(
            "Capture session started for '{}' ({})",
            source.name,
            stream.source_id()
        );

        Ok(Self {
            source,
            stream,
            recorder: Some(RecordingSession::new(encoder)),
        })
    }

    pub fn source(&self) -> &CaptureSource {
        &self.source
    }

    pub fn stream(&self) -> &dyn MediaStream {
        self.stream.as_ref()
    }

    /// Create a fresh recorder on the live stream if the previous one was
    /// finalized.
    pub fn rearm(&mut self, encoders: &dyn EncoderFactory, format: &OutputFormat) -> Result<(), RecorderError> {
        if self.recorder.is_none() {
            let encoder = encoders.create(self.stream.as_ref(), format)?;
            self.recorder = Some(RecordingSession::new(encoder));
        }
        Ok(())
    }

    pub fn recorder(&self) -> Option<&RecordingSession> {
        self.recorder.as_ref()
    }

    pub fn recorder_mut(&mut self) -> Option<&mut RecordingSession> {
        self.recorder.as_mut()
    }

    pub fn take_recorder(&mut self) -> Option<RecordingSession> {
        self.recorder.take()
    }

    /// Stop any running encoder, detach the preview and release the stream.
    pub fn end(mut self, preview: &dyn PreviewSink) {
        if let Some(mut recorder) = self.recorder.take() {
            if recorder.is_started() {
                log::warn!(
                    "Dropping unfinished recording {} ({} chunks)",
                    recorder.id(),
                    recorder.chunk_count()
                );
            }
            if let Err(e) = recorder.request_stop() {
                log::warn!("Failed to stop encoder: {}", e);
            }
        }
        preview.detach();
        self.stream.stop();
        log::info!("Capture session for '{}' ended", self.source.name);
    }
}
