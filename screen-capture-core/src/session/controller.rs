use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use crossbeam_channel::Sender;

use crate::models::config::{OutputFormat, RecorderConfiguration};
use crate::models::error::RecorderError;
use crate::models::recording::{FinalizedRecording, SavedRecording};
use crate::models::source::{CaptureSource, SourceKind};
use crate::models::state::{ControlsView, RecorderState};
use crate::session::capture::CaptureSession;
use crate::session::dispatch::RecorderEvent;
use crate::session::recording::SessionId;
use crate::storage::save_pipeline::SavePipeline;
use crate::traits::dialogs::{ErrorPresenter, SaveDialog, SourcePicker};
use crate::traits::encoder::{EncoderEvent, EncoderFactory};
use crate::traits::file_sink::FileSink;
use crate::traits::media::{CaptureConstraints, MediaAcquirer, PreviewSink};
use crate::traits::recorder_delegate::RecorderDelegate;
use crate::traits::source_provider::SourceEnumerator;

/// The host capabilities the recorder is wired to.
pub struct Platform {
    pub enumerator: Box<dyn SourceEnumerator>,
    pub picker: Box<dyn SourcePicker>,
    pub acquirer: Box<dyn MediaAcquirer>,
    pub preview: Box<dyn PreviewSink>,
    pub encoders: Box<dyn EncoderFactory>,
    pub save_dialog: Box<dyn SaveDialog>,
    pub file_sink: Box<dyn FileSink>,
    pub errors: Box<dyn ErrorPresenter>,
}

/// Capture/record/save state machine.
///
/// Driven by `RecorderEvent`s from one dispatch thread (see `EventLoop`).
/// Owns at most one `CaptureSession`; a source picked while recording is
/// queued until the running recording has stopped, been finalized and
/// offered for saving.
pub struct RecorderController {
    platform: Platform,
    config: RecorderConfiguration,
    events: Sender<RecorderEvent>,
    state: RecorderState,
    delegate: Option<Arc<dyn RecorderDelegate>>,
    available_sources: Vec<CaptureSource>,
    session: Option<CaptureSession>,
    queued_source: Option<CaptureSource>,
    pending: Option<FinalizedRecording>,
    pending_saved: bool,
    stop_deadline: Option<Instant>,
}

impl RecorderController {
    pub fn new(
        platform: Platform,
        config: RecorderConfiguration,
        events: Sender<RecorderEvent>,
    ) -> Result<Self, RecorderError> {
        config.validate().map_err(RecorderError::ConfigurationFailed)?;

        Ok(Self {
            platform,
            config,
            events,
            state: RecorderState::Idle,
            delegate: None,
            available_sources: Vec::new(),
            session: None,
            queued_source: None,
            pending: None,
            pending_saved: false,
            stop_deadline: None,
        })
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn RecorderDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn state(&self) -> &RecorderState {
        &self.state
    }

    pub fn controls(&self) -> ControlsView {
        ControlsView::from(&self.state)
    }

    pub fn config(&self) -> &RecorderConfiguration {
        &self.config
    }

    /// Sources from the most recent enumeration.
    pub fn available_sources(&self) -> &[CaptureSource] {
        &self.available_sources
    }

    /// Last finalized recording. Kept until discarded, or until the next
    /// recording finalizes after this one was saved.
    pub fn pending_recording(&self) -> Option<&FinalizedRecording> {
        self.pending.as_ref()
    }

    /// A finalized recording exists that was never written anywhere.
    pub fn has_unsaved_recording(&self) -> bool {
        self.pending.is_some() && !self.pending_saved
    }

    /// When the pending stop gives up waiting for the encoder.
    pub fn stop_deadline(&self) -> Option<Instant> {
        self.stop_deadline
    }

    /// Route one event. Returns `false` after `Shutdown`.
    pub fn handle(&mut self, event: RecorderEvent) -> bool {
        let result = match event {
            RecorderEvent::OpenPicker => self.present_picker(),
            RecorderEvent::SourceChosen(Some(id)) => self.select_source(&id),
            RecorderEvent::SourceChosen(None) => {
                log::debug!("Source picker dismissed");
                Ok(())
            }
            RecorderEvent::Start => self.start(),
            RecorderEvent::Stop => self.stop(),
            RecorderEvent::SaveAgain => self.save_pending().map(|_| ()),
            RecorderEvent::Discard => {
                self.discard_pending();
                Ok(())
            }
            RecorderEvent::Encoder { session, event } => {
                self.handle_encoder_event(session, event);
                Ok(())
            }
            RecorderEvent::Shutdown => {
                self.shutdown();
                return false;
            }
        };

        if let Err(e) = result {
            log::debug!("Event finished with error: {}", e);
        }
        true
    }

    /// Enumerate windows and screens in one request.
    pub fn list_sources(&mut self) -> Result<Vec<CaptureSource>, RecorderError> {
        match self.platform.enumerator.list_sources(&SourceKind::ALL) {
            Ok(sources) => {
                log::info!("Found {} capture sources", sources.len());
                self.available_sources = sources.clone();
                Ok(sources)
            }
            Err(e) => Err(self.surface(e)),
        }
    }

    /// Enumerate and show the picker. The choice comes back later as
    /// `RecorderEvent::SourceChosen`.
    pub fn present_picker(&mut self) -> Result<(), RecorderError> {
        let sources = self.list_sources()?;
        let events = self.events.clone();
        self.platform.picker.present(
            &sources,
            Box::new(move |choice| {
                if events.send(RecorderEvent::SourceChosen(choice)).is_err() {
                    log::debug!("Source chosen after the event loop closed");
                }
            }),
        );
        Ok(())
    }

    /// React to a picker selection, resolved by source id.
    pub fn select_source(&mut self, source_id: &str) -> Result<(), RecorderError> {
        let Some(source) = self
            .available_sources
            .iter()
            .find(|s| s.id == source_id)
            .cloned()
        else {
            return Err(self.surface(RecorderError::Platform(format!(
                "capture source '{}' is no longer available",
                source_id
            ))));
        };

        if self.state.is_recording() {
            log::info!(
                "Source '{}' selected while recording; stopping the current recording first",
                source.name
            );
            self.queued_source = Some(source);
            self.stop()
        } else if self.state.is_stopping() {
            self.queued_source = Some(source);
            Ok(())
        } else {
            self.begin_capture(source)
        }
    }

    /// Replace the current session with one bound to `source`.
    pub fn begin_capture(&mut self, source: CaptureSource) -> Result<(), RecorderError> {
        if self.state.is_recording() || self.state.is_stopping() {
            return Err(RecorderError::InvalidState(
                "cannot switch sources while a recording is active".into(),
            ));
        }

        self.end_session();
        self.set_state(RecorderState::SourceSelected(source.clone()));

        let constraints =
            CaptureConstraints::for_source(self.config.acquisition, &source, self.config.capture_audio);
        let begun = CaptureSession::begin(
            source.clone(),
            &constraints,
            self.platform.acquirer.as_ref(),
            self.platform.preview.as_ref(),
            self.platform.encoders.as_ref(),
            &self.config.output_format,
        );

        match begun {
            Ok(session) => {
                self.session = Some(session);
                self.set_state(RecorderState::Previewing(source));
                Ok(())
            }
            Err(e) => {
                let e = self.surface(e);
                self.set_state(RecorderState::Idle);
                Err(e)
            }
        }
    }

    /// Start recording the selected source.
    pub fn start(&mut self) -> Result<(), RecorderError> {
        if self.state.is_recording() || self.state.is_stopping() {
            log::warn!("Start ignored: already {}", self.state.name());
            return Err(RecorderError::InvalidState(format!(
                "cannot start while {}",
                self.state.name()
            )));
        }
        if !self.state.can_start() {
            return Err(self.surface(RecorderError::NoSourceSelected));
        }
        if self.has_unsaved_recording() {
            return Err(self.surface(RecorderError::InvalidState(
                "the last recording was not saved; save or discard it before recording again".into(),
            )));
        }

        let events = self.events.clone();
        let started = match self.session.as_mut() {
            Some(session) => Self::start_recorder(
                session,
                self.platform.encoders.as_ref(),
                &self.config.output_format,
                events,
            )
            .map(|id| (id, session.source().clone())),
            None => Err(RecorderError::NoSourceSelected),
        };

        match started {
            Ok((id, source)) => {
                log::info!("Recording {} started for '{}'", id, source.name);
                self.set_state(RecorderState::Recording { source, chunks: 0 });
                Ok(())
            }
            Err(e) => Err(self.surface(e)),
        }
    }

    /// Request the encoder to stop. Finalizing and saving happen when its
    /// stopped event arrives.
    pub fn stop(&mut self) -> Result<(), RecorderError> {
        let source = match &self.state {
            RecorderState::Recording { source, .. } => source.clone(),
            other => {
                log::warn!("Stop ignored: recorder is {}", other.name());
                return Err(RecorderError::InvalidState(format!(
                    "cannot stop while {}",
                    other.name()
                )));
            }
        };

        self.set_state(RecorderState::Stopping(source));
        self.stop_deadline = Some(Instant::now() + self.config.stop_timeout);

        let requested = match self.session.as_mut().and_then(|s| s.recorder_mut()) {
            Some(recorder) => recorder.request_stop(),
            None => Err(RecorderError::InvalidState("no active recorder".into())),
        };

        if let Err(e) = requested {
            // No stopped event will follow; keep whatever was captured.
            let e = self.surface(e);
            self.finish_recording();
            return Err(e);
        }
        Ok(())
    }

    /// Apply an encoder notification, ignoring ones from finished recordings.
    pub fn handle_encoder_event(&mut self, session: SessionId, event: EncoderEvent) {
        let current = self
            .session
            .as_ref()
            .and_then(|s| s.recorder())
            .filter(|r| r.is_started())
            .map(|r| r.id());

        if current != Some(session) {
            log::debug!("Discarding encoder event from stale recording {}", session);
            return;
        }

        match event {
            EncoderEvent::DataAvailable(data) => self.on_data_available(data),
            EncoderEvent::Error(message) => {
                self.surface(RecorderError::Capture(message));
                if self.state.is_recording() {
                    let _ = self.stop();
                }
            }
            EncoderEvent::Stopped => self.finish_recording(),
        }
    }

    /// Give up on a silent encoder once the stop deadline passed.
    ///
    /// Returns whether the recording was force-finalized.
    pub fn check_stop_timeout(&mut self, now: Instant) -> bool {
        match self.stop_deadline {
            Some(deadline) if now >= deadline => {
                self.surface(RecorderError::Timeout(
                    "encoder did not confirm the stop in time".into(),
                ));
                self.finish_recording();
                true
            }
            _ => false,
        }
    }

    /// Offer the save dialog for the pending recording.
    ///
    /// `Ok(None)` means the user cancelled; the recording stays pending.
    pub fn save_pending(&mut self) -> Result<Option<SavedRecording>, RecorderError> {
        let Some(recording) = self.pending.as_ref() else {
            return Err(RecorderError::InvalidState("no recording to save".into()));
        };

        let pipeline = SavePipeline::new(
            self.platform.save_dialog.as_ref(),
            self.platform.file_sink.as_ref(),
            &self.config.save_button_label,
        );

        match pipeline.save(recording) {
            Ok(Some(saved)) => {
                self.pending_saved = true;
                if let Some(ref delegate) = self.delegate {
                    delegate.on_recording_saved(&saved);
                }
                Ok(Some(saved))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(self.surface(e)),
        }
    }

    /// Drop the pending recording. Returns whether there was one.
    pub fn discard_pending(&mut self) -> bool {
        self.pending_saved = false;
        match self.pending.take() {
            Some(recording) => {
                log::info!("Discarded recording {}", recording.id);
                true
            }
            None => false,
        }
    }

    /// Release the session. An unfinished recording is dropped.
    pub fn shutdown(&mut self) {
        self.queued_source = None;
        self.stop_deadline = None;
        self.end_session();
        if !self.state.is_idle() {
            self.set_state(RecorderState::Idle);
        }
    }

    // --- Internal helpers ---

    fn start_recorder(
        session: &mut CaptureSession,
        encoders: &dyn EncoderFactory,
        format: &OutputFormat,
        events: Sender<RecorderEvent>,
    ) -> Result<SessionId, RecorderError> {
        session.rearm(encoders, format)?;
        let recorder = session
            .recorder_mut()
            .ok_or_else(|| RecorderError::InvalidState("no recorder available".into()))?;

        let id = recorder.id();
        let callback = Arc::new(move |event: EncoderEvent| {
            if events
                .send(RecorderEvent::Encoder { session: id, event })
                .is_err()
            {
                log::debug!("Encoder event for {} dropped: event loop closed", id);
            }
        });

        if let Err(e) = recorder.start(callback) {
            session.take_recorder();
            return Err(e);
        }
        Ok(id)
    }

    fn on_data_available(&mut self, data: Vec<u8>) {
        let len = data.len();
        let pushed = match self.session.as_mut().and_then(|s| s.recorder_mut()) {
            Some(recorder) => recorder.push_chunk(data),
            None => return,
        };

        match pushed {
            Ok(count) => {
                if let RecorderState::Recording { chunks, .. } = &mut self.state {
                    *chunks = count;
                }
                if let Some(ref delegate) = self.delegate {
                    delegate.on_chunk_received(count - 1, len);
                }
            }
            Err(e) => log::warn!("Dropped chunk of {} bytes: {}", len, e),
        }
    }

    /// Finalize the current recording, offer it for saving, then move on to
    /// a queued source if one was picked meanwhile.
    fn finish_recording(&mut self) {
        self.stop_deadline = None;

        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(recorder) = session.take_recorder() else {
            return;
        };
        let source = session.source().clone();

        let finalized = recorder.finalize(&source, &self.config, Utc::now());
        log::info!(
            "Recording {} finalized: {} chunks, {} bytes",
            finalized.id,
            finalized.chunk_count,
            finalized.size_bytes()
        );

        self.set_state(RecorderState::Stopped(source));
        // `start` refuses to run while an unsaved recording is pending, so
        // only an already saved one can be replaced here.
        self.pending = Some(finalized);
        self.pending_saved = false;

        if let Err(e) = self.save_pending() {
            log::debug!("Save did not complete: {}", e);
        }

        if let Some(next) = self.queued_source.take() {
            let _ = self.begin_capture(next);
        }
    }

    fn end_session(&mut self) {
        if let Some(session) = self.session.take() {
            session.end(self.platform.preview.as_ref());
        }
    }

    fn set_state(&mut self, new_state: RecorderState) {
        log::debug!("Recorder state: {} -> {}", self.state.name(), new_state.name());
        self.state = new_state;
        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(&self.state);
        }
    }

    /// Show `error` to the user and hand it back for returning.
    fn surface(&self, error: RecorderError) -> RecorderError {
        log::error!("{}", error);
        self.platform
            .errors
            .show_error(error.dialog_title(), &error.to_string());
        if let Some(ref delegate) = self.delegate {
            delegate.on_error(&error);
        }
        error
    }
}

impl Drop for RecorderController {
    fn drop(&mut self) {
        self.end_session();
    }
}
