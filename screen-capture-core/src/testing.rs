//! In-memory platform used by the unit tests.

use std::any::Any;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossbeam_channel::Sender;
use parking_lot::Mutex;

use crate::models::config::{OutputFormat, RecorderConfiguration};
use crate::models::error::RecorderError;
use crate::models::recording::SavedRecording;
use crate::models::source::{CaptureSource, SourceKind};
use crate::models::state::RecorderState;
use crate::session::controller::{Platform, RecorderController};
use crate::session::dispatch::{event_channel, EventLoop, RecorderEvent};
use crate::traits::dialogs::{ErrorPresenter, SaveDialog, SelectionCallback, SourcePicker};
use crate::traits::encoder::{EncoderCallback, EncoderEvent, EncoderFactory, MediaEncoder};
use crate::traits::file_sink::FileSink;
use crate::traits::media::{CaptureConstraints, MediaAcquirer, MediaStream, PreviewSink};
use crate::traits::recorder_delegate::RecorderDelegate;
use crate::traits::source_provider::SourceEnumerator;

pub fn screen() -> CaptureSource {
    CaptureSource::new("screen:0", "Entire Screen", SourceKind::Screen)
}

pub fn window() -> CaptureSource {
    CaptureSource::new("window:42", "Terminal", SourceKind::Window)
}

/// Everything the fakes observe, plus knobs to make them fail.
pub struct Shared {
    pub sources: Mutex<Vec<CaptureSource>>,
    pub enumerate_error: Mutex<Option<RecorderError>>,
    pub picker_shown: Mutex<Vec<Vec<String>>>,
    pub picker_callback: Mutex<Option<SelectionCallback>>,
    pub acquire_error: Mutex<Option<RecorderError>>,
    pub acquired: Mutex<Vec<CaptureConstraints>>,
    pub stream_stops: Mutex<Vec<String>>,
    pub preview_attached: Mutex<Vec<String>>,
    pub preview_detaches: Mutex<usize>,
    pub encoder_callbacks: Mutex<Vec<EncoderCallback>>,
    pub encoder_stops: Mutex<usize>,
    pub emit_stopped_on_stop: Mutex<bool>,
    pub encoder_start_error: Mutex<Option<RecorderError>>,
    pub save_answers: Mutex<VecDeque<Option<PathBuf>>>,
    pub save_prompts: Mutex<Vec<(String, String)>>,
    pub writes: Mutex<Vec<(PathBuf, Vec<u8>)>>,
    pub write_error: Mutex<Option<RecorderError>>,
    pub errors_shown: Mutex<Vec<(String, String)>>,
}

impl Default for Shared {
    fn default() -> Self {
        Self {
            sources: Mutex::new(Vec::new()),
            enumerate_error: Mutex::new(None),
            picker_shown: Mutex::new(Vec::new()),
            picker_callback: Mutex::new(None),
            acquire_error: Mutex::new(None),
            acquired: Mutex::new(Vec::new()),
            stream_stops: Mutex::new(Vec::new()),
            preview_attached: Mutex::new(Vec::new()),
            preview_detaches: Mutex::new(0),
            encoder_callbacks: Mutex::new(Vec::new()),
            encoder_stops: Mutex::new(0),
            emit_stopped_on_stop: Mutex::new(true),
            encoder_start_error: Mutex::new(None),
            save_answers: Mutex::new(VecDeque::new()),
            save_prompts: Mutex::new(Vec::new()),
            writes: Mutex::new(Vec::new()),
            write_error: Mutex::new(None),
            errors_shown: Mutex::new(Vec::new()),
        }
    }
}

/// Implements every collaborator trait over one `Shared` record.
#[derive(Clone, Default)]
pub struct FakePlatform {
    pub shared: Arc<Shared>,
}

impl FakePlatform {
    pub fn with_sources(sources: Vec<CaptureSource>) -> Self {
        let fake = Self::default();
        *fake.shared.sources.lock() = sources;
        fake
    }

    /// Fire an event through the callback handed to the `index`-th started
    /// encoder.
    pub fn emit(&self, index: usize, event: EncoderEvent) {
        let callback = self.shared.encoder_callbacks.lock()[index].clone();
        callback(event);
    }

    /// Answer the open picker.
    pub fn choose(&self, id: Option<&str>) {
        let callback = self
            .shared
            .picker_callback
            .lock()
            .take()
            .expect("picker not shown");
        callback(id.map(str::to_string));
    }

    /// Queue the answer for the next save prompt.
    pub fn answer_save(&self, path: Option<PathBuf>) {
        self.shared.save_answers.lock().push_back(path);
    }

    pub fn platform(&self) -> Platform {
        Platform {
            enumerator: Box::new(self.clone()),
            picker: Box::new(self.clone()),
            acquirer: Box::new(self.clone()),
            preview: Box::new(self.clone()),
            encoders: Box::new(self.clone()),
            save_dialog: Box::new(self.clone()),
            file_sink: Box::new(self.clone()),
            errors: Box::new(self.clone()),
        }
    }

    pub fn event_loop(&self, config: RecorderConfiguration) -> (Sender<RecorderEvent>, EventLoop) {
        let (tx, rx) = event_channel();
        let controller = RecorderController::new(self.platform(), config, tx.clone())
            .expect("valid configuration");
        (tx, EventLoop::new(controller, rx))
    }
}

impl SourceEnumerator for FakePlatform {
    fn list_sources(&self, kinds: &[SourceKind]) -> Result<Vec<CaptureSource>, RecorderError> {
        if let Some(e) = self.shared.enumerate_error.lock().clone() {
            return Err(e);
        }
        Ok(self
            .shared
            .sources
            .lock()
            .iter()
            .filter(|s| kinds.contains(&s.kind))
            .cloned()
            .collect())
    }
}

impl SourcePicker for FakePlatform {
    fn present(&self, sources: &[CaptureSource], on_select: SelectionCallback) {
        self.shared
            .picker_shown
            .lock()
            .push(sources.iter().map(|s| s.id.clone()).collect());
        *self.shared.picker_callback.lock() = Some(on_select);
    }
}

pub struct FakeStream {
    id: String,
    audio: bool,
    shared: Arc<Shared>,
}

impl MediaStream for FakeStream {
    fn source_id(&self) -> &str {
        &self.id
    }

    fn has_audio(&self) -> bool {
        self.audio
    }

    fn stop(&mut self) {
        self.shared.stream_stops.lock().push(self.id.clone());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl MediaAcquirer for FakePlatform {
    fn acquire(&self, constraints: &CaptureConstraints) -> Result<Box<dyn MediaStream>, RecorderError> {
        if let Some(e) = self.shared.acquire_error.lock().clone() {
            return Err(e);
        }
        self.shared.acquired.lock().push(constraints.clone());
        Ok(Box::new(FakeStream {
            id: constraints.source_id.clone().unwrap_or_default(),
            audio: constraints.audio,
            shared: Arc::clone(&self.shared),
        }))
    }
}

impl PreviewSink for FakePlatform {
    fn attach(&self, stream: &dyn MediaStream) -> Result<(), RecorderError> {
        self.shared
            .preview_attached
            .lock()
            .push(stream.source_id().to_string());
        Ok(())
    }

    fn detach(&self) {
        *self.shared.preview_detaches.lock() += 1;
    }
}

pub struct FakeEncoder {
    shared: Arc<Shared>,
    index: Option<usize>,
}

impl MediaEncoder for FakeEncoder {
    fn start(&mut self, callback: EncoderCallback) -> Result<(), RecorderError> {
        if let Some(e) = self.shared.encoder_start_error.lock().clone() {
            return Err(e);
        }
        let mut callbacks = self.shared.encoder_callbacks.lock();
        self.index = Some(callbacks.len());
        callbacks.push(callback);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), RecorderError> {
        *self.shared.encoder_stops.lock() += 1;
        let emit = *self.shared.emit_stopped_on_stop.lock();
        if let (true, Some(index)) = (emit, self.index) {
            let callback = self.shared.encoder_callbacks.lock()[index].clone();
            callback(EncoderEvent::Stopped);
        }
        Ok(())
    }

    fn mime_type(&self) -> &str {
        "video/webm; codecs=vp9"
    }
}

impl EncoderFactory for FakePlatform {
    fn create(&self, _stream: &dyn MediaStream, _format: &OutputFormat) -> Result<Box<dyn MediaEncoder>, RecorderError> {
        Ok(Box::new(FakeEncoder {
            shared: Arc::clone(&self.shared),
            index: None,
        }))
    }
}

impl SaveDialog for FakePlatform {
    fn prompt(&self, button_label: &str, default_name: &str) -> Option<PathBuf> {
        self.shared
            .save_prompts
            .lock()
            .push((button_label.to_string(), default_name.to_string()));
        self.shared.save_answers.lock().pop_front().flatten()
    }
}

impl FileSink for FakePlatform {
    fn write(&self, path: &Path, data: &[u8]) -> Result<(), RecorderError> {
        if let Some(e) = self.shared.write_error.lock().clone() {
            return Err(e);
        }
        self.shared
            .writes
            .lock()
            .push((path.to_path_buf(), data.to_vec()));
        Ok(())
    }
}

impl ErrorPresenter for FakePlatform {
    fn show_error(&self, title: &str, message: &str) {
        self.shared
            .errors_shown
            .lock()
            .push((title.to_string(), message.to_string()));
    }
}

/// Delegate that records what it was told.
#[derive(Default)]
pub struct RecordingDelegate {
    pub states: Mutex<Vec<String>>,
    pub chunks: Mutex<Vec<(usize, usize)>>,
    pub errors: Mutex<Vec<RecorderError>>,
    pub saved: Mutex<Vec<SavedRecording>>,
}

impl RecordingDelegate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

impl RecorderDelegate for RecordingDelegate {
    fn on_state_changed(&self, state: &RecorderState) {
        self.states.lock().push(state.name().to_string());
    }

    fn on_chunk_received(&self, index: usize, len: usize) {
        self.chunks.lock().push((index, len));
    }

    fn on_error(&self, error: &RecorderError) {
        self.errors.lock().push(error.clone());
    }

    fn on_recording_saved(&self, saved: &SavedRecording) {
        self.saved.lock().push(saved.clone());
    }
}
