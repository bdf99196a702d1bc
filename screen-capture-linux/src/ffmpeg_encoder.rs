//! ffmpeg-backed encoder.
//!
//! Runs `ffmpeg -f x11grab … -f webm pipe:1` and delivers whatever it
//! writes to stdout as data chunks, from a dedicated reader thread.

use std::io::{Read, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;

use screen_capture_core::models::config::OutputFormat;
use screen_capture_core::models::error::RecorderError;
use screen_capture_core::traits::encoder::{EncoderCallback, EncoderEvent, EncoderFactory, MediaEncoder};
use screen_capture_core::traits::media::MediaStream;

use crate::commands::FfmpegCommandBuilder;
use crate::config::FfmpegOptions;
use crate::error::BackendError;
use crate::stream::X11Stream;

/// One ffmpeg process per recording.
pub struct FfmpegEncoder {
    program: String,
    args: Vec<String>,
    display: String,
    mime_type: String,
    chunk_size: usize,
    child: Arc<Mutex<Option<Child>>>,
    stdin: Option<ChildStdin>,
    reader_handle: Mutex<Option<thread::JoinHandle<()>>>,
}

impl FfmpegEncoder {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        display: impl Into<String>,
        mime_type: impl Into<String>,
        chunk_size: usize,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            display: display.into(),
            mime_type: mime_type.into(),
            chunk_size: chunk_size.max(1),
            child: Arc::new(Mutex::new(None)),
            stdin: None,
            reader_handle: Mutex::new(None),
        }
    }
}

impl MediaEncoder for FfmpegEncoder {
    fn start(&mut self, callback: EncoderCallback) -> Result<(), RecorderError> {
        if self.child.lock().is_some() {
            return Err(RecorderError::InvalidState("ffmpeg encoder already running".into()));
        }

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env("DISPLAY", &self.display)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| RecorderError::Capture(format!("failed to start {}: {}", self.program, e)))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        self.stdin = child.stdin.take();
        let pid = child.id();
        *self.child.lock() = Some(child);

        let (Some(mut stdout), Some(mut stderr)) = (stdout, stderr) else {
            return Err(RecorderError::Capture("ffmpeg pipes unavailable".into()));
        };

        // stderr is small with -loglevel error; drain it so ffmpeg never blocks on it.
        let stderr_handle = thread::Builder::new()
            .name("ffmpeg-stderr".into())
            .spawn(move || {
                let mut text = String::new();
                let _ = stderr.read_to_string(&mut text);
                text
            })
            .map_err(|e| RecorderError::Capture(format!("failed to spawn stderr thread: {}", e)))?;

        let child = Arc::clone(&self.child);
        let chunk_size = self.chunk_size;
        let handle = thread::Builder::new()
            .name("ffmpeg-reader".into())
            .spawn(move || {
                let mut buf = vec![0u8; chunk_size];
                loop {
                    match stdout.read(&mut buf) {
                        Ok(0) => break,
                        Ok(n) => callback(EncoderEvent::DataAvailable(buf[..n].to_vec())),
                        Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                        Err(e) => {
                            callback(EncoderEvent::Error(format!("reading ffmpeg output failed: {}", e)));
                            break;
                        }
                    }
                }

                let stderr_text = stderr_handle.join().unwrap_or_default();
                let status = child.lock().as_mut().map(|c| c.wait());
                match status {
                    Some(Ok(status)) if !status.success() => {
                        let detail = stderr_text.trim();
                        callback(EncoderEvent::Error(format!("ffmpeg exited with {}: {}", status, detail)));
                    }
                    Some(Err(e)) => log::warn!("Failed to reap ffmpeg: {}", e),
                    _ => {}
                }
                callback(EncoderEvent::Stopped);
            })
            .map_err(|e| RecorderError::Capture(format!("failed to spawn reader thread: {}", e)))?;

        *self.reader_handle.lock() = Some(handle);
        log::info!("ffmpeg encoder started (pid {})", pid);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), RecorderError> {
        // `q` asks ffmpeg to finish the container; the reader thread reports
        // `Stopped` once stdout reaches EOF.
        if let Some(mut stdin) = self.stdin.take() {
            if let Err(e) = stdin.write_all(b"q").and_then(|_| stdin.flush()) {
                log::debug!("ffmpeg stdin closed before stop: {}", e);
            }
        }
        Ok(())
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

impl Drop for FfmpegEncoder {
    fn drop(&mut self) {
        self.stdin.take();
        if let Some(child) = self.child.lock().as_mut() {
            if matches!(child.try_wait(), Ok(None)) {
                log::warn!("Killing ffmpeg encoder (pid {})", child.id());
                let _ = child.kill();
            }
        }
        if let Some(handle) = self.reader_handle.lock().take() {
            let _ = handle.join();
        }
    }
}

/// Creates an `FfmpegEncoder` for each X11 stream.
pub struct FfmpegEncoderFactory {
    options: FfmpegOptions,
}

impl FfmpegEncoderFactory {
    pub fn new(options: FfmpegOptions) -> Self {
        Self { options }
    }
}

impl EncoderFactory for FfmpegEncoderFactory {
    fn create(&self, stream: &dyn MediaStream, format: &OutputFormat) -> Result<Box<dyn MediaEncoder>, RecorderError> {
        let x11 = X11Stream::from_stream(stream)
            .ok_or_else(|| BackendError::UnsupportedStream(stream.source_id().to_string()))?;

        match (format.container(), format.codec()) {
            ("webm", Some("vp9") | None) => {}
            (container, codec) => {
                return Err(RecorderError::ConfigurationFailed(format!(
                    "unsupported output format {} ({}; codec {:?})",
                    format.mime_type, container, codec
                )));
            }
        }

        let args = FfmpegCommandBuilder::new(x11.display(), x11.target().clone())
            .with_options(&self.options)
            .with_container(format.container())
            .with_audio(stream.has_audio())
            .build();

        Ok(Box::new(FfmpegEncoder::new(
            self.options.ffmpeg_path.clone(),
            args,
            x11.display(),
            format.mime_type.clone(),
            self.options.chunk_size,
        )))
    }
}
