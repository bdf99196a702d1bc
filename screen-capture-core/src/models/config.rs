use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How a live stream is obtained for a selected source.
///
/// Exactly one strategy is active per configuration; there is no fallback
/// from one to the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AcquisitionStrategy {
    /// Constrained desktop capture targeting the picked source id.
    ///
    /// Permission model: the application itself is trusted to grab any
    /// enumerated surface (X11, Windows desktop duplication, macOS screen
    /// recording permission granted once per app).
    DesktopSource,

    /// Generic display-media request. The platform shows its own consent
    /// prompt and the user chooses the surface there; the picked source only
    /// labels the session.
    ///
    /// Permission model: per-request user consent (xdg-desktop-portal,
    /// browser-style `getDisplayMedia`).
    DisplayMedia,
}

impl Default for AcquisitionStrategy {
    fn default() -> Self {
        Self::DesktopSource
    }
}

/// Encoder output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFormat {
    /// Full mime type including codec parameters.
    pub mime_type: String,

    /// File extension used for the default file name, without the dot.
    pub extension: String,
}

impl OutputFormat {
    /// VP9 video in a WebM container.
    pub fn webm_vp9() -> Self {
        Self {
            mime_type: "video/webm; codecs=vp9".into(),
            extension: "webm".into(),
        }
    }

    /// Container part of the mime type (`webm` for `video/webm; codecs=vp9`).
    pub fn container(&self) -> &str {
        let essence = self.mime_type.split(';').next().unwrap_or_default().trim();
        essence.rsplit('/').next().unwrap_or(essence)
    }

    /// Codec named in the mime parameters, if any.
    pub fn codec(&self) -> Option<&str> {
        self.mime_type
            .split(';')
            .skip(1)
            .filter_map(|param| param.trim().strip_prefix("codecs="))
            .map(|c| c.trim_matches('"'))
            .next()
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::webm_vp9()
    }
}

/// Configuration for the recorder controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfiguration {
    pub acquisition: AcquisitionStrategy,

    pub output_format: OutputFormat,

    /// Capture audio alongside video (default: false).
    pub capture_audio: bool,

    /// Label of the save dialog's confirm button.
    pub save_button_label: String,

    /// Prefix of the suggested file name (`vid` -> `vid-1700000000000.webm`).
    pub file_name_prefix: String,

    /// How long to wait for the encoder's stopped event after `stop()`.
    #[serde(with = "duration_millis")]
    pub stop_timeout: Duration,
}

impl RecorderConfiguration {
    pub fn validate(&self) -> Result<(), String> {
        if !self.output_format.mime_type.starts_with("video/") {
            return Err(format!(
                "unsupported output mime type: {}",
                self.output_format.mime_type
            ));
        }
        if self.output_format.extension.is_empty() || self.output_format.extension.contains('.') {
            return Err(format!(
                "invalid file extension: {:?}",
                self.output_format.extension
            ));
        }
        if self.file_name_prefix.contains(['/', '\\']) {
            return Err("file name prefix must not contain path separators".into());
        }
        if self.stop_timeout.is_zero() {
            return Err("stop timeout must be positive".into());
        }
        Ok(())
    }
}

impl Default for RecorderConfiguration {
    fn default() -> Self {
        Self {
            acquisition: AcquisitionStrategy::default(),
            output_format: OutputFormat::default(),
            capture_audio: false,
            save_button_label: "Save".into(),
            file_name_prefix: "vid".into(),
            stop_timeout: Duration::from_secs(5),
        }
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
