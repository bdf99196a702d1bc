use serde::{Deserialize, Serialize};

/// Kind of capturable surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Window,
    Screen,
}

impl SourceKind {
    /// Both kinds, in the order they are requested from the platform.
    pub const ALL: [SourceKind; 2] = [SourceKind::Window, SourceKind::Screen];

    /// Id prefix desktop capturers use for this kind (`screen:0`, `window:42`).
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Window => "window",
            Self::Screen => "screen",
        }
    }
}

/// A screen or window the platform offers for recording.
///
/// Immutable; valid for one picker invocation. Selection is always resolved
/// through `id`, never through the position in an enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaptureSource {
    pub id: String,
    pub name: String,
    pub kind: SourceKind,
}

impl CaptureSource {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }

    /// Build a source from a raw `{id, name}` pair, inferring the kind from
    /// the id prefix. Unprefixed ids are treated as windows.
    pub fn from_platform_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        let kind = if id.starts_with("screen:") {
            SourceKind::Screen
        } else {
            SourceKind::Window
        };
        Self::new(id, name, kind)
    }

    pub fn is_screen(&self) -> bool {
        self.kind == SourceKind::Screen
    }
}
