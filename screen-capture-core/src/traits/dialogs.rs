use std::path::PathBuf;

use crate::models::source::CaptureSource;

/// Receives the id of the chosen source, or `None` when the menu was
/// dismissed.
pub type SelectionCallback = Box<dyn FnOnce(Option<String>) + Send + 'static>;

/// Native source selection menu.
///
/// `present` returns immediately; the choice arrives later through
/// `on_select`.
pub trait SourcePicker: Send + Sync {
    fn present(&self, sources: &[CaptureSource], on_select: SelectionCallback);
}

/// Native save dialog.
pub trait SaveDialog: Send + Sync {
    /// Returns the chosen path, or `None` if the user cancelled.
    fn prompt(&self, button_label: &str, default_name: &str) -> Option<PathBuf>;
}

/// Blocking, user-facing error dialog.
pub trait ErrorPresenter: Send + Sync {
    fn show_error(&self, title: &str, message: &str);
}
