//! Source menu on the terminal, native save and error dialogs via rfd.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

use screen_capture_core::{CaptureSource, ErrorPresenter, SaveDialog, SelectionCallback, SourcePicker};

struct PendingMenu {
    sources: Vec<CaptureSource>,
    on_select: SelectionCallback,
}

/// Numbered source menu. The next input line answers it.
#[derive(Clone, Default)]
pub struct TerminalPicker {
    pending: Arc<Mutex<Option<PendingMenu>>>,
}

impl TerminalPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.pending.lock().is_some()
    }

    /// Resolve the open menu with `line`: a listed number selects, anything
    /// else dismisses. Returns `false` if no menu was open.
    pub fn answer(&self, line: &str) -> bool {
        let Some(menu) = self.pending.lock().take() else {
            return false;
        };

        let choice = line
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| menu.sources.get(i))
            .map(|s| s.id.clone());

        if choice.is_none() {
            println!("Selection dismissed");
        }
        (menu.on_select)(choice);
        true
    }
}

impl SourcePicker for TerminalPicker {
    fn present(&self, sources: &[CaptureSource], on_select: SelectionCallback) {
        println!("Select video source:");
        for (i, source) in sources.iter().enumerate() {
            println!("  {:>2}) {} [{}]", i + 1, source.name, source.kind.id_prefix());
        }
        println!("Enter a number (anything else cancels):");

        let previous = self.pending.lock().replace(PendingMenu {
            sources: sources.to_vec(),
            on_select,
        });
        if let Some(previous) = previous {
            (previous.on_select)(None);
        }
    }
}

/// Native save dialog.
pub struct RfdSaveDialog {
    directory: PathBuf,
}

impl RfdSaveDialog {
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }
}

impl SaveDialog for RfdSaveDialog {
    fn prompt(&self, button_label: &str, default_name: &str) -> Option<PathBuf> {
        // rfd has no confirm-label setter; the label titles the dialog instead.
        FileDialog::new()
            .set_title(button_label)
            .set_directory(&self.directory)
            .set_file_name(default_name)
            .save_file()
    }
}

/// Blocking native error dialog.
pub struct RfdErrorPresenter;

impl ErrorPresenter for RfdErrorPresenter {
    fn show_error(&self, title: &str, message: &str) {
        eprintln!("{}: {}", title, message);
        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}
