use crate::models::error::RecorderError;
use crate::models::recording::SavedRecording;
use crate::models::state::RecorderState;

/// Event delegate for recorder notifications.
///
/// All methods are called from the dispatch thread.
pub trait RecorderDelegate: Send + Sync {
    /// Called after every state transition.
    fn on_state_changed(&self, state: &RecorderState);

    /// Called for each chunk appended to the active recording.
    fn on_chunk_received(&self, index: usize, len: usize);

    /// Called when an error is surfaced to the user.
    fn on_error(&self, error: &RecorderError);

    /// Called when a recording has been written to disk.
    fn on_recording_saved(&self, saved: &SavedRecording);
}
