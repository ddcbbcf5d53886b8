use std::time::Duration;

use crate::models::error::RecorderError;
use crate::models::recording_info::RecordingInfo;
use crate::models::state::RecordingState;

/// Event delegate for recording session notifications.
///
/// All methods are called with the session lock released, but possibly
/// from the timer thread. Implementations should marshal to the UI
/// thread if needed. Every method has an empty default body, so
/// delegates implement only what they consume.
pub trait RecordingDelegate: Send + Sync {
    /// Called when the session state changes.
    fn on_state_changed(&self, _state: &RecordingState) {}

    /// Called periodically while recording with the elapsed and maximum
    /// duration.
    fn on_progress(&self, _elapsed: Duration, _max_duration: Duration) {}

    /// Called when a recording cycle completes and the artifact is final.
    fn on_recording_finished(&self, _info: &RecordingInfo) {}

    /// Called when an error occurs outside a caller-initiated operation
    /// (engine failure, unclean engine stop on timeout).
    fn on_error(&self, _error: &RecorderError) {}
}
