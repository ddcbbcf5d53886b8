use std::path::PathBuf;

use thiserror::Error;

/// Errors crossing the capture-engine boundary.
///
/// Engines report these synchronously from `start`/`stop` and
/// asynchronously through their failure callback.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("capture device not available")]
    DeviceUnavailable,

    #[error("capture interrupted: {0}")]
    Interrupted(String),

    #[error("capture engine failed: {0}")]
    EngineFailed(String),
}

/// Errors returned by `RecordingSession` operations.
#[derive(Debug, Error)]
pub enum RecorderError {
    /// `start_recording` called while a recording is active.
    #[error("a recording is already active")]
    AlreadyActive,

    /// Operation not valid for the current session state.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// No artifact exists to operate on.
    #[error("no recording found")]
    NotFound,

    /// Rejected session configuration.
    #[error("configuration failed: {0}")]
    Config(String),

    /// Propagated from the capture engine.
    #[error(transparent)]
    Capture(#[from] CaptureError),

    /// Storage-layer failure on create/delete.
    #[error("storage error at {path:?}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Internal failure (e.g., the timer thread could not be spawned).
    #[error("internal error: {0}")]
    Internal(String),
}
