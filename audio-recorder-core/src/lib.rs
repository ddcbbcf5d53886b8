//! # audio-recorder-core
//!
//! Recording-session lifecycle core library.
//!
//! Owns the state machine that decides *when* audio capture runs and
//! *which* file it writes: start/stop, maximum-duration timeout, elapsed
//! time tracking, and artifact lifecycle. The capture pipeline itself,
//! the event consumer, and the filesystem are collaborators behind
//! traits; the session is their sole arbiter.
//!
//! ## Architecture
//!
//! ```text
//! audio-recorder-core (this crate)
//! ├── traits/    ← CaptureEngine, RecordingDelegate, Storage
//! ├── models/    ← RecorderError, CaptureError, RecordingState, StopReason,
//! │                RecorderConfig, RecordingInfo
//! ├── session/   ← RecordingSession (state machine orchestrator)
//! └── storage/   ← FsStorage, metadata sidecar I/O
//! ```

pub mod models;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::config::RecorderConfig;
pub use models::error::{CaptureError, RecorderError};
pub use models::recording_info::RecordingInfo;
pub use models::state::{RecordingState, StopReason};
pub use session::recorder::RecordingSession;
pub use storage::filesystem::FsStorage;
pub use traits::capture_engine::{CaptureEngine, FailureCallback};
pub use traits::recording_delegate::RecordingDelegate;
pub use traits::storage::Storage;
