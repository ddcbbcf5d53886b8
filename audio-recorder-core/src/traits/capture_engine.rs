use std::path::Path;
use std::sync::Arc;

use crate::models::error::CaptureError;

/// Callback invoked when the engine dies asynchronously while active
/// (hardware interruption, device disconnect).
///
/// May fire from any thread, but must never be invoked from inside
/// `start` or `stop` — the session reacts to it under the same lock
/// those calls hold.
pub type FailureCallback = Arc<dyn Fn(CaptureError) + Send + Sync + 'static>;

/// Interface for the underlying audio capture pipeline.
///
/// Implementations own device setup, the processing graph, and the
/// sample write path; the session only decides when capture runs and
/// which file it writes.
pub trait CaptureEngine: Send {
    /// Whether the capture source is currently available.
    fn is_available(&self) -> bool;

    /// Begin writing audio to `sink`.
    ///
    /// `on_failure` reports asynchronous engine death at any point until
    /// `stop` returns; the session responds by forcing the stop-cleanup
    /// path.
    fn start(&mut self, sink: &Path, on_failure: FailureCallback) -> Result<(), CaptureError>;

    /// Cease capture and release the device.
    fn stop(&mut self) -> Result<(), CaptureError>;
}
