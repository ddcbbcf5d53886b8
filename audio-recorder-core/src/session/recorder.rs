use std::mem;
use std::path::PathBuf;
use std::sync::{Arc, Weak};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};
use parking_lot::Mutex;

use crate::models::config::RecorderConfig;
use crate::models::error::{CaptureError, RecorderError};
use crate::models::recording_info::RecordingInfo;
use crate::models::state::{RecordingState, StopReason};
use crate::traits::capture_engine::{CaptureEngine, FailureCallback};
use crate::traits::recording_delegate::RecordingDelegate;
use crate::traits::storage::Storage;

/// Internal session phase with payloads.
///
/// A live timeout timer can only be referenced from the `Recording`
/// payload, so a timer outliving its recording cycle is unrepresentable:
/// any fire carrying a generation that no longer matches the current
/// `Recording` payload is stale and ignored.
enum Phase {
    Idle,
    Recording {
        output: PathBuf,
        started_at: Instant,
        timer_generation: u64,
    },
    Stopped {
        artifact: PathBuf,
        duration: Duration,
    },
}

/// Mutable session state, protected by `parking_lot::Mutex`.
///
/// Every state transition (caller-initiated, timer fire, or engine
/// failure) runs under this one lock, so no torn intermediate state is
/// observable.
struct Inner<E: CaptureEngine, S: Storage> {
    phase: Phase,
    engine: E,
    storage: S,
    config: RecorderConfig,
    delegate: Option<Arc<dyn RecordingDelegate>>,
    next_timer_generation: u64,
}

impl<E: CaptureEngine, S: Storage> Inner<E, S> {
    /// Allocate a fresh artifact path that does not collide with any
    /// existing file. Prior artifacts are never overwritten.
    fn allocate_output_path(&self) -> PathBuf {
        loop {
            let name = format!(
                "{}_{}.{}",
                self.config.file_stem,
                uuid::Uuid::new_v4(),
                self.config.file_extension
            );
            let path = self.config.output_directory.join(name);
            if !self.storage.exists(&path) {
                return path;
            }
        }
    }

    /// Shared cleanup for every exit from `Recording`: cancel the pending
    /// timeout (later fires see a mismatched generation), stop the engine,
    /// freeze the final duration, and transition to `Stopped`.
    ///
    /// Returns `None` when not recording, which makes stale timer fires
    /// and stale engine-failure signals benign no-ops. The transition to
    /// `Stopped` happens even when the engine fails to stop cleanly; the
    /// session never stays `Recording` with a dead engine.
    fn finish(&mut self, reason: StopReason) -> Option<(RecordingInfo, Option<CaptureError>)> {
        match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Recording {
                output, started_at, ..
            } => {
                let duration = started_at.elapsed();
                let stop_err = self.engine.stop().err();
                if let Some(ref e) = stop_err {
                    error!("capture engine did not stop cleanly: {e}");
                }

                self.phase = Phase::Stopped {
                    artifact: output.clone(),
                    duration,
                };
                info!(
                    "recording stopped ({reason}): {:?} after {:.2}s",
                    output,
                    duration.as_secs_f64()
                );

                Some((RecordingInfo::new(output, duration, reason), stop_err))
            }
            other => {
                self.phase = other;
                None
            }
        }
    }

    fn state_snapshot(&self) -> RecordingState {
        match &self.phase {
            Phase::Idle => RecordingState::Idle,
            Phase::Recording { started_at, .. } => RecordingState::Recording {
                duration_secs: started_at.elapsed().as_secs_f64(),
            },
            Phase::Stopped { duration, .. } => RecordingState::Stopped {
                duration_secs: duration.as_secs_f64(),
            },
        }
    }
}

/// Arbiter of a single audio recording at a time.
///
/// Composes a [`CaptureEngine`] (the pipeline that writes samples), a
/// [`Storage`] backend (artifact create/delete), and an optional
/// [`RecordingDelegate`] (event consumer). The application's composition
/// root constructs exactly one and shares it by reference; there is no
/// global instance.
///
/// A recording ends on a manual stop, on the maximum-duration timeout,
/// or when the engine fails asynchronously. All three converge on one
/// cleanup path, so a timer cannot survive a stop and the engine cannot
/// be left running after a timeout.
pub struct RecordingSession<E: CaptureEngine, S: Storage> {
    inner: Arc<Mutex<Inner<E, S>>>,
}

impl<E: CaptureEngine, S: Storage> std::fmt::Debug for RecordingSession<E, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingSession").finish_non_exhaustive()
    }
}

impl<E, S> RecordingSession<E, S>
where
    E: CaptureEngine + 'static,
    S: Storage + 'static,
{
    pub fn new(config: RecorderConfig, engine: E, storage: S) -> Result<Self, RecorderError> {
        config.validate().map_err(RecorderError::Config)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(Inner {
                phase: Phase::Idle,
                engine,
                storage,
                config,
                delegate: None,
                next_timer_generation: 0,
            })),
        })
    }

    pub fn set_delegate(&self, delegate: Arc<dyn RecordingDelegate>) {
        self.inner.lock().delegate = Some(delegate);
    }

    /// Start a new recording cycle and return the artifact path it writes
    /// to.
    ///
    /// Allocates a fresh uniquely-named file, starts the capture engine,
    /// and arms the timeout timer. Starting from `Stopped` begins a new
    /// cycle; the prior artifact stays on disk but is no longer tracked.
    ///
    /// # Errors
    ///
    /// `AlreadyActive` while recording; `Capture` when the engine refuses
    /// to start (the allocated file is removed again); `Storage` when the
    /// artifact file cannot be created.
    pub fn start_recording(&self) -> Result<PathBuf, RecorderError> {
        let (output, state, delegate) = {
            let mut inner = self.inner.lock();

            if matches!(inner.phase, Phase::Recording { .. }) {
                return Err(RecorderError::AlreadyActive);
            }
            if !inner.engine.is_available() {
                return Err(CaptureError::DeviceUnavailable.into());
            }

            let output = inner.allocate_output_path();
            inner
                .storage
                .create_file(&output)
                .map_err(|source| RecorderError::Storage {
                    path: output.clone(),
                    source,
                })?;

            let on_failure = Self::failure_callback(Arc::downgrade(&self.inner));
            if let Err(e) = inner.engine.start(&output, on_failure) {
                if let Err(io_err) = inner.storage.delete_file(&output) {
                    warn!("could not remove unused artifact {output:?}: {io_err}");
                }
                return Err(e.into());
            }

            let generation = inner.next_timer_generation;
            inner.next_timer_generation += 1;

            // The timer thread blocks on this lock until the phase below
            // is in place, so it can never observe a half-started cycle.
            if let Err(e) = Self::spawn_timer(
                Arc::downgrade(&self.inner),
                generation,
                inner.config.progress_interval,
            ) {
                let _ = inner.engine.stop();
                if let Err(io_err) = inner.storage.delete_file(&output) {
                    warn!("could not remove unused artifact {output:?}: {io_err}");
                }
                return Err(e);
            }

            inner.phase = Phase::Recording {
                output: output.clone(),
                started_at: Instant::now(),
                timer_generation: generation,
            };
            info!(
                "recording started: {:?} (max {:.0}s)",
                output,
                inner.config.max_duration.as_secs_f64()
            );

            (output, inner.state_snapshot(), inner.delegate.clone())
        };

        if let Some(delegate) = delegate {
            delegate.on_state_changed(&state);
        }
        Ok(output)
    }

    /// Stop an active recording.
    ///
    /// Idempotent: returns `Ok(None)` when no recording is active. The
    /// timeout timer is cancelled before this method returns; a fire that
    /// raced past the cancellation is ignored as stale.
    ///
    /// # Errors
    ///
    /// `Capture` when the engine fails to stop cleanly. The session still
    /// transitions to `Stopped` and the artifact remains tracked.
    pub fn stop_recording(&self) -> Result<Option<RecordingInfo>, RecorderError> {
        let (outcome, state, delegate) = {
            let mut inner = self.inner.lock();
            let Some(outcome) = inner.finish(StopReason::Manual) else {
                debug!("stop requested while not recording; ignoring");
                return Ok(None);
            };
            (outcome, inner.state_snapshot(), inner.delegate.clone())
        };

        let (info, stop_err) = outcome;
        if let Some(delegate) = delegate {
            delegate.on_recording_finished(&info);
            delegate.on_state_changed(&state);
        }
        match stop_err {
            Some(e) => Err(e.into()),
            None => Ok(Some(info)),
        }
    }

    /// Destroy the completed recording's backing file and forget its
    /// location, returning the session to `Idle`.
    ///
    /// Never stops an active recording implicitly.
    ///
    /// # Errors
    ///
    /// `InvalidState` while recording; `NotFound` when no artifact exists
    /// (or its file is already gone); `Storage` when deletion fails at the
    /// filesystem, in which case the artifact stays tracked.
    pub fn delete_recording(&self) -> Result<(), RecorderError> {
        let (state, delegate) = {
            let mut inner = self.inner.lock();

            let artifact = match &inner.phase {
                Phase::Recording { .. } => {
                    return Err(RecorderError::InvalidState(
                        "cannot delete while recording; stop first",
                    ));
                }
                Phase::Idle => return Err(RecorderError::NotFound),
                Phase::Stopped { artifact, .. } => artifact.clone(),
            };

            inner.storage.delete_file(&artifact).map_err(|source| {
                if source.kind() == std::io::ErrorKind::NotFound {
                    RecorderError::NotFound
                } else {
                    RecorderError::Storage {
                        path: artifact.clone(),
                        source,
                    }
                }
            })?;

            inner.phase = Phase::Idle;
            info!("recording deleted: {artifact:?}");

            (inner.state_snapshot(), inner.delegate.clone())
        };

        if let Some(delegate) = delegate {
            delegate.on_state_changed(&state);
        }
        Ok(())
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.inner.lock().phase, Phase::Recording { .. })
    }

    /// Whether a completed recording's artifact exists on storage.
    pub fn has_recording(&self) -> bool {
        let inner = self.inner.lock();
        match &inner.phase {
            Phase::Stopped { artifact, .. } => inner.storage.exists(artifact),
            _ => false,
        }
    }

    /// Elapsed time of the active recording, the final duration of the
    /// last completed one, or zero when neither exists.
    pub fn current_time(&self) -> Duration {
        let inner = self.inner.lock();
        match &inner.phase {
            Phase::Idle => Duration::ZERO,
            Phase::Recording { started_at, .. } => started_at.elapsed(),
            Phase::Stopped { duration, .. } => *duration,
        }
    }

    /// Path of the active or last completed artifact, if any.
    pub fn output_location(&self) -> Option<PathBuf> {
        let inner = self.inner.lock();
        match &inner.phase {
            Phase::Idle => None,
            Phase::Recording { output, .. } => Some(output.clone()),
            Phase::Stopped { artifact, .. } => Some(artifact.clone()),
        }
    }

    pub fn state(&self) -> RecordingState {
        self.inner.lock().state_snapshot()
    }

    /// Callback handed to the engine at start; forces the stop-cleanup
    /// path when the engine dies mid-recording. Stale signals (the cycle
    /// already ended) are ignored.
    fn failure_callback(weak: Weak<Mutex<Inner<E, S>>>) -> FailureCallback {
        Arc::new(move |err: CaptureError| {
            let Some(inner) = weak.upgrade() else { return };
            let mut guard = inner.lock();

            warn!("capture engine reported failure: {err}");
            let Some((info, _)) = guard.finish(StopReason::CaptureFailure) else {
                return;
            };
            let state = guard.state_snapshot();
            let delegate = guard.delegate.clone();
            drop(guard);

            if let Some(delegate) = delegate {
                delegate.on_error(&RecorderError::Capture(err));
                delegate.on_recording_finished(&info);
                delegate.on_state_changed(&state);
            }
        })
    }

    /// Spawn the per-cycle timer thread serving both the progress ticks
    /// and the maximum-duration timeout. The thread exits as soon as the
    /// session leaves `Recording`, its generation is superseded, or the
    /// session itself is dropped.
    fn spawn_timer(
        weak: Weak<Mutex<Inner<E, S>>>,
        generation: u64,
        tick: Duration,
    ) -> Result<(), RecorderError> {
        thread::Builder::new()
            .name("recording-timer".into())
            .spawn(move || loop {
                thread::sleep(tick);

                let Some(inner) = weak.upgrade() else { break };
                let mut guard = inner.lock();

                let (elapsed, max) = match &guard.phase {
                    Phase::Recording {
                        started_at,
                        timer_generation,
                        ..
                    } if *timer_generation == generation => {
                        (started_at.elapsed(), guard.config.max_duration)
                    }
                    // Cancelled: the cycle ended or a new one replaced it.
                    _ => break,
                };

                if elapsed >= max {
                    let outcome = guard.finish(StopReason::Timeout);
                    let state = guard.state_snapshot();
                    let delegate = guard.delegate.clone();
                    drop(guard);

                    if let (Some(delegate), Some((info, stop_err))) = (delegate, outcome) {
                        delegate.on_recording_finished(&info);
                        if let Some(e) = stop_err {
                            delegate.on_error(&RecorderError::Capture(e));
                        }
                        delegate.on_state_changed(&state);
                    }
                    break;
                }

                let delegate = guard.delegate.clone();
                drop(guard);
                if let Some(delegate) = delegate {
                    delegate.on_progress(elapsed, max);
                }
            })
            .map_err(|e| RecorderError::Internal(format!("failed to spawn timer thread: {e}")))?;
        Ok(())
    }
}
