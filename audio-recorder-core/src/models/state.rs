use serde::{Deserialize, Serialize};

/// Recording session state machine (observable snapshot).
///
/// State transitions:
/// ```text
/// idle → recording → stopped
///           ↑            │ start_recording (new cycle, new artifact)
///           └────────────┤
///                        │ delete_recording (artifact destroyed)
/// idle ←─────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RecordingState {
    Idle,
    Recording { duration_secs: f64 },
    Stopped { duration_secs: f64 },
}

impl RecordingState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording { .. })
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped { .. })
    }

    /// Returns the elapsed or final duration if the state tracks one.
    pub fn duration(&self) -> Option<f64> {
        match self {
            Self::Recording { duration_secs } | Self::Stopped { duration_secs } => {
                Some(*duration_secs)
            }
            Self::Idle => None,
        }
    }
}

/// Why a recording cycle ended.
///
/// All three reasons converge on the same cleanup path; the distinction
/// exists for telemetry only. The artifact is valid either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Caller-initiated stop.
    Manual,
    /// Maximum recording duration elapsed.
    Timeout,
    /// The capture engine died while recording.
    CaptureFailure,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Manual => write!(f, "manual"),
            Self::Timeout => write!(f, "timeout"),
            Self::CaptureFailure => write!(f, "capture failure"),
        }
    }
}
