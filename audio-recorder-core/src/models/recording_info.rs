use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::state::StopReason;

/// Metadata describing a completed recording cycle.
///
/// Serializable for JSON export (sidecar files, upload queues).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingInfo {
    pub id: String,
    pub file_path: PathBuf,
    pub duration_secs: f64,
    pub created_at: String,
    pub stop_reason: StopReason,
}

impl RecordingInfo {
    pub fn new(file_path: PathBuf, duration: Duration, stop_reason: StopReason) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            file_path,
            duration_secs: duration.as_secs_f64(),
            created_at: chrono::Utc::now().to_rfc3339(),
            stop_reason,
        }
    }
}
