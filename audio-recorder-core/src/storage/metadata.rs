use std::fs;
use std::path::Path;

use crate::models::error::RecorderError;
use crate::models::recording_info::RecordingInfo;

/// Write recording info as a JSON sidecar file.
///
/// Creates `{artifact}.metadata.json` alongside the artifact.
pub fn write_info(info: &RecordingInfo, artifact_path: &Path) -> Result<(), RecorderError> {
    let metadata_path = artifact_path.with_extension("metadata.json");
    let json = serde_json::to_string_pretty(info).map_err(|e| RecorderError::Storage {
        path: metadata_path.clone(),
        source: e.into(),
    })?;
    fs::write(&metadata_path, json).map_err(|source| RecorderError::Storage {
        path: metadata_path.clone(),
        source,
    })?;
    Ok(())
}

/// Read recording info back from a JSON sidecar file.
pub fn read_info(artifact_path: &Path) -> Result<RecordingInfo, RecorderError> {
    let metadata_path = artifact_path.with_extension("metadata.json");
    let json = fs::read_to_string(&metadata_path).map_err(|source| RecorderError::Storage {
        path: metadata_path.clone(),
        source,
    })?;
    let info: RecordingInfo = serde_json::from_str(&json).map_err(|e| RecorderError::Storage {
        path: metadata_path.clone(),
        source: e.into(),
    })?;
    Ok(info)
}
