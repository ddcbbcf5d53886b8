use std::path::PathBuf;
use std::time::Duration;

/// Configuration for a recording session.
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Directory where recording files are written.
    pub output_directory: PathBuf,

    /// Maximum recording duration; the session auto-stops when reached.
    pub max_duration: Duration,

    /// File name stem for artifacts (default: "recording").
    pub file_stem: String,

    /// File extension for artifacts, without the dot (default: "wav").
    pub file_extension: String,

    /// Interval between delegate progress callbacks. Also bounds how late
    /// the timeout can be detected (default: 250ms).
    pub progress_interval: Duration,
}

impl RecorderConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_duration.is_zero() {
            return Err("max duration must be positive".into());
        }
        if self.file_stem.is_empty() {
            return Err("file stem must not be empty".into());
        }
        if self.file_extension.is_empty() || self.file_extension.starts_with('.') {
            return Err(format!("invalid file extension: {:?}", self.file_extension));
        }
        if self.progress_interval.is_zero() {
            return Err("progress interval must be positive".into());
        }
        Ok(())
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("."),
            max_duration: Duration::from_secs(300),
            file_stem: "recording".into(),
            file_extension: "wav".into(),
            progress_interval: Duration::from_millis(250),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(RecorderConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_max_duration() {
        let config = RecorderConfig {
            max_duration: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_extension() {
        let mut config = RecorderConfig {
            file_extension: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.file_extension = ".wav".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_progress_interval() {
        let config = RecorderConfig {
            progress_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
