//! Error types for the fc-app service layer.

use std::path::PathBuf;

use fc_analysis::AnalysisError;
use fc_log::LogError;

/// Application error type that wraps errors from the backend crates and
/// names the file or run that failed.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Empty run sequence: no log files to analyse")]
    EmptyRunSequence,

    #[error("Failed to parse log file {path}: {source}")]
    LogFile { path: PathBuf, source: LogError },

    #[error("Cycle selection failed for run '{run}': {source}")]
    Cycle { run: String, source: AnalysisError },

    #[error("Study error: {0}")]
    Study(String),

    #[error("Study validation failed: {0}")]
    Validation(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fc-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<fc_study::StudyError> for AppError {
    fn from(err: fc_study::StudyError) -> Self {
        match err {
            fc_study::StudyError::Validation(v) => v.into(),
            other => AppError::Study(other.to_string()),
        }
    }
}

impl From<fc_study::ValidationError> for AppError {
    fn from(err: fc_study::ValidationError) -> Self {
        match err {
            fc_study::ValidationError::EmptyRunSequence => AppError::EmptyRunSequence,
            other => AppError::Validation(other.to_string()),
        }
    }
}

impl From<fc_report::ReportError> for AppError {
    fn from(err: fc_report::ReportError) -> Self {
        match err {
            fc_report::ReportError::Write { path, source } => {
                AppError::Report(format!("{}: {}", path.display(), source))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_logs_validation_maps_to_empty_run_sequence() {
        let err: AppError = fc_study::ValidationError::EmptyRunSequence.into();
        assert!(matches!(err, AppError::EmptyRunSequence));
    }

    #[test]
    fn log_file_error_names_path() {
        let err = AppError::LogFile {
            path: PathBuf::from("lvl=3_k=400.log"),
            source: LogError::MalformedLogLine {
                line_no: 7,
                line: "7: 1.2.3 > Runtime".to_string(),
                reason: "bad timestamp".to_string(),
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("lvl=3_k=400.log"));
        assert!(msg.contains("line 7"));
    }
}
