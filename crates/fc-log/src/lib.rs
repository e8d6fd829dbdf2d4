//! fc-log: solver log parsing into typed, time-aligned observable series.

pub mod filter;
pub mod line;
pub mod parser;
pub mod record;

pub use filter::{DEFAULT_T_MAX, TimeFilter};
pub use line::{LogLine, Payload};
pub use parser::LogParser;
pub use record::{RunRecord, run_name_from_path};

use fc_core::Observable;
use std::path::PathBuf;

pub type LogResult<T> = Result<T, LogError>;

#[derive(thiserror::Error, Debug)]
pub enum LogError {
    #[error("Malformed log line {line_no}: {reason}: '{line}'")]
    MalformedLogLine {
        line_no: usize,
        line: String,
        reason: String,
    },

    #[error("Missing observable {observable}: {samples} samples for {expected} time steps")]
    MissingObservable {
        observable: Observable,
        samples: usize,
        expected: usize,
    },

    #[error("Failed to open log file: {path}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
