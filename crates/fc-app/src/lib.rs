//! Shared application service layer for flowconv.
//!
//! Turns a study (a list of solver logs plus analysis settings) into a
//! convergence report and plot scripts. The CLI is a thin wrapper over the
//! functions re-exported here.

pub mod error;
pub mod inspect;
pub mod runtime;
pub mod study_service;

pub use error::{AppError, AppResult};
pub use inspect::{LogSummary, inspect_log};
pub use runtime::{StudyRuntime, compile_study};
pub use study_service::{
    RunOptions, SkippedFile, StudyOutcome, analyze_runs, load_runs, load_study, prepare_runs,
    run_study,
};
