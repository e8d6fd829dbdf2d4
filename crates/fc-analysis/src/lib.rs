//! fc-analysis: cycle selection, window extraction and convergence analysis.

pub mod analyzer;
pub mod cycle;
pub mod extract;
pub mod stats;

pub use analyzer::{
    AnalysisMode, ConvergenceAnalyzer, EocRow, ObservableAnalysis, RowStats, StatsRow, TableKind,
};
pub use cycle::{CycleCandidate, CycleSelector, CycleWindow, find_candidates, pick_best};
pub use extract::{extract_cycle, extract_transient};
pub use stats::{
    Extrema, SingleEoc, SingleStats, SplitEoc, SplitStats, TransientEoc, TransientStats, eoc,
};

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(thiserror::Error, Debug)]
pub enum AnalysisError {
    #[error("No periodic cycle found in run '{run}': {boundaries} cycle boundaries detected")]
    NoCycleFound { run: String, boundaries: usize },

    #[error("Cycle signal unavailable: {0}")]
    Signal(#[from] fc_log::LogError),
}
