//! Single-log summaries for the `inspect` command.

use std::path::Path;

use fc_analysis::{CycleCandidate, find_candidates, pick_best};
use fc_core::{Observable, Real};
use fc_log::{LogParser, TimeFilter};

use crate::error::{AppError, AppResult};

/// What a log contains and where its cycles are.
#[derive(Debug, Clone)]
pub struct LogSummary {
    pub name: String,
    pub steps: usize,
    pub time_range: Option<(Real, Real)>,
    /// Sample count per observable, in log order.
    pub samples: Vec<(Observable, usize)>,
    /// Observables that never appear in the log.
    pub missing: Vec<Observable>,
    /// Cycle candidates on the lift-line signal.
    pub cycles: Vec<CycleCandidate>,
    pub best_cycle: Option<CycleCandidate>,
}

/// Parse `path` (dropping lines before `t_min` when given) and summarise it.
pub fn inspect_log(path: &Path, t_min: Option<Real>) -> AppResult<LogSummary> {
    let filter = match t_min {
        Some(t_min) => TimeFilter::From { t_min },
        None => TimeFilter::All,
    };
    let record = LogParser::new(filter)
        .parse_file(path)
        .map_err(|source| AppError::LogFile {
            path: path.to_path_buf(),
            source,
        })?;

    let cycles = find_candidates(record.series(Observable::LiftLine));
    let best_cycle = pick_best(&cycles);

    Ok(LogSummary {
        name: record.name().to_string(),
        steps: record.len(),
        time_range: record.time_range(),
        samples: Observable::ALL
            .iter()
            .map(|obs| (*obs, record.series(*obs).len()))
            .collect(),
        missing: record.missing_observables(),
        cycles,
        best_cycle,
    })
}
