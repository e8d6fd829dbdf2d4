//! Periodic window detection on the lift signal.
//!
//! Troughs of the lift-line curve mark cycle boundaries. Each boundary is
//! scored by how evenly its falling and rising slopes balance, and the cycle
//! starting at the most symmetric trough is kept.

use fc_core::{Observable, Real};
use fc_log::RunRecord;
use tracing::info;

use crate::{AnalysisError, AnalysisResult};

/// Running best starts here; a candidate must beat it strictly.
const INITIAL_BEST_ERROR: Real = 1e99;

/// One pair of consecutive cycle boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleCandidate {
    pub start: usize,
    pub end: usize,
    /// Symmetry error of the trough at `start`.
    pub symmetry_error: Real,
}

/// The selected periodic window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleWindow {
    pub start: usize,
    pub end: usize,
    pub symmetry_error: Real,
    /// Number of cycle boundaries detected in the search range.
    pub boundaries: usize,
    /// Start time and period length; `None` if the time series is too short.
    pub timing: Option<(Real, Real)>,
}

impl CycleWindow {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Strict local minima of `lift` (first and last samples excluded), with
/// the symmetry error of each trough.
pub fn trough_boundaries(lift: &[Real]) -> Vec<(usize, Real)> {
    lift.windows(3)
        .enumerate()
        .filter(|(_, w)| w[1] < w[0] && w[1] < w[2])
        .map(|(i, w)| (i + 1, ((w[0] - w[1]) - (w[2] - w[1])).abs()))
        .collect()
}

/// Consecutive boundary pairs, scored by their first trough.
pub fn find_candidates(lift: &[Real]) -> Vec<CycleCandidate> {
    trough_boundaries(lift)
        .windows(2)
        .map(|pair| CycleCandidate {
            start: pair[0].0,
            end: pair[1].0,
            symmetry_error: pair[0].1,
        })
        .collect()
}

/// Candidate with the smallest symmetry error; the earliest one wins ties.
pub fn pick_best(candidates: &[CycleCandidate]) -> Option<CycleCandidate> {
    let mut best: Option<CycleCandidate> = None;
    let mut best_error = INITIAL_BEST_ERROR;
    for cand in candidates {
        if cand.symmetry_error < best_error {
            best_error = cand.symmetry_error;
            best = Some(*cand);
        }
    }
    best
}

/// Finds the representative cycle of a run.
#[derive(Debug, Clone, Copy)]
pub struct CycleSelector {
    signal: Observable,
}

impl Default for CycleSelector {
    fn default() -> Self {
        Self {
            signal: Observable::LiftLine,
        }
    }
}

impl CycleSelector {
    /// Pick the cycle of `record`; the lift-line series must cover every step.
    pub fn select(&self, record: &RunRecord) -> AnalysisResult<CycleWindow> {
        let signal = record.require(self.signal)?;
        let boundaries = trough_boundaries(signal).len();
        let candidates = find_candidates(signal);

        if let Some((t_first, t_last)) = record.time_range() {
            info!(
                run = record.name(),
                "Found {} cycles in time range from {:.6} to {:.6}",
                candidates.len(),
                t_first,
                t_last
            );
        }

        let best = pick_best(&candidates).ok_or_else(|| AnalysisError::NoCycleFound {
            run: record.name().to_string(),
            boundaries,
        })?;

        let time = record.time();
        let timing = match (time.get(best.start), time.get(best.end)) {
            (Some(t_start), Some(t_end)) => Some((*t_start, t_end - t_start)),
            _ => None,
        };
        if let Some((t_start, period)) = timing {
            info!(
                run = record.name(),
                "Chose cycle at {:.6} with length {:.6} and lift symmetry error {:e}",
                t_start,
                period,
                best.symmetry_error
            );
        }

        Ok(CycleWindow {
            start: best.start,
            end: best.end,
            symmetry_error: best.symmetry_error,
            boundaries,
            timing,
        })
    }
}
