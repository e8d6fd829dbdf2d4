//! Per-line timestamp filters applied before tag dispatch.

use fc_core::Real;

/// Default end of the focus window for transient analysis.
pub const DEFAULT_T_MAX: Real = 8.0;

/// Decides which log lines take part in the analysis, by timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimeFilter {
    /// Keep every line.
    #[default]
    All,
    /// Drop the warm-up transient: lines with `t < t_min` are discarded.
    From { t_min: Real },
    /// Focus window: lines with `t > t_max` are discarded.
    Until { t_max: Real },
}

impl TimeFilter {
    pub fn accepts(&self, t: Real) -> bool {
        match *self {
            TimeFilter::All => true,
            TimeFilter::From { t_min } => t >= t_min,
            TimeFilter::Until { t_max } => t <= t_max,
        }
    }
}
