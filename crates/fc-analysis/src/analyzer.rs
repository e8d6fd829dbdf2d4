//! Convergence analysis across a sequence of refinement levels.
//!
//! Runs are expected coarsest first. Every run contributes one statistics row
//! per observable; every run from the third on additionally contributes an EOC
//! row computed from itself and its two predecessors.

use fc_core::{Observable, StatShape};
use fc_log::RunRecord;
use tracing::debug;

use crate::stats::{SingleEoc, SingleStats, SplitEoc, SplitStats, TransientEoc, TransientStats};

/// Which family of statistics the analysis reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    /// Extremum statistics over one selected oscillation cycle.
    Periodic,
    /// Peak timing and end value over the whole horizon.
    Transient,
}

/// Layout of one observable's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Single,
    Split,
    Transient,
}

/// Statistics of one run; `None` when the series had no samples.
#[derive(Debug, Clone, PartialEq)]
pub enum RowStats {
    Single(Option<SingleStats>),
    Split(Option<SplitStats>),
    /// Runs without two predecessors carry a zero EOC, as in the tabulated
    /// benchmark reports. `eoc` is `None` when one of the three runs lacks data.
    Transient {
        stats: Option<TransientStats>,
        eoc: Option<TransientEoc>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsRow {
    pub run: String,
    pub stats: RowStats,
}

/// EOC row of a periodic table; `None` when one of the three runs lacks data.
#[derive(Debug, Clone, PartialEq)]
pub enum EocRow {
    Single(Option<SingleEoc>),
    Split(Option<SplitEoc>),
}

/// Everything reported for one observable.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservableAnalysis {
    pub observable: Observable,
    pub kind: TableKind,
    pub rows: Vec<StatsRow>,
    pub eoc_rows: Vec<EocRow>,
}

#[derive(Debug, Clone)]
pub struct ConvergenceAnalyzer {
    mode: AnalysisMode,
    shapes: [StatShape; Observable::COUNT],
}

impl ConvergenceAnalyzer {
    pub fn new(mode: AnalysisMode) -> Self {
        Self {
            mode,
            shapes: Observable::ALL.map(Observable::default_shape),
        }
    }

    pub fn periodic() -> Self {
        Self::new(AnalysisMode::Periodic)
    }

    pub fn transient() -> Self {
        Self::new(AnalysisMode::Transient)
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode
    }

    /// Override the periodic statistics shape of one observable.
    pub fn with_shape(mut self, obs: Observable, shape: StatShape) -> Self {
        self.shapes[obs.index()] = shape;
        self
    }

    pub fn table_kind(&self, obs: Observable) -> TableKind {
        match (self.mode, self.shapes[obs.index()]) {
            (AnalysisMode::Transient, _) => TableKind::Transient,
            (AnalysisMode::Periodic, StatShape::Single) => TableKind::Single,
            (AnalysisMode::Periodic, StatShape::Split) => TableKind::Split,
        }
    }

    /// Analyse `observables` in the given order.
    pub fn analyze_all(
        &self,
        runs: &[RunRecord],
        observables: &[Observable],
    ) -> Vec<ObservableAnalysis> {
        observables
            .iter()
            .map(|obs| self.analyze(runs, *obs))
            .collect()
    }

    pub fn analyze(&self, runs: &[RunRecord], obs: Observable) -> ObservableAnalysis {
        let kind = self.table_kind(obs);
        debug!(observable = obs.key(), runs = runs.len(), ?kind, "analysing");

        let (stats, eoc_rows): (Vec<RowStats>, Vec<EocRow>) = match kind {
            TableKind::Single => {
                let stats: Vec<_> = runs.iter().map(|r| SingleStats::of(r.series(obs))).collect();
                let eocs = over_triples(&stats, SingleEoc::of);
                (
                    stats.into_iter().map(RowStats::Single).collect(),
                    eocs.into_iter().map(EocRow::Single).collect(),
                )
            }
            TableKind::Split => {
                let stats: Vec<_> = runs.iter().map(|r| SplitStats::of(r.series(obs))).collect();
                let eocs = over_triples(&stats, SplitEoc::of);
                (
                    stats.into_iter().map(RowStats::Split).collect(),
                    eocs.into_iter().map(EocRow::Split).collect(),
                )
            }
            TableKind::Transient => {
                let stats: Vec<_> = runs
                    .iter()
                    .map(|r| TransientStats::of(r.time(), r.series(obs)))
                    .collect();
                let eocs = over_triples(&stats, TransientEoc::of);
                let leading = stats.len().min(2);
                let eocs = std::iter::repeat_n(Some(TransientEoc { max: 0.0, end: 0.0 }), leading)
                    .chain(eocs);
                (
                    stats
                        .into_iter()
                        .zip(eocs)
                        .map(|(stats, eoc)| RowStats::Transient { stats, eoc })
                        .collect(),
                    Vec::new(),
                )
            }
        };

        let rows = runs
            .iter()
            .zip(stats)
            .map(|(run, stats)| StatsRow {
                run: run.name().to_string(),
                stats,
            })
            .collect();

        ObservableAnalysis {
            observable: obs,
            kind,
            rows,
            eoc_rows,
        }
    }
}

/// For each index `i >= 2`, apply `f(stats[i], stats[i-1], stats[i-2])`.
fn over_triples<T, E>(stats: &[Option<T>], f: impl Fn(&T, &T, &T) -> E) -> Vec<Option<E>> {
    stats
        .windows(3)
        .map(|w| match (&w[2], &w[1], &w[0]) {
            (Some(s0), Some(s1), Some(s2)) => Some(f(s0, s1, s2)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fc_core::Real;

    fn run(name: &str, obs: Observable, values: Vec<Real>) -> RunRecord {
        let time = (0..values.len()).map(|i| i as Real * 0.5).collect();
        let mut series: [Vec<Real>; Observable::COUNT] = Default::default();
        series[obs.index()] = values;
        RunRecord::from_parts(name, time, series)
    }

    #[test]
    fn two_runs_have_no_eoc_rows() {
        let runs = vec![
            run("a", Observable::LiftLine, vec![-1.0, 1.0]),
            run("b", Observable::LiftLine, vec![-1.5, 1.5]),
        ];
        let out = ConvergenceAnalyzer::periodic().analyze(&runs, Observable::LiftLine);
        assert_eq!(out.kind, TableKind::Single);
        assert_eq!(out.rows.len(), 2);
        assert!(out.eoc_rows.is_empty());
    }

    #[test]
    fn eoc_rows_from_third_run_on() {
        let amps = [2.0, 1.5, 1.25, 1.125];
        let runs: Vec<_> = amps
            .iter()
            .enumerate()
            .map(|(i, a)| run(&format!("lvl{i}"), Observable::LiftLine, vec![-a, *a]))
            .collect();
        let out = ConvergenceAnalyzer::periodic().analyze(&runs, Observable::LiftLine);
        assert_eq!(out.rows.len(), 4);
        assert_eq!(out.eoc_rows.len(), 2);
        for row in &out.eoc_rows {
            let EocRow::Single(Some(e)) = row else {
                panic!("expected single eoc, got {row:?}");
            };
            assert!((e.amp - 1.0).abs() < 1e-12);
            assert!((e.max - 1.0).abs() < 1e-12);
            assert_eq!(e.mean, 0.0);
        }
    }

    #[test]
    fn drag_uses_split_table() {
        let runs = vec![run("a", Observable::DragLine, vec![3.17, 3.2, 3.23, 3.2])];
        let out = ConvergenceAnalyzer::periodic().analyze(&runs, Observable::DragLine);
        assert_eq!(out.kind, TableKind::Split);
        assert!(matches!(out.rows[0].stats, RowStats::Split(Some(_))));
    }

    #[test]
    fn shape_override() {
        let analyzer = ConvergenceAnalyzer::periodic().with_shape(Observable::DragLine, StatShape::Single);
        assert_eq!(analyzer.table_kind(Observable::DragLine), TableKind::Single);
        assert_eq!(
            ConvergenceAnalyzer::transient().table_kind(Observable::DragLine),
            TableKind::Transient
        );
    }

    #[test]
    fn missing_series_yield_sentinels() {
        let runs = vec![
            run("a", Observable::LiftLine, vec![0.0, 1.0]),
            run("b", Observable::LiftLine, vec![0.0, 1.0]),
            run("c", Observable::LiftLine, vec![0.0, 1.0]),
        ];
        let out = ConvergenceAnalyzer::periodic().analyze(&runs, Observable::Vorticity);
        assert!(matches!(out.rows[0].stats, RowStats::Single(None)));
        assert_eq!(out.eoc_rows, vec![EocRow::Single(None)]);
    }

    #[test]
    fn transient_rows_carry_eoc_from_third_run() {
        let runs = vec![
            run("a", Observable::DragLine, vec![0.0, 2.0, 1.0]),
            run("b", Observable::DragLine, vec![0.0, 2.5, 1.5]),
            run("c", Observable::DragLine, vec![0.0, 2.75, 1.75]),
        ];
        let out = ConvergenceAnalyzer::transient().analyze(&runs, Observable::DragLine);
        assert!(out.eoc_rows.is_empty());
        let RowStats::Transient { stats, eoc } = &out.rows[0].stats else {
            panic!("expected transient row");
        };
        assert_eq!(stats.unwrap().t_max, Some(0.5));
        assert_eq!(*eoc, Some(TransientEoc { max: 0.0, end: 0.0 }));

        let RowStats::Transient { eoc, .. } = &out.rows[2].stats else {
            panic!("expected transient row");
        };
        let eoc = eoc.unwrap();
        assert!((eoc.max - 1.0).abs() < 1e-12);
        assert!((eoc.end - 1.0).abs() < 1e-12);
    }
}
