//! Parsed run data.

use std::ops::Range;
use std::path::Path;

use fc_core::{Observable, Real};

use crate::{LogError, LogResult};

/// Time series of every observable of one solver run.
///
/// All series share the step index of `time`. Observables that never appeared
/// in the log are empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    name: String,
    time: Vec<Real>,
    series: [Vec<Real>; Observable::COUNT],
}

impl RunRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time: Vec::new(),
            series: Default::default(),
        }
    }

    /// Assemble a record from already collected series.
    pub fn from_parts(
        name: impl Into<String>,
        time: Vec<Real>,
        series: [Vec<Real>; Observable::COUNT],
    ) -> Self {
        Self {
            name: name.into(),
            time,
            series,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn time(&self) -> &[Real] {
        &self.time
    }

    pub fn series(&self, obs: Observable) -> &[Real] {
        &self.series[obs.index()]
    }

    /// Number of recorded time steps.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn time_range(&self) -> Option<(Real, Real)> {
        Some((*self.time.first()?, *self.time.last()?))
    }

    pub(crate) fn push_time(&mut self, t: Real) {
        self.time.push(t);
    }

    pub(crate) fn push(&mut self, obs: Observable, value: Real) {
        self.series[obs.index()].push(value);
    }

    /// Observables with fewer samples than time steps.
    pub fn missing_observables(&self) -> Vec<Observable> {
        Observable::ALL
            .into_iter()
            .filter(|obs| self.series(*obs).len() < self.time.len())
            .collect()
    }

    /// Observables present in the log whose length differs from the time series.
    pub fn misaligned_observables(&self) -> Vec<Observable> {
        Observable::ALL
            .into_iter()
            .filter(|obs| {
                let n = self.series(*obs).len();
                n > 0 && n != self.time.len()
            })
            .collect()
    }

    /// Series of `obs`, or `MissingObservable` if it does not cover every time step.
    pub fn require(&self, obs: Observable) -> LogResult<&[Real]> {
        let values = self.series(obs);
        if values.len() < self.time.len() {
            return Err(LogError::MissingObservable {
                observable: obs,
                samples: values.len(),
                expected: self.time.len(),
            });
        }
        Ok(values)
    }

    /// New record holding the index range `range` of every series.
    ///
    /// The range is clamped to each series' own length, so a short series
    /// yields a shorter (possibly empty) slice instead of panicking.
    pub fn slice(&self, range: Range<usize>) -> RunRecord {
        fn clamp(values: &[Real], range: &Range<usize>) -> Vec<Real> {
            let end = range.end.min(values.len());
            let start = range.start.min(end);
            values[start..end].to_vec()
        }

        RunRecord {
            name: self.name.clone(),
            time: clamp(&self.time, &range),
            series: std::array::from_fn(|i| clamp(&self.series[i], &range)),
        }
    }

    /// Shift the time axis so that `origin` maps to zero.
    pub fn with_time_origin(mut self, origin: Real) -> RunRecord {
        for t in &mut self.time {
            *t -= origin;
        }
        self
    }
}

/// Run name used in reports: the path as given, minus a trailing `.log`.
pub fn run_name_from_path(path: &Path) -> String {
    let display = path.to_string_lossy();
    match display.strip_suffix(".log") {
        Some(stem) => stem.to_string(),
        None => display.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunRecord {
        let mut record = RunRecord::new("lvl=3");
        for i in 0..6 {
            record.push_time(i as Real);
            record.push(Observable::LiftLine, 10.0 + i as Real);
        }
        record.push(Observable::Vorticity, 1.0);
        record
    }

    #[test]
    fn slice_is_clamped_per_series() {
        let window = sample().slice(2..5);
        assert_eq!(window.time(), &[2.0, 3.0, 4.0]);
        assert_eq!(window.series(Observable::LiftLine), &[12.0, 13.0, 14.0]);
        assert!(window.series(Observable::Vorticity).is_empty());
        assert!(window.series(Observable::DragLine).is_empty());
    }

    #[test]
    fn slice_does_not_touch_original() {
        let record = sample();
        let _ = record.slice(1..3);
        assert_eq!(record.len(), 6);
    }

    #[test]
    fn time_origin_shift() {
        let window = sample().slice(3..6).with_time_origin(3.0);
        assert_eq!(window.time(), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn require_reports_short_series() {
        let record = sample();
        assert_eq!(record.require(Observable::LiftLine).unwrap().len(), 6);
        match record.require(Observable::Vorticity) {
            Err(LogError::MissingObservable {
                samples, expected, ..
            }) => {
                assert_eq!(samples, 1);
                assert_eq!(expected, 6);
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(record.misaligned_observables(), vec![Observable::Vorticity]);
        assert!(record.missing_observables().contains(&Observable::DragLine));
    }

    #[test]
    fn run_name_strips_log_suffix_only() {
        assert_eq!(run_name_from_path(Path::new("lvl=3_k=400.log")), "lvl=3_k=400");
        assert_eq!(run_name_from_path(Path::new("runs/k=1.5")), "runs/k=1.5");
    }
}
