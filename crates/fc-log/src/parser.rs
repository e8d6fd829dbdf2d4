//! Line-oriented solver log parser.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use fc_core::{Observable, Real};
use tracing::{debug, warn};

use crate::filter::TimeFilter;
use crate::line::{Payload, split_line};
use crate::record::{RunRecord, run_name_from_path};
use crate::{LogError, LogResult};

const FORCE_FIELDS: [Observable; 5] = [
    Observable::DragLine,
    Observable::DragVolume,
    Observable::LiftLine,
    Observable::LiftVolume,
    Observable::PressureDiff,
];

const FLUX_FIELDS: [Observable; 4] = [
    Observable::UpperFlux,
    Observable::LowerFlux,
    Observable::H0Norm,
    Observable::H1Norm,
];

const VORTICITY_FIELDS: [Observable; 2] = [Observable::Vorticity, Observable::Divergence];

/// Turns one solver log into a [`RunRecord`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LogParser {
    filter: TimeFilter,
}

impl LogParser {
    pub fn new(filter: TimeFilter) -> Self {
        Self { filter }
    }

    /// Parser for periodic analysis: drops everything before `t_min`.
    pub fn periodic(t_min: Real) -> Self {
        Self::new(TimeFilter::From { t_min })
    }

    /// Parser for transient analysis: drops everything after `t_max`.
    pub fn transient(t_max: Real) -> Self {
        Self::new(TimeFilter::Until { t_max })
    }

    pub fn filter(&self) -> TimeFilter {
        self.filter
    }

    /// Parse a log file from disk; the run is named after the path.
    pub fn parse_file(&self, path: &Path) -> LogResult<RunRecord> {
        debug!(path = %path.display(), "parsing log file");
        let file = File::open(path).map_err(|source| LogError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(run_name_from_path(path), BufReader::new(file))
    }

    pub fn parse_str(&self, name: impl Into<String>, text: &str) -> LogResult<RunRecord> {
        self.parse(name, text.as_bytes())
    }

    pub fn parse<R: BufRead>(&self, name: impl Into<String>, reader: R) -> LogResult<RunRecord> {
        let mut record = RunRecord::new(name);

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            let malformed = |reason: String| LogError::MalformedLogLine {
                line_no,
                line: line.trim().to_string(),
                reason,
            };

            let Some(parsed) = split_line(&line).map_err(malformed)? else {
                continue;
            };
            if !self.filter.accepts(parsed.time) {
                continue;
            }

            match Payload::parse(parsed.payload).map_err(malformed)? {
                Payload::Runtime => record.push_time(parsed.time),
                Payload::Forces(values) => push_all(&mut record, &FORCE_FIELDS, &values),
                Payload::Flux(values) => push_all(&mut record, &FLUX_FIELDS, &values),
                Payload::Vorticity(values) => push_all(&mut record, &VORTICITY_FIELDS, &values),
                Payload::Other => {}
            }
        }

        debug!(
            run = record.name(),
            steps = record.len(),
            time_range = ?record.time_range(),
            "parsed log"
        );
        if let Some(&obs) = record.misaligned_observables().first() {
            let samples = record.series(obs).len();
            warn!(
                run = record.name(),
                steps = record.len(),
                observable = obs.key(),
                samples,
                "observable series not aligned with time steps"
            );
            return Err(LogError::MissingObservable {
                observable: obs,
                samples,
                expected: record.len(),
            });
        }

        Ok(record)
    }
}

fn push_all(record: &mut RunRecord, fields: &[Observable], values: &[Real]) {
    for (obs, value) in fields.iter().zip(values) {
        record.push(*obs, *value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
FEAT3 dfg95-ccnd-unsteady
Level 3: 1234 elements
   1:   0.010000 > DC/LC/PD:  1.10  1.11  0.01  0.02  0.50
   1:   0.010000 > FX/H0/H1:  0.30  0.31  2.00  9.00
   1:   0.010000 > VC/DV...:  7.00  1e-13
   1:   0.010000 > Runtime: 0.12s
   2:   0.020000 > DC/LC/PD:  1.20  1.21  0.03  0.04  0.60
   2:   0.020000 > Newton: 3 iterations
   2:   0.020000 > FX/H0/H1:  0.32  0.33  2.10  9.10
   2:   0.020000 > VC/DV...:  7.10  2e-13
   2:   0.020000 > Runtime: 0.13s
";

    #[test]
    fn parses_all_groups() {
        let record = LogParser::default().parse_str("run", LOG).unwrap();
        assert_eq!(record.time(), &[0.01, 0.02]);
        assert_eq!(record.series(Observable::DragLine), &[1.10, 1.20]);
        assert_eq!(record.series(Observable::PressureDiff), &[0.50, 0.60]);
        assert_eq!(record.series(Observable::H1Norm), &[9.00, 9.10]);
        assert_eq!(record.series(Observable::Divergence), &[1e-13, 2e-13]);
        assert!(record.misaligned_observables().is_empty());
    }

    #[test]
    fn periodic_threshold_drops_warmup() {
        let record = LogParser::periodic(0.015).parse_str("run", LOG).unwrap();
        assert_eq!(record.time(), &[0.02]);
        assert_eq!(record.series(Observable::LiftLine), &[0.03]);
    }

    #[test]
    fn transient_cutoff_drops_tail() {
        let record = LogParser::transient(0.015).parse_str("run", LOG).unwrap();
        assert_eq!(record.time(), &[0.01]);
        assert_eq!(record.series(Observable::Vorticity), &[7.00]);
    }

    #[test]
    fn malformed_field_names_the_line() {
        let text = "5: 1.0 > DC/LC/PD: 1 2 x 4 5\n";
        match LogParser::default().parse_str("run", text) {
            Err(LogError::MalformedLogLine { line_no, line, .. }) => {
                assert_eq!(line_no, 1);
                assert!(line.contains("DC/LC/PD"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn filtered_lines_are_not_validated() {
        let text = "5: 1.0 > DC/LC/PD: garbage\n6: 30.0 > Runtime\n";
        let record = LogParser::periodic(20.0).parse_str("run", text).unwrap();
        assert_eq!(record.time(), &[30.0]);
    }

    #[test]
    fn step_without_forces_line_is_rejected() {
        let text = "\
1: 20.0 > Runtime
2: 20.1 > DC/LC/PD: 3.1 3.2 0.5 0.6 2.4
2: 20.1 > Runtime
3: 20.2 > DC/LC/PD: 3.1 3.2 0.1 0.2 2.4
3: 20.2 > Runtime
";
        match LogParser::periodic(0.0).parse_str("run", text) {
            Err(LogError::MissingObservable {
                observable,
                samples,
                expected,
            }) => {
                assert_eq!(observable, Observable::DragLine);
                assert_eq!(samples, 2);
                assert_eq!(expected, 3);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn trailing_partial_step_is_rejected() {
        let text = "\
1: 0.1 > VC/DV...: 7.0 1e-13
1: 0.1 > Runtime
2: 0.2 > VC/DV...: 7.1 1e-13
";
        assert!(matches!(
            LogParser::default().parse_str("run", text),
            Err(LogError::MissingObservable { samples: 2, expected: 1, .. })
        ));
    }

    #[test]
    fn absent_groups_stay_empty() {
        let text = "1: 0.1 > VC/DV...: 7.0 1e-13\n1: 0.1 > Runtime\n";
        let record = LogParser::default().parse_str("run", text).unwrap();
        assert_eq!(record.series(Observable::Vorticity), &[7.0]);
        assert!(record.series(Observable::LiftLine).is_empty());
        assert_eq!(record.missing_observables().len(), Observable::COUNT - 2);
    }

    #[test]
    fn empty_input_gives_empty_series() {
        let record = LogParser::default().parse_str("run", "").unwrap();
        assert!(record.is_empty());
        for obs in Observable::ALL {
            assert!(record.series(obs).is_empty());
        }
    }
}
