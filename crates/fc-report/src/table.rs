//! Fixed-width analysis report.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use fc_analysis::{EocRow, ObservableAnalysis, RowStats, SplitStats, TableKind};
use fc_core::Real;
use tracing::info;

use crate::format::{COLUMN_GAP, cell};
use crate::{ReportError, ReportResult};

const SINGLE_HEADER: &str =
    " Min               Max               Mean              Amp              Name";
const SINGLE_EOC_HEADER: &str = " Min-EOC           Max-EOC           Mean-EOC          Amp-EOC";
const SPLIT_HEADER: &str = " Min #1            Max #1            Min #2            Max #2            Mean              Amp              Name";
const SPLIT_EOC_HEADER: &str = " Min-EOC #1        Max-EOC #1        Min-EOC #2        Max-EOC #2        Mean-EOC          Amp-EOC";
const TRANSIENT_HEADER: &str =
    " T-Max             Max               Max-EOC          End               End-EOC          Name";

/// Render one section per analysed observable, in the given order.
pub fn render_report(analyses: &[ObservableAnalysis]) -> String {
    let mut out = String::new();
    for analysis in analyses {
        render_section(&mut out, analysis);
    }
    out
}

/// Render the report and write it to `path`.
pub fn write_report(path: &Path, analyses: &[ObservableAnalysis]) -> ReportResult<()> {
    info!("Writing '{}'...", path.display());
    fs::write(path, render_report(analyses)).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn render_section(out: &mut String, analysis: &ObservableAnalysis) {
    let _ = writeln!(out, "\nAnalysis of {} values", analysis.observable.label());

    let header = match analysis.kind {
        TableKind::Single => SINGLE_HEADER,
        TableKind::Split => SPLIT_HEADER,
        TableKind::Transient => TRANSIENT_HEADER,
    };
    let _ = writeln!(out, "{header}");
    for row in &analysis.rows {
        let mut cells = stats_cells(&row.stats);
        cells.push(row.run.clone());
        let _ = writeln!(out, "{}", cells.join(COLUMN_GAP));
    }

    let eoc_header = match analysis.kind {
        TableKind::Single => SINGLE_EOC_HEADER,
        TableKind::Split => SPLIT_EOC_HEADER,
        TableKind::Transient => return,
    };
    let _ = writeln!(out, "{eoc_header}");
    for row in &analysis.eoc_rows {
        let _ = writeln!(out, "{}", eoc_cells(row).join(COLUMN_GAP));
    }
}

fn cells(values: impl IntoIterator<Item = Option<Real>>) -> Vec<String> {
    values.into_iter().map(cell).collect()
}

fn stats_cells(stats: &RowStats) -> Vec<String> {
    match stats {
        RowStats::Single(Some(s)) => cells([s.min, s.max, s.mean, s.amp].map(Some)),
        RowStats::Single(None) => cells([None; 4]),
        RowStats::Split(Some(s)) => cells(split_cells(s)),
        RowStats::Split(None) => cells([None; 6]),
        RowStats::Transient { stats, eoc } => cells([
            stats.and_then(|s| s.t_max),
            stats.map(|s| s.x_max),
            eoc.map(|e| e.max),
            stats.map(|s| s.x_end),
            eoc.map(|e| e.end),
        ]),
    }
}

fn split_cells(s: &SplitStats) -> [Option<Real>; 6] {
    [
        s.first.map(|e| e.min),
        s.first.map(|e| e.max),
        s.second.map(|e| e.min),
        s.second.map(|e| e.max),
        Some(s.mean),
        Some(s.amp),
    ]
}

fn eoc_cells(row: &EocRow) -> Vec<String> {
    match row {
        EocRow::Single(Some(e)) => cells([e.min, e.max, e.mean, e.amp].map(Some)),
        EocRow::Single(None) => cells([None; 4]),
        EocRow::Split(Some(e)) => cells([e.min1, e.max1, e.min2, e.max2, Some(e.mean), Some(e.amp)]),
        EocRow::Split(None) => cells([None; 6]),
    }
}
