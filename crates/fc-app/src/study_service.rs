//! End-to-end execution of a convergence study.

use std::path::{Path, PathBuf};

use fc_analysis::{ObservableAnalysis, extract_cycle, extract_transient};
use fc_log::{LogParser, RunRecord, run_name_from_path};
use fc_report::{write_plots, write_report};
use fc_study::Study;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::runtime::{StudyRuntime, compile_study};

/// Options that control batch behaviour.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Skip logs that fail to parse, or runs without a cycle, instead of
    /// aborting the whole study.
    pub keep_going: bool,
}

/// A log dropped from the study in keep-going mode.
///
/// Its run keeps its place in the sequence as an empty record, so every EOC
/// triple that includes it reads `n/a` instead of spanning a gap.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of [`run_study`].
#[derive(Debug, Clone)]
pub struct StudyOutcome {
    pub report_path: PathBuf,
    pub plot_paths: Vec<PathBuf>,
    /// Names of all runs, coarsest first, skipped ones included.
    pub runs: Vec<String>,
    pub skipped: Vec<SkippedFile>,
    pub analyses: Vec<ObservableAnalysis>,
}

/// Load a study from YAML or JSON.
pub fn load_study(path: &Path) -> AppResult<Study> {
    Ok(fc_study::load(path)?)
}

/// Parse every log in parallel; results keep the order of `paths`.
///
/// Returned records are paired with the path they came from; a file skipped
/// in keep-going mode is paired with `None`.
pub fn load_runs(
    parser: &LogParser,
    paths: &[PathBuf],
    options: RunOptions,
) -> AppResult<(Vec<(PathBuf, Option<RunRecord>)>, Vec<SkippedFile>)> {
    if paths.is_empty() {
        return Err(AppError::EmptyRunSequence);
    }

    let parsed: Vec<AppResult<RunRecord>> = paths
        .par_iter()
        .map(|path| {
            parser
                .parse_file(path)
                .map_err(|source| AppError::LogFile {
                    path: path.clone(),
                    source,
                })
        })
        .collect();

    let mut runs = Vec::with_capacity(paths.len());
    let mut skipped = Vec::new();
    for (path, result) in paths.iter().zip(parsed) {
        match result {
            Ok(record) => runs.push((path.clone(), Some(record))),
            Err(err) if options.keep_going => {
                warn!(path = %path.display(), error = %err, "skipping log file");
                runs.push((path.clone(), None));
                skipped.push(SkippedFile {
                    path: path.clone(),
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    Ok((runs, skipped))
}

/// Reduce parsed runs to the analysed window of each.
///
/// Periodic studies keep the selected cycle with time rebased to zero;
/// transient studies keep the whole record. Skipped files, and in keep-going
/// mode runs without a cycle, become empty placeholder records.
pub fn prepare_runs(
    runtime: &StudyRuntime,
    runs: Vec<(PathBuf, Option<RunRecord>)>,
    options: RunOptions,
) -> AppResult<(Vec<RunRecord>, Vec<SkippedFile>)> {
    let mut prepared = Vec::with_capacity(runs.len());
    let mut skipped = Vec::new();
    for (path, record) in runs {
        let Some(record) = record else {
            prepared.push(RunRecord::new(run_name_from_path(&path)));
            continue;
        };
        let Some(selector) = runtime.selector else {
            prepared.push(extract_transient(&record));
            continue;
        };
        match selector.select(&record) {
            Ok(window) => prepared.push(extract_cycle(&record, &window)),
            Err(source) => {
                let err = AppError::Cycle {
                    run: record.name().to_string(),
                    source,
                };
                if !options.keep_going {
                    return Err(err);
                }
                warn!(path = %path.display(), error = %err, "skipping run");
                prepared.push(RunRecord::new(record.name()));
                skipped.push(SkippedFile {
                    path,
                    reason: err.to_string(),
                });
            }
        }
    }
    Ok((prepared, skipped))
}

/// Tabulate every configured observable across `runs`.
pub fn analyze_runs(runtime: &StudyRuntime, runs: &[RunRecord]) -> Vec<ObservableAnalysis> {
    runtime.analyzer.analyze_all(runs, &runtime.tables)
}

/// Run a study: parse, select, analyse and write report and plot scripts.
pub fn run_study(study: &Study, options: RunOptions) -> AppResult<StudyOutcome> {
    let runtime = compile_study(study)?;
    if let Some(name) = &runtime.name {
        info!("Running study '{}'", name);
    }

    let (parsed, mut skipped) = load_runs(&runtime.parser, &runtime.logs, options)?;
    let (runs, skipped_runs) = prepare_runs(&runtime, parsed, options)?;
    skipped.extend(skipped_runs);
    if skipped.len() >= runs.len() {
        return Err(AppError::EmptyRunSequence);
    }

    let plot_paths = write_plots(&runtime.output_prefix, &runtime.plots, &runs, &runtime.style)?;

    let analyses = analyze_runs(&runtime, &runs);
    let report_path = PathBuf::from(format!("{}_analysis.txt", runtime.output_prefix));
    write_report(&report_path, &analyses)?;

    Ok(StudyOutcome {
        report_path,
        plot_paths,
        runs: runs.iter().map(|r| r.name().to_string()).collect(),
        skipped,
        analyses,
    })
}
