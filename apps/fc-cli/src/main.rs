use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

use fc_app::{AppResult, RunOptions, StudyOutcome};
use fc_core::Observable;
use fc_study::{DEFAULT_T_MAX, Study};

#[derive(Parser)]
#[command(name = "fc-cli")]
#[command(about = "FlowConv CLI - convergence analysis of DFG95 solver logs", long_about = None)]
struct Cli {
    /// Skip log files that fail to parse instead of aborting
    #[arg(long, global = true)]
    keep_going: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse one stable cycle per run (benchmark 2)
    Periodic {
        /// Start of the cycle search window in seconds
        t_min: f64,
        /// Output file prefix
        prefix: String,
        /// Log files, coarsest first
        #[arg(required = true)]
        logs: Vec<PathBuf>,
        /// Report only these observables, in order (e.g. lift_l, drag_l)
        #[arg(long = "table", value_name = "KEY")]
        tables: Vec<Observable>,
    },
    /// Analyse the start-up transient of each run (benchmark 3)
    Transient {
        /// Output file prefix
        prefix: String,
        /// Log files, coarsest first
        #[arg(required = true)]
        logs: Vec<PathBuf>,
        /// End of the analysed time window in seconds
        #[arg(long, default_value_t = DEFAULT_T_MAX)]
        t_max: f64,
        /// Report only these observables, in order (e.g. lift_l, drag_l)
        #[arg(long = "table", value_name = "KEY")]
        tables: Vec<Observable>,
    },
    /// Run a study described in a YAML or JSON file
    Study {
        /// Path to the study file
        study_path: PathBuf,
    },
    /// Validate study file syntax and structure
    Validate {
        /// Path to the study file
        study_path: PathBuf,
    },
    /// Summarise a single log file
    Inspect {
        /// Path to the log file
        log_path: PathBuf,
        /// Drop lines before this time
        #[arg(long)]
        t_min: Option<f64>,
    },
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = RunOptions {
        keep_going: cli.keep_going,
    };
    tracing::debug!(?options, "starting");

    match cli.command {
        Commands::Periodic {
            t_min,
            prefix,
            logs,
            tables,
        } => {
            let mut study = Study::periodic(t_min, prefix, logs);
            study.tables = tables;
            cmd_run(&study, options)
        }
        Commands::Transient {
            prefix,
            logs,
            t_max,
            tables,
        } => {
            let mut study = Study::transient(t_max, prefix, logs);
            study.tables = tables;
            cmd_run(&study, options)
        }
        Commands::Study { study_path } => cmd_study(&study_path, options),
        Commands::Validate { study_path } => cmd_validate(&study_path),
        Commands::Inspect { log_path, t_min } => cmd_inspect(&log_path, t_min),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();
}

fn cmd_study(study_path: &Path, options: RunOptions) -> AppResult<()> {
    println!("Loading study: {}", study_path.display());
    let study = fc_app::load_study(study_path)?;
    cmd_run(&study, options)
}

fn cmd_run(study: &Study, options: RunOptions) -> AppResult<()> {
    let started = Instant::now();
    let outcome = fc_app::run_study(study, options)?;
    print_outcome(&outcome);
    println!("  Elapsed: {:.3}s", started.elapsed().as_secs_f64());
    Ok(())
}

fn print_outcome(outcome: &StudyOutcome) {
    println!("✓ Analysed {} runs", outcome.runs.len());
    for run in &outcome.runs {
        println!("  {}", run);
    }
    if !outcome.skipped.is_empty() {
        println!("Skipped {} files:", outcome.skipped.len());
        for skipped in &outcome.skipped {
            println!("  {} - {}", skipped.path.display(), skipped.reason);
        }
    }
    println!("  Report: {}", outcome.report_path.display());
    println!("  Plot scripts: {}", outcome.plot_paths.len());
}

fn cmd_validate(study_path: &Path) -> AppResult<()> {
    println!("Validating study: {}", study_path.display());
    let study = fc_app::load_study(study_path)?;
    fc_app::compile_study(&study)?;
    println!("✓ Study is valid");
    println!("  Logs: {}", study.logs.len());
    println!("  Tables: {}", study.table_order().len());
    Ok(())
}

fn cmd_inspect(log_path: &Path, t_min: Option<f64>) -> AppResult<()> {
    let summary = fc_app::inspect_log(log_path, t_min)?;

    println!("Run: {}", summary.name);
    println!("  Time steps: {}", summary.steps);
    match summary.time_range {
        Some((t0, t1)) => println!("  Time range: {:.6} .. {:.6}", t0, t1),
        None => println!("  Time range: (empty)"),
    }
    println!("Samples:");
    for (obs, count) in &summary.samples {
        println!("  {:<8} {:>8}  {}", obs.key(), count, obs.label());
    }
    if !summary.missing.is_empty() {
        let keys: Vec<&str> = summary.missing.iter().map(|obs| obs.key()).collect();
        println!("Missing: {}", keys.join(", "));
    }
    println!("Cycles on lift (line): {}", summary.cycles.len());
    if let Some(best) = summary.best_cycle {
        println!(
            "  Best: samples {}..{} (symmetry error {:e})",
            best.start, best.end, best.symmetry_error
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periodic_arguments_parse() {
        let cli = Cli::try_parse_from([
            "fc-cli",
            "periodic",
            "20",
            "k=400_levels",
            "lvl=2.log",
            "lvl=3.log",
        ])
        .unwrap();
        match cli.command {
            Commands::Periodic {
                t_min,
                prefix,
                logs,
                tables,
            } => {
                assert!(tables.is_empty());
                assert_eq!(t_min, 20.0);
                assert_eq!(prefix, "k=400_levels");
                assert_eq!(logs.len(), 2);
            }
            _ => panic!("expected periodic command"),
        }
    }

    #[test]
    fn transient_defaults_t_max() {
        let cli = Cli::try_parse_from(["fc-cli", "--keep-going", "transient", "out", "a.log"])
            .unwrap();
        assert!(cli.keep_going);
        match cli.command {
            Commands::Transient { t_max, .. } => assert_eq!(t_max, DEFAULT_T_MAX),
            _ => panic!("expected transient command"),
        }
    }

    #[test]
    fn table_keys_parse_as_observables() {
        let cli = Cli::try_parse_from([
            "fc-cli", "transient", "out", "a.log", "--table", "lift_l", "--table", "drag_v",
        ])
        .unwrap();
        match cli.command {
            Commands::Transient { tables, .. } => {
                assert_eq!(tables, vec![Observable::LiftLine, Observable::DragVolume]);
            }
            _ => panic!("expected transient command"),
        }
        assert!(Cli::try_parse_from(["fc-cli", "transient", "out", "a.log", "--table", "lift"]).is_err());
    }

    #[test]
    fn missing_logs_is_a_usage_error() {
        assert!(Cli::try_parse_from(["fc-cli", "periodic", "20", "out"]).is_err());
        assert!(Cli::try_parse_from(["fc-cli", "transient", "out"]).is_err());
    }
}
