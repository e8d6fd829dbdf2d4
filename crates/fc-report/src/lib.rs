//! fc-report: text rendering of analysis results and plot scripts.

pub mod format;
pub mod plot;
pub mod table;

pub use format::format_g;
pub use plot::{
    DEFAULT_COLORS, PlotSpec, PlotStyle, ZoomWindow, periodic_plots, render_plot, transient_plots,
    write_plots,
};
pub use table::{render_report, write_report};

use std::path::PathBuf;

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
