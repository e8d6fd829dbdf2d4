//! Matplotlib script emission for the extracted series.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use fc_core::{Observable, Real};
use fc_log::RunRecord;
use tracing::info;

use crate::format::format_g;
use crate::{ReportError, ReportResult};

/// Line colours, cycled when there are more runs than entries.
pub const DEFAULT_COLORS: [&str; 7] = ["red", "green", "blue", "black", "purple", "orange", "pink"];

/// Axis limits of a zoomed plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomWindow {
    pub x0: Real,
    pub x1: Real,
    pub y0: Real,
    pub y1: Real,
}

/// One plot script: `<prefix>_<file_suffix>.py`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    pub file_suffix: String,
    pub observable: Observable,
    pub zoom: Option<ZoomWindow>,
}

impl PlotSpec {
    pub fn full(file_suffix: &str, observable: Observable) -> Self {
        Self {
            file_suffix: file_suffix.to_string(),
            observable,
            zoom: None,
        }
    }

    pub fn zoom(file_suffix: &str, observable: Observable, x: (Real, Real), y: (Real, Real)) -> Self {
        Self {
            file_suffix: file_suffix.to_string(),
            observable,
            zoom: Some(ZoomWindow {
                x0: x.0,
                x1: x.1,
                y0: y.0,
                y1: y.1,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    pub x_label: String,
    pub colors: Vec<String>,
}

impl PlotStyle {
    pub fn new(x_label: &str) -> Self {
        Self {
            x_label: x_label.to_string(),
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn color(&self, k: usize) -> &str {
        if self.colors.is_empty() {
            DEFAULT_COLORS[k % DEFAULT_COLORS.len()]
        } else {
            &self.colors[k % self.colors.len()]
        }
    }
}

/// Plot set of the periodic (benchmark 2) analysis.
pub fn periodic_plots() -> Vec<PlotSpec> {
    use Observable::*;
    vec![
        PlotSpec::full("drag_l_full", DragLine),
        PlotSpec::zoom("drag_l_zoom", DragLine, (0.13, 0.24), (3.17, 3.24)),
        PlotSpec::full("drag_v_full", DragVolume),
        PlotSpec::zoom("drag_v_zoom", DragVolume, (0.13, 0.24), (3.17, 3.24)),
        PlotSpec::full("lift_l_full", LiftLine),
        PlotSpec::zoom("lift_l_zoom", LiftLine, (0.14, 0.19), (0.91, 1.0)),
        PlotSpec::full("lift_v_full", LiftVolume),
        PlotSpec::zoom("lift_v_zoom", LiftVolume, (0.14, 0.19), (0.91, 1.0)),
        PlotSpec::full("pdiff_full", PressureDiff),
        PlotSpec::zoom("pdiff_zoom", PressureDiff, (0.15, 0.24), (2.45, 2.52)),
        PlotSpec::full("flux_u_full", UpperFlux),
        PlotSpec::full("flux_l_full", LowerFlux),
        PlotSpec::full("h0_norm_u", H0Norm),
        PlotSpec::full("h1_norm_u", H1Norm),
        PlotSpec::full("vorticity", Vorticity),
    ]
}

/// Plot set of the transient (benchmark 3) analysis.
pub fn transient_plots() -> Vec<PlotSpec> {
    use Observable::*;
    vec![
        PlotSpec::full("drag_l_full", DragLine),
        PlotSpec::zoom("drag_l_zoom", DragLine, (3.5, 4.3), (2.85, 3.0)),
        PlotSpec::full("drag_v_full", DragVolume),
        PlotSpec::zoom("drag_v_zoom", DragVolume, (3.5, 4.3), (2.85, 3.0)),
        PlotSpec::zoom("drag_v_zoom_2", DragVolume, (5.2, 5.6), (2.0, 2.5)),
        PlotSpec::full("lift_l_full", LiftLine),
        PlotSpec::zoom("lift_l_zoom", LiftLine, (5.65, 5.75), (0.4, 0.5)),
        PlotSpec::full("lift_v_full", LiftVolume),
        PlotSpec::zoom("lift_v_zoom", LiftVolume, (5.65, 5.75), (0.4, 0.5)),
        PlotSpec::zoom("lift_v_zoom_2", LiftVolume, (7.5, 8.0), (-0.1, 0.05)),
        PlotSpec::full("pdiff_full", PressureDiff),
        PlotSpec::zoom("pdiff_zoom", PressureDiff, (3.6, 4.3), (2.28, 2.34)),
        PlotSpec::full("flux_u_full", UpperFlux),
        PlotSpec::full("flux_l_full", LowerFlux),
        PlotSpec::full("h0_norm_u", H0Norm),
        PlotSpec::full("h1_norm_u", H1Norm),
        PlotSpec::full("vorticity", Vorticity),
    ]
}

fn py_str(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Render the script plotting `spec.observable` of every run over its time axis.
pub fn render_plot(spec: &PlotSpec, runs: &[RunRecord], style: &PlotStyle) -> String {
    let mut out = String::from("import matplotlib.pyplot as plt\n");
    for (k, run) in runs.iter().enumerate() {
        let time = run.time();
        let values = run.series(spec.observable);
        let n = time.len().min(values.len());

        let _ = writeln!(out, "t_{k} = [");
        for t in &time[..n] {
            let _ = writeln!(out, "{},", format_g(*t));
        }
        out.push_str("]\n");
        let _ = writeln!(out, "x_{k} = [");
        for x in &values[..n] {
            let _ = writeln!(out, "{},", format_g(*x));
        }
        out.push_str("]\n");
        let _ = writeln!(out, "plt.plot(t_{k},x_{k},color={})", py_str(style.color(k)));
    }

    let _ = writeln!(out, "plt.xlabel({})", py_str(&style.x_label));
    if let Some(z) = spec.zoom {
        let _ = writeln!(out, "plt.xlim({},{})", format_g(z.x0), format_g(z.x1));
    }
    let _ = writeln!(out, "plt.ylabel({})", py_str(spec.observable.label()));
    if let Some(z) = spec.zoom {
        let _ = writeln!(out, "plt.ylim({},{})", format_g(z.y0), format_g(z.y1));
    }
    let names: Vec<String> = runs.iter().map(|r| py_str(r.name()) + ",").collect();
    let _ = writeln!(out, "plt.legend(({}))", names.concat());
    out.push_str("plt.grid(True, 'major', 'both', linestyle='--')\n");
    out.push_str("plt.show()\n");
    out
}

/// Write one script per plot; returns the written paths in the order given.
pub fn write_plots(
    prefix: &str,
    specs: &[PlotSpec],
    runs: &[RunRecord],
    style: &PlotStyle,
) -> ReportResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(specs.len());
    for spec in specs {
        let path = PathBuf::from(format!("{prefix}_{}.py", spec.file_suffix));
        write_script(&path, &render_plot(spec, runs, style))?;
        written.push(path);
    }
    Ok(written)
}

fn write_script(path: &Path, script: &str) -> ReportResult<()> {
    info!("Writing '{}'...", path.display());
    fs::write(path, script).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
