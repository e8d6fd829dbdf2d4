//! Compilation of a study definition into the objects that execute it.

use std::path::PathBuf;

use fc_analysis::{AnalysisMode, ConvergenceAnalyzer, CycleSelector};
use fc_core::{Observable, StatShape};
use fc_log::LogParser;
use fc_report::{PlotSpec, PlotStyle, periodic_plots, transient_plots};
use fc_study::{PlotDef, ShapeDef, Study, StudyMode, validate_study};

use crate::error::AppResult;

const PERIODIC_X_LABEL: &str = "Cycle Time";
const TRANSIENT_X_LABEL: &str = "Time";

/// Runtime representation of a compiled study.
#[derive(Debug, Clone)]
pub struct StudyRuntime {
    pub name: Option<String>,
    pub output_prefix: String,
    /// Log files, coarsest first.
    pub logs: Vec<PathBuf>,
    pub parser: LogParser,
    /// Present in periodic mode only.
    pub selector: Option<CycleSelector>,
    pub analyzer: ConvergenceAnalyzer,
    pub tables: Vec<Observable>,
    pub plots: Vec<PlotSpec>,
    pub style: PlotStyle,
}

impl StudyRuntime {
    pub fn mode(&self) -> AnalysisMode {
        self.analyzer.mode()
    }
}

/// Validate `study` and build its parser, analyzer and output settings.
pub fn compile_study(study: &Study) -> AppResult<StudyRuntime> {
    validate_study(study)?;

    let (parser, selector, mut analyzer, default_plots, x_label) = match study.mode {
        StudyMode::Periodic { t_min } => (
            LogParser::periodic(t_min),
            Some(CycleSelector::default()),
            ConvergenceAnalyzer::periodic(),
            periodic_plots(),
            PERIODIC_X_LABEL,
        ),
        StudyMode::Transient { t_max } => (
            LogParser::transient(t_max),
            None,
            ConvergenceAnalyzer::transient(),
            transient_plots(),
            TRANSIENT_X_LABEL,
        ),
    };

    for (obs, shape) in &study.shapes {
        analyzer = analyzer.with_shape(*obs, stat_shape(*shape));
    }

    let plots = match &study.plots {
        Some(defs) => defs.iter().map(plot_spec).collect(),
        None => default_plots,
    };

    let mut style = PlotStyle::new(x_label);
    if !study.colors.is_empty() {
        style.colors = study.colors.clone();
    }

    Ok(StudyRuntime {
        name: study.name.clone(),
        output_prefix: study.output_prefix.clone(),
        logs: study.logs.clone(),
        parser,
        selector,
        analyzer,
        tables: study.table_order(),
        plots,
        style,
    })
}

fn stat_shape(shape: ShapeDef) -> StatShape {
    match shape {
        ShapeDef::Single => StatShape::Single,
        ShapeDef::Split => StatShape::Split,
    }
}

fn plot_spec(def: &PlotDef) -> PlotSpec {
    match def.zoom {
        Some(zoom) => PlotSpec::zoom(
            &def.file_suffix,
            def.observable,
            (zoom.x[0], zoom.x[1]),
            (zoom.y[0], zoom.y[1]),
        ),
        None => PlotSpec::full(&def.file_suffix, def.observable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use fc_analysis::TableKind;
    use fc_log::TimeFilter;
    use fc_study::ZoomDef;

    #[test]
    fn periodic_study_defaults() {
        let study = Study::periodic(20.0, "out", vec![PathBuf::from("a.log")]);
        let rt = compile_study(&study).unwrap();

        assert_eq!(rt.mode(), AnalysisMode::Periodic);
        assert_eq!(rt.parser.filter(), TimeFilter::From { t_min: 20.0 });
        assert!(rt.selector.is_some());
        assert_eq!(rt.tables.len(), Observable::COUNT);
        assert_eq!(rt.plots, periodic_plots());
        assert_eq!(rt.style.x_label, "Cycle Time");
        assert_eq!(rt.analyzer.table_kind(Observable::DragLine), TableKind::Split);
    }

    #[test]
    fn transient_study_defaults() {
        let study = Study::transient(8.0, "out", vec![PathBuf::from("a.log")]);
        let rt = compile_study(&study).unwrap();

        assert_eq!(rt.mode(), AnalysisMode::Transient);
        assert_eq!(rt.parser.filter(), TimeFilter::Until { t_max: 8.0 });
        assert!(rt.selector.is_none());
        assert_eq!(rt.plots.len(), transient_plots().len());
        assert_eq!(rt.style.x_label, "Time");
    }

    #[test]
    fn overrides_are_applied() {
        let mut study = Study::periodic(1.0, "out", vec![PathBuf::from("a.log")]);
        study.shapes.insert(Observable::LiftLine, ShapeDef::Split);
        study.plots = Some(vec![PlotDef {
            file_suffix: "lift".to_string(),
            observable: Observable::LiftLine,
            zoom: Some(ZoomDef {
                x: [0.1, 0.2],
                y: [-1.0, 1.0],
            }),
        }]);
        study.colors = vec!["k".to_string()];

        let rt = compile_study(&study).unwrap();
        assert_eq!(rt.analyzer.table_kind(Observable::LiftLine), TableKind::Split);
        assert_eq!(
            rt.plots,
            vec![PlotSpec::zoom("lift", Observable::LiftLine, (0.1, 0.2), (-1.0, 1.0))]
        );
        assert_eq!(rt.style.colors, vec!["k".to_string()]);
    }

    #[test]
    fn empty_study_is_rejected() {
        let study = Study::periodic(1.0, "out", vec![]);
        assert!(matches!(
            compile_study(&study),
            Err(AppError::EmptyRunSequence)
        ));
    }
}
