//! Study validation logic.

use std::collections::HashSet;

use crate::schema::{Study, StudyMode};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Empty run sequence: a study needs at least one log file")]
    EmptyRunSequence,

    #[error("Duplicate entry: {id} in {context}")]
    Duplicate { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_study(study: &Study) -> Result<(), ValidationError> {
    if study.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: study.version,
        });
    }

    if study.logs.is_empty() {
        return Err(ValidationError::EmptyRunSequence);
    }

    if study.output_prefix.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "output_prefix".to_string(),
            value: format!("{:?}", study.output_prefix),
            reason: "must not be empty".to_string(),
        });
    }

    match study.mode {
        StudyMode::Periodic { t_min } => ensure_finite("mode.t_min", t_min)?,
        StudyMode::Transient { t_max } => ensure_finite("mode.t_max", t_max)?,
    }

    let mut tables = HashSet::new();
    for obs in &study.tables {
        if !tables.insert(obs) {
            return Err(ValidationError::Duplicate {
                id: obs.key().to_string(),
                context: "tables".to_string(),
            });
        }
    }

    let mut suffixes = HashSet::new();
    for plot in study.plots.iter().flatten() {
        if !suffixes.insert(&plot.file_suffix) {
            return Err(ValidationError::Duplicate {
                id: plot.file_suffix.clone(),
                context: "plots".to_string(),
            });
        }
        if plot.file_suffix.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "plots.file_suffix".to_string(),
                value: format!("{:?}", plot.file_suffix),
                reason: "must not be empty".to_string(),
            });
        }
        if let Some(zoom) = &plot.zoom {
            for (axis, [lo, hi]) in [("x", zoom.x), ("y", zoom.y)] {
                if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                    return Err(ValidationError::InvalidValue {
                        field: format!("plots.{}.zoom.{axis}", plot.file_suffix),
                        value: format!("[{lo}, {hi}]"),
                        reason: "limits must be finite and increasing".to_string(),
                    });
                }
            }
        }
    }

    Ok(())
}

fn ensure_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    fc_core::ensure_finite(value, field)
        .map(|_| ())
        .map_err(|err| ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{PlotDef, ZoomDef};
    use fc_core::Observable;
    use std::path::PathBuf;

    fn study() -> Study {
        Study::periodic(20.0, "k=400_levels", vec![PathBuf::from("lvl=3_k=400.log")])
    }

    #[test]
    fn default_study_is_valid() {
        validate_study(&study()).unwrap();
    }

    #[test]
    fn empty_logs_rejected() {
        let mut s = study();
        s.logs.clear();
        assert!(matches!(
            validate_study(&s),
            Err(ValidationError::EmptyRunSequence)
        ));
    }

    #[test]
    fn duplicate_table_rejected() {
        let mut s = study();
        s.tables = vec![Observable::LiftLine, Observable::LiftLine];
        assert!(matches!(
            validate_study(&s),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn inverted_zoom_rejected() {
        let mut s = study();
        s.plots = Some(vec![PlotDef {
            file_suffix: "lift_zoom".to_string(),
            observable: Observable::LiftLine,
            zoom: Some(ZoomDef {
                x: [0.2, 0.1],
                y: [0.0, 1.0],
            }),
        }]);
        let err = validate_study(&s).unwrap_err();
        assert!(err.to_string().contains("zoom.x"));
    }

    #[test]
    fn non_finite_threshold_rejected() {
        let mut s = study();
        s.mode = StudyMode::Periodic { t_min: f64::NAN };
        assert!(validate_study(&s).is_err());
    }

    #[test]
    fn newer_version_rejected() {
        let mut s = study();
        s.version = crate::LATEST_VERSION + 1;
        assert!(matches!(
            validate_study(&s),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }
}
