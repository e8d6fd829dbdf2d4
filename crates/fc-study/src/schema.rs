//! Study schema definitions.

use std::collections::BTreeMap;
use std::path::PathBuf;

use fc_core::Observable;
use serde::{Deserialize, Serialize};

pub use fc_log::DEFAULT_T_MAX;

fn default_t_max() -> f64 {
    DEFAULT_T_MAX
}

/// A family of runs analysed together.
///
/// `logs` are ordered coarsest first; that order defines the EOC triples.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Study {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub output_prefix: String,
    pub mode: StudyMode,
    pub logs: Vec<PathBuf>,
    /// Report sections in order; empty means every observable.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<Observable>,
    /// Per-observable override of the periodic statistics shape.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub shapes: BTreeMap<Observable, ShapeDef>,
    /// Plot scripts to emit; `None` selects the mode's default set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plots: Option<Vec<PlotDef>>,
    /// Line colours; empty means the built-in palette.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum StudyMode {
    /// Cycle search starts at `t_min`.
    Periodic { t_min: f64 },
    /// Everything after `t_max` is ignored.
    Transient {
        #[serde(default = "default_t_max")]
        t_max: f64,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShapeDef {
    Single,
    Split,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotDef {
    pub file_suffix: String,
    pub observable: Observable,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<ZoomDef>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ZoomDef {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl Study {
    /// Benchmark-2 style study with default tables and plots.
    pub fn periodic(t_min: f64, output_prefix: impl Into<String>, logs: Vec<PathBuf>) -> Self {
        Self::with_mode(StudyMode::Periodic { t_min }, output_prefix, logs)
    }

    /// Benchmark-3 style study with default tables and plots.
    pub fn transient(t_max: f64, output_prefix: impl Into<String>, logs: Vec<PathBuf>) -> Self {
        Self::with_mode(StudyMode::Transient { t_max }, output_prefix, logs)
    }

    fn with_mode(mode: StudyMode, output_prefix: impl Into<String>, logs: Vec<PathBuf>) -> Self {
        Self {
            version: crate::LATEST_VERSION,
            name: None,
            output_prefix: output_prefix.into(),
            mode,
            logs,
            tables: Vec::new(),
            shapes: BTreeMap::new(),
            plots: None,
            colors: Vec::new(),
        }
    }

    /// Report sections in order.
    pub fn table_order(&self) -> Vec<Observable> {
        if self.tables.is_empty() {
            Observable::ALL.to_vec()
        } else {
            self.tables.clone()
        }
    }
}
