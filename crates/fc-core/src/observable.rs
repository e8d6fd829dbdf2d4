//! Catalogue of the physical quantities written by the flow solver.

use core::fmt;
use core::str::FromStr;

use crate::FcError;

/// A logged physical quantity, in the order the solver writes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Observable {
    #[cfg_attr(feature = "serde", serde(rename = "drag_l"))]
    DragLine,
    #[cfg_attr(feature = "serde", serde(rename = "drag_v"))]
    DragVolume,
    #[cfg_attr(feature = "serde", serde(rename = "lift_l"))]
    LiftLine,
    #[cfg_attr(feature = "serde", serde(rename = "lift_v"))]
    LiftVolume,
    #[cfg_attr(feature = "serde", serde(rename = "pdiff"))]
    PressureDiff,
    #[cfg_attr(feature = "serde", serde(rename = "flux_u"))]
    UpperFlux,
    #[cfg_attr(feature = "serde", serde(rename = "flux_l"))]
    LowerFlux,
    #[cfg_attr(feature = "serde", serde(rename = "h0_norm"))]
    H0Norm,
    #[cfg_attr(feature = "serde", serde(rename = "h1_norm"))]
    H1Norm,
    #[cfg_attr(feature = "serde", serde(rename = "vorticity"))]
    Vorticity,
    #[cfg_attr(feature = "serde", serde(rename = "divergence"))]
    Divergence,
}

/// How a series is reduced to summary statistics over the analysis window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatShape {
    /// One dominant minimum and maximum over the window.
    Single,
    /// Two extrema pairs per cycle; the window is bisected.
    Split,
}

impl Observable {
    pub const COUNT: usize = 11;

    pub const ALL: [Observable; Self::COUNT] = [
        Observable::DragLine,
        Observable::DragVolume,
        Observable::LiftLine,
        Observable::LiftVolume,
        Observable::PressureDiff,
        Observable::UpperFlux,
        Observable::LowerFlux,
        Observable::H0Norm,
        Observable::H1Norm,
        Observable::Vorticity,
        Observable::Divergence,
    ];

    /// Dense index into per-observable storage.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human readable label used in reports and plot axes.
    pub fn label(self) -> &'static str {
        match self {
            Observable::DragLine => "Drag (Line)",
            Observable::DragVolume => "Drag (Volume)",
            Observable::LiftLine => "Lift (Line)",
            Observable::LiftVolume => "Lift (Volume)",
            Observable::PressureDiff => "Pressure Difference",
            Observable::UpperFlux => "Upper Flux",
            Observable::LowerFlux => "Lower Flux",
            Observable::H0Norm => "H0-Norm of U",
            Observable::H1Norm => "H1-Norm of U",
            Observable::Vorticity => "Vorticity",
            Observable::Divergence => "Divergence",
        }
    }

    /// Stable short key used in study files and output file names.
    pub fn key(self) -> &'static str {
        match self {
            Observable::DragLine => "drag_l",
            Observable::DragVolume => "drag_v",
            Observable::LiftLine => "lift_l",
            Observable::LiftVolume => "lift_v",
            Observable::PressureDiff => "pdiff",
            Observable::UpperFlux => "flux_u",
            Observable::LowerFlux => "flux_l",
            Observable::H0Norm => "h0_norm",
            Observable::H1Norm => "h1_norm",
            Observable::Vorticity => "vorticity",
            Observable::Divergence => "divergence",
        }
    }

    /// Statistics shape used by the periodic analysis unless overridden.
    pub fn default_shape(self) -> StatShape {
        match self {
            Observable::DragLine
            | Observable::DragVolume
            | Observable::PressureDiff
            | Observable::UpperFlux
            | Observable::LowerFlux => StatShape::Split,
            Observable::LiftLine
            | Observable::LiftVolume
            | Observable::H0Norm
            | Observable::H1Norm
            | Observable::Vorticity
            | Observable::Divergence => StatShape::Single,
        }
    }
}

impl fmt::Display for Observable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Observable {
    type Err = FcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Observable::ALL
            .into_iter()
            .find(|obs| obs.key() == s)
            .ok_or_else(|| FcError::UnknownObservable { key: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_catalogue_order() {
        for (i, obs) in Observable::ALL.iter().enumerate() {
            assert_eq!(obs.index(), i);
        }
    }

    #[test]
    fn keys_parse_back() {
        for obs in Observable::ALL {
            assert_eq!(obs.key().parse::<Observable>().unwrap(), obs);
        }
        assert!("drag".parse::<Observable>().is_err());
    }

    #[test]
    fn drag_is_split_and_lift_is_single() {
        assert_eq!(Observable::DragLine.default_shape(), StatShape::Split);
        assert_eq!(Observable::LiftLine.default_shape(), StatShape::Single);
    }
}
