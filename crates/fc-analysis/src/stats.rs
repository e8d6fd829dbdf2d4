//! Summary statistics and experimental orders of convergence.

use fc_core::{EOC_ABS_TOL, Real};

/// Experimental order of convergence of three successive values.
///
/// `log2(|x2 - x1| / |x1 - x0|)`, or exactly `0.0` when either difference is
/// below [`EOC_ABS_TOL`].
pub fn eoc(x0: Real, x1: Real, x2: Real) -> Real {
    let num = (x2 - x1).abs();
    let den = (x1 - x0).abs();
    if num < EOC_ABS_TOL || den < EOC_ABS_TOL {
        0.0
    } else {
        (num / den).log2()
    }
}

fn eoc_of(x0: Option<Real>, x1: Option<Real>, x2: Option<Real>) -> Option<Real> {
    Some(eoc(x0?, x1?, x2?))
}

/// Minimum and maximum of a non-empty window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extrema {
    pub min: Real,
    pub max: Real,
}

impl Extrema {
    pub fn of(values: &[Real]) -> Option<Self> {
        let (first, rest) = values.split_first()?;
        let mut ext = Extrema {
            min: *first,
            max: *first,
        };
        for &v in rest {
            if v < ext.min {
                ext.min = v;
            }
            if v > ext.max {
                ext.max = v;
            }
        }
        Some(ext)
    }

    pub fn union(self, other: Extrema) -> Extrema {
        Extrema {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn mean(&self) -> Real {
        0.5 * (self.min + self.max)
    }

    pub fn amplitude(&self) -> Real {
        self.max - self.min
    }
}

/// Statistics of an observable with one dominant extremum pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SingleStats {
    pub min: Real,
    pub max: Real,
    pub mean: Real,
    pub amp: Real,
}

impl SingleStats {
    pub fn of(values: &[Real]) -> Option<Self> {
        let ext = Extrema::of(values)?;
        Some(Self {
            min: ext.min,
            max: ext.max,
            mean: ext.mean(),
            amp: ext.amplitude(),
        })
    }
}

/// Statistics of an observable with two extremum pairs per cycle.
///
/// The window is bisected at `len / 2`; `mean` and `amp` come from the
/// combined extrema of both halves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitStats {
    pub first: Option<Extrema>,
    pub second: Option<Extrema>,
    pub mean: Real,
    pub amp: Real,
}

impl SplitStats {
    pub fn of(values: &[Real]) -> Option<Self> {
        let (head, tail) = values.split_at(values.len() / 2);
        let first = Extrema::of(head);
        let second = Extrema::of(tail);
        let combined = match (first, second) {
            (Some(a), Some(b)) => a.union(b),
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => return None,
        };
        Some(Self {
            first,
            second,
            mean: combined.mean(),
            amp: combined.amplitude(),
        })
    }
}

/// Peak timing and asymptotic value over the whole horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransientStats {
    /// Time of the first occurrence of the maximum.
    pub t_max: Option<Real>,
    pub x_max: Real,
    /// Value at the end of the series.
    pub x_end: Real,
}

impl TransientStats {
    pub fn of(time: &[Real], values: &[Real]) -> Option<Self> {
        let x_end = *values.last()?;
        let mut k_max = 0;
        for (k, v) in values.iter().enumerate() {
            if *v > values[k_max] {
                k_max = k;
            }
        }
        Some(Self {
            t_max: time.get(k_max).copied(),
            x_max: values[k_max],
            x_end,
        })
    }
}

/// EOCs of [`SingleStats`] over three successive runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SingleEoc {
    pub min: Real,
    pub max: Real,
    pub mean: Real,
    pub amp: Real,
}

impl SingleEoc {
    /// `s0` is the finest run of the triple, `s2` the coarsest.
    pub fn of(s0: &SingleStats, s1: &SingleStats, s2: &SingleStats) -> Self {
        Self {
            min: eoc(s0.min, s1.min, s2.min),
            max: eoc(s0.max, s1.max, s2.max),
            mean: eoc(s0.mean, s1.mean, s2.mean),
            amp: eoc(s0.amp, s1.amp, s2.amp),
        }
    }
}

/// EOCs of [`SplitStats`] over three successive runs.
///
/// Per-half entries are `None` when a half was empty in one of the runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitEoc {
    pub min1: Option<Real>,
    pub max1: Option<Real>,
    pub min2: Option<Real>,
    pub max2: Option<Real>,
    pub mean: Real,
    pub amp: Real,
}

impl SplitEoc {
    /// `s0` is the finest run of the triple, `s2` the coarsest.
    pub fn of(s0: &SplitStats, s1: &SplitStats, s2: &SplitStats) -> Self {
        let half = |s: &SplitStats, first: bool| if first { s.first } else { s.second };
        let field = |first: bool, pick: fn(Extrema) -> Real| {
            eoc_of(
                half(s0, first).map(pick),
                half(s1, first).map(pick),
                half(s2, first).map(pick),
            )
        };
        Self {
            min1: field(true, |e| e.min),
            max1: field(true, |e| e.max),
            min2: field(false, |e| e.min),
            max2: field(false, |e| e.max),
            mean: eoc(s0.mean, s1.mean, s2.mean),
            amp: eoc(s0.amp, s1.amp, s2.amp),
        }
    }
}

/// EOCs of the transient maximum and end value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransientEoc {
    pub max: Real,
    pub end: Real,
}

impl TransientEoc {
    /// `s0` is the finest run of the triple, `s2` the coarsest.
    pub fn of(s0: &TransientStats, s1: &TransientStats, s2: &TransientStats) -> Self {
        Self {
            max: eoc(s0.x_max, s1.x_max, s2.x_max),
            end: eoc(s0.x_end, s1.x_end, s2.x_end),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn eoc_of_constant_triple_is_zero(x in -1e6f64..1e6) {
            prop_assert_eq!(eoc(x, x, x), 0.0);
        }

        #[test]
        fn eoc_reverses_sign_when_order_reverses(
            x0 in -10.0f64..10.0,
            d1 in 0.01f64..5.0,
            d2 in 0.01f64..5.0,
        ) {
            let x1 = x0 + d1;
            let x2 = x1 + d2;
            let fwd = eoc(x0, x1, x2);
            let bwd = eoc(x2, x1, x0);
            prop_assert!((fwd + bwd).abs() < 1e-9);
        }

        #[test]
        fn single_stats_bound_every_sample(values in prop::collection::vec(-1e3f64..1e3, 1..64)) {
            let s = SingleStats::of(&values).unwrap();
            prop_assert!(values.iter().all(|v| *v >= s.min && *v <= s.max));
            prop_assert!(s.amp >= 0.0);
        }
    }
}
