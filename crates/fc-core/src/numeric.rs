use crate::FcError;

/// Scalar type of every logged value and derived statistic.
pub type Real = f64;

/// Absolute difference below which two refinement levels are treated as equal
/// when computing an experimental order of convergence.
pub const EOC_ABS_TOL: Real = 1e-15;

/// Reject NaN and infinities, naming the offending quantity.
pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, FcError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FcError::NonFinite { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_is_rejected() {
        let err = ensure_finite(Real::NAN, "t_min").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_finite_passes_regular_values() {
        assert_eq!(ensure_finite(-3.5, "test").unwrap(), -3.5);
    }
}
