//! printf-style number formatting shared by the writers.

use fc_core::Real;

/// Width of one numeric table column.
pub const COLUMN_WIDTH: usize = 15;
/// Digits after the decimal point in table columns.
pub const COLUMN_PRECISION: usize = 12;
/// Separator between table columns.
pub const COLUMN_GAP: &str = "   ";

/// One fixed-width table cell; missing data renders as `n/a`.
pub fn cell(value: Option<Real>) -> String {
    match value {
        Some(v) => format!("{v:COLUMN_WIDTH$.COLUMN_PRECISION$}"),
        None => format!("{:>COLUMN_WIDTH$}", "n/a"),
    }
}

/// Shortest representation with six significant digits, like C's `%g`.
pub fn format_g(v: Real) -> String {
    const SIGNIFICANT: i32 = 6;

    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // exponent after rounding to the significant digits
    let sci = format!("{:.*e}", (SIGNIFICANT - 1) as usize, v);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= SIGNIFICANT {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (SIGNIFICANT - 1 - exp).max(0) as usize;
        trim_zeros(&format!("{v:.decimals$}")).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn g_format_matches_printf() {
        assert_eq!(format_g(0.0), "0");
        assert_eq!(format_g(1.0), "1");
        assert_eq!(format_g(0.5), "0.5");
        assert_eq!(format_g(3.17), "3.17");
        assert_eq!(format_g(-0.1), "-0.1");
        assert_eq!(format_g(20.0125), "20.0125");
        assert_eq!(format_g(123456.0), "123456");
        assert_eq!(format_g(1234567.0), "1.23457e+06");
        assert_eq!(format_g(0.0001), "0.0001");
        assert_eq!(format_g(0.00001234), "1.234e-05");
        assert_eq!(format_g(1e-13), "1e-13");
        assert_eq!(format_g(999999.5), "1e+06");
        assert_eq!(format_g(2.0 / 3.0), "0.666667");
    }

    #[test]
    fn cells_are_fixed_width() {
        assert_eq!(cell(Some(3.5)), " 3.500000000000");
        assert_eq!(cell(Some(-0.25)), "-0.250000000000");
        assert_eq!(cell(None), "            n/a");
        assert_eq!(cell(Some(1.0)).len(), COLUMN_WIDTH);
    }
}
