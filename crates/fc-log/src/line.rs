//! Shape recognition for a single solver log line.
//!
//! A significant line looks like
//!
//! ```text
//!   123:   20.012500 > DC/LC/PD:  3.1823  3.1811  0.9987  0.9991  2.4807
//! ```
//!
//! i.e. a step index, a colon, a timestamp, and a payload after `>`.
//! Anything else is banner or solver noise.

use fc_core::Real;

pub const TAG_RUNTIME: &str = "Runtime";
pub const TAG_FORCES: &str = "DC/LC/PD:";
pub const TAG_FLUX: &str = "FX/H0/H1:";
pub const TAG_VORTICITY: &str = "VC/DV...:";

/// A line that matched the step/timestamp shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogLine<'a> {
    pub step: u64,
    pub time: Real,
    pub payload: &'a str,
}

/// Tagged payload with its fixed-arity numeric fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload {
    /// Step boundary marker.
    Runtime,
    /// drag-line, drag-volume, lift-line, lift-volume, pressure-difference
    Forces([Real; 5]),
    /// upper-flux, lower-flux, H0-norm, H1-norm
    Flux([Real; 4]),
    /// vorticity, divergence
    Vorticity([Real; 2]),
    /// Recognised line shape but an unknown tag.
    Other,
}

/// Split a raw line into step, timestamp and payload.
///
/// Returns `Ok(None)` for lines that do not have the significant shape and
/// `Err` with a reason when the timestamp token cannot be read as a number.
pub fn split_line(raw: &str) -> Result<Option<LogLine<'_>>, String> {
    let s = raw.trim();

    let digits_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if digits_end == 0 {
        return Ok(None);
    }
    let Ok(step) = s[..digits_end].parse::<u64>() else {
        return Ok(None);
    };

    let Some(rest) = s[digits_end..].strip_prefix(':') else {
        return Ok(None);
    };
    let rest = rest.trim_start();

    let time_end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(rest.len());
    if time_end == 0 {
        return Ok(None);
    }
    let (time_token, rest) = rest.split_at(time_end);

    // at least one blank between timestamp and delimiter
    if !rest.starts_with(char::is_whitespace) {
        return Ok(None);
    }
    let Some(payload) = rest.trim_start().strip_prefix('>') else {
        return Ok(None);
    };

    let time = time_token
        .parse::<Real>()
        .map_err(|_| format!("invalid timestamp '{time_token}'"))?;

    Ok(Some(LogLine {
        step,
        time,
        payload,
    }))
}

impl Payload {
    /// Dispatch a payload on its tag and read the tag's fields.
    ///
    /// A tag counts only when exactly one blank separates it from `>`.
    pub fn parse(payload: &str) -> Result<Payload, String> {
        let Some(p) = payload.strip_prefix(' ') else {
            return Ok(Payload::Other);
        };
        if p.starts_with(TAG_RUNTIME) {
            Ok(Payload::Runtime)
        } else if let Some(rest) = p.strip_prefix(TAG_FORCES) {
            parse_fields(TAG_FORCES, rest).map(Payload::Forces)
        } else if let Some(rest) = p.strip_prefix(TAG_FLUX) {
            parse_fields(TAG_FLUX, rest).map(Payload::Flux)
        } else if let Some(rest) = p.strip_prefix(TAG_VORTICITY) {
            parse_fields(TAG_VORTICITY, rest).map(Payload::Vorticity)
        } else {
            Ok(Payload::Other)
        }
    }
}

fn parse_fields<const N: usize>(tag: &str, rest: &str) -> Result<[Real; N], String> {
    let mut out = [0.0; N];
    let mut tokens = rest.split_whitespace();
    for (i, slot) in out.iter_mut().enumerate() {
        let token = tokens
            .next()
            .ok_or_else(|| format!("{tag} expects {N} fields, found {i}"))?;
        *slot = token
            .parse::<Real>()
            .map_err(|_| format!("{tag} field {} is not a number: '{token}'", i + 1))?;
    }
    Ok(out)
}
