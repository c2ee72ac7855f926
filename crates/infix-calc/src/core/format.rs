//! Number literals and result rendering

use crate::core::{CalcError, CalcResult};

/// Decimal exponent at which [`format_general`] switches to exponent notation
const EXPONENT_THRESHOLD: i32 = 21;

/// Parses `text` if it is wholly a decimal literal.
///
/// Accepts an optional sign, digits and at most one `.`. Returns `Ok(None)`
/// for anything else, including `inf`, `nan` and exponent forms. A literal
/// too large to represent is an [`CalcError::Overflow`].
pub fn parse_literal(text: &str) -> CalcResult<Option<f64>> {
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    let well_formed = body.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && body.bytes().any(|b| b.is_ascii_digit())
        && body.bytes().filter(|&b| b == b'.').count() <= 1;
    if !well_formed {
        return Ok(None);
    }
    let Ok(value) = text.parse::<f64>() else {
        return Ok(None);
    };
    if !value.is_finite() {
        return Err(CalcError::Overflow);
    }
    Ok(Some(value))
}

/// Shortest round-trip decimal without exponent; `-0` renders as `0`.
///
/// The output is always accepted by [`parse_literal`].
#[must_use]
pub fn format_plain(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Shortest round-trip rendering in "general" style.
///
/// Plain decimal for decimal exponents in `-4..21`, otherwise
/// `<mantissa>e<sign><two or more digits>` such as `1e+21` or `2.5e-07`.
#[must_use]
pub fn format_general(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return format!("{value}");
    }
    let scientific = format!("{value:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return format_plain(value);
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return format_plain(value);
    };
    if (-4..EXPONENT_THRESHOLD).contains(&exponent) {
        format_plain(value)
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    }
}
