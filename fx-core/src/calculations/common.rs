//! Common utility functions for calculator derivations.
//!
//! This module provides shared functionality used by both calculators,
//! including the fixed 5-decimal rounding and lenient number parsing of
//! raw field text.

use tracing::debug;

/// Scale used by [`round5`]: five decimal places.
const ROUND5_SCALE: f64 = 100_000.0;

/// Rounds a value to exactly five decimal places, half away from zero.
///
/// The value is scaled by 10^5, rounded to the nearest integer (midpoints
/// away from zero) and scaled back. Non-finite values pass through
/// unchanged.
///
/// # Examples
///
/// ```
/// use fx_core::calculations::common::round5;
///
/// assert_eq!(round5(1034.615384615), 1034.61538);
/// assert_eq!(round5(0.000005), 0.00001);
/// assert_eq!(round5(-0.000005), -0.00001); // Away from zero
/// assert!(round5(f64::INFINITY).is_infinite());
/// ```
pub fn round5(value: f64) -> f64 {
    (value * ROUND5_SCALE).round() / ROUND5_SCALE
}

/// Rounds a value to five decimal places with midpoints going up, toward
/// positive infinity.
///
/// This differs from [`round5`] only on negative midpoints: `-0.000005`
/// becomes `-0.0` here but `-0.00001` there. A result of zero keeps the
/// sign of the input. Non-finite values pass through unchanged.
///
/// ```
/// use fx_core::calculations::common::round5_half_up;
///
/// assert_eq!(round5_half_up(0.000005), 0.00001);
/// assert_eq!(round5_half_up(-0.015625), -0.01562);
/// assert_eq!(round5_half_up(-0.015626), -0.01563);
/// ```
pub fn round5_half_up(value: f64) -> f64 {
    let scaled = value * ROUND5_SCALE;
    let floor = scaled.floor();
    let mut rounded = if scaled - floor >= 0.5 { floor + 1.0 } else { floor };
    if rounded == 0.0 {
        rounded = rounded.copysign(scaled);
    }
    rounded / ROUND5_SCALE
}

/// Parses raw field text into a number, substituting 0 when it is not one.
///
/// Leading whitespace is skipped and the longest prefix that reads as a
/// decimal literal is used, so `"12abc"` is 12 and `"abc"` is 0. A parsed
/// zero is always returned as positive zero.
///
/// # Examples
///
/// ```
/// use fx_core::calculations::common::parse_number;
///
/// assert_eq!(parse_number("1.35"), 1.35);
/// assert_eq!(parse_number("  -2e3"), -2000.0);
/// assert_eq!(parse_number("abc"), 0.0);
/// assert_eq!(parse_number(""), 0.0);
/// ```
pub fn parse_number(raw: &str) -> f64 {
    match float_prefix(raw.trim_start()).and_then(|prefix| prefix.parse::<f64>().ok()) {
        Some(value) if value != 0.0 => value,
        Some(_) => 0.0,
        None => {
            debug!(input = %raw, "not a number, using 0");
            0.0
        }
    }
}

/// Returns the longest prefix of `s` that forms a decimal float literal.
fn float_prefix(s: &str) -> Option<&str> {
    const INFINITY: &str = "Infinity";

    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with(INFINITY) {
        return Some(&s[..end + INFINITY.len()]);
    }

    let int_start = end;
    end = skip_digits(bytes, end);
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = skip_digits(bytes, end + 1);
        let frac_digits = frac_end - (end + 1);
        if digits + frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }
    if digits == 0 {
        return None;
    }

    // The exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = skip_digits(bytes, exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    Some(&s[..end])
}

fn skip_digits(
    bytes: &[u8],
    mut pos: usize,
) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    pos
}
