use std::str::FromStr;

use thiserror::Error;

/// Formats a number the way a browser prints it.
///
/// Shortest round-trip digits, `Infinity`/`-Infinity`/`NaN` for non-finite
/// values, negative zero as `0`, and exponent notation outside
/// `[1e-6, 1e21)`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let exp = format!("{value:e}");
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exp,
    }
}

/// Error returned when a change event is not of the form `field=value`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected FIELD=VALUE, got '{0}'")]
pub struct ParseChangeError(String);

/// One change event given as `field=value` text.
///
/// The value is kept verbatim; turning it into a number is up to the
/// calculator, which reads anything unparseable as 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: String,
    pub raw: String,
}

impl FieldChange {
    /// Whether `s` looks like a change event rather than a page path.
    pub fn is_change(s: &str) -> bool {
        s.contains('=')
    }
}

impl FromStr for FieldChange {
    type Err = ParseChangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, raw) = s
            .split_once('=')
            .ok_or_else(|| ParseChangeError(s.to_string()))?;
        let field = field.trim();
        if field.is_empty() {
            return Err(ParseChangeError(s.to_string()));
        }

        Ok(Self {
            field: field.to_string(),
            raw: raw.to_string(),
        })
    }
}
