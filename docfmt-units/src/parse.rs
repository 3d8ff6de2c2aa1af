//! Measurement string parsing - canonical "72pt" and free-form "2.54cm", "三号", "1.5倍"

use crate::names;
use crate::unit::{Unit, UnitError};

/// Prefix marking an exact (fixed) line spacing, e.g. "固定值20磅"
const FIXED_PREFIX: &str = "固定值";

/// Parse a canonical point string: optional sign, a decimal literal,
/// optional whitespace, then the literal suffix `pt`.
///
/// Returns `None` for anything else, including literals too large for
/// `f64`; callers apply their own defaults.
pub fn parse_points(s: &str) -> Option<f64> {
    let s = s.trim();
    let number = s.strip_suffix("pt")?.trim_end();
    if !is_decimal_literal(number) {
        return None;
    }
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a free-form measurement into points.
///
/// Supported formats:
/// - Canonical: "72pt", "72 pt"
/// - Any known unit: "2.54cm", "25.4 mm", "1in", "96px"
/// - Bare number (points): "12"
/// - Traditional size names: "小四", "三号"
/// - Line multiples: "1.5倍" (times `base_font_size`)
/// - Character widths: "2字符" (times `base_font_size`)
/// - Fixed line spacing: "固定值20pt"
pub fn parse_measure(s: &str, base_font_size: f64) -> Result<f64, UnitError> {
    let mut s = s.trim();
    if let Some(rest) = s.strip_prefix(FIXED_PREFIX) {
        s = rest.trim();
    }

    if s.is_empty() {
        return Err(UnitError::Malformed("empty measurement".to_string()));
    }

    if let Some(size) = names::by_name(s) {
        return Ok(size.pt);
    }

    // Find where the number ends and unit begins
    let split_pos = s
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || ((*c == '-' || *c == '+') && *i == 0)))
        .map(|(i, _)| i)
        .unwrap_or(s.len());

    let num_str = s[..split_pos].trim();
    let unit_str = s[split_pos..].trim();

    if !is_decimal_literal(num_str) {
        return Err(UnitError::Malformed(format!("no number found in: {}", s)));
    }

    let value: f64 = num_str
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| UnitError::InvalidNumber(num_str.to_string()))?;

    if unit_str.is_empty() {
        return Ok(value);
    }

    let points = match unit_str.parse::<Unit>()? {
        Unit::Char | Unit::Multiple => value * base_font_size,
        unit => value * unit.factor(),
    };
    Ok(points)
}

/// `[+-]?` digits with at most one `.`, at least one digit
fn is_decimal_literal(s: &str) -> bool {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    let mut seen_digit = false;
    let mut seen_dot = false;
    for c in digits.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}
