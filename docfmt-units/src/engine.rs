//! The unit engine: point arithmetic, size names, validation and formatting
//!
//! `UnitEngine` is a plain value. Construct one and pass it by reference to
//! whatever needs conversions; it holds no mutable state.

use serde::Serialize;
use crate::names::{self, NamedSize, NAMED_SIZES};
use crate::rules::{FieldKind, RuleTable};
use crate::unit::{Unit, UnitError, PT_PER_CM};

/// Outcome of validating one value
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Validation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Validation {
    pub fn ok() -> Self {
        Validation { valid: true, warning: None, error: None }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Validation { valid: true, warning: Some(message.into()), error: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Validation { valid: false, warning: None, error: Some(message.into()) }
    }

    /// True when there is neither a warning nor an error
    pub fn is_clean(&self) -> bool {
        self.valid && self.warning.is_none()
    }
}

/// Stateless conversion and validation service
#[derive(Debug, Clone, Default)]
pub struct UnitEngine {
    rules: RuleTable,
}

impl UnitEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: RuleTable) -> Self {
        UnitEngine { rules }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    // ========== Conversion ==========

    /// Convert a value in `unit` to points
    pub fn to_base(&self, value: f64, unit: Unit) -> f64 {
        unit.to_points(value)
    }

    /// Convert points to a value in `unit`
    pub fn from_base(&self, points: f64, unit: Unit) -> f64 {
        unit.from_points(points)
    }

    /// Convert between two units via points
    pub fn convert(&self, value: f64, from: Unit, to: Unit) -> f64 {
        if from == to {
            return value;
        }
        self.from_base(self.to_base(value, from), to)
    }

    /// Convert with a unit given as text. Unknown units are an error.
    pub fn to_base_str(&self, value: f64, unit: &str) -> Result<f64, UnitError> {
        Ok(self.to_base(value, unit.parse()?))
    }

    /// Convert points to a unit given as text. Unknown units are an error.
    pub fn from_base_str(&self, points: f64, unit: &str) -> Result<f64, UnitError> {
        Ok(self.from_base(points, unit.parse()?))
    }

    // ========== Size names ==========

    /// Closest traditional size name within 0.5pt
    pub fn nearest_named_size(&self, points: f64) -> Option<&'static NamedSize> {
        names::nearest(&NAMED_SIZES, points)
    }

    /// Point value of a traditional size name
    pub fn named_size(&self, name: &str) -> Option<f64> {
        names::by_name(name).map(|s| s.pt)
    }

    /// "12pt (小四)" or "13pt"
    pub fn font_size_label(&self, points: f64) -> String {
        let pt = format_value(points, 2);
        match self.nearest_named_size(points) {
            Some(size) => format!("{}pt ({})", pt, size.name),
            None => format!("{}pt", pt),
        }
    }

    /// Parenthesised equivalent shown next to an input, e.g. "(2.54cm)"
    pub fn equivalent_display(&self, value: f64, unit: Unit, field: FieldKind) -> String {
        let points = self.to_base(value, unit);
        if field == FieldKind::FontSize {
            let pt = format_value(points, 2);
            return match self.nearest_named_size(points) {
                Some(size) => format!("({}pt, {})", pt, size.name),
                None => format!("({}pt)", pt),
            };
        }
        match unit {
            Unit::Cm => format!("({}pt)", format_value(points.round(), 0)),
            _ => format!("({}cm)", format_value(points / PT_PER_CM, 2)),
        }
    }

    // ========== Validation ==========

    /// Check a value against the rule for `field`
    pub fn validate(&self, value: f64, unit: Unit, field: FieldKind) -> Validation {
        let points = self.to_base(value, unit);
        self.validate_points(points, field)
    }

    /// Like `validate`, with the unit given as text
    pub fn validate_str(&self, value: f64, unit: &str, field: FieldKind) -> Result<Validation, UnitError> {
        Ok(self.validate(value, unit.parse()?, field))
    }

    pub fn validate_points(&self, points: f64, field: FieldKind) -> Validation {
        if !points.is_finite() {
            return Validation::error(format!("{} must be a finite number", field.label()));
        }

        let rule = self.rules.get(field);
        if points < rule.min {
            return if rule.min == 0.0 {
                Validation::error(format!("{} cannot be negative", field.label()))
            } else {
                Validation::error(format!(
                    "{} is too small; use at least {}pt",
                    field.label(),
                    format_value(rule.min, 2)
                ))
            };
        }
        if points > rule.max {
            return Validation::warning(format!(
                "{} is very large (over {}pt). {}",
                field.label(),
                format_value(rule.max, 2),
                rule.message
            ));
        }
        if points < rule.warning_min || points > rule.warning_max {
            return Validation::warning(rule.message.clone());
        }
        Validation::ok()
    }
}

/// Round to `decimals` places and strip trailing zeros and a trailing point.
///
/// `12.50 -> "12.5"`, `12.00 -> "12"`, `-0.001 -> "0"`
pub fn format_value(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value);
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    match text {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Round to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;

    fn engine() -> UnitEngine {
        UnitEngine::new()
    }

    #[test]
    fn test_round_trip_all_units() {
        let e = engine();
        for unit in Unit::ALL {
            for m in [0.0, 0.01, 1.0, 2.54, 12.0, 72.0, 1234.5678] {
                let back = e.from_base(e.to_base(m, unit), unit);
                let tolerance = 1e-6 * m.abs().max(1.0);
                assert!((back - m).abs() <= tolerance, "{} {}: {}", m, unit, back);
            }
        }
    }

    #[test]
    fn test_known_factors() {
        let e = engine();
        assert_eq!(e.to_base(1.0, Unit::Inch), 72.0);
        assert_eq!(e.to_base(4.0, Unit::Px), 3.0);
        assert_eq!(e.to_base(1.5, Unit::Multiple), 18.0);
        assert!((e.from_base(72.0, Unit::Cm) - 2.54).abs() < 1e-5);
        assert!((e.convert(10.0, Unit::Mm, Unit::Cm) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_string_units_are_closed() {
        let e = engine();
        assert_eq!(e.to_base_str(2.0, "inch").unwrap(), 144.0);
        assert!(matches!(e.to_base_str(2.0, "parsec"), Err(UnitError::UnknownUnit(_))));
        assert!(e.from_base_str(72.0, "").is_err());
    }

    #[test]
    fn test_nearest_named_size() {
        let e = engine();
        assert_eq!(e.nearest_named_size(12.0).unwrap().name, "小四");
        assert_eq!(e.nearest_named_size(12.3).unwrap().name, "小四");
        assert!(e.nearest_named_size(13.0).is_none());
        assert_eq!(e.named_size("三号"), Some(16.0));
    }

    #[test]
    fn test_font_size_label() {
        let e = engine();
        assert_eq!(e.font_size_label(12.0), "12pt (小四)");
        assert_eq!(e.font_size_label(10.5), "10.5pt (五号)");
        assert_eq!(e.font_size_label(13.0), "13pt");
    }

    #[test]
    fn test_equivalent_display() {
        let e = engine();
        assert_eq!(e.equivalent_display(72.0, Unit::Pt, FieldKind::Margin), "(2.54cm)");
        assert_eq!(e.equivalent_display(2.54, Unit::Cm, FieldKind::Margin), "(72pt)");
        assert_eq!(e.equivalent_display(16.0, Unit::Pt, FieldKind::FontSize), "(16pt, 三号)");
        assert_eq!(e.equivalent_display(13.0, Unit::Pt, FieldKind::FontSize), "(13pt)");
    }

    #[test]
    fn test_validate_margin() {
        let e = engine();
        let negative = e.validate(-5.0, Unit::Pt, FieldKind::Margin);
        assert!(!negative.valid);
        assert!(negative.error.is_some());

        let large = e.validate(200.0, Unit::Pt, FieldKind::Margin);
        assert!(large.valid);
        assert!(large.warning.is_some());
        assert!(large.error.is_none());

        let normal = e.validate(72.0, Unit::Pt, FieldKind::Margin);
        assert!(normal.is_clean());
        assert_eq!(normal, Validation::ok());
    }

    #[test]
    fn test_validate_converts_units() {
        let e = engine();
        // 2.54cm == 72pt
        assert!(e.validate(2.54, Unit::Cm, FieldKind::Margin).is_clean());
        // 10 inches == 720pt, beyond the absolute maximum: warned, not rejected
        let huge = e.validate(10.0, Unit::Inch, FieldKind::Margin);
        assert!(huge.valid);
        assert!(huge.warning.unwrap().contains("very large"));
    }

    #[test]
    fn test_validate_font_size() {
        let e = engine();
        assert!(!e.validate(4.0, Unit::Pt, FieldKind::FontSize).valid);
        assert!(e.validate(6.0, Unit::Pt, FieldKind::FontSize).warning.is_some());
        assert!(e.validate(12.0, Unit::Pt, FieldKind::FontSize).is_clean());
        assert!(e.validate(80.0, Unit::Pt, FieldKind::FontSize).warning.is_some());
    }

    #[test]
    fn test_validate_spacing_and_line_spacing() {
        let e = engine();
        assert!(!e.validate(-1.0, Unit::Pt, FieldKind::Spacing).valid);
        assert!(e.validate(0.0, Unit::Pt, FieldKind::Spacing).is_clean());
        assert!(!e.validate(-0.5, Unit::Multiple, FieldKind::LineSpacing).valid);
        assert!(e.validate(1.5, Unit::Multiple, FieldKind::LineSpacing).is_clean());
        assert!(e.validate(4.0, Unit::Multiple, FieldKind::LineSpacing).warning.is_some());
        assert!(!e.validate(-2.0, Unit::Char, FieldKind::Indent).valid);
    }

    #[test]
    fn test_validate_non_finite() {
        let e = engine();
        assert!(!e.validate(f64::NAN, Unit::Pt, FieldKind::Margin).valid);
        assert!(!e.validate(f64::INFINITY, Unit::Pt, FieldKind::Indent).valid);
    }

    #[test]
    fn test_custom_rules() {
        let rules = RuleTable::default()
            .with_rule(FieldKind::Margin, Rule::new(36.0, 300.0, 54.0, 108.0, "House style"));
        let e = UnitEngine::with_rules(rules);
        let v = e.validate(20.0, Unit::Pt, FieldKind::Margin);
        assert!(!v.valid);
        assert!(v.error.unwrap().contains("at least 36pt"));
        assert_eq!(e.validate(120.0, Unit::Pt, FieldKind::Margin).warning.as_deref(), Some("House style"));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(12.50, 2), "12.5");
        assert_eq!(format_value(12.00, 2), "12");
        assert_eq!(format_value(2.539999, 2), "2.54");
        assert_eq!(format_value(100.0, 0), "100");
        assert_eq!(format_value(-0.001, 2), "0");
        assert_eq!(format_value(0.125, 4), "0.125");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(2.5400012, 2), 2.54);
        assert_eq!(round_to(72.004, 2), 72.0);
    }
}
