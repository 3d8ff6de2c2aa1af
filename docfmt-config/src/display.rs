//! Editable scalar carrying both a display magnitude and its point value

use serde::{Deserialize, Serialize};
use docfmt_units::{format_value, round_to, FieldKind, Unit, UnitEngine, Validation};

/// Decimal places kept in the display magnitude
pub const DISPLAY_DECIMALS: i32 = 2;

/// A value as the user sees it (`2.54cm`) together with its canonical points.
///
/// `points` is authoritative and is what gets persisted. Every write path
/// recomputes `points` and `display`; the fields are private so nothing else
/// can desynchronize them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DisplayValueRepr")]
pub struct DisplayValue {
    value: f64,
    unit: Unit,
    points: f64,
    display: String,
}

/// Wire form. `points` may be omitted by clients that only know the
/// magnitude they typed.
#[derive(Deserialize)]
struct DisplayValueRepr {
    value: f64,
    unit: Unit,
    #[serde(default)]
    points: Option<f64>,
}

impl From<DisplayValueRepr> for DisplayValue {
    /// A sent `points` is kept only while it still agrees with `value` up to
    /// display rounding. An edited magnitude wins over a stale point value.
    fn from(repr: DisplayValueRepr) -> Self {
        match repr.points {
            Some(points) if agrees(repr.value, repr.unit, points) => {
                DisplayValue::assemble(repr.value, repr.unit, points)
            }
            _ => DisplayValue::new(repr.value, repr.unit),
        }
    }
}

/// True when `value` in `unit` is `points` rounded to `DISPLAY_DECIMALS`
fn agrees(value: f64, unit: Unit, points: f64) -> bool {
    let half_step = 0.5 * 10f64.powi(-DISPLAY_DECIMALS);
    let tolerance = half_step * unit.factor() + 1e-9;
    points.is_finite() && (unit.to_points(value) - points).abs() <= tolerance
}

impl DisplayValue {
    /// A value typed by the user in `unit`
    pub fn new(value: f64, unit: Unit) -> Self {
        DisplayValue::assemble(value, unit, unit.to_points(value))
    }

    /// Present an existing point value in `unit`. The display magnitude is
    /// rounded; the point value is kept exactly.
    pub fn from_points(points: f64, unit: Unit) -> Self {
        let value = round_to(unit.from_points(points), DISPLAY_DECIMALS);
        DisplayValue::assemble(value, unit, points)
    }

    fn assemble(value: f64, unit: Unit, points: f64) -> Self {
        DisplayValue {
            value,
            unit,
            points,
            display: render(value, unit),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn points(&self) -> f64 {
        self.points
    }

    /// e.g. "2.54cm", "1.5倍"
    pub fn display(&self) -> &str {
        &self.display
    }

    /// User typed a new magnitude in the current unit
    pub fn set_value(&mut self, value: f64) {
        *self = DisplayValue::new(value, self.unit);
    }

    /// User picked another unit. The physical length is unchanged; the
    /// magnitude is re-expressed in the new unit.
    pub fn set_unit(&mut self, unit: Unit) {
        *self = DisplayValue::from_points(self.points, unit);
    }

    /// Set both magnitude and unit
    pub fn set(&mut self, value: f64, unit: Unit) {
        *self = DisplayValue::new(value, unit);
    }

    /// Replace the point value, keeping the current unit
    pub fn set_points(&mut self, points: f64) {
        *self = DisplayValue::from_points(points, self.unit);
    }

    pub fn validate(&self, engine: &UnitEngine, field: FieldKind) -> Validation {
        engine.validate_points(self.points, field)
    }
}

fn render(value: f64, unit: Unit) -> String {
    format!("{}{}", format_value(value, 4), unit.symbol())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points_rounds_display_only() {
        let v = DisplayValue::from_points(90.0, Unit::Cm);
        assert_eq!(v.value(), 3.17);
        assert_eq!(v.points(), 90.0);
        assert_eq!(v.display(), "3.17cm");
    }

    #[test]
    fn test_new_computes_points() {
        let v = DisplayValue::new(1.0, Unit::Inch);
        assert_eq!(v.points(), 72.0);
        assert_eq!(v.display(), "1inch");
    }

    #[test]
    fn test_set_value_recomputes() {
        let mut v = DisplayValue::from_points(72.0, Unit::Cm);
        v.set_value(3.0);
        assert!((v.points() - 85.03938).abs() < 1e-9);
        assert_eq!(v.display(), "3cm");
    }

    #[test]
    fn test_set_unit_keeps_length() {
        let mut v = DisplayValue::from_points(72.0, Unit::Cm);
        v.set_unit(Unit::Inch);
        assert_eq!(v.points(), 72.0);
        assert_eq!(v.value(), 1.0);
        assert_eq!(v.unit(), Unit::Inch);
        assert_eq!(v.display(), "1inch");

        v.set_unit(Unit::Mm);
        assert_eq!(v.value(), 25.4);
        assert_eq!(v.points(), 72.0);
    }

    #[test]
    fn test_set_and_set_points() {
        let mut v = DisplayValue::from_points(24.0, Unit::Multiple);
        assert_eq!(v.display(), "2倍");
        v.set(1.5, Unit::Multiple);
        assert_eq!(v.points(), 18.0);
        v.set_points(30.0);
        assert_eq!(v.unit(), Unit::Multiple);
        assert_eq!(v.value(), 2.5);
    }

    #[test]
    fn test_deserialize_prefers_points() {
        let v: DisplayValue =
            serde_json::from_str(r#"{"value": 3.17, "unit": "cm", "points": 90, "display": "x"}"#).unwrap();
        assert_eq!(v.points(), 90.0);
        assert_eq!(v.display(), "3.17cm");

        let typed: DisplayValue = serde_json::from_str(r#"{"value": 2, "unit": "inch"}"#).unwrap();
        assert_eq!(typed.points(), 144.0);
    }

    #[test]
    fn test_deserialize_edited_value_overrides_stale_points() {
        let v: DisplayValue =
            serde_json::from_str(r#"{"value": 5, "unit": "cm", "points": 72}"#).unwrap();
        assert!((v.points() - 141.7323).abs() < 1e-9);
        assert_eq!(v.display(), "5cm");

        // unit switched on the client without touching points
        let v: DisplayValue =
            serde_json::from_str(r#"{"value": 2.54, "unit": "inch", "points": 72}"#).unwrap();
        assert!((v.points() - 182.88).abs() < 1e-9);
    }

    #[test]
    fn test_serialized_value_deserializes_to_itself() {
        for (points, unit) in [(90.0, Unit::Cm), (14.17323, Unit::Cm), (18.0, Unit::Multiple), (56.6929, Unit::Inch)] {
            let v = DisplayValue::from_points(points, unit);
            let json = serde_json::to_string(&v).unwrap();
            let back: DisplayValue = serde_json::from_str(&json).unwrap();
            assert_eq!(back, v, "{}", json);
        }
    }

    #[test]
    fn test_validate_uses_points() {
        let engine = UnitEngine::new();
        let v = DisplayValue::new(-1.0, Unit::Cm);
        assert!(!v.validate(&engine, FieldKind::Margin).valid);
    }
}
