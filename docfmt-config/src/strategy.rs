//! Display-unit selection for decoded values

use docfmt_units::{FieldKind, Unit, NOMINAL_PT};

/// Chooses the unit a decoded point value is presented in
pub trait DisplayUnitStrategy {
    fn display_unit(&self, field: FieldKind, points: f64) -> Unit;

    /// Short name used in logs and by the server's `DOCFMT_STRATEGY`
    fn name(&self) -> &'static str;
}

/// Centimeters for lengths, line multiples where the spacing is a whole
/// number of nominal lines, points for fonts
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricHeuristic;

impl DisplayUnitStrategy for MetricHeuristic {
    fn display_unit(&self, field: FieldKind, points: f64) -> Unit {
        match field {
            FieldKind::Margin | FieldKind::Spacing | FieldKind::Indent => Unit::Cm,
            FieldKind::LineSpacing => line_spacing_unit(points),
            FieldKind::FontSize => Unit::Pt,
        }
    }

    fn name(&self) -> &'static str {
        "metric"
    }
}

/// Inches for margins; everything else as `MetricHeuristic`
#[derive(Debug, Clone, Copy, Default)]
pub struct ImperialHeuristic;

impl DisplayUnitStrategy for ImperialHeuristic {
    fn display_unit(&self, field: FieldKind, points: f64) -> Unit {
        match field {
            FieldKind::Margin => Unit::Inch,
            other => MetricHeuristic.display_unit(other, points),
        }
    }

    fn name(&self) -> &'static str {
        "imperial"
    }
}

fn line_spacing_unit(points: f64) -> Unit {
    if points > 0.0 && points % NOMINAL_PT == 0.0 {
        Unit::Multiple
    } else {
        Unit::Pt
    }
}

impl<S: DisplayUnitStrategy + ?Sized> DisplayUnitStrategy for &S {
    fn display_unit(&self, field: FieldKind, points: f64) -> Unit {
        (**self).display_unit(field, points)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<S: DisplayUnitStrategy + ?Sized> DisplayUnitStrategy for Box<S> {
    fn display_unit(&self, field: FieldKind, points: f64) -> Unit {
        (**self).display_unit(field, points)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_line_spacing() {
        let s = MetricHeuristic;
        assert_eq!(s.display_unit(FieldKind::LineSpacing, 24.0), Unit::Multiple);
        assert_eq!(s.display_unit(FieldKind::LineSpacing, 12.0), Unit::Multiple);
        assert_eq!(s.display_unit(FieldKind::LineSpacing, 20.0), Unit::Pt);
        assert_eq!(s.display_unit(FieldKind::LineSpacing, 0.0), Unit::Pt);
    }

    #[test]
    fn test_metric_lengths() {
        let s = MetricHeuristic;
        assert_eq!(s.display_unit(FieldKind::Margin, 72.0), Unit::Cm);
        assert_eq!(s.display_unit(FieldKind::Indent, 24.0), Unit::Cm);
        assert_eq!(s.display_unit(FieldKind::FontSize, 12.0), Unit::Pt);
    }

    #[test]
    fn test_imperial_margins() {
        let s = ImperialHeuristic;
        assert_eq!(s.display_unit(FieldKind::Margin, 72.0), Unit::Inch);
        assert_eq!(s.display_unit(FieldKind::Spacing, 6.0), Unit::Cm);
        assert_eq!(s.name(), "imperial");
    }

    #[test]
    fn test_boxed_strategy() {
        let boxed: Box<dyn DisplayUnitStrategy> = Box::new(ImperialHeuristic);
        assert_eq!(boxed.display_unit(FieldKind::Margin, 1.0), Unit::Inch);
        assert_eq!(boxed.name(), "imperial");
    }
}
