//! The editable form model
//!
//! Produced by `ConfigConverter::decode`, mutated field by field while the
//! user edits, consumed by `ConfigConverter::encode`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use docfmt_core::{Alignment, Orientation};
use docfmt_units::{FieldKind, Unit, UnitEngine};

use crate::display::DisplayValue;
use crate::report::Report;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormModel {
    pub page_settings: FormPageSettings,
    pub styles: BTreeMap<String, FormStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormPageSettings {
    pub paper_size: String,
    pub orientation: Orientation,
    pub margins: FormMargins,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormMargins {
    pub top: DisplayValue,
    pub bottom: DisplayValue,
    pub left: DisplayValue,
    pub right: DisplayValue,
}

/// Margin side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl FormMargins {
    pub fn get(&self, side: Side) -> &DisplayValue {
        match side {
            Side::Top => &self.top,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut DisplayValue {
        match side {
            Side::Top => &mut self.top,
            Side::Bottom => &mut self.bottom,
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// One editable style record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormStyle {
    /// Always points
    pub font_size_pt: f64,
    pub font_name_cn: String,
    pub font_name_en: String,
    pub alignment: Alignment,
    pub line_spacing: DisplayValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_before: Option<DisplayValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_after: Option<DisplayValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_line_indent: Option<DisplayValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
}

impl FormStyle {
    pub fn is_bold(&self) -> bool {
        self.bold == Some(true)
    }

    /// Set the font size from a traditional size name. Returns false if the
    /// name is unknown; the style is left untouched in that case.
    pub fn set_font_size_named(&mut self, engine: &UnitEngine, name: &str) -> bool {
        match engine.named_size(name) {
            Some(pt) => {
                self.font_size_pt = pt;
                true
            }
            None => false,
        }
    }

    /// Add or replace an optional spacing field
    pub fn set_space_before(&mut self, value: f64, unit: Unit) {
        self.space_before = Some(DisplayValue::new(value, unit));
    }

    pub fn set_space_after(&mut self, value: f64, unit: Unit) {
        self.space_after = Some(DisplayValue::new(value, unit));
    }

    pub fn set_first_line_indent(&mut self, value: f64, unit: Unit) {
        self.first_line_indent = Some(DisplayValue::new(value, unit));
    }
}

impl FormModel {
    pub fn style(&self, id: &str) -> Option<&FormStyle> {
        self.styles.get(id)
    }

    pub fn style_mut(&mut self, id: &str) -> Option<&mut FormStyle> {
        self.styles.get_mut(id)
    }

    /// Every physical field with its dotted path, kind and point value
    pub fn physical_fields(&self) -> Vec<(String, FieldKind, f64)> {
        let mut fields = Vec::new();
        let margins = &self.page_settings.margins;
        for side in Side::ALL {
            fields.push((
                format!("page_settings.margins.{}", side.as_str()),
                FieldKind::Margin,
                margins.get(side).points(),
            ));
        }

        for (id, style) in &self.styles {
            let path = |name: &str| format!("styles.{}.{}", id, name);
            fields.push((path("font_size"), FieldKind::FontSize, style.font_size_pt));
            fields.push((path("line_spacing"), FieldKind::LineSpacing, style.line_spacing.points()));
            let optional = [
                ("space_before", FieldKind::Spacing, &style.space_before),
                ("space_after", FieldKind::Spacing, &style.space_after),
                ("first_line_indent", FieldKind::Indent, &style.first_line_indent),
            ];
            for (name, kind, value) in optional {
                if let Some(v) = value {
                    fields.push((path(name), kind, v.points()));
                }
            }
        }
        fields
    }

    /// Validate every physical field. Errors in the report block saving.
    pub fn validate(&self, engine: &UnitEngine) -> Report {
        let mut report = Report::new();
        for (path, kind, points) in self.physical_fields() {
            report.record(&path, engine.validate_points(points, kind));
        }
        report
    }
}
