//! Canonical config <-> form model conversion
//!
//! `decode` fills every gap with a documented default so the form is always
//! complete. `encode` writes points only, taken from each value's
//! authoritative `points`, never from its rounded display magnitude.

use std::collections::BTreeMap;
use tracing::{debug, warn};
use docfmt_core::{Alignment, CanonicalConfig, Margins, Orientation, PageSettings, StyleSpec};
use docfmt_units::{format_value, parse_points, FieldKind, UnitEngine};

use crate::display::DisplayValue;
use crate::form::{FormMargins, FormModel, FormPageSettings, FormStyle};
use crate::strategy::{DisplayUnitStrategy, MetricHeuristic};

pub const DEFAULT_PAPER_SIZE: &str = "A4";
/// 1 inch
pub const DEFAULT_MARGIN_PT: f64 = 72.0;
/// 小四
pub const DEFAULT_FONT_SIZE_PT: f64 = 12.0;
pub const DEFAULT_LINE_SPACING_PT: f64 = 20.0;
pub const DEFAULT_FONT_CN: &str = "宋体";
pub const DEFAULT_FONT_EN: &str = "Times New Roman";

/// Decimal places kept in persisted point strings
pub const POINT_DECIMALS: usize = 4;

pub struct ConfigConverter<'a, S = MetricHeuristic> {
    engine: &'a UnitEngine,
    strategy: S,
}

impl<'a> ConfigConverter<'a, MetricHeuristic> {
    pub fn new(engine: &'a UnitEngine) -> Self {
        ConfigConverter { engine, strategy: MetricHeuristic }
    }
}

impl<'a, S: DisplayUnitStrategy> ConfigConverter<'a, S> {
    pub fn with_strategy(engine: &'a UnitEngine, strategy: S) -> Self {
        ConfigConverter { engine, strategy }
    }

    pub fn engine(&self) -> &'a UnitEngine {
        self.engine
    }

    // ========== Decode ==========

    pub fn decode(&self, config: &CanonicalConfig) -> FormModel {
        let page = config.page_settings.clone().unwrap_or_default();
        let page_settings = self.decode_page(&page);

        let styles: BTreeMap<String, FormStyle> = config
            .styles
            .iter()
            .map(|(id, spec)| (id.clone(), self.decode_style(id, spec)))
            .collect();

        debug!(
            strategy = self.strategy.name(),
            styles = styles.len(),
            "decoded formatting config"
        );

        FormModel { page_settings, styles }
    }

    fn decode_page(&self, page: &PageSettings) -> FormPageSettings {
        let orientation = match page.orientation.as_deref() {
            None => Orientation::default(),
            Some(raw) => Orientation::parse(raw).unwrap_or_else(|| {
                warn!(value = raw, "unknown orientation, using portrait");
                Orientation::default()
            }),
        };

        let margins = page.margins.clone().unwrap_or_default();
        let margin = |name: &str, raw: &Option<String>| {
            let points = points_or(raw.as_deref(), DEFAULT_MARGIN_PT, name);
            self.present(FieldKind::Margin, points)
        };

        FormPageSettings {
            paper_size: page
                .paper_size
                .clone()
                .unwrap_or_else(|| DEFAULT_PAPER_SIZE.to_string()),
            orientation,
            margins: FormMargins {
                top: margin("page_settings.margins.top", &margins.top),
                bottom: margin("page_settings.margins.bottom", &margins.bottom),
                left: margin("page_settings.margins.left", &margins.left),
                right: margin("page_settings.margins.right", &margins.right),
            },
        }
    }

    fn decode_style(&self, id: &str, spec: &StyleSpec) -> FormStyle {
        let path = |name: &str| format!("styles.{}.{}", id, name);

        let alignment = match spec.alignment.as_deref() {
            None => Alignment::default(),
            Some(raw) => Alignment::parse(raw).unwrap_or_else(|| {
                warn!(style = id, value = raw, "unknown alignment, using left");
                Alignment::default()
            }),
        };

        let line_spacing = points_or(
            spec.line_spacing.as_deref(),
            DEFAULT_LINE_SPACING_PT,
            &path("line_spacing"),
        );

        // Optional fields stay absent when absent; a present but malformed
        // value collapses to zero.
        let optional = |kind: FieldKind, raw: &Option<String>, name: &str| {
            raw.as_deref()
                .map(|s| self.present(kind, points_or(Some(s), 0.0, &path(name))))
        };

        FormStyle {
            font_size_pt: points_or(
                spec.font_size.as_deref(),
                DEFAULT_FONT_SIZE_PT,
                &path("font_size"),
            ),
            font_name_cn: spec
                .font_name_cn
                .clone()
                .unwrap_or_else(|| DEFAULT_FONT_CN.to_string()),
            font_name_en: spec
                .font_name_en
                .clone()
                .unwrap_or_else(|| DEFAULT_FONT_EN.to_string()),
            alignment,
            line_spacing: self.present(FieldKind::LineSpacing, line_spacing),
            space_before: optional(FieldKind::Spacing, &spec.space_before, "space_before"),
            space_after: optional(FieldKind::Spacing, &spec.space_after, "space_after"),
            first_line_indent: optional(FieldKind::Indent, &spec.first_line_indent, "first_line_indent"),
            bold: spec.bold.filter(|b| *b),
        }
    }

    fn present(&self, field: FieldKind, points: f64) -> DisplayValue {
        DisplayValue::from_points(points, self.strategy.display_unit(field, points))
    }

    // ========== Encode ==========

    pub fn encode(&self, form: &FormModel) -> CanonicalConfig {
        let page = &form.page_settings;
        let margins = &page.margins;

        let page_settings = PageSettings {
            paper_size: Some(page.paper_size.clone()),
            orientation: Some(page.orientation.as_str().to_string()),
            margins: Some(Margins {
                top: Some(format_points(margins.top.points())),
                bottom: Some(format_points(margins.bottom.points())),
                left: Some(format_points(margins.left.points())),
                right: Some(format_points(margins.right.points())),
            }),
        };

        let styles: BTreeMap<String, StyleSpec> = form
            .styles
            .iter()
            .map(|(id, style)| (id.clone(), encode_style(style)))
            .collect();

        debug!(styles = styles.len(), "encoded formatting config");

        CanonicalConfig {
            page_settings: Some(page_settings),
            styles,
        }
    }
}

fn encode_style(style: &FormStyle) -> StyleSpec {
    let optional = |v: &Option<DisplayValue>| v.as_ref().map(|v| format_points(v.points()));
    StyleSpec {
        font_size: Some(format_points(style.font_size_pt)),
        font_name_cn: Some(style.font_name_cn.clone()),
        font_name_en: Some(style.font_name_en.clone()),
        alignment: Some(style.alignment.as_str().to_string()),
        line_spacing: Some(format_points(style.line_spacing.points())),
        bold: style.is_bold().then_some(true),
        space_before: optional(&style.space_before),
        space_after: optional(&style.space_after),
        first_line_indent: optional(&style.first_line_indent),
    }
}

/// `72.0 -> "72pt"`, `14.17323 -> "14.1732pt"`
pub fn format_points(points: f64) -> String {
    format!("{}pt", format_value(points, POINT_DECIMALS))
}

/// Parse a point string, falling back to `default` when absent or malformed.
/// Only the malformed case is logged.
fn points_or(raw: Option<&str>, default: f64, field: &str) -> f64 {
    match raw {
        None => default,
        Some(s) => parse_points(s).unwrap_or_else(|| {
            warn!(field, value = s, default, "malformed point value, using default");
            default
        }),
    }
}
