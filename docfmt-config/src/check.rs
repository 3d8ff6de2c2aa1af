//! Structural and range checks on a persisted config
//!
//! Unlike `decode`, which silently fills gaps, this reports every missing
//! required field, unsupported label and out-of-range value.

use docfmt_core::{Alignment, CanonicalConfig, FormatError, Margins, Orientation, PageSettings, StyleSpec};
use docfmt_units::{parse_points, FieldKind, UnitEngine};

use crate::report::Report;

pub const SUPPORTED_PAPER_SIZES: [&str; 7] = ["A3", "A4", "A5", "B4", "B5", "Letter", "Legal"];

/// Every style must carry these
pub const REQUIRED_STYLE_FIELDS: [&str; 4] = ["font_size", "font_name_cn", "alignment", "line_spacing"];

pub fn check_config(config: &CanonicalConfig, engine: &UnitEngine) -> Report {
    let mut report = Report::new();

    match &config.page_settings {
        Some(page) => check_page(page, engine, &mut report),
        None => report.push(FormatError::missing_field("page_settings")),
    }

    if config.styles.is_empty() {
        report.push(
            FormatError::unusual_value("No styles defined; documents will use defaults")
                .at("styles"),
        );
    }
    for (id, style) in &config.styles {
        check_style(id, style, engine, &mut report);
    }

    report
}

fn check_page(page: &PageSettings, engine: &UnitEngine, report: &mut Report) {
    match page.paper_size.as_deref() {
        None => report.push(FormatError::missing_field("page_settings.paper_size")),
        Some(size) if !SUPPORTED_PAPER_SIZES.contains(&size) => report.push(
            FormatError::unusual_value(format!("Uncommon paper size: {}", size))
                .at("page_settings.paper_size")
                .with_suggestion(format!("Common sizes: {}", SUPPORTED_PAPER_SIZES.join(", "))),
        ),
        Some(_) => {}
    }

    match page.orientation.as_deref() {
        None => report.push(FormatError::missing_field("page_settings.orientation")),
        Some(raw) if Orientation::parse(raw).is_none() => report.push(
            FormatError::unsupported_value("page_settings.orientation", raw)
                .with_suggestion("Use portrait or landscape"),
        ),
        Some(_) => {}
    }

    match &page.margins {
        None => report.push(FormatError::missing_field("page_settings.margins")),
        Some(margins) => check_margins(margins, engine, report),
    }
}

fn check_margins(margins: &Margins, engine: &UnitEngine, report: &mut Report) {
    let sides = [
        ("top", &margins.top),
        ("bottom", &margins.bottom),
        ("left", &margins.left),
        ("right", &margins.right),
    ];
    for (side, raw) in sides {
        let path = format!("page_settings.margins.{}", side);
        match raw.as_deref() {
            None => report.push(FormatError::missing_field(&path)),
            Some(raw) => check_points(&path, raw, FieldKind::Margin, engine, report),
        }
    }
}

fn check_style(id: &str, style: &StyleSpec, engine: &UnitEngine, report: &mut Report) {
    let path = |name: &str| format!("styles.{}.{}", id, name);

    let required = [
        style.font_size.is_some(),
        style.font_name_cn.is_some(),
        style.alignment.is_some(),
        style.line_spacing.is_some(),
    ];
    for (name, present) in REQUIRED_STYLE_FIELDS.into_iter().zip(required) {
        if !present {
            report.push(FormatError::missing_field(&path(name)));
        }
    }

    if let Some(raw) = style.alignment.as_deref() {
        if Alignment::parse(raw).is_none() {
            report.push(
                FormatError::unsupported_value(&path("alignment"), raw)
                    .with_suggestion("Use left, center, right or justify"),
            );
        }
    }

    let physical = [
        ("font_size", FieldKind::FontSize, &style.font_size),
        ("line_spacing", FieldKind::LineSpacing, &style.line_spacing),
        ("space_before", FieldKind::Spacing, &style.space_before),
        ("space_after", FieldKind::Spacing, &style.space_after),
        ("first_line_indent", FieldKind::Indent, &style.first_line_indent),
    ];
    for (name, kind, raw) in physical {
        if let Some(raw) = raw.as_deref() {
            check_points(&path(name), raw, kind, engine, report);
        }
    }
}

fn check_points(path: &str, raw: &str, kind: FieldKind, engine: &UnitEngine, report: &mut Report) {
    match parse_points(raw) {
        Some(points) => report.record(path, engine.validate_points(points, kind)),
        None => report.push(FormatError::parse_error(format!("{:?} is not a point value", raw)).at(path)),
    }
}
