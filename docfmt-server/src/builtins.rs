//! Built-in tools

use serde_json::{json, Value as JsonValue};
use docfmt_core::{CanonicalConfig, FormatError};
use docfmt_config::{check_config, ChangeDetector, FormModel};
use docfmt_units::{parse_measure, FieldKind, Unit, COMMON_FONT_SIZES, NOMINAL_PT};

use crate::context::ToolContext;
use crate::registry::ToolRegistry;
use crate::tools::{arg_f64, arg_f64_or, arg_object, arg_str, to_json, ArgMeta, ToolMeta, ToolPlugin};

/// Registry with every built-in tool
pub fn standard_registry() -> ToolRegistry {
    ToolRegistry::new()
        .with_tool(Decode)
        .with_tool(Encode)
        .with_tool(Validate)
        .with_tool(NearestSize)
        .with_tool(ParseMeasure)
        .with_tool(CheckConfig)
        .with_tool(HasChanges)
}

pub struct Decode;

static DECODE_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("config", "object", "Canonical formatting config (points only)"),
];

impl ToolPlugin for Decode {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "decode",
            description: "Convert a canonical config into an editable form model with display units",
            args: &DECODE_ARGS,
            examples: &[r#"{"config": {"page_settings": {"margins": {"top": "72pt"}}}}"#],
        }
    }

    fn call(&self, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, FormatError> {
        let config: CanonicalConfig = arg_object(args, "config")?;
        to_json(&ctx.converter().decode(&config))
    }
}

pub struct Encode;

static ENCODE_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("form", "object", "Form model as returned by decode"),
];

impl ToolPlugin for Encode {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "encode",
            description: "Convert an edited form model back into a canonical config",
            args: &ENCODE_ARGS,
            examples: &[],
        }
    }

    fn call(&self, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, FormatError> {
        let form: FormModel = arg_object(args, "form")?;
        to_json(&ctx.converter().encode(&form))
    }
}

pub struct Validate;

static VALIDATE_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("value", "number", "Magnitude in the given unit"),
    ArgMeta::required("unit", "string", "pt, px, cm, mm, inch, 字符 or 倍"),
    ArgMeta::required("field", "string", "margin, fontSize, lineSpacing, spacing or indent"),
];

impl ToolPlugin for Validate {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "validate",
            description: "Check one value against the rule for its field",
            args: &VALIDATE_ARGS,
            examples: &[r#"{"value": 2.54, "unit": "cm", "field": "margin"}"#],
        }
    }

    fn call(&self, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, FormatError> {
        let value = arg_f64(args, "value")?;
        let unit: Unit = arg_str(args, "unit")?.parse()?;
        let field: FieldKind = arg_str(args, "field")?.parse()?;

        let engine = ctx.engine();
        let validation = engine.validate(value, unit, field);
        Ok(json!({
            "points": engine.to_base(value, unit),
            "unit": unit.name(),
            "equivalent": engine.equivalent_display(value, unit, field),
            "valid": validation.valid,
            "warning": validation.warning,
            "error": validation.error,
        }))
    }
}

pub struct NearestSize;

static NEAREST_SIZE_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("points", "number", "Font size in points"),
];

impl ToolPlugin for NearestSize {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "nearest_size",
            description: "Traditional Chinese size name within 0.5pt of a point size, plus the common picker sizes",
            args: &NEAREST_SIZE_ARGS,
            examples: &[r#"{"points": 12}"#],
        }
    }

    fn call(&self, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, FormatError> {
        let points = arg_f64(args, "points")?;
        let engine = ctx.engine();
        let nearest = engine.nearest_named_size(points);
        Ok(json!({
            "name": nearest.map(|s| s.name),
            "pt": nearest.map(|s| s.pt),
            "label": engine.font_size_label(points),
            "common": COMMON_FONT_SIZES
                .iter()
                .map(|&pt| engine.font_size_label(pt))
                .collect::<Vec<_>>(),
        }))
    }
}

pub struct ParseMeasure;

static PARSE_MEASURE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("text", "string", "Measurement such as 2.54cm, 三号 or 1.5倍"),
    ArgMeta::optional("base_font_size", "number", "Points per 倍 or 字符", "12"),
];

impl ToolPlugin for ParseMeasure {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "parse_measure",
            description: "Parse a free-form measurement into points",
            args: &PARSE_MEASURE_ARGS,
            examples: &[r#"{"text": "小四"}"#, r#"{"text": "1.5倍", "base_font_size": 14}"#],
        }
    }

    fn call(&self, args: &JsonValue, _ctx: &ToolContext) -> Result<JsonValue, FormatError> {
        let text = arg_str(args, "text")?;
        let base = arg_f64_or(args, "base_font_size", NOMINAL_PT)?;
        let points = parse_measure(text, base)?;
        Ok(json!({ "points": points, "canonical": docfmt_config::format_points(points) }))
    }
}

pub struct CheckConfig;

static CHECK_CONFIG_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("config", "object", "Canonical formatting config"),
];

impl ToolPlugin for CheckConfig {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "check_config",
            description: "Report missing fields, unsupported labels and out-of-range values",
            args: &CHECK_CONFIG_ARGS,
            examples: &[],
        }
    }

    fn call(&self, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, FormatError> {
        let config: CanonicalConfig = arg_object(args, "config")?;
        let report = check_config(&config, ctx.engine());
        Ok(json!({
            "valid": report.is_valid(),
            "errors": report.errors,
            "warnings": report.warnings,
        }))
    }
}

pub struct HasChanges;

static HAS_CHANGES_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("original", "object", "Last saved canonical config"),
    ArgMeta::required("form", "object", "Current form model"),
];

impl ToolPlugin for HasChanges {
    fn meta(&self) -> ToolMeta {
        ToolMeta {
            name: "has_changes",
            description: "Whether a form model differs from the saved config, and where",
            args: &HAS_CHANGES_ARGS,
            examples: &[],
        }
    }

    fn call(&self, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, FormatError> {
        let original: CanonicalConfig = arg_object(args, "original")?;
        let form: FormModel = arg_object(args, "form")?;
        let converter = ctx.converter();
        let detector = ChangeDetector::new(&original);
        let fields = detector.changed_fields(&form, &converter);
        Ok(json!({ "changed": !fields.is_empty(), "fields": fields }))
    }
}
