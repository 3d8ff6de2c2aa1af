//! Tool traits and argument helpers

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use docfmt_core::{codes, FormatError};

use crate::context::ToolContext;

/// Metadata about a tool argument
#[derive(Debug, Clone, Serialize)]
pub struct ArgMeta {
    pub name: &'static str,
    /// JSON schema type
    pub typ: &'static str,
    pub description: &'static str,
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

impl ArgMeta {
    pub const fn required(name: &'static str, typ: &'static str, description: &'static str) -> Self {
        Self { name, typ, description, optional: false, default: None }
    }

    pub const fn optional(name: &'static str, typ: &'static str, description: &'static str, default: &'static str) -> Self {
        Self { name, typ, description, optional: true, default: Some(default) }
    }
}

/// Metadata for a tool
#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub args: &'static [ArgMeta],
    pub examples: &'static [&'static str],
}

impl ToolMeta {
    /// JSON schema for the `tools/list` response
    pub fn input_schema(&self) -> JsonValue {
        let mut properties = serde_json::Map::new();
        for arg in self.args {
            let mut prop = serde_json::json!({
                "type": arg.typ,
                "description": arg.description,
            });
            if let Some(default) = arg.default {
                prop["default"] = JsonValue::String(default.to_string());
            }
            properties.insert(arg.name.to_string(), prop);
        }
        let required: Vec<&str> = self.args.iter().filter(|a| !a.optional).map(|a| a.name).collect();
        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// A stateless tool exposed over `tools/call`
pub trait ToolPlugin: Send + Sync {
    fn meta(&self) -> ToolMeta;
    fn call(&self, args: &JsonValue, ctx: &ToolContext) -> Result<JsonValue, FormatError>;
}

// ========== Argument helpers ==========

fn arg<'a>(args: &'a JsonValue, name: &str) -> Result<&'a JsonValue, FormatError> {
    match args.get(name) {
        Some(v) if !v.is_null() => Ok(v),
        _ => Err(FormatError::new(codes::ARG_MISSING, format!("Missing argument '{}'", name)).at(name)),
    }
}

fn type_error(name: &str, expected: &str) -> FormatError {
    FormatError::new(codes::ARG_TYPE, format!("Argument '{}' must be {}", name, expected)).at(name)
}

pub fn arg_str<'a>(args: &'a JsonValue, name: &str) -> Result<&'a str, FormatError> {
    arg(args, name)?.as_str().ok_or_else(|| type_error(name, "a string"))
}

pub fn arg_f64(args: &JsonValue, name: &str) -> Result<f64, FormatError> {
    arg(args, name)?.as_f64().ok_or_else(|| type_error(name, "a number"))
}

/// Optional numeric argument
pub fn arg_f64_or(args: &JsonValue, name: &str, default: f64) -> Result<f64, FormatError> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Ok(default),
        Some(v) => v.as_f64().ok_or_else(|| type_error(name, "a number")),
    }
}

/// Deserialize an object argument
pub fn arg_object<T: DeserializeOwned>(args: &JsonValue, name: &str) -> Result<T, FormatError> {
    let value = arg(args, name)?;
    T::deserialize(value).map_err(|e| {
        FormatError::new(codes::ARG_TYPE, format!("Argument '{}' is malformed: {}", name, e)).at(name)
    })
}

pub fn to_json<T: Serialize>(value: &T) -> Result<JsonValue, FormatError> {
    serde_json::to_value(value).map_err(|e| FormatError::internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_arg_helpers() {
        let args = json!({"unit": "cm", "value": 2.54, "empty": null});
        assert_eq!(arg_str(&args, "unit").unwrap(), "cm");
        assert_eq!(arg_f64(&args, "value").unwrap(), 2.54);
        assert_eq!(arg_f64_or(&args, "base", 12.0).unwrap(), 12.0);

        assert_eq!(arg_str(&args, "empty").unwrap_err().code, codes::ARG_MISSING);
        assert_eq!(arg_f64(&args, "unit").unwrap_err().code, codes::ARG_TYPE);
        assert_eq!(arg_str(&args, "nope").unwrap_err().field.as_deref(), Some("nope"));
    }

    #[test]
    fn test_input_schema() {
        const ARGS: &[ArgMeta] = &[
            ArgMeta::required("value", "number", "Magnitude"),
            ArgMeta::optional("base", "number", "Base size", "12"),
        ];
        let meta = ToolMeta { name: "t", description: "d", args: ARGS, examples: &[] };
        let schema = meta.input_schema();
        assert_eq!(schema["required"], json!(["value"]));
        assert_eq!(schema["properties"]["base"]["default"], json!("12"));
    }
}
