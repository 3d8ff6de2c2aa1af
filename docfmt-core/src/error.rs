//! Structured errors for editors and tool clients
//!
//! Errors never crash the system. They are values that are collected into
//! reports or returned from operations, with enough information to point a
//! user at the offending field.

use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const INVALID_NUMBER: &str = "INVALID_NUMBER";
    pub const OUT_OF_RANGE: &str = "OUT_OF_RANGE";
    pub const UNUSUAL_VALUE: &str = "UNUSUAL_VALUE";
    pub const MISSING_FIELD: &str = "MISSING_FIELD";
    pub const UNSUPPORTED_VALUE: &str = "UNSUPPORTED_VALUE";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const STORE_ERROR: &str = "STORE_ERROR";
    pub const UNKNOWN_TOOL: &str = "UNKNOWN_TOOL";
    pub const ARG_MISSING: &str = "ARG_MISSING";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Value is usable but unusual
    Warning,
    /// Value is physically invalid; blocks saving
    Error,
    /// Operation cannot continue
    Fatal,
}

/// Structured error carried through reports and tool responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Dotted path of the offending field, e.g. `styles.title.font_size`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Severity level
    pub severity: Severity,
}

impl FormatError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            field: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: attach field path
    pub fn at(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    // ========== Common Error Constructors ==========

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
            .with_suggestion("Physical values are written as \"<number>pt\", e.g. \"72pt\"")
    }

    pub fn unknown_unit(unit: &str) -> Self {
        Self::new(codes::UNKNOWN_UNIT, format!("Unknown unit: {}", unit))
            .with_suggestion("Use one of: pt, px, cm, mm, inch, 字符, 倍")
    }

    pub fn invalid_number(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_NUMBER, format!("Invalid number: {}", details.into()))
    }

    pub fn out_of_range(details: impl Into<String>) -> Self {
        Self::new(codes::OUT_OF_RANGE, details)
    }

    pub fn unusual_value(details: impl Into<String>) -> Self {
        Self::new(codes::UNUSUAL_VALUE, details).with_severity(Severity::Warning)
    }

    pub fn missing_field(field: &str) -> Self {
        Self::new(codes::MISSING_FIELD, format!("Missing required field: {}", field))
            .at(field)
    }

    pub fn unsupported_value(field: &str, value: &str) -> Self {
        Self::new(codes::UNSUPPORTED_VALUE, format!("Unsupported value for {}: {}", field, value))
            .at(field)
    }

    pub fn validation_failed(count: usize) -> Self {
        Self::new(
            codes::VALIDATION_FAILED,
            format!("{} field(s) hold invalid values", count),
        )
        .with_suggestion("Fix the reported fields before saving")
    }

    pub fn store_error(details: impl Into<String>) -> Self {
        Self::new(codes::STORE_ERROR, format!("Store error: {}", details.into()))
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] ", self.code)?;
        if let Some(ref field) = self.field {
            write!(f, "{}: ", field)?;
        }
        write!(f, "{}", self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for FormatError {}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse_error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_field_and_suggestion() {
        let err = FormatError::out_of_range("Margin cannot be negative")
            .at("page_settings.margins.top")
            .with_suggestion("Use a value of 0 or more");
        let text = err.to_string();
        assert_eq!(
            text,
            "[OUT_OF_RANGE] page_settings.margins.top: Margin cannot be negative (suggestion: Use a value of 0 or more)"
        );
    }

    #[test]
    fn test_unusual_value_is_warning() {
        let err = FormatError::unusual_value("Margin is large");
        assert!(err.is_warning());
        assert_eq!(err.code, codes::UNUSUAL_VALUE);
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let err = FormatError::new(codes::INTERNAL, "boom");
        let json = serde_json::to_value(&err).unwrap();
        assert!(json.get("suggestion").is_none());
        assert!(json.get("field").is_none());
        assert_eq!(json["severity"], "error");
    }

    #[test]
    fn test_from_json_error() {
        let err: FormatError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert_eq!(err.code, codes::PARSE_ERROR);
    }
}
