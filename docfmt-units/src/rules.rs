//! Validation thresholds per field type
//!
//! All thresholds are in points. Pure data: the behavior lives in
//! `UnitEngine::validate`.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use crate::unit::UnitError;

/// Kind of physical field being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Margin,
    FontSize,
    LineSpacing,
    Spacing,
    Indent,
}

impl FieldKind {
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Margin,
        FieldKind::FontSize,
        FieldKind::LineSpacing,
        FieldKind::Spacing,
        FieldKind::Indent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Margin => "margin",
            FieldKind::FontSize => "fontSize",
            FieldKind::LineSpacing => "lineSpacing",
            FieldKind::Spacing => "spacing",
            FieldKind::Indent => "indent",
        }
    }

    /// Noun used in messages
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Margin => "Margin",
            FieldKind::FontSize => "Font size",
            FieldKind::LineSpacing => "Line spacing",
            FieldKind::Spacing => "Paragraph spacing",
            FieldKind::Indent => "Indent",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "margin" | "margins" => Ok(FieldKind::Margin),
            "fontSize" | "font_size" => Ok(FieldKind::FontSize),
            "lineSpacing" | "line_spacing" => Ok(FieldKind::LineSpacing),
            "spacing" | "paragraph_spacing" => Ok(FieldKind::Spacing),
            "indent" => Ok(FieldKind::Indent),
            other => Err(UnitError::Malformed(format!("unknown field type: {}", other))),
        }
    }
}

/// Thresholds for one field type, in points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Below this is physically invalid
    pub min: f64,
    /// Above this is implausible but still accepted with a warning
    pub max: f64,
    pub warning_min: f64,
    pub warning_max: f64,
    /// Guidance shown with soft warnings
    pub message: String,
}

impl Rule {
    pub fn new(min: f64, max: f64, warning_min: f64, warning_max: f64, message: &str) -> Self {
        Rule {
            min,
            max,
            warning_min,
            warning_max,
            message: message.to_string(),
        }
    }
}

/// Rule per field type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTable {
    pub margin: Rule,
    pub font_size: Rule,
    pub line_spacing: Rule,
    pub spacing: Rule,
    pub indent: Rule,
}

impl RuleTable {
    pub fn get(&self, field: FieldKind) -> &Rule {
        match field {
            FieldKind::Margin => &self.margin,
            FieldKind::FontSize => &self.font_size,
            FieldKind::LineSpacing => &self.line_spacing,
            FieldKind::Spacing => &self.spacing,
            FieldKind::Indent => &self.indent,
        }
    }

    /// Builder: replace the rule for one field type
    pub fn with_rule(mut self, field: FieldKind, rule: Rule) -> Self {
        match field {
            FieldKind::Margin => self.margin = rule,
            FieldKind::FontSize => self.font_size = rule,
            FieldKind::LineSpacing => self.line_spacing = rule,
            FieldKind::Spacing => self.spacing = rule,
            FieldKind::Indent => self.indent = rule,
        }
        self
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        RuleTable {
            margin: Rule::new(0.0, 300.0, 10.0, 150.0,
                "Margins are usually between 0.35cm and 5.3cm"),
            font_size: Rule::new(5.0, 100.0, 8.0, 72.0,
                "Font sizes are usually between 8pt and 72pt"),
            // 12pt is one nominal line
            line_spacing: Rule::new(0.0, 120.0, 12.0, 36.0,
                "Line spacing is usually between 1 and 3 lines"),
            spacing: Rule::new(0.0, 200.0, 0.0, 50.0,
                "Paragraph spacing is usually between 0pt and 50pt"),
            indent: Rule::new(0.0, 200.0, 0.0, 72.0,
                "Indents are usually between 0pt and 72pt"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_ordered() {
        let table = RuleTable::default();
        for field in FieldKind::ALL {
            let rule = table.get(field);
            assert!(rule.min <= rule.warning_min, "{}", field);
            assert!(rule.warning_min <= rule.warning_max, "{}", field);
            assert!(rule.warning_max <= rule.max, "{}", field);
            assert!(!rule.message.is_empty());
        }
    }

    #[test]
    fn test_with_rule_overrides_one_field() {
        let table = RuleTable::default()
            .with_rule(FieldKind::Margin, Rule::new(0.0, 400.0, 36.0, 108.0, "Letter margins"));
        assert_eq!(table.get(FieldKind::Margin).max, 400.0);
        assert_eq!(table.get(FieldKind::Indent), &RuleTable::default().indent);
    }

    #[test]
    fn test_field_kind_names() {
        assert_eq!("fontSize".parse::<FieldKind>().unwrap(), FieldKind::FontSize);
        assert_eq!("line_spacing".parse::<FieldKind>().unwrap(), FieldKind::LineSpacing);
        assert!("colour".parse::<FieldKind>().is_err());
        assert_eq!(FieldKind::Spacing.to_string(), "spacing");
    }
}
