//! Canonical formatting configuration
//!
//! This is the persisted wire shape. Every physical scalar is a string of the
//! form `"<number>pt"`. All fields are optional at the deserialization
//! boundary so that consumers can apply their own documented defaults.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Persisted document-formatting configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonicalConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_settings: Option<PageSettings>,

    /// Style records keyed by style identifier (`title`, `heading1`, ...)
    #[serde(default)]
    pub styles: BTreeMap<String, StyleSpec>,
}

impl CanonicalConfig {
    /// Parse from JSON text
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialize to pretty JSON text
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_size: Option<String>,

    /// `portrait` or `landscape`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margins: Option<Margins>,
}

/// Page margins, each a point string
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
}

/// A single style record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,

    /// Chinese font family
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name_cn: Option<String>,

    /// Western font family
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name_en: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<String>,

    /// Absence means not bold
    #[serde(
        default,
        deserialize_with = "deserialize_flag",
        skip_serializing_if = "Option::is_none"
    )]
    pub bold: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_before: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_after: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_line_indent: Option<String>,
}

/// Accepts `true`, `false`, `"true"`, `"false"` and `null`
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => Some(b),
        Some(Flag::Text(s)) => Some(s.trim().eq_ignore_ascii_case("true")),
        None => None,
    })
}

/// Page orientation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Parse a persisted orientation, including the Chinese labels
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "portrait" | "纵向" => Some(Orientation::Portrait),
            "landscape" | "横向" => Some(Orientation::Landscape),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paragraph alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Parse a persisted alignment, including the Chinese labels
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "left" | "左对齐" => Some(Alignment::Left),
            "center" | "居中" => Some(Alignment::Center),
            "right" | "右对齐" => Some(Alignment::Right),
            "justify" | "两端对齐" => Some(Alignment::Justify),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "page_settings": {
            "paper_size": "A4",
            "orientation": "portrait",
            "margins": {"top": "72pt", "bottom": "72pt", "left": "90pt", "right": "90pt"}
        },
        "styles": {
            "title": {"font_size": "22pt", "font_name_cn": "黑体", "alignment": "center",
                      "line_spacing": "24pt", "bold": "true"},
            "paragraph": {"font_size": "12pt", "line_spacing": "20pt", "bold": false,
                          "first_line_indent": "24pt"}
        }
    }"#;

    #[test]
    fn test_parse_sample() {
        let config = CanonicalConfig::from_json(SAMPLE).unwrap();
        let page = config.page_settings.as_ref().unwrap();
        assert_eq!(page.paper_size.as_deref(), Some("A4"));
        let margins = page.margins.as_ref().unwrap();
        assert_eq!(margins.left.as_deref(), Some("90pt"));

        let title = &config.styles["title"];
        assert_eq!(title.bold, Some(true));
        assert_eq!(title.font_name_en, None);

        let paragraph = &config.styles["paragraph"];
        assert_eq!(paragraph.bold, Some(false));
        assert_eq!(paragraph.first_line_indent.as_deref(), Some("24pt"));
        assert_eq!(paragraph.space_before, None);
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = CanonicalConfig::from_json("{}").unwrap();
        assert_eq!(config, CanonicalConfig::default());
    }

    #[test]
    fn test_serialize_omits_absent_fields() {
        let mut config = CanonicalConfig::default();
        config.styles.insert(
            "body".to_string(),
            StyleSpec {
                font_size: Some("12pt".to_string()),
                ..StyleSpec::default()
            },
        );
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("page_settings").is_none());
        assert_eq!(json["styles"]["body"], serde_json::json!({"font_size": "12pt"}));
    }

    #[test]
    fn test_enum_labels() {
        assert_eq!(Orientation::parse("横向"), Some(Orientation::Landscape));
        assert_eq!(Orientation::parse("sideways"), None);
        assert_eq!(Alignment::parse("两端对齐"), Some(Alignment::Justify));
        assert_eq!(Alignment::parse(" center "), Some(Alignment::Center));
        assert_eq!(Alignment::Justify.to_string(), "justify");
    }
}
