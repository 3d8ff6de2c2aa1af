//! Display units and their point factors

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use docfmt_core::FormatError;

/// Points per centimeter
pub const PT_PER_CM: f64 = 28.34646;
/// Points per millimeter
pub const PT_PER_MM: f64 = 2.834646;
/// Points per inch
pub const PT_PER_INCH: f64 = 72.0;
/// Points per CSS pixel (96 dpi)
pub const PT_PER_PX: f64 = 0.75;
/// One nominal line or character width, in points
pub const NOMINAL_PT: f64 = 12.0;

/// A display unit. The set is closed: anything else is an `UnknownUnit` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "pt", alias = "磅")]
    Pt,
    #[serde(rename = "px")]
    Px,
    #[serde(rename = "cm", alias = "厘米")]
    Cm,
    #[serde(rename = "mm", alias = "毫米")]
    Mm,
    #[serde(rename = "inch", alias = "in", alias = "英寸")]
    Inch,
    /// Character width, 12pt-equivalent
    #[serde(rename = "字符", alias = "ch")]
    Char,
    /// Line-spacing multiple, 12pt-equivalent
    #[serde(rename = "倍", alias = "x")]
    Multiple,
}

impl Unit {
    pub const ALL: [Unit; 7] = [
        Unit::Pt,
        Unit::Px,
        Unit::Cm,
        Unit::Mm,
        Unit::Inch,
        Unit::Char,
        Unit::Multiple,
    ];

    /// Points per one of this unit
    pub fn factor(&self) -> f64 {
        match self {
            Unit::Pt => 1.0,
            Unit::Px => PT_PER_PX,
            Unit::Cm => PT_PER_CM,
            Unit::Mm => PT_PER_MM,
            Unit::Inch => PT_PER_INCH,
            Unit::Char | Unit::Multiple => NOMINAL_PT,
        }
    }

    /// Symbol used in display strings
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Pt => "pt",
            Unit::Px => "px",
            Unit::Cm => "cm",
            Unit::Mm => "mm",
            Unit::Inch => "inch",
            Unit::Char => "字符",
            Unit::Multiple => "倍",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Unit::Pt => "point",
            Unit::Px => "pixel",
            Unit::Cm => "centimeter",
            Unit::Mm => "millimeter",
            Unit::Inch => "inch",
            Unit::Char => "character width",
            Unit::Multiple => "line multiple",
        }
    }

    /// Convert a value in this unit to points
    pub fn to_points(&self, value: f64) -> f64 {
        value * self.factor()
    }

    /// Convert points to a value in this unit
    pub fn from_points(&self, points: f64) -> f64 {
        points / self.factor()
    }

    /// True for units with a fixed physical length
    pub fn is_physical(&self) -> bool {
        !matches!(self, Unit::Char | Unit::Multiple)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let unit = match s.to_ascii_lowercase().as_str() {
            "pt" | "point" | "points" | "磅" => Unit::Pt,
            "px" | "pixel" | "pixels" => Unit::Px,
            "cm" | "centimeter" | "centimeters" | "厘米" => Unit::Cm,
            "mm" | "millimeter" | "millimeters" | "毫米" => Unit::Mm,
            "in" | "inch" | "inches" | "英寸" => Unit::Inch,
            "ch" | "字符" => Unit::Char,
            "x" | "倍" => Unit::Multiple,
            _ => return Err(UnitError::UnknownUnit(s.to_string())),
        };
        Ok(unit)
    }
}

/// Errors that can occur while converting or parsing measurements
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    #[error("invalid number: {0}")]
    InvalidNumber(String),

    #[error("malformed measurement: {0}")]
    Malformed(String),
}

impl From<UnitError> for FormatError {
    fn from(err: UnitError) -> Self {
        match err {
            UnitError::UnknownUnit(u) => FormatError::unknown_unit(&u),
            UnitError::InvalidNumber(s) => FormatError::invalid_number(s),
            UnitError::Malformed(s) => FormatError::parse_error(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docfmt_core::codes;

    #[test]
    fn test_parse_symbols_and_aliases() {
        assert_eq!("pt".parse::<Unit>().unwrap(), Unit::Pt);
        assert_eq!("CM".parse::<Unit>().unwrap(), Unit::Cm);
        assert_eq!("in".parse::<Unit>().unwrap(), Unit::Inch);
        assert_eq!("英寸".parse::<Unit>().unwrap(), Unit::Inch);
        assert_eq!("倍".parse::<Unit>().unwrap(), Unit::Multiple);
        assert_eq!(" 字符 ".parse::<Unit>().unwrap(), Unit::Char);
    }

    #[test]
    fn test_unknown_unit_is_error() {
        let err = "furlong".parse::<Unit>().unwrap_err();
        assert_eq!(err, UnitError::UnknownUnit("furlong".to_string()));

        let folded: FormatError = err.into();
        assert_eq!(folded.code, codes::UNKNOWN_UNIT);
    }

    #[test]
    fn test_symbol_parses_back() {
        for unit in Unit::ALL {
            assert_eq!(unit.symbol().parse::<Unit>().unwrap(), unit);
        }
    }

    #[test]
    fn test_serde_uses_symbols() {
        let json = serde_json::to_string(&Unit::Multiple).unwrap();
        assert_eq!(json, "\"倍\"");
        let unit: Unit = serde_json::from_str("\"in\"").unwrap();
        assert_eq!(unit, Unit::Inch);
    }

    #[test]
    fn test_physical_units() {
        assert!(Unit::Cm.is_physical());
        assert!(!Unit::Multiple.is_physical());
        assert_eq!(Unit::Char.factor(), 12.0);
    }
}
