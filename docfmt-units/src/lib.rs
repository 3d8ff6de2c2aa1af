//! docfmt Units - Point-based measurement engine
//!
//! Every physical length in a persisted formatting configuration is stored
//! in points. This crate converts between points and the units people edit
//! in, names traditional type sizes, and checks values against per-field
//! rules.
//!
//! Units:
//! - Physical: pt, px, cm, mm, inch
//! - Relative (12pt-equivalent): 字符 (character width), 倍 (line multiple)

mod unit;
mod names;
mod rules;
mod engine;
mod parse;

pub use unit::{Unit, UnitError, NOMINAL_PT, PT_PER_CM, PT_PER_INCH, PT_PER_MM, PT_PER_PX};
pub use names::{NamedSize, COMMON_FONT_SIZES, NAMED_SIZES, NAME_TOLERANCE_PT};
pub use rules::{FieldKind, Rule, RuleTable};
pub use engine::{format_value, round_to, UnitEngine, Validation};
pub use parse::{parse_measure, parse_points};
