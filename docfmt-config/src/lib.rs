//! docfmt Config - Editable view of a persisted formatting configuration
//!
//! The persisted `CanonicalConfig` stores every physical value as a point
//! string. Editors work on a `FormModel` instead, where each value carries a
//! display unit chosen for readability. This crate converts between the two,
//! validates edits, detects unsaved changes and checks persisted configs.
//!
//! ```text
//! CanonicalConfig --decode--> FormModel --(edit)--> FormModel --encode--> CanonicalConfig
//! ```

mod display;
mod form;
mod report;
mod strategy;
mod converter;
mod changes;
mod check;
mod session;

pub use display::{DisplayValue, DISPLAY_DECIMALS};
pub use form::{FormMargins, FormModel, FormPageSettings, FormStyle, Side};
pub use report::Report;
pub use strategy::{DisplayUnitStrategy, ImperialHeuristic, MetricHeuristic};
pub use converter::{
    format_points, ConfigConverter, DEFAULT_FONT_CN, DEFAULT_FONT_EN, DEFAULT_FONT_SIZE_PT,
    DEFAULT_LINE_SPACING_PT, DEFAULT_MARGIN_PT, DEFAULT_PAPER_SIZE, POINT_DECIMALS,
};
pub use changes::{normalize, ChangeDetector};
pub use check::{check_config, REQUIRED_STYLE_FIELDS, SUPPORTED_PAPER_SIZES};
pub use session::{ConfigStore, EditSession, SaveOutcome};

use docfmt_core::{CanonicalConfig, FormatError};
use docfmt_units::UnitEngine;

/// Parse canonical JSON and decode it with the metric heuristic
pub fn decode_json(engine: &UnitEngine, json: &str) -> Result<FormModel, FormatError> {
    let config = CanonicalConfig::from_json(json)?;
    Ok(ConfigConverter::new(engine).decode(&config))
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        check_config, ChangeDetector, ConfigConverter, ConfigStore, DisplayUnitStrategy,
        DisplayValue, EditSession, FormModel, Report, SaveOutcome,
    };
}
