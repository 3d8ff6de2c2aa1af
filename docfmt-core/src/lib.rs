//! docfmt Core - Fundamental types
//!
//! This crate provides the core types shared by every docfmt crate:
//! - `CanonicalConfig`: the persisted, points-only formatting configuration
//! - `FormatError`: structured errors for editors and tool clients

mod config;
mod error;

pub use config::{Alignment, CanonicalConfig, Margins, Orientation, PageSettings, StyleSpec};
pub use error::{codes, FormatError, Severity};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{Alignment, CanonicalConfig, FormatError, Orientation, Severity, StyleSpec};
}
