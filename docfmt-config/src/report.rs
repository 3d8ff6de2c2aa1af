//! Collected errors and warnings

use serde::Serialize;
use docfmt_core::{FormatError, Severity};
use docfmt_units::Validation;

/// Errors block saving; warnings are informational
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub errors: Vec<FormatError>,
    pub warnings: Vec<FormatError>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when there are no errors (warnings allowed)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// File an error by its severity
    pub fn push(&mut self, err: FormatError) {
        match err.severity {
            Severity::Warning => self.warnings.push(err),
            Severity::Error | Severity::Fatal => self.errors.push(err),
        }
    }

    /// File the outcome of a single-value validation under `field`
    pub fn record(&mut self, field: &str, validation: Validation) {
        if let Some(message) = validation.error {
            self.push(FormatError::out_of_range(message).at(field));
        } else if let Some(message) = validation.warning {
            self.push(FormatError::unusual_value(message).at(field));
        }
    }

    pub fn merge(&mut self, other: Report) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Field paths that carry an error
    pub fn error_fields(&self) -> Vec<&str> {
        self.errors.iter().filter_map(|e| e.field.as_deref()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docfmt_core::codes;

    #[test]
    fn test_record_routes_by_outcome() {
        let mut report = Report::new();
        report.record("a", Validation::ok());
        report.record("b", Validation::warning("large"));
        report.record("c", Validation::error("negative"));

        assert!(!report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].field.as_deref(), Some("b"));
        assert_eq!(report.errors[0].code, codes::OUT_OF_RANGE);
        assert_eq!(report.error_fields(), vec!["c"]);
    }

    #[test]
    fn test_merge() {
        let mut a = Report::new();
        a.push(FormatError::unusual_value("w"));
        let mut b = Report::new();
        b.push(FormatError::missing_field("styles"));
        a.merge(b);
        assert_eq!(a.errors.len(), 1);
        assert_eq!(a.warnings.len(), 1);
        assert!(!a.is_empty());
    }
}
