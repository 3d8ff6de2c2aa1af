//! An editing session over one persisted config

use tracing::{debug, info};
use docfmt_core::{CanonicalConfig, FormatError, Severity};
use docfmt_units::UnitEngine;

use crate::changes::ChangeDetector;
use crate::converter::ConfigConverter;
use crate::form::FormModel;
use crate::report::Report;
use crate::strategy::{DisplayUnitStrategy, MetricHeuristic};

/// Where saved configs go
pub trait ConfigStore {
    fn update(&mut self, config: &CanonicalConfig) -> Result<(), FormatError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Nothing differed from the last saved config; the store was not called
    Unchanged,
    /// Stored. Warnings did not block the save but should be shown.
    Saved { warnings: Vec<FormatError> },
}

pub struct EditSession<'a, S = MetricHeuristic> {
    converter: ConfigConverter<'a, S>,
    original: CanonicalConfig,
    form: FormModel,
    detector: ChangeDetector,
}

impl<'a> EditSession<'a, MetricHeuristic> {
    pub fn new(engine: &'a UnitEngine, original: CanonicalConfig) -> Self {
        EditSession::with_converter(ConfigConverter::new(engine), original)
    }
}

impl<'a, S: DisplayUnitStrategy> EditSession<'a, S> {
    pub fn with_converter(converter: ConfigConverter<'a, S>, original: CanonicalConfig) -> Self {
        let form = converter.decode(&original);
        let detector = ChangeDetector::new(&original);
        EditSession { converter, original, form, detector }
    }

    pub fn form(&self) -> &FormModel {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormModel {
        &mut self.form
    }

    /// The last saved (or initially loaded) config
    pub fn original(&self) -> &CanonicalConfig {
        &self.original
    }

    pub fn has_changes(&self) -> bool {
        self.detector.has_changes(&self.form, &self.converter)
    }

    pub fn changed_fields(&self) -> Vec<String> {
        self.detector.changed_fields(&self.form, &self.converter)
    }

    pub fn validate(&self) -> Report {
        self.form.validate(self.converter.engine())
    }

    /// Discard edits
    pub fn reset(&mut self) {
        self.form = self.converter.decode(&self.original);
    }

    pub fn save<C: ConfigStore + ?Sized>(&mut self, store: &mut C) -> Result<SaveOutcome, FormatError> {
        let report = self.validate();
        if !report.is_valid() {
            debug!(errors = report.errors.len(), "save blocked by validation");
            return Err(FormatError::validation_failed(report.errors.len())
                .with_severity(Severity::Error));
        }

        if !self.has_changes() {
            return Ok(SaveOutcome::Unchanged);
        }

        let config = self.converter.encode(&self.form);
        store.update(&config)?;
        info!(
            styles = config.styles.len(),
            warnings = report.warnings.len(),
            "saved formatting config"
        );

        self.detector.rebase(&config);
        self.original = config;
        Ok(SaveOutcome::Saved { warnings: report.warnings })
    }
}
