//! Shared state handed to every tool call

use std::env;
use std::fmt;
use std::str::FromStr;
use docfmt_config::{ConfigConverter, DisplayUnitStrategy, ImperialHeuristic, MetricHeuristic};
use docfmt_units::UnitEngine;

/// Environment variable selecting the decode heuristic
pub const STRATEGY_ENV: &str = "DOCFMT_STRATEGY";

/// Which `DisplayUnitStrategy` the server decodes with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StrategyKind {
    #[default]
    Metric,
    Imperial,
}

impl StrategyKind {
    pub fn build(&self) -> Box<dyn DisplayUnitStrategy + Send + Sync> {
        match self {
            StrategyKind::Metric => Box::new(MetricHeuristic),
            StrategyKind::Imperial => Box::new(ImperialHeuristic),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" | "cm" => Ok(StrategyKind::Metric),
            "imperial" | "inch" => Ok(StrategyKind::Imperial),
            other => Err(format!("unknown strategy '{}', expected metric or imperial", other)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Metric => f.write_str("metric"),
            StrategyKind::Imperial => f.write_str("imperial"),
        }
    }
}

pub struct ToolContext {
    engine: UnitEngine,
    strategy: Box<dyn DisplayUnitStrategy + Send + Sync>,
}

impl ToolContext {
    pub fn new(engine: UnitEngine, kind: StrategyKind) -> Self {
        ToolContext { engine, strategy: kind.build() }
    }

    /// Read `DOCFMT_STRATEGY`; an unset or unknown value falls back to metric
    pub fn from_env() -> Self {
        let kind = match env::var(STRATEGY_ENV) {
            Ok(raw) => raw.parse().unwrap_or_else(|e: String| {
                tracing::warn!("{}; using metric", e);
                StrategyKind::Metric
            }),
            Err(_) => StrategyKind::Metric,
        };
        ToolContext::new(UnitEngine::new(), kind)
    }

    pub fn engine(&self) -> &UnitEngine {
        &self.engine
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn converter(&self) -> ConfigConverter<'_, &(dyn DisplayUnitStrategy + Send + Sync)> {
        ConfigConverter::with_strategy(&self.engine, self.strategy.as_ref())
    }
}

impl Default for ToolContext {
    fn default() -> Self {
        ToolContext::new(UnitEngine::new(), StrategyKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docfmt_core::CanonicalConfig;

    #[test]
    fn test_parse_kind() {
        assert_eq!("Imperial".parse::<StrategyKind>().unwrap(), StrategyKind::Imperial);
        assert_eq!(" metric ".parse::<StrategyKind>().unwrap(), StrategyKind::Metric);
        assert!("nautical".parse::<StrategyKind>().is_err());
        assert_eq!(StrategyKind::Imperial.to_string(), "imperial");
    }

    #[test]
    fn test_converter_uses_strategy() {
        let ctx = ToolContext::new(UnitEngine::new(), StrategyKind::Imperial);
        assert_eq!(ctx.strategy_name(), "imperial");
        let form = ctx.converter().decode(&CanonicalConfig::default());
        assert_eq!(form.page_settings.margins.top.display(), "1inch");
    }
}
