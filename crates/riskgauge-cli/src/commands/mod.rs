mod analyze;
mod indicators;
mod metrics;

use std::time::Instant;

use riskgauge_core::{Envelope, EnvelopeError, EnvelopeMeta};
use serde_json::Value;
use uuid::Uuid;

use crate::cli::{Cli, Command};
use crate::error::CliError;

const SCHEMA_VERSION: &str = "v1.0.0";

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

/// Warns when a loaded series covers less than half the configured history.
pub fn short_history_warning(
    config: &riskgauge_core::AnalysisConfig,
    bar_count: usize,
) -> Option<String> {
    let expected = config.expected_observations();
    if bar_count < expected / 2 {
        Some(format!(
            "series covers {bar_count} bars, well short of the {expected} implied by {} years of history",
            config.years_of_history
        ))
    } else {
        None
    }
}

pub fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let started = Instant::now();

    let command_result = match &cli.command {
        Command::Analyze(args) => analyze::run(args)?,
        Command::Metrics(args) => metrics::run(args)?,
        Command::Indicators(args) => indicators::run(args)?,
    };

    let CommandResult {
        data,
        warnings,
        errors,
    } = command_result;

    let mut meta = EnvelopeMeta::new(
        Uuid::new_v4().to_string(),
        SCHEMA_VERSION,
        started.elapsed().as_millis() as u64,
    )?;

    for warning in warnings {
        meta.push_warning(warning);
    }

    Envelope::with_errors(meta, data, errors).map_err(CliError::from)
}

#[cfg(test)]
mod tests {
    use riskgauge_core::AnalysisConfig;

    #[test]
    fn series_below_half_expected_history_warns() {
        let config = AnalysisConfig::default();
        let warning = super::short_history_warning(&config, 60).expect("warning");
        assert!(warning.contains("60 bars"));
        assert!(warning.contains("1260"));
    }

    #[test]
    fn adequate_history_stays_quiet() {
        let config = AnalysisConfig::default();
        assert!(super::short_history_warning(&config, 1_000).is_none());
    }
}
