use serde::Serialize;

use riskgauge_core::{
    AnalysisConfig, BenchmarkReturns, RiskMetrics, RiskMetricsCalculator, Symbol,
};

use crate::cli::MetricsArgs;
use crate::error::CliError;
use crate::input;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct MetricsResponseData {
    symbol: Symbol,
    benchmark: Symbol,
    metrics: RiskMetrics,
}

pub fn run(args: &MetricsArgs) -> Result<CommandResult, CliError> {
    let config = AnalysisConfig {
        risk_free_rate: args.risk_free_rate,
        min_observations: args.min_observations,
        ..AnalysisConfig::default()
    };

    let series = input::load_series(&args.series)?;
    let benchmark_series = input::load_series(&args.benchmark)?;
    let benchmark = BenchmarkReturns::from_series(&benchmark_series);

    let history_warning = super::short_history_warning(&config, series.len());
    let calculator = RiskMetricsCalculator::new(config)?;
    let metrics = calculator.compute(&series, &benchmark)?;

    let beta_missing = metrics.beta.is_none();
    let data = serde_json::to_value(MetricsResponseData {
        symbol: series.symbol().clone(),
        benchmark: benchmark_series.symbol().clone(),
        metrics,
    })?;

    let mut result = CommandResult::ok(data);
    if beta_missing {
        result = result.with_warning(
            "beta unavailable: benchmark alignment yielded too few days or zero variance",
        );
    }
    if let Some(warning) = history_warning {
        result = result.with_warning(warning);
    }
    Ok(result)
}
