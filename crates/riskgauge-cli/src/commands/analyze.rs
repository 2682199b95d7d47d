use serde::Serialize;

use riskgauge_core::{
    AnalysisConfig, BenchmarkReturns, RiskAnalysis, RiskClassifier, RiskMetrics,
    RiskMetricsCalculator, Symbol,
};

use crate::cli::AnalyzeArgs;
use crate::error::CliError;
use crate::input;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct AnalyzeResponseData {
    symbol: Symbol,
    benchmark: Symbol,
    metrics: RiskMetrics,
    analysis: RiskAnalysis,
}

pub fn run(args: &AnalyzeArgs) -> Result<CommandResult, CliError> {
    if !args.market_cap.is_finite() || args.market_cap < 0.0 {
        return Err(CliError::Command(String::from(
            "--market-cap must be a non-negative number",
        )));
    }

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
    let analysis = RiskClassifier::classify(&metrics, args.market_cap);

    let beta_missing = metrics.beta.is_none();
    let data = serde_json::to_value(AnalyzeResponseData {
        symbol: series.symbol().clone(),
        benchmark: benchmark_series.symbol().clone(),
        metrics,
        analysis,
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use riskgauge_core::TradingDay;

    use crate::input::{BarRecord, SeriesFile};

    fn write_series(symbol: &str, closes: &[f64]) -> tempfile::NamedTempFile {
        let start = TradingDay::parse("2024-01-02").expect("day");
        let bars = closes
            .iter()
            .enumerate()
            .map(|(offset, &close)| BarRecord {
                day: TradingDay::from_date(
                    start.into_inner() + time::Duration::days(offset as i64),
                )
                .to_string(),
                open: close,
                high: close,
                low: close,
                close,
                volume: None,
            })
            .collect();

        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        let payload = serde_json::to_string(&SeriesFile {
            symbol: symbol.to_string(),
            bars,
        })
        .expect("serialize fixture");
        write!(file, "{payload}").expect("write fixture");
        file
    }

    #[test]
    fn short_series_carries_history_warning() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i % 4) as f64).collect();
        let series = write_series("SMALLCO", &closes);
        let benchmark = write_series("^BENCH", &closes);

        let args = AnalyzeArgs {
            series: series.path().to_path_buf(),
            benchmark: benchmark.path().to_path_buf(),
            market_cap: 5.0e9,
            risk_free_rate: 0.05,
            min_observations: 30,
        };

        let result = run(&args).expect("analyze must succeed");
        assert!(result
            .warnings
            .iter()
            .any(|warning| warning.contains("years of history")));
    }
}
