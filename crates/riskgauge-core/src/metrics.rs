use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::domain::{PriceSeries, Symbol, TradingDay};
use crate::error::{AnalysisError, ValidationError};
use crate::stats;

/// Immutable bundle of scalar risk statistics for one security.
///
/// `beta` is the only per-field sentinel: it is `None` when benchmark
/// alignment cannot produce a real number. Every other ratio degrades to a
/// zero sentinel on a zero denominator so the scoring layer never sees NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub annualized_volatility: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    /// Most negative peak-to-trough decline, as a fraction `<= 0`.
    pub max_drawdown: f64,
    pub skewness: f64,
    pub kurtosis: f64,
    /// 5th percentile of the daily return distribution.
    pub value_at_risk_95: f64,
    /// Mean of returns at or below the 5th percentile.
    pub expected_shortfall_95: f64,
    pub beta: Option<f64>,
}

/// Read-only benchmark return history keyed by settlement day.
///
/// Built once per benchmark and shared across securities; alignment is an
/// inner join on matching days.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReturns {
    symbol: Symbol,
    returns: BTreeMap<TradingDay, f64>,
}

impl BenchmarkReturns {
    pub fn from_series(series: &PriceSeries) -> Self {
        Self {
            symbol: series.symbol().clone(),
            returns: series.dated_returns().into_iter().collect(),
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    pub fn get(&self, day: TradingDay) -> Option<f64> {
        self.returns.get(&day).copied()
    }

    pub fn first_day(&self) -> Option<TradingDay> {
        self.returns.keys().next().copied()
    }

    pub fn last_day(&self) -> Option<TradingDay> {
        self.returns.keys().next_back().copied()
    }
}

/// Reduces a price series and a benchmark into [`RiskMetrics`].
#[derive(Debug, Clone)]
pub struct RiskMetricsCalculator {
    config: AnalysisConfig,
}

impl RiskMetricsCalculator {
    pub fn new(config: AnalysisConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn compute(
        &self,
        series: &PriceSeries,
        benchmark: &BenchmarkReturns,
    ) -> Result<RiskMetrics, AnalysisError> {
        let returns: Vec<f64> = series
            .returns()
            .into_iter()
            .filter(|value| value.is_finite())
            .collect();

        if returns.len() < self.config.min_observations {
            return Err(AnalysisError::InsufficientData {
                required: self.config.min_observations,
                actual: returns.len(),
            });
        }

        let annualize = self.config.annualization_factor();
        let return_std = stats::std_dev(&returns).unwrap_or(0.0);
        let excess_return =
            stats::mean(&returns).unwrap_or(0.0) - self.config.daily_risk_free_rate();

        let sharpe_ratio = if return_std != 0.0 {
            excess_return / return_std * annualize
        } else {
            0.0
        };

        // A lone downside observation has no sample dispersion, so `std_dev`
        // yields `None` and the ratio falls back to the zero sentinel.
        let downside: Vec<f64> = returns.iter().copied().filter(|&r| r < 0.0).collect();
        let downside_std = stats::std_dev(&downside).unwrap_or(0.0);
        let sortino_ratio = if !downside.is_empty() && downside_std != 0.0 {
            excess_return / downside_std * annualize
        } else {
            0.0
        };

        // Zero sentinels below the sample threshold, kept independent of the
        // gate above for callers that relax `min_observations`.
        let (skewness, kurtosis) = if returns.len() < self.config.min_observations {
            (0.0, 0.0)
        } else {
            (
                stats::skewness(&returns).unwrap_or(0.0),
                stats::kurtosis(&returns).unwrap_or(0.0),
            )
        };

        let value_at_risk_95 = stats::percentile(&returns, 5.0).unwrap_or(0.0);
        let tail: Vec<f64> = returns
            .iter()
            .copied()
            .filter(|&r| r <= value_at_risk_95)
            .collect();
        let expected_shortfall_95 = stats::mean(&tail).unwrap_or(value_at_risk_95);

        Ok(RiskMetrics {
            annualized_volatility: return_std * annualize,
            sharpe_ratio,
            sortino_ratio,
            max_drawdown: max_drawdown(&series.closes()),
            skewness,
            kurtosis,
            value_at_risk_95,
            expected_shortfall_95,
            beta: self.beta(series, benchmark),
        })
    }

    /// Covariance-based sensitivity against the benchmark.
    ///
    /// Returns `None` when fewer than `min_observations` days align, when the
    /// benchmark has zero variance, or when the quotient is not finite.
    fn beta(&self, series: &PriceSeries, benchmark: &BenchmarkReturns) -> Option<f64> {
        let mut security_column = Vec::new();
        let mut benchmark_column = Vec::new();

        for (day, security_return) in series.dated_returns() {
            if !security_return.is_finite() {
                continue;
            }
            if let Some(benchmark_return) = benchmark.get(day) {
                if benchmark_return.is_finite() {
                    security_column.push(security_return);
                    benchmark_column.push(benchmark_return);
                }
            }
        }

        if security_column.len() < self.config.min_observations {
            return None;
        }

        let benchmark_variance = stats::population_variance(&benchmark_column)?;
        if benchmark_variance == 0.0 {
            return None;
        }

        let beta = stats::covariance(&security_column, &benchmark_column)? / benchmark_variance;
        beta.is_finite().then_some(beta)
    }
}

/// Minimum of `close / expanding_running_max - 1` over the series.
fn max_drawdown(closes: &[f64]) -> f64 {
    let mut running_max = f64::MIN;
    let mut worst = 0.0f64;

    for &close in closes {
        running_max = running_max.max(close);
        if running_max > 0.0 {
            worst = worst.min(close / running_max - 1.0);
        }
    }

    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceBar;

    fn series_from(symbol: &str, closes: &[f64]) -> PriceSeries {
        let start = TradingDay::parse("2023-06-01").expect("day");
        let bars = closes
            .iter()
            .enumerate()
            .map(|(offset, &close)| {
                let day =
                    TradingDay::from_date(start.into_inner() + time::Duration::days(offset as i64));
                PriceBar::new(day, close, close, close, close, Some(500)).expect("bar")
            })
            .collect();
        PriceSeries::new(Symbol::parse(symbol).expect("symbol"), bars).expect("series")
    }

    fn calculator() -> RiskMetricsCalculator {
        RiskMetricsCalculator::new(AnalysisConfig::default()).expect("calculator")
    }

    #[test]
    fn fails_below_minimum_sample_size() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let security = series_from("SHORT", &closes);
        let benchmark = BenchmarkReturns::from_series(&series_from("^BENCH", &closes));

        let err = calculator()
            .compute(&security, &benchmark)
            .expect_err("must fail");
        assert!(matches!(
            err,
            AnalysisError::InsufficientData {
                required: 30,
                actual: 19
            }
        ));
    }

    #[test]
    fn constant_prices_produce_zero_sentinels() {
        let closes = vec![100.0; 50];
        let security = series_from("FLAT", &closes);
        let benchmark = BenchmarkReturns::from_series(&series_from("^BENCH", &closes));

        let metrics = calculator()
            .compute(&security, &benchmark)
            .expect("metrics");
        assert_eq!(metrics.annualized_volatility, 0.0);
        assert_eq!(metrics.sharpe_ratio, 0.0);
        assert_eq!(metrics.sortino_ratio, 0.0);
        assert_eq!(metrics.max_drawdown, 0.0);
        assert_eq!(metrics.skewness, 0.0);
        assert_eq!(metrics.kurtosis, 0.0);
        assert_eq!(metrics.beta, None);
    }

    #[test]
    fn single_downside_observation_yields_zero_sortino() {
        // Steady climb with one dip: exactly one negative return, which has
        // no sample dispersion to divide by.
        let mut closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        closes[20] = 118.5;
        let security = series_from("ONEDIP", &closes);
        let benchmark = BenchmarkReturns::from_series(&security);

        let metrics = calculator()
            .compute(&security, &benchmark)
            .expect("metrics");
        assert_eq!(metrics.sortino_ratio, 0.0);
        assert!(metrics.sharpe_ratio > 0.0);
    }

    #[test]
    fn drawdown_measures_decline_from_expanding_peak() {
        let mut closes = vec![100.0, 120.0, 90.0, 110.0, 130.0];
        closes.extend(std::iter::repeat(130.0).take(40));
        let security = series_from("DRAW", &closes);
        let bench_closes: Vec<f64> = (0..closes.len()).map(|i| 50.0 + (i % 5) as f64).collect();
        let benchmark = BenchmarkReturns::from_series(&series_from("^BENCH", &bench_closes));

        let metrics = calculator()
            .compute(&security, &benchmark)
            .expect("metrics");
        // Trough at 90 against the 120 peak.
        assert!((metrics.max_drawdown - (90.0 / 120.0 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn beta_tracks_benchmark_sensitivity() {
        let bench_closes: Vec<f64> = (0..120)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
            .collect();
        let benchmark_series = series_from("^BENCH", &bench_closes);
        let benchmark = BenchmarkReturns::from_series(&benchmark_series);

        // A security with identical return history moves one-for-one.
        let metrics = calculator()
            .compute(&benchmark_series, &benchmark)
            .expect("metrics");
        let beta = metrics.beta.expect("beta must be available");
        assert!((beta - 1.0).abs() < 0.02);
    }

    #[test]
    fn beta_is_unavailable_without_aligned_history() {
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + (i % 7) as f64).collect();
        let security = series_from("GAPPY", &closes);

        // Benchmark occupies a disjoint date range; alignment finds nothing.
        let far_start = TradingDay::parse("2010-01-01").expect("day");
        let bench_bars = (0..80)
            .map(|offset| {
                let day = TradingDay::from_date(
                    far_start.into_inner() + time::Duration::days(offset as i64),
                );
                PriceBar::new(day, 10.0, 10.0, 10.0, 10.0, None).expect("bar")
            })
            .collect();
        let bench_series =
            PriceSeries::new(Symbol::parse("^OLD").expect("symbol"), bench_bars).expect("series");
        let benchmark = BenchmarkReturns::from_series(&bench_series);

        let metrics = calculator()
            .compute(&security, &benchmark)
            .expect("metrics");
        assert_eq!(metrics.beta, None);
    }

    #[test]
    fn expected_shortfall_is_at_most_value_at_risk() {
        let closes: Vec<f64> = (0..200)
            .map(|i| 100.0 + (i as f64 * 0.9).sin() * 8.0 + (i % 11) as f64 * 0.5)
            .collect();
        let security = series_from("WOBBLE", &closes);
        let benchmark = BenchmarkReturns::from_series(&security);

        let metrics = calculator()
            .compute(&security, &benchmark)
            .expect("metrics");
        assert!(metrics.expected_shortfall_95 <= metrics.value_at_risk_95);
        assert!(metrics.value_at_risk_95 < 0.0);
    }
}
