use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::domain::{PriceSeries, TradingDay};
use crate::error::{AnalysisError, ValidationError};
use crate::stats;

/// Per-date indicator columns, each as long as the source series.
///
/// Windows shrink to the available history: index `i` looks back over
/// `min(window, i + 1)` observations, so every column is defined from the
/// first observation onward rather than being padded until the window fills.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSet {
    pub days: Vec<TradingDay>,
    pub sma_long: Vec<f64>,
    pub sma_short: Vec<f64>,
    pub bollinger_middle: Vec<f64>,
    pub bollinger_upper: Vec<f64>,
    pub bollinger_lower: Vec<f64>,
    pub rolling_volatility: Vec<f64>,
    pub rolling_risk_adjusted_return: Vec<f64>,
}

impl IndicatorSet {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<IndicatorRow> {
        if index >= self.len() {
            return None;
        }
        Some(IndicatorRow {
            day: self.days[index],
            sma_long: self.sma_long[index],
            sma_short: self.sma_short[index],
            bollinger_middle: self.bollinger_middle[index],
            bollinger_upper: self.bollinger_upper[index],
            bollinger_lower: self.bollinger_lower[index],
            rolling_volatility: self.rolling_volatility[index],
            rolling_risk_adjusted_return: self.rolling_risk_adjusted_return[index],
        })
    }
}

/// One date's worth of derived indicator values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorRow {
    pub day: TradingDay,
    pub sma_long: f64,
    pub sma_short: f64,
    pub bollinger_middle: f64,
    pub bollinger_upper: f64,
    pub bollinger_lower: f64,
    pub rolling_volatility: f64,
    pub rolling_risk_adjusted_return: f64,
}

/// Derives moving averages, bands, and rolling risk statistics from a series.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    config: AnalysisConfig,
}

impl IndicatorEngine {
    pub fn new(config: AnalysisConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn derive(&self, series: &PriceSeries) -> Result<IndicatorSet, AnalysisError> {
        if series.is_empty() {
            return Err(AnalysisError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }

        let closes = series.closes();
        let returns = series.returns();
        let annualize = self.config.annualization_factor();
        let len = closes.len();

        let mut set = IndicatorSet {
            days: series.bars().iter().map(|bar| bar.day).collect(),
            sma_long: Vec::with_capacity(len),
            sma_short: Vec::with_capacity(len),
            bollinger_middle: Vec::with_capacity(len),
            bollinger_upper: Vec::with_capacity(len),
            bollinger_lower: Vec::with_capacity(len),
            rolling_volatility: Vec::with_capacity(len),
            rolling_risk_adjusted_return: Vec::with_capacity(len),
        };

        for index in 0..len {
            set.sma_long
                .push(trailing_mean(&closes, index, self.config.sma_long_window));
            set.sma_short
                .push(trailing_mean(&closes, index, self.config.sma_short_window));

            let middle = trailing_mean(&closes, index, self.config.bollinger_window);
            let band_std = trailing_std(&closes, index, self.config.bollinger_window);
            set.bollinger_middle.push(middle);
            set.bollinger_upper
                .push(middle + self.config.bollinger_width * band_std);
            set.bollinger_lower
                .push(middle - self.config.bollinger_width * band_std);

            // Return j settles on bar j + 1, so bar `index` has `index`
            // trailing returns available.
            let lookback = self.config.rolling_window.min(index);
            let trailing_returns = &returns[index - lookback..index];
            let return_std = stats::std_dev(trailing_returns).unwrap_or(0.0);
            set.rolling_volatility.push(return_std * annualize);
            set.rolling_risk_adjusted_return.push(if return_std != 0.0 {
                stats::mean(trailing_returns).unwrap_or(0.0) / return_std * annualize
            } else {
                0.0
            });
        }

        Ok(set)
    }
}

fn trailing_window(values: &[f64], index: usize, window: usize) -> &[f64] {
    let take = window.min(index + 1);
    &values[index + 1 - take..index + 1]
}

fn trailing_mean(values: &[f64], index: usize, window: usize) -> f64 {
    stats::mean(trailing_window(values, index, window)).unwrap_or(0.0)
}

fn trailing_std(values: &[f64], index: usize, window: usize) -> f64 {
    stats::std_dev(trailing_window(values, index, window)).unwrap_or(0.0)
}
