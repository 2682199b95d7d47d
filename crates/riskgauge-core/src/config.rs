use crate::error::ValidationError;

/// Tunable parameters for the analytics pipeline.
///
/// Every window and threshold the pipeline uses is carried here so short
/// synthetic series can exercise the same code paths as five years of
/// production history.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Annualized risk-free rate used by Sharpe/Sortino numerators.
    pub risk_free_rate: f64,
    /// Trailing history window requested from the data collaborator, in years.
    pub years_of_history: u32,
    /// Minimum valid return observations before any statistic is computed.
    pub min_observations: usize,
    /// Long simple-moving-average window, in trading days.
    pub sma_long_window: usize,
    /// Short simple-moving-average window, in trading days.
    pub sma_short_window: usize,
    /// Bollinger band window, in trading days.
    pub bollinger_window: usize,
    /// Band half-width, in standard deviations.
    pub bollinger_width: f64,
    /// Window for rolling volatility and risk-adjusted return.
    pub rolling_window: usize,
    /// Annualization base for daily statistics.
    pub trading_days_per_year: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.05,
            years_of_history: 5,
            min_observations: 30,
            sma_long_window: 200,
            sma_short_window: 50,
            bollinger_window: 20,
            bollinger_width: 2.0,
            rolling_window: 252,
            trading_days_per_year: 252.0,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.risk_free_rate.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                field: "risk_free_rate",
            });
        }
        if !self.bollinger_width.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                field: "bollinger_width",
            });
        }
        if self.trading_days_per_year <= 0.0 || !self.trading_days_per_year.is_finite() {
            return Err(ValidationError::InvalidWindow {
                field: "trading_days_per_year",
            });
        }

        for (field, window) in [
            ("min_observations", self.min_observations),
            ("sma_long_window", self.sma_long_window),
            ("sma_short_window", self.sma_short_window),
            ("bollinger_window", self.bollinger_window),
            ("rolling_window", self.rolling_window),
        ] {
            if window == 0 {
                return Err(ValidationError::InvalidWindow { field });
            }
        }

        Ok(())
    }

    /// Risk-free rate expressed per trading day.
    pub fn daily_risk_free_rate(&self) -> f64 {
        self.risk_free_rate / self.trading_days_per_year
    }

    /// `sqrt(trading_days_per_year)`, the daily-to-annual scaling factor.
    pub fn annualization_factor(&self) -> f64 {
        self.trading_days_per_year.sqrt()
    }

    /// Observation count implied by `years_of_history`. Callers compare a
    /// loaded series against this to flag unexpectedly short coverage.
    pub fn expected_observations(&self) -> usize {
        (self.years_of_history as f64 * self.trading_days_per_year) as usize
    }
}
