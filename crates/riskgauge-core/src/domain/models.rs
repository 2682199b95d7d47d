use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::{Symbol, TradingDay};

/// Daily OHLCV observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub day: TradingDay,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<u64>,
}

impl PriceBar {
    pub fn new(
        day: TradingDay,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<u64>,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            day,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// Ordered daily price history for a single instrument.
///
/// Construction guarantees a non-empty series with strictly increasing days,
/// so downstream statistics never see gaps in ordering or duplicate dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: Symbol,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(symbol: Symbol, bars: Vec<PriceBar>) -> Result<Self, ValidationError> {
        if bars.is_empty() {
            return Err(ValidationError::EmptySeries);
        }

        for (index, pair) in bars.windows(2).enumerate() {
            if pair[1].day == pair[0].day {
                return Err(ValidationError::DuplicateDay {
                    day: pair[1].day.format_iso(),
                });
            }
            if pair[1].day < pair[0].day {
                return Err(ValidationError::UnorderedSeries { index: index + 1 });
            }
        }

        Ok(Self { symbol, bars })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first_day(&self) -> TradingDay {
        self.bars[0].day
    }

    pub fn last_day(&self) -> TradingDay {
        self.bars[self.bars.len() - 1].day
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.close).collect()
    }

    /// Simple daily returns, `close[i] / close[i-1] - 1`.
    ///
    /// The first observation has no prior close, so the result is one element
    /// shorter than the series.
    pub fn returns(&self) -> Vec<f64> {
        self.bars
            .windows(2)
            .map(|pair| pair[1].close / pair[0].close - 1.0)
            .collect()
    }

    /// Daily returns keyed by the day they settle on, for benchmark alignment.
    pub fn dated_returns(&self) -> Vec<(TradingDay, f64)> {
        self.bars
            .windows(2)
            .map(|pair| (pair[1].day, pair[1].close / pair[0].close - 1.0))
            .collect()
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(input: &str) -> TradingDay {
        TradingDay::parse(input).expect("day must parse")
    }

    fn flat_bar(input: &str, close: f64) -> PriceBar {
        PriceBar::new(day(input), close, close, close, close, Some(1_000))
            .expect("bar must validate")
    }

    #[test]
    fn rejects_invalid_bar_bounds() {
        let err =
            PriceBar::new(day("2024-01-02"), 10.0, 12.0, 9.0, 12.5, Some(10)).expect_err("fails");
        assert!(matches!(err, ValidationError::InvalidBarBounds));
    }

    #[test]
    fn rejects_empty_series() {
        let symbol = Symbol::parse("AAPL").expect("symbol");
        let err = PriceSeries::new(symbol, Vec::new()).expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptySeries));
    }

    #[test]
    fn rejects_duplicate_and_unordered_days() {
        let symbol = Symbol::parse("AAPL").expect("symbol");

        let duplicated = vec![flat_bar("2024-01-02", 10.0), flat_bar("2024-01-02", 11.0)];
        let err = PriceSeries::new(symbol.clone(), duplicated).expect_err("must fail");
        assert!(matches!(err, ValidationError::DuplicateDay { .. }));

        let unordered = vec![flat_bar("2024-01-03", 10.0), flat_bar("2024-01-02", 11.0)];
        let err = PriceSeries::new(symbol, unordered).expect_err("must fail");
        assert!(matches!(err, ValidationError::UnorderedSeries { index: 1 }));
    }

    #[test]
    fn derives_simple_returns() {
        let symbol = Symbol::parse("AAPL").expect("symbol");
        let bars = vec![
            flat_bar("2024-01-02", 100.0),
            flat_bar("2024-01-03", 110.0),
            flat_bar("2024-01-04", 99.0),
        ];
        let series = PriceSeries::new(symbol, bars).expect("series must validate");

        let returns = series.returns();
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 0.10).abs() < 1e-12);
        assert!((returns[1] + 0.10).abs() < 1e-12);

        let dated = series.dated_returns();
        assert_eq!(dated[0].0, day("2024-01-03"));
    }
}
