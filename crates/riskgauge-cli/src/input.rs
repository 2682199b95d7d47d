use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use riskgauge_core::{PriceBar, PriceSeries, Symbol, TradingDay};

use crate::error::CliError;

/// Raw bar record as stored in series JSON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarRecord {
    pub day: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: Option<u64>,
}

/// On-disk series file layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesFile {
    pub symbol: String,
    pub bars: Vec<BarRecord>,
}

/// Load and validate a price series from a JSON file.
pub fn load_series(path: &Path) -> Result<PriceSeries, CliError> {
    let raw = fs::read_to_string(path)?;
    let file: SeriesFile = serde_json::from_str(&raw)?;

    let symbol = Symbol::parse(&file.symbol)?;
    let bars = file
        .bars
        .iter()
        .map(|record| {
            let day = TradingDay::parse(&record.day)?;
            PriceBar::new(
                day,
                record.open,
                record.high,
                record.low,
                record.close,
                record.volume,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    PriceSeries::new(symbol, bars).map_err(CliError::from)
}
