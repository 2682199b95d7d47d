use serde::Serialize;

use riskgauge_core::{AnalysisConfig, IndicatorEngine, IndicatorRow, Symbol};

use crate::cli::IndicatorsArgs;
use crate::error::CliError;
use crate::input;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct IndicatorsResponseData {
    symbol: Symbol,
    total_rows: usize,
    rows: Vec<IndicatorRow>,
}

pub fn run(args: &IndicatorsArgs) -> Result<CommandResult, CliError> {
    if args.tail == 0 {
        return Err(CliError::Command(String::from(
            "--tail must be greater than zero",
        )));
    }

    let series = input::load_series(&args.series)?;
    let engine = IndicatorEngine::new(AnalysisConfig::default())?;
    let set = engine.derive(&series)?;

    let start = set.len().saturating_sub(args.tail);
    let rows: Vec<IndicatorRow> = (start..set.len()).filter_map(|index| set.row(index)).collect();

    let data = serde_json::to_value(IndicatorsResponseData {
        symbol: series.symbol().clone(),
        total_rows: set.len(),
        rows,
    })?;

    Ok(CommandResult::ok(data))
}
