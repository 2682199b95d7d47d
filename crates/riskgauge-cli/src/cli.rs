//! CLI argument definitions for riskgauge.
//!
//! The binary works on already-fetched price history: each command takes one
//! or more price-series JSON files (the output of whatever fetch layer the
//! caller uses) and emits a structured envelope.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `analyze` | Full pipeline: metrics plus risk classification |
//! | `metrics` | Scalar risk metrics bundle only |
//! | `indicators` | Per-date technical indicator rows |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Long-term equity risk analytics over daily price history.
#[derive(Debug, Parser)]
#[command(
    name = "riskgauge",
    author,
    version,
    about = "Long-term equity risk analytics CLI",
    long_about = "riskgauge derives technical indicators and long-term risk statistics \
(volatility, Sharpe/Sortino, drawdown, tail risk, beta) from daily price series, then \
classifies the security into a discrete risk tier via a deterministic scoring rubric.\n\
\n\
Input files use the series JSON schema:\n\
  {\"symbol\": \"RELIANCE.NS\", \"bars\": [{\"day\": \"2024-01-02\", \"open\": 100.0, ...}]}\n\
\n\
Use 'riskgauge <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Ndjson,
    Table,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full pipeline: risk metrics plus classification.
    Analyze(AnalyzeArgs),
    /// Compute the scalar risk metrics bundle only.
    Metrics(MetricsArgs),
    /// Derive per-date technical indicators.
    Indicators(IndicatorsArgs),
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Price-series JSON file for the security.
    pub series: PathBuf,

    /// Price-series JSON file for the benchmark index.
    #[arg(long)]
    pub benchmark: PathBuf,

    /// Market capitalization in raw currency units. Zero is valid and lands
    /// in the smallest size tier.
    #[arg(long, default_value_t = 0.0)]
    pub market_cap: f64,

    /// Annualized risk-free rate for Sharpe/Sortino numerators.
    #[arg(long, default_value_t = 0.05)]
    pub risk_free_rate: f64,

    /// Minimum valid return observations before statistics are computed.
    #[arg(long, default_value_t = 30)]
    pub min_observations: usize,
}

#[derive(Debug, Args)]
pub struct MetricsArgs {
    /// Price-series JSON file for the security.
    pub series: PathBuf,

    /// Price-series JSON file for the benchmark index.
    #[arg(long)]
    pub benchmark: PathBuf,

    /// Annualized risk-free rate for Sharpe/Sortino numerators.
    #[arg(long, default_value_t = 0.05)]
    pub risk_free_rate: f64,

    /// Minimum valid return observations before statistics are computed.
    #[arg(long, default_value_t = 30)]
    pub min_observations: usize,
}

#[derive(Debug, Args)]
pub struct IndicatorsArgs {
    /// Price-series JSON file for the security.
    pub series: PathBuf,

    /// Number of trailing indicator rows to emit.
    #[arg(long, default_value_t = 20)]
    pub tail: usize,
}
