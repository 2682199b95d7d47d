//! Core analytics for riskgauge.
//!
//! This crate contains:
//! - Canonical domain models and validation (symbols, trading days, price series)
//! - Technical indicator derivation with shrinking trailing windows
//! - Scalar risk statistics (volatility, Sharpe/Sortino, drawdown, tail risk, beta)
//! - The additive scoring rubric that maps statistics to a risk category
//! - Response envelope and display formatting shared with the CLI

pub mod classify;
pub mod config;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod format;
pub mod indicators;
pub mod metrics;
pub mod stats;

pub use classify::{DetailedAnalysis, QualityMetrics, RiskAnalysis, RiskCategory, RiskClassifier};
pub use config::AnalysisConfig;
pub use domain::{PriceBar, PriceSeries, Symbol, TradingDay};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta};
pub use error::{AnalysisError, ValidationError};
pub use format::{format_decimal, format_percentage};
pub use indicators::{IndicatorEngine, IndicatorRow, IndicatorSet};
pub use metrics::{BenchmarkReturns, RiskMetrics, RiskMetricsCalculator};
