use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::format::{format_decimal, format_percentage};
use crate::metrics::RiskMetrics;

const BILLION: f64 = 1e9;

// Sorted threshold tables; first matching strict comparison wins, the
// fallthrough score is 1.
const SIZE_TIERS: [(f64, u8); 2] = [(70.0, 3), (20.0, 2)];
const VOLATILITY_TIERS: [(f64, u8); 2] = [(0.35, 3), (0.55, 2)];

/// Discrete long-term risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Very High Risk")]
    VeryHigh,
}

impl RiskCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Moderate => "Moderate Risk",
            Self::High => "High Risk",
            Self::VeryHigh => "Very High Risk",
        }
    }

    /// Maps a total score to its tier. Scores below 3 cannot arise from the
    /// additive rubric but fall through to the most conservative tier.
    pub const fn from_total_score(total_score: u8) -> Self {
        match total_score {
            7.. => Self::Low,
            5..=6 => Self::Moderate,
            3..=4 => Self::High,
            _ => Self::VeryHigh,
        }
    }
}

impl Display for RiskCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formatted display strings backing the classification verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    pub market_cap_analysis: String,
    pub volatility_analysis: String,
    pub quality_metrics: QualityMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub sharpe_ratio: String,
    pub sortino_ratio: String,
    pub max_drawdown: String,
    pub var_95: String,
    pub beta: String,
}

/// Classification verdict: category, score breakdown, and display bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    pub risk_category: RiskCategory,
    pub size_score: u8,
    pub volatility_score: u8,
    pub quality_score: u8,
    pub total_score: u8,
    pub detailed_analysis: DetailedAnalysis,
}

/// Deterministic additive scoring rubric over [`RiskMetrics`] and market cap.
#[derive(Debug, Default, Clone, Copy)]
pub struct RiskClassifier;

impl RiskClassifier {
    /// Scores a security. `market_cap` is in raw currency units; zero or
    /// absent capitalization is valid input and lands in the smallest tier.
    pub fn classify(metrics: &RiskMetrics, market_cap: f64) -> RiskAnalysis {
        let market_cap_billions = if market_cap.is_finite() && market_cap > 0.0 {
            market_cap / BILLION
        } else {
            0.0
        };

        let size_score = score_above(market_cap_billions, &SIZE_TIERS);
        let volatility_score = score_below(metrics.annualized_volatility, &VOLATILITY_TIERS);
        let quality_score = quality_score(metrics.sharpe_ratio, metrics.max_drawdown);
        let total_score = size_score + volatility_score + quality_score;

        RiskAnalysis {
            risk_category: RiskCategory::from_total_score(total_score),
            size_score,
            volatility_score,
            quality_score,
            total_score,
            detailed_analysis: DetailedAnalysis {
                market_cap_analysis: format!(
                    "Market Cap: {}B",
                    format_decimal(Some(market_cap_billions))
                ),
                volatility_analysis: format!(
                    "Annualized Volatility: {}",
                    format_percentage(Some(metrics.annualized_volatility))
                ),
                quality_metrics: QualityMetrics {
                    sharpe_ratio: format!(
                        "Sharpe Ratio: {}",
                        format_decimal(Some(metrics.sharpe_ratio))
                    ),
                    sortino_ratio: format!(
                        "Sortino Ratio: {}",
                        format_decimal(Some(metrics.sortino_ratio))
                    ),
                    max_drawdown: format!(
                        "Maximum Drawdown: {}",
                        format_percentage(Some(metrics.max_drawdown))
                    ),
                    var_95: format!(
                        "95% VaR: {}",
                        format_percentage(Some(metrics.value_at_risk_95))
                    ),
                    beta: format!("Beta: {}", format_decimal(metrics.beta)),
                },
            },
        }
    }
}

/// First tier whose threshold the value strictly exceeds.
fn score_above(value: f64, tiers: &[(f64, u8)]) -> u8 {
    tiers
        .iter()
        .find(|(threshold, _)| value > *threshold)
        .map(|(_, score)| *score)
        .unwrap_or(1)
}

/// First tier whose threshold the value is strictly below. NaN values match
/// nothing and fall to the lowest tier.
fn score_below(value: f64, tiers: &[(f64, u8)]) -> u8 {
    tiers
        .iter()
        .find(|(threshold, _)| value < *threshold)
        .map(|(_, score)| *score)
        .unwrap_or(1)
}

fn quality_score(sharpe_ratio: f64, max_drawdown: f64) -> u8 {
    let sharpe = if sharpe_ratio.is_finite() {
        sharpe_ratio
    } else {
        f64::NEG_INFINITY
    };
    let drawdown = if max_drawdown.is_finite() {
        max_drawdown.abs()
    } else {
        f64::INFINITY
    };

    if sharpe > 1.0 && drawdown < 0.20 {
        3
    } else if sharpe > 0.5 && drawdown < 0.30 {
        2
    } else {
        1
    }
}
