//! Portfolio-level metrics snapshot.

use super::concentration::{effective_holdings, sorted_weights};
use super::exposure::{
    exposure_by_category, exposure_by_country, exposure_by_currency, ExposureBreakdown,
};
use crate::types::Holding;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Computed metrics over a set of holdings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    /// Number of holdings analyzed (weighted or not).
    pub holding_count: usize,

    /// Sum of valid weights.
    pub total_weight: f64,

    /// Σ weight × score over holdings with a score.
    pub weighted_score: f64,

    /// Σ weight × volatility over holdings with a volatility (percent).
    pub weighted_volatility: f64,

    /// Largest single weight.
    pub top1_concentration: f64,

    /// Sum of the three largest weights.
    pub top3_concentration: f64,

    /// Sum of squared weights.
    pub herfindahl_index: f64,

    /// 1 / Herfindahl, when the index is positive.
    pub effective_holdings: Option<f64>,

    /// Weight by country, descending.
    pub exposure_by_country: ExposureBreakdown,

    /// Weight by asset category, descending.
    pub exposure_by_category: ExposureBreakdown,

    /// Weight by currency, descending.
    pub exposure_by_currency: ExposureBreakdown,

    /// Σ weight × country-risk score.
    ///
    /// Only present when every weighted holding supplies a country-risk score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighted_country_risk: Option<f64>,
}

/// Computes the metrics snapshot for a set of holdings.
///
/// Weighted averages are plain Σ(weight × value) sums: weights are expected
/// to already sum to one and are not re-normalized. Holdings without a valid
/// weight are skipped for every weighted aggregate; holdings without a score
/// (or volatility) are skipped for that aggregate only. Never fails.
#[must_use]
pub fn compute_metrics(holdings: &[Holding]) -> PortfolioMetrics {
    let mut total_weight = 0.0;
    let mut hhi = 0.0;
    let mut score_w = 0.0;
    let mut vol_w = 0.0;
    let mut country_risk_w = 0.0;
    let mut country_risk_complete = true;

    for holding in holdings {
        let Some(w) = holding.valid_weight() else {
            continue;
        };
        total_weight += w;
        hhi += w * w;

        if let Some(score) = holding.valid_score() {
            score_w += w * score;
        }
        if let Some(vol) = holding.valid_volatility() {
            vol_w += w * vol;
        }
        match holding.valid_country_risk() {
            Some(risk) => country_risk_w += w * risk,
            None => country_risk_complete = false,
        }
    }

    let weights = sorted_weights(holdings);
    let top1 = weights.first().copied().unwrap_or(0.0);
    let top3: f64 = weights.iter().take(3).sum();

    let metrics = PortfolioMetrics {
        holding_count: holdings.len(),
        total_weight,
        weighted_score: score_w,
        weighted_volatility: vol_w,
        top1_concentration: top1,
        top3_concentration: top3,
        herfindahl_index: hhi,
        effective_holdings: effective_holdings(hhi),
        exposure_by_country: exposure_by_country(holdings),
        exposure_by_category: exposure_by_category(holdings),
        exposure_by_currency: exposure_by_currency(holdings),
        weighted_country_risk: country_risk_complete.then_some(country_risk_w),
    };

    debug!(
        "Metrics over {} holdings ({} weighted): vol={:.2}%, top1={:.3}, top3={:.3}, hhi={:.3}",
        metrics.holding_count,
        weights.len(),
        metrics.weighted_volatility,
        metrics.top1_concentration,
        metrics.top3_concentration,
        metrics.herfindahl_index
    );

    metrics
}
