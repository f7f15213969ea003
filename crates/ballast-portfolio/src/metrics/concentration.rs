//! Concentration measures over holding weights.
//!
//! All measures use only holdings with a valid weight and are independent of
//! whether those holdings carry a score or volatility.

use crate::types::Holding;

/// Valid weights sorted in descending order.
#[must_use]
pub fn sorted_weights(holdings: &[Holding]) -> Vec<f64> {
    let mut weights: Vec<f64> = holdings.iter().filter_map(Holding::valid_weight).collect();
    weights.sort_by(|a, b| b.total_cmp(a));
    weights
}

/// Sum of the `n` largest weights (or of all weights if there are fewer).
///
/// Returns 0.0 for a portfolio with no valid weight.
#[must_use]
pub fn top_n_concentration(holdings: &[Holding], n: usize) -> f64 {
    sorted_weights(holdings).iter().take(n).sum()
}

/// Herfindahl index: sum of squared weights.
///
/// Not normalized by the holding count; for weights summing to one it lies
/// in (0, 1], with 1 meaning a single position.
#[must_use]
pub fn herfindahl_index(holdings: &[Holding]) -> f64 {
    holdings
        .iter()
        .filter_map(Holding::valid_weight)
        .map(|w| w * w)
        .sum()
}

/// Effective number of positions (1 / Herfindahl).
///
/// Returns `None` when the index is not positive.
#[must_use]
pub fn effective_holdings(hhi: f64) -> Option<f64> {
    (hhi > 0.0).then(|| 1.0 / hhi)
}
