//! Heuristic rebalancing proposals.
//!
//! The advisor does not optimize anything. It trims the largest positions by
//! the amount a concentration limit is exceeded and spreads that amount over
//! the remaining positions in proportion to their current weight.

use crate::alerts::pct;
use crate::metrics::PortfolioMetrics;
use crate::types::{rank_by_weight, Holding, Thresholds};
use serde::{Deserialize, Serialize};

/// Maximum number of recommendations returned.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Number of holdings shown in a proposal preview.
pub const PREVIEW_LEN: usize = 6;

/// Share of the Top-3 excess taken from the largest holding; the rest comes
/// from the second largest.
pub const TOP3_PRIMARY_SHARE: f64 = 0.6;

/// Rule that produced a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebalanceRule {
    /// Bring the largest holding down to `top1_max`.
    CapTop1,
    /// Trim the two largest holdings to bring Top-3 towards `top3_max`.
    CapTop3,
}

/// Proposed weight for one holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightPreview {
    /// Holding identifier.
    pub name: String,
    /// Weight after the proposed adjustment.
    pub weight: Option<f64>,
}

/// A proposed remediation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Rule that produced this proposal.
    pub rule: RebalanceRule,
    /// Short title.
    pub title: String,
    /// What to do, with before/after figures.
    pub detail: String,
    /// First holdings of the proposed portfolio, largest first.
    pub proposed_weights_preview: Vec<WeightPreview>,
}

/// Reduces the targeted holdings and spreads the total reduction over the
/// others.
///
/// `reductions` pairs a position in `holdings` with the weight to remove from
/// it. Each non-targeted holding with a valid weight `w` receives
/// `total × w / rest_sum`, where `rest_sum` is the summed weight of the
/// non-targeted holdings. When `rest_sum <= 0` there is nothing to absorb
/// the reduction and the holdings are returned unchanged.
///
/// The input is never modified; the result is a new list.
#[must_use]
pub fn redistribute(holdings: &[Holding], reductions: &[(usize, f64)]) -> Vec<Holding> {
    let mut proposal = holdings.to_vec();

    let is_target = |i: usize| reductions.iter().any(|(idx, _)| *idx == i);

    let rest_sum: f64 = proposal
        .iter()
        .enumerate()
        .filter(|(i, _)| !is_target(*i))
        .filter_map(|(_, h)| h.valid_weight())
        .sum();

    if rest_sum <= 0.0 {
        return proposal;
    }

    let mut total_delta = 0.0;
    for &(idx, delta) in reductions {
        if let Some(holding) = proposal.get_mut(idx) {
            if let Some(w) = holding.valid_weight() {
                holding.weight = Some(w - delta);
                total_delta += delta;
            }
        }
    }

    for (i, holding) in proposal.iter_mut().enumerate() {
        if is_target(i) {
            continue;
        }
        if let Some(w) = holding.valid_weight() {
            holding.weight = Some(w + total_delta * (w / rest_sum));
        }
    }

    proposal
}

fn preview(holdings: &[Holding]) -> Vec<WeightPreview> {
    holdings
        .iter()
        .take(PREVIEW_LEN)
        .map(|h| WeightPreview {
            name: h.name.clone(),
            weight: h.valid_weight(),
        })
        .collect()
}

/// Proposes weight adjustments for concentration breaches.
///
/// Two rules are evaluated independently, each starting from the same
/// ranking (descending weight) of the original holdings:
///
/// - **cap_top1**: when Top-1 exceeds `top1_max`, the largest holding is cut
///   by exactly the excess.
/// - **cap_top3**: when Top-3 exceeds `top3_max` and there are at least three
///   holdings, the excess is taken 60% from the largest and 40% from the
///   second largest.
///
/// When nothing can absorb a reduction the recommendation is still
/// returned, with an unchanged preview and a detail saying so.
///
/// At most [`MAX_RECOMMENDATIONS`] are returned.
#[must_use]
pub fn recommend_rebalancing(
    holdings: &[Holding],
    metrics: &PortfolioMetrics,
    thresholds: &Thresholds,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    let ranked: Vec<Holding> = rank_by_weight(holdings).into_iter().cloned().collect();
    let Some(largest) = ranked.first() else {
        return recs;
    };

    let top1 = metrics.top1_concentration;
    let top3 = metrics.top3_concentration;

    if top1 > thresholds.top1_max {
        let excess = top1 - thresholds.top1_max;
        let proposal = redistribute(&ranked, &[(0, excess)]);
        let detail = if proposal == ranked {
            format!(
                "{} is at {}, above the {} limit, but no other holding carries weight to absorb the excess.",
                largest.name,
                pct(top1),
                pct(thresholds.top1_max)
            )
        } else {
            format!(
                "Bring {} down from {} to {} and spread the excess across the remaining holdings.",
                largest.name,
                pct(top1),
                pct(thresholds.top1_max)
            )
        };
        recs.push(Recommendation {
            rule: RebalanceRule::CapTop1,
            title: "Reduce concentration in the largest holding".to_string(),
            detail,
            proposed_weights_preview: preview(&proposal),
        });
    }

    if top3 > thresholds.top3_max && ranked.len() >= 3 {
        let excess = top3 - thresholds.top3_max;
        let d1 = excess * TOP3_PRIMARY_SHARE;
        let d2 = excess * (1.0 - TOP3_PRIMARY_SHARE);
        let proposal = redistribute(&ranked, &[(0, d1), (1, d2)]);
        let detail = if proposal == ranked {
            format!(
                "Top3 is at {}, above the {} limit, but the remaining holdings carry no weight to absorb the excess.",
                pct(top3),
                pct(thresholds.top3_max)
            )
        } else {
            format!(
                "Trim the two largest holdings to bring Top3 to ~{} and redistribute to the rest.",
                pct(thresholds.top3_max)
            )
        };
        recs.push(Recommendation {
            rule: RebalanceRule::CapTop3,
            title: "Reduce dominance of the top 3".to_string(),
            detail,
            proposed_weights_preview: preview(&proposal),
        });
    }

    recs.truncate(MAX_RECOMMENDATIONS);
    recs
}
