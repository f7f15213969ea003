//! Full analysis run.
//!
//! [`run_analysis`] is the single entry point used by the CLI: it computes
//! the metrics once and feeds the same snapshot to the alert engine, the
//! rebalancing advisor and the scenario simulator.

use crate::alerts::{generate_alerts, Alert};
use crate::metrics::{compute_metrics, PortfolioMetrics};
use crate::rebalance::{recommend_rebalancing, Recommendation};
use crate::stress::{run_scenarios, ScenarioResult};
use crate::types::{rank_by_weight, AnalysisConfig, Holding};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A holding as echoed in the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopHolding {
    /// Holding identifier.
    pub name: String,
    /// Asset category.
    pub category: Option<String>,
    /// Country of exposure.
    pub country: Option<String>,
    /// Currency.
    pub currency: Option<String>,
    /// Portfolio weight.
    pub weight: Option<f64>,
    /// Volatility (percent).
    pub volatility: Option<f64>,
    /// Quality score.
    pub score: Option<f64>,
}

impl From<&Holding> for TopHolding {
    fn from(h: &Holding) -> Self {
        Self {
            name: h.name.clone(),
            category: h.category_key().map(str::to_string),
            country: h.country_key().map(str::to_string),
            currency: h.currency_key().map(str::to_string),
            weight: h.valid_weight(),
            volatility: h.valid_volatility(),
            score: h.valid_score(),
        }
    }
}

/// Everything produced by one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Metrics snapshot.
    pub metrics: PortfolioMetrics,

    /// Largest holdings by weight.
    pub top_holdings: Vec<TopHolding>,

    /// Threshold breaches, most severe first.
    pub alerts: Vec<Alert>,

    /// Rebalancing proposals.
    pub recommendations: Vec<Recommendation>,

    /// Scenario outcomes, in configuration order.
    pub scenarios: Vec<ScenarioResult>,

    /// Declared risk profile, as supplied.
    pub declared_profile: Option<String>,
}

impl AnalysisResult {
    /// Returns true if any alert was raised.
    #[must_use]
    pub fn has_alerts(&self) -> bool {
        !self.alerts.is_empty()
    }
}

/// Runs the complete analysis.
///
/// Pure and deterministic: the same holdings, profile and configuration
/// always give the same result. The declared profile is echoed exactly as
/// given; the alert rule ignores it when it is empty or unknown.
#[must_use]
pub fn run_analysis(
    holdings: &[Holding],
    declared_profile: Option<&str>,
    config: &AnalysisConfig,
) -> AnalysisResult {
    let metrics = compute_metrics(holdings);
    let top_holdings = rank_by_weight(holdings)
        .into_iter()
        .take(config.top_n)
        .map(TopHolding::from)
        .collect();
    let alerts = generate_alerts(&metrics, declared_profile, &config.thresholds);
    let recommendations = recommend_rebalancing(holdings, &metrics, &config.thresholds);
    let scenarios = run_scenarios(holdings, &metrics, &config.scenarios, config);

    debug!(
        "Analysis complete: {} alerts, {} recommendations, {} scenarios",
        alerts.len(),
        recommendations.len(),
        scenarios.len()
    );

    AnalysisResult {
        metrics,
        top_holdings,
        alerts,
        recommendations,
        scenarios,
        declared_profile: declared_profile.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::AlertKind;

    fn holdings(n: usize) -> Vec<Holding> {
        (0..n)
            .map(|i| {
                Holding::new(format!("H{i:02}"))
                    .with_country(if i % 2 == 0 { "USA" } else { "Chile" })
                    .with_weight(1.0 / n as f64)
                    .with_volatility(10.0)
            })
            .collect()
    }

    #[test]
    fn test_top_holdings_are_capped() {
        let result = run_analysis(&holdings(15), None, &AnalysisConfig::default());
        assert_eq!(result.top_holdings.len(), 10);
        assert_eq!(result.top_holdings[0].name, "H00");

        let result = run_analysis(&holdings(15), None, &AnalysisConfig::default().with_top_n(3));
        assert_eq!(result.top_holdings.len(), 3);
    }

    #[test]
    fn test_top_holdings_ranked_by_weight() {
        let hs = vec![
            Holding::new("small").with_weight(0.1),
            Holding::new("none"),
            Holding::new("big").with_weight(0.9),
        ];
        let result = run_analysis(&hs, None, &AnalysisConfig::default());
        let names: Vec<&str> = result.top_holdings.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["big", "small", "none"]);
        assert!(result.top_holdings[2].weight.is_none());
    }

    #[test]
    fn test_profile_is_echoed() {
        let result = run_analysis(&holdings(12), Some("Conservative"), &AnalysisConfig::default());
        assert_eq!(result.declared_profile.as_deref(), Some("Conservative"));
        assert!(!result.has_alerts());

        let result = run_analysis(&holdings(12), Some(""), &AnalysisConfig::default());
        assert_eq!(result.declared_profile.as_deref(), Some(""));
        assert!(!result.has_alerts());
    }

    #[test]
    fn test_empty_portfolio() {
        let result = run_analysis(&[], Some("Moderate"), &AnalysisConfig::default());
        assert!(result.top_holdings.is_empty());
        assert!(result.alerts.is_empty());
        assert!(result.recommendations.is_empty());
        assert_eq!(result.scenarios.len(), 3);
        assert_eq!(result.scenarios[0].metrics_after.weighted_volatility, 0.0);
    }

    #[test]
    fn test_concentrated_portfolio() {
        let hs = vec![
            Holding::new("A").with_country("Argentina").with_weight(0.7).with_volatility(30.0),
            Holding::new("B").with_country("USA").with_weight(0.3).with_volatility(10.0),
        ];
        let result = run_analysis(&hs, Some("Moderate"), &AnalysisConfig::default());

        assert_eq!(result.alerts[0].kind, AlertKind::Top1Concentration);
        assert!(result.alerts.iter().any(|a| a.kind == AlertKind::ProfileMismatch));
        assert_eq!(result.recommendations.len(), 1);
        assert!(result.scenarios[1].increases_volatility());
    }

    #[test]
    fn test_result_serializes() {
        let result = run_analysis(&holdings(4), None, &AnalysisConfig::default());
        let json = serde_json::to_value(&result).unwrap();

        assert!(json["metrics"]["herfindahl_index"].is_number());
        assert!(json["metrics"]["exposure_by_country"].is_array());
        assert_eq!(json["scenarios"][0]["id"], "risk_off");
        assert!(json["declared_profile"].is_null());
    }
}
