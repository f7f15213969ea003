//! Scenario impact calculations.
//!
//! Each scenario is applied to a copy of the holdings and the metrics are
//! recomputed. Only weighted volatility can move under a volatility shock;
//! Herfindahl and Top-3 are reported so that weight-changing shocks would
//! show up without changing the result shape.

use super::scenarios::Scenario;
use crate::metrics::{compute_metrics, PortfolioMetrics};
use crate::parallel::maybe_parallel_filter_map;
use crate::types::{AnalysisConfig, Holding};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The subset of metrics tracked across a scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    /// Weighted volatility (percent).
    pub weighted_volatility: f64,
    /// Herfindahl index.
    pub herfindahl_index: f64,
    /// Top-3 concentration.
    pub top3_concentration: f64,
}

impl MetricSnapshot {
    /// Extracts the tracked metrics.
    #[must_use]
    pub fn from_metrics(metrics: &PortfolioMetrics) -> Self {
        Self {
            weighted_volatility: metrics.weighted_volatility,
            herfindahl_index: metrics.herfindahl_index,
            top3_concentration: metrics.top3_concentration,
        }
    }

    /// Field-wise `self - before`.
    #[must_use]
    pub fn delta_from(&self, before: &Self) -> Self {
        Self {
            weighted_volatility: self.weighted_volatility - before.weighted_volatility,
            herfindahl_index: self.herfindahl_index - before.herfindahl_index,
            top3_concentration: self.top3_concentration - before.top3_concentration,
        }
    }
}

/// Outcome of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Scenario identifier.
    pub id: String,

    /// Display label.
    pub label: String,

    /// After minus before.
    pub delta: MetricSnapshot,

    /// Metrics under the shock.
    pub metrics_after: MetricSnapshot,
}

impl ScenarioResult {
    /// Returns true if the scenario raised portfolio volatility.
    #[must_use]
    pub fn increases_volatility(&self) -> bool {
        self.delta.weighted_volatility > 0.0
    }
}

/// Applies a scenario's shock to a copy of the holdings.
///
/// Holdings without a volatility are left as they are. The input slice is
/// not modified.
#[must_use]
pub fn apply_scenario(holdings: &[Holding], scenario: &Scenario) -> Vec<Holding> {
    let multiplier = scenario.shock.multiplier();
    holdings
        .iter()
        .map(|h| {
            let mut shocked = h.clone();
            if scenario.shock.applies_to(h) {
                if let Some(vol) = h.valid_volatility() {
                    shocked.volatility = Some(vol * multiplier);
                }
            }
            shocked
        })
        .collect()
}

/// Evaluates one scenario against a baseline.
#[must_use]
pub fn evaluate_scenario(
    holdings: &[Holding],
    baseline: &PortfolioMetrics,
    scenario: &Scenario,
) -> ScenarioResult {
    let before = MetricSnapshot::from_metrics(baseline);
    let after = MetricSnapshot::from_metrics(&compute_metrics(&apply_scenario(holdings, scenario)));

    ScenarioResult {
        id: scenario.id.clone(),
        label: scenario.label().to_string(),
        delta: after.delta_from(&before),
        metrics_after: after,
    }
}

/// Evaluates every scenario, in order.
///
/// Scenarios failing [`Scenario::validate`] are logged and skipped; the
/// others still run. With the `parallel` feature and a config that enables
/// it, scenarios are evaluated on the rayon pool; the output order is the
/// input order either way.
#[must_use]
pub fn run_scenarios(
    holdings: &[Holding],
    baseline: &PortfolioMetrics,
    scenarios: &[Scenario],
    config: &AnalysisConfig,
) -> Vec<ScenarioResult> {
    let results = maybe_parallel_filter_map(scenarios, config, |scenario| {
        if let Err(e) = scenario.validate() {
            warn!("Skipping scenario: {}", e);
            return None;
        }
        Some(evaluate_scenario(holdings, baseline, scenario))
    });

    debug!(
        "Evaluated {} of {} scenarios",
        results.len(),
        scenarios.len()
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stress::standard;
    use approx::assert_relative_eq;

    fn sample() -> Vec<Holding> {
        vec![
            Holding::new("A")
                .with_country("Argentina")
                .with_weight(0.5)
                .with_volatility(20.0),
            Holding::new("B")
                .with_country("USA")
                .with_weight(0.3)
                .with_volatility(15.0),
            Holding::new("C")
                .with_country("USA")
                .with_weight(0.2)
                .with_volatility(10.0),
        ]
    }

    #[test]
    fn test_apply_leaves_input_untouched() {
        let holdings = sample();
        let shocked = apply_scenario(&holdings, &standard::risk_off());

        assert_eq!(holdings[0].volatility, Some(20.0));
        assert_relative_eq!(shocked[0].volatility.unwrap(), 26.0, epsilon = 1e-12);
        assert_relative_eq!(shocked[2].volatility.unwrap(), 13.0, epsilon = 1e-12);
    }

    #[test]
    fn test_apply_country_shock() {
        let shocked = apply_scenario(&sample(), &standard::shock_usa());
        assert_eq!(shocked[0].volatility, Some(20.0));
        assert_relative_eq!(shocked[1].volatility.unwrap(), 18.0, epsilon = 1e-12);
        assert_relative_eq!(shocked[2].volatility.unwrap(), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_volatility_stays_missing() {
        let holdings = vec![Holding::new("A").with_weight(1.0)];
        let shocked = apply_scenario(&holdings, &standard::risk_off());
        assert!(shocked[0].volatility.is_none());
    }

    #[test]
    fn test_default_scenarios_on_reference_portfolio() {
        let holdings = sample();
        let baseline = compute_metrics(&holdings);
        let results = run_scenarios(&holdings, &baseline, &standard::all(), &AnalysisConfig::default());

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].id, "risk_off");
        assert_eq!(results[0].label, "Risk-off (vol +30%)");

        // 16.5 × 0.30
        assert_relative_eq!(results[0].delta.weighted_volatility, 4.95, epsilon = 1e-9);
        assert_relative_eq!(results[0].metrics_after.weighted_volatility, 21.45, epsilon = 1e-9);
        // 0.5 × 20 × 0.40
        assert_relative_eq!(results[1].delta.weighted_volatility, 4.0, epsilon = 1e-9);
        // (0.3 × 15 + 0.2 × 10) × 0.20
        assert_relative_eq!(results[2].delta.weighted_volatility, 1.3, epsilon = 1e-9);

        for r in &results {
            assert_eq!(r.delta.herfindahl_index, 0.0);
            assert_eq!(r.delta.top3_concentration, 0.0);
            assert_relative_eq!(r.metrics_after.herfindahl_index, 0.38, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_neutral_scenarios_have_zero_delta() {
        let holdings = sample();
        let baseline = compute_metrics(&holdings);
        let scenarios = vec![
            Scenario::scale_all("flat", 1.0),
            Scenario::scale_country("nowhere", "Narnia", 2.0),
        ];
        let results = run_scenarios(&holdings, &baseline, &scenarios, &AnalysisConfig::default());

        assert_eq!(results.len(), 2);
        for r in &results {
            assert_eq!(r.delta, MetricSnapshot::default());
            assert!(!r.increases_volatility());
        }
    }

    #[test]
    fn test_invalid_scenarios_are_skipped() {
        let holdings = sample();
        let baseline = compute_metrics(&holdings);
        let scenarios = vec![
            Scenario::scale_all("bad", f64::NAN),
            standard::risk_off(),
            Scenario::scale_country("blank", "", 1.5),
        ];
        let results = run_scenarios(&holdings, &baseline, &scenarios, &AnalysisConfig::default());

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "risk_off");
    }

    #[test]
    fn test_no_scenarios() {
        let holdings = sample();
        let baseline = compute_metrics(&holdings);
        assert!(run_scenarios(&holdings, &baseline, &[], &AnalysisConfig::default()).is_empty());
    }

    #[test]
    fn test_parallel_config_preserves_order() {
        let holdings = sample();
        let baseline = compute_metrics(&holdings);
        let scenarios: Vec<Scenario> = (0..20)
            .map(|i| Scenario::scale_all(format!("s{i}"), 1.0 + f64::from(i) / 10.0))
            .collect();
        let config = AnalysisConfig::default().with_parallel(true).with_threshold(2);
        let results = run_scenarios(&holdings, &baseline, &scenarios, &config);

        let ids: Vec<String> = results.iter().map(|r| r.id.clone()).collect();
        let expected: Vec<String> = (0..20).map(|i| format!("s{i}")).collect();
        assert_eq!(ids, expected);
    }
}
