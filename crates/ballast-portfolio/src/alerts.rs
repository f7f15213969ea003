//! Threshold alerts over a metrics snapshot.

use crate::metrics::PortfolioMetrics;
use crate::types::Thresholds;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of alerts returned by [`generate_alerts`].
pub const MAX_ALERTS: usize = 5;

/// Severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Limit breached on a primary concentration or suitability rule.
    High,
    /// Limit breached on a secondary diversification rule.
    Medium,
    /// Informational.
    Low,
}

impl Severity {
    /// Sort rank: high first.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rule raised an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Largest holding above `top1_max`.
    Top1Concentration,
    /// Three largest holdings above `top3_max`.
    Top3Concentration,
    /// Herfindahl index above `hhi_max`.
    Herfindahl,
    /// Largest country exposure above `country_max`.
    CountryConcentration,
    /// Portfolio volatility above the declared profile's ceiling.
    ProfileMismatch,
}

/// A rule violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Rule that fired.
    pub kind: AlertKind,
    /// Severity of the breach.
    pub severity: Severity,
    /// Human-readable explanation.
    pub message: String,
}

impl Alert {
    fn new(kind: AlertKind, severity: Severity, message: String) -> Self {
        Self {
            kind,
            severity,
            message,
        }
    }
}

pub(crate) fn pct(x: f64) -> String {
    format!("{:.0}%", x * 100.0)
}

/// Evaluates every alert rule against the metrics.
///
/// Rules are independent; every rule that fires is collected. The result is
/// stably sorted by severity (high first) and truncated to [`MAX_ALERTS`].
///
/// Only the largest country exposure is checked against `country_max`. The
/// profile rule only applies when `declared_profile` is non-empty and listed
/// in `thresholds.vol_profile_limits`.
#[must_use]
pub fn generate_alerts(
    metrics: &PortfolioMetrics,
    declared_profile: Option<&str>,
    thresholds: &Thresholds,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    let top1 = metrics.top1_concentration;
    if top1 > thresholds.top1_max {
        alerts.push(Alert::new(
            AlertKind::Top1Concentration,
            Severity::High,
            format!(
                "High concentration in a single holding (Top1 {} > {}).",
                pct(top1),
                pct(thresholds.top1_max)
            ),
        ));
    }

    let top3 = metrics.top3_concentration;
    if top3 > thresholds.top3_max {
        alerts.push(Alert::new(
            AlertKind::Top3Concentration,
            Severity::High,
            format!(
                "Portfolio dominated by its top 3 holdings (Top3 {} > {}).",
                pct(top3),
                pct(thresholds.top3_max)
            ),
        ));
    }

    let hhi = metrics.herfindahl_index;
    if hhi > thresholds.hhi_max {
        alerts.push(Alert::new(
            AlertKind::Herfindahl,
            Severity::Medium,
            format!(
                "Low diversification (HHI {} > {}).",
                pct(hhi),
                pct(thresholds.hhi_max)
            ),
        ));
    }

    if let Some(top_country) = metrics.exposure_by_country.top() {
        if top_country.weight > thresholds.country_max {
            alerts.push(Alert::new(
                AlertKind::CountryConcentration,
                Severity::Medium,
                format!(
                    "High geographic concentration in {} ({} > {}).",
                    top_country.key,
                    pct(top_country.weight),
                    pct(thresholds.country_max)
                ),
            ));
        }
    }

    if let Some(profile) = declared_profile.filter(|p| !p.is_empty()) {
        let vol = metrics.weighted_volatility;
        if let Some(limit) = thresholds.volatility_limit(profile) {
            if vol > limit {
                alerts.push(Alert::new(
                    AlertKind::ProfileMismatch,
                    Severity::High,
                    format!(
                        "Volatility {vol:.1}% too high for a {profile} profile (limit {limit:.1}%)."
                    ),
                ));
            }
        }
    }

    alerts.sort_by_key(|a| a.severity.rank());
    alerts.truncate(MAX_ALERTS);
    alerts
}
