//! Alerting and rebalancing thresholds.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default maximum weight of the single largest holding.
pub const DEFAULT_TOP1_MAX: f64 = 0.25;

/// Default maximum combined weight of the three largest holdings.
pub const DEFAULT_TOP3_MAX: f64 = 0.55;

/// Default maximum Herfindahl index.
pub const DEFAULT_HHI_MAX: f64 = 0.18;

/// Default maximum exposure to a single country.
pub const DEFAULT_COUNTRY_MAX: f64 = 0.60;

/// Default volatility ceilings (percent) per declared risk profile.
pub const DEFAULT_VOL_PROFILE_LIMITS: [(&str, f64); 3] = [
    ("Conservative", 12.0),
    ("Moderate", 18.0),
    ("Aggressive", 25.0),
];

/// Concentration and volatility limits.
///
/// An immutable value object handed to the alert engine and the rebalancing
/// advisor. [`Thresholds::default`] carries the documented defaults; callers
/// override individual limits with the `with_*` methods or by deserializing
/// a partial table (missing keys fall back to the defaults).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Maximum weight of the largest holding.
    pub top1_max: f64,

    /// Maximum combined weight of the three largest holdings.
    pub top3_max: f64,

    /// Maximum Herfindahl index.
    pub hhi_max: f64,

    /// Maximum exposure to the largest country.
    pub country_max: f64,

    /// Volatility ceiling (percent) by declared risk profile name.
    pub vol_profile_limits: BTreeMap<String, f64>,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            top1_max: DEFAULT_TOP1_MAX,
            top3_max: DEFAULT_TOP3_MAX,
            hhi_max: DEFAULT_HHI_MAX,
            country_max: DEFAULT_COUNTRY_MAX,
            vol_profile_limits: DEFAULT_VOL_PROFILE_LIMITS
                .iter()
                .map(|(name, limit)| ((*name).to_string(), *limit))
                .collect(),
        }
    }
}

impl Thresholds {
    /// Creates thresholds with the default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Top-1 limit.
    #[must_use]
    pub fn with_top1_max(mut self, limit: f64) -> Self {
        self.top1_max = limit;
        self
    }

    /// Sets the Top-3 limit.
    #[must_use]
    pub fn with_top3_max(mut self, limit: f64) -> Self {
        self.top3_max = limit;
        self
    }

    /// Sets the Herfindahl limit.
    #[must_use]
    pub fn with_hhi_max(mut self, limit: f64) -> Self {
        self.hhi_max = limit;
        self
    }

    /// Sets the single-country limit.
    #[must_use]
    pub fn with_country_max(mut self, limit: f64) -> Self {
        self.country_max = limit;
        self
    }

    /// Adds or replaces a profile volatility ceiling.
    #[must_use]
    pub fn with_profile_limit(mut self, profile: impl Into<String>, max_volatility: f64) -> Self {
        self.vol_profile_limits.insert(profile.into(), max_volatility);
        self
    }

    /// Returns the volatility ceiling for a declared profile, if known.
    #[must_use]
    pub fn volatility_limit(&self, profile: &str) -> Option<f64> {
        self.vol_profile_limits.get(profile).copied()
    }
}
