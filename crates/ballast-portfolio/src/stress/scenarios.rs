//! Stress scenario definitions.
//!
//! A scenario pairs an identifier and display label with a [`Shock`]. In
//! configuration files the shock is flattened into the scenario:
//!
//! ```toml
//! [[scenarios]]
//! id = "shock_arg"
//! label = "Shock Argentina (vol ARG +40%)"
//! type = "scale_volatility_by_country"
//! country = "Argentina"
//! multiplier = 1.40
//! ```

use crate::error::{PortfolioError, PortfolioResult};
use crate::types::Holding;
use serde::{Deserialize, Serialize};

/// A volatility shock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shock {
    /// Multiply every holding's volatility.
    #[serde(alias = "multiply_vol")]
    ScaleAllVolatility {
        /// Volatility multiplier (1.30 = +30%).
        multiplier: f64,
    },

    /// Multiply the volatility of holdings in one country.
    #[serde(alias = "multiply_vol_by_country")]
    ScaleVolatilityByCountry {
        /// Country to match against the holding's trimmed country.
        country: String,
        /// Volatility multiplier.
        multiplier: f64,
    },
}

impl Shock {
    /// Volatility multiplier.
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::ScaleAllVolatility { multiplier }
            | Self::ScaleVolatilityByCountry { multiplier, .. } => *multiplier,
        }
    }

    /// Returns true if the shock hits this holding.
    #[must_use]
    pub fn applies_to(&self, holding: &Holding) -> bool {
        match self {
            Self::ScaleAllVolatility { .. } => true,
            Self::ScaleVolatilityByCountry { country, .. } => {
                holding.country_key() == Some(country.trim())
            }
        }
    }

    /// Short description, e.g. `vol x1.30 (Argentina)`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::ScaleAllVolatility { multiplier } => format!("vol x{multiplier:.2} (all)"),
            Self::ScaleVolatilityByCountry {
                country,
                multiplier,
            } => format!("vol x{multiplier:.2} ({country})"),
        }
    }
}

/// A named stress scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Stable identifier.
    pub id: String,

    /// Display label; falls back to `id` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// The shock to apply.
    #[serde(flatten)]
    pub shock: Shock,
}

impl Scenario {
    /// Creates a scenario without a label.
    #[must_use]
    pub fn new(id: impl Into<String>, shock: Shock) -> Self {
        Self {
            id: id.into(),
            label: None,
            shock,
        }
    }

    /// Portfolio-wide volatility shock.
    #[must_use]
    pub fn scale_all(id: impl Into<String>, multiplier: f64) -> Self {
        Self::new(id, Shock::ScaleAllVolatility { multiplier })
    }

    /// Single-country volatility shock.
    #[must_use]
    pub fn scale_country(id: impl Into<String>, country: impl Into<String>, multiplier: f64) -> Self {
        Self::new(
            id,
            Shock::ScaleVolatilityByCountry {
                country: country.into(),
                multiplier,
            },
        )
    }

    /// Sets the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Display label, or the id when no label is set.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    /// Checks that the scenario can be applied.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::InvalidScenario`] if the id is blank, the
    /// multiplier is negative or not finite, or the country filter is blank.
    pub fn validate(&self) -> PortfolioResult<()> {
        if self.id.trim().is_empty() {
            return Err(PortfolioError::invalid_scenario(&self.id, "empty id"));
        }

        let multiplier = self.shock.multiplier();
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(PortfolioError::invalid_scenario(
                &self.id,
                format!("multiplier must be finite and non-negative, got {multiplier}"),
            ));
        }

        if let Shock::ScaleVolatilityByCountry { country, .. } = &self.shock {
            if country.trim().is_empty() {
                return Err(PortfolioError::invalid_scenario(&self.id, "empty country"));
            }
        }

        Ok(())
    }
}

/// Default scenario set.
pub mod standard {
    use super::Scenario;

    /// Risk-off: all volatilities +30%.
    #[must_use]
    pub fn risk_off() -> Scenario {
        Scenario::scale_all("risk_off", 1.30).with_label("Risk-off (vol +30%)")
    }

    /// Argentina volatilities +40%.
    #[must_use]
    pub fn shock_argentina() -> Scenario {
        Scenario::scale_country("shock_arg", "Argentina", 1.40)
            .with_label("Shock Argentina (vol ARG +40%)")
    }

    /// USA volatilities +20%.
    #[must_use]
    pub fn shock_usa() -> Scenario {
        Scenario::scale_country("shock_usa", "USA", 1.20).with_label("Shock USA (vol USA +20%)")
    }

    /// All default scenarios, in evaluation order.
    #[must_use]
    pub fn all() -> Vec<Scenario> {
        vec![risk_off(), shock_argentina(), shock_usa()]
    }
}
