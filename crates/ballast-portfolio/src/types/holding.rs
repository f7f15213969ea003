//! Holding representation with optional numeric analytics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single position in a client portfolio.
///
/// Every numeric field is optional: a value that was missing or could not be
/// parsed upstream is `None`, and the holding is simply left out of the
/// aggregates that need that field. Holdings are never rejected for
/// data-quality reasons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Asset identifier (ticker, fund name, ...).
    pub name: String,

    /// Asset category (equity, bond, fund, ...).
    #[serde(default)]
    pub category: Option<String>,

    /// Country of exposure.
    #[serde(default)]
    pub country: Option<String>,

    /// Denomination currency.
    #[serde(default)]
    pub currency: Option<String>,

    /// Fraction of the portfolio (0.0 - 1.0).
    #[serde(default)]
    pub weight: Option<f64>,

    /// Market value in the reporting currency.
    #[serde(default)]
    pub market_value: Option<Decimal>,

    /// Asset risk score (0 - 100).
    #[serde(default)]
    pub score: Option<f64>,

    /// Volatility in percent (e.g. 19.2 for 19.2%).
    #[serde(default)]
    pub volatility: Option<f64>,

    /// Country-risk context score.
    #[serde(default)]
    pub country_risk: Option<f64>,
}

impl Holding {
    /// Creates a holding with only a name set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Sets the currency.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Sets the portfolio weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Sets the market value.
    #[must_use]
    pub fn with_market_value(mut self, value: Decimal) -> Self {
        self.market_value = Some(value);
        self
    }

    /// Sets the risk score.
    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Sets the volatility (percent).
    #[must_use]
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the country-risk context score.
    #[must_use]
    pub fn with_country_risk(mut self, score: f64) -> Self {
        self.country_risk = Some(score);
        self
    }

    /// Returns the weight if it is present and finite.
    #[must_use]
    pub fn valid_weight(&self) -> Option<f64> {
        finite(self.weight)
    }

    /// Returns the score if it is present and finite.
    #[must_use]
    pub fn valid_score(&self) -> Option<f64> {
        finite(self.score)
    }

    /// Returns the volatility if it is present and finite.
    #[must_use]
    pub fn valid_volatility(&self) -> Option<f64> {
        finite(self.volatility)
    }

    /// Returns the country-risk score if it is present and finite.
    #[must_use]
    pub fn valid_country_risk(&self) -> Option<f64> {
        finite(self.country_risk)
    }

    /// Trimmed country, or `None` when absent or blank.
    #[must_use]
    pub fn country_key(&self) -> Option<&str> {
        non_blank(self.country.as_deref())
    }

    /// Trimmed category, or `None` when absent or blank.
    #[must_use]
    pub fn category_key(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }

    /// Trimmed currency, or `None` when absent or blank.
    #[must_use]
    pub fn currency_key(&self) -> Option<&str> {
        non_blank(self.currency.as_deref())
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Ranks holdings by descending weight.
///
/// Holdings without a valid weight sort after all weighted ones. The sort is
/// stable, so equal weights keep their input order.
#[must_use]
pub fn rank_by_weight(holdings: &[Holding]) -> Vec<&Holding> {
    let mut ranked: Vec<&Holding> = holdings.iter().collect();
    ranked.sort_by(|a, b| match (a.valid_weight(), b.valid_weight()) {
        (Some(wa), Some(wb)) => wb.total_cmp(&wa),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builder() {
        let holding = Holding::new("AAPL")
            .with_category("Equity")
            .with_country("USA")
            .with_currency("USD")
            .with_weight(0.25)
            .with_market_value(dec!(25_000))
            .with_score(70.0)
            .with_volatility(22.5);

        assert_eq!(holding.name, "AAPL");
        assert_eq!(holding.valid_weight(), Some(0.25));
        assert_eq!(holding.market_value, Some(dec!(25_000)));
        assert_eq!(holding.valid_country_risk(), None);
    }

    #[test]
    fn test_non_finite_values_are_missing() {
        let holding = Holding::new("X")
            .with_weight(f64::NAN)
            .with_score(f64::INFINITY)
            .with_volatility(12.0);

        assert_eq!(holding.valid_weight(), None);
        assert_eq!(holding.valid_score(), None);
        assert_eq!(holding.valid_volatility(), Some(12.0));
    }

    #[test]
    fn test_keys_are_trimmed() {
        let holding = Holding::new("X").with_country("  Argentina ").with_category("   ");

        assert_eq!(holding.country_key(), Some("Argentina"));
        assert_eq!(holding.category_key(), None);
        assert_eq!(holding.currency_key(), None);
    }

    #[test]
    fn test_rank_by_weight() {
        let holdings = vec![
            Holding::new("A").with_weight(0.2),
            Holding::new("B"),
            Holding::new("C").with_weight(0.5),
            Holding::new("D").with_weight(0.2),
        ];

        let names: Vec<&str> = rank_by_weight(&holdings)
            .iter()
            .map(|h| h.name.as_str())
            .collect();
        assert_eq!(names, vec!["C", "A", "D", "B"]);
    }

    #[test]
    fn test_serde_defaults() {
        let holding: Holding = serde_json::from_str(r#"{"name": "BOND1", "weight": 0.1}"#).unwrap();
        assert_eq!(holding.valid_weight(), Some(0.1));
        assert!(holding.country.is_none());
    }
}
