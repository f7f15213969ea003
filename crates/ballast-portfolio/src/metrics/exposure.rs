//! Exposure breakdowns by country, category and currency.

use crate::types::Holding;
use serde::{Deserialize, Serialize};

/// Summed weight for one bucket key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureEntry {
    /// Bucket key (country, category or currency), trimmed.
    pub key: String,

    /// Summed portfolio weight of the bucket.
    pub weight: f64,
}

/// Weight per bucket, ordered by descending weight.
///
/// Buckets with equal weight keep the order in which their key was first
/// encountered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExposureBreakdown {
    entries: Vec<ExposureEntry>,
}

impl ExposureBreakdown {
    /// Returns the entries in descending weight order.
    #[must_use]
    pub fn entries(&self) -> &[ExposureEntry] {
        &self.entries
    }

    /// Returns the largest bucket.
    #[must_use]
    pub fn top(&self) -> Option<&ExposureEntry> {
        self.entries.first()
    }

    /// Returns the weight of a bucket.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.weight)
    }

    /// Sum of all bucket weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no holding contributed to the breakdown.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, weight)` pairs in descending weight order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|e| (e.key.as_str(), e.weight))
    }
}

/// Groups holdings by a key and sums their weights.
///
/// The classifier returns the bucket key for a holding; holdings whose key is
/// `None` or blank, or whose weight is missing, are skipped.
#[must_use]
pub fn exposure_by<'a, F>(holdings: &'a [Holding], classifier: F) -> ExposureBreakdown
where
    F: Fn(&'a Holding) -> Option<&'a str>,
{
    let mut entries: Vec<ExposureEntry> = Vec::new();

    for holding in holdings {
        let Some(weight) = holding.valid_weight() else {
            continue;
        };
        let Some(key) = classifier(holding).map(str::trim).filter(|k| !k.is_empty()) else {
            continue;
        };

        match entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.weight += weight,
            None => entries.push(ExposureEntry {
                key: key.to_string(),
                weight,
            }),
        }
    }

    // Stable: ties keep first-encountered order.
    entries.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    ExposureBreakdown { entries }
}

/// Exposure by country.
#[must_use]
pub fn exposure_by_country(holdings: &[Holding]) -> ExposureBreakdown {
    exposure_by(holdings, Holding::country_key)
}

/// Exposure by asset category.
#[must_use]
pub fn exposure_by_category(holdings: &[Holding]) -> ExposureBreakdown {
    exposure_by(holdings, Holding::category_key)
}

/// Exposure by currency.
#[must_use]
pub fn exposure_by_currency(holdings: &[Holding]) -> ExposureBreakdown {
    exposure_by(holdings, Holding::currency_key)
}
