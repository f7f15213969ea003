//! Configuration for a portfolio analysis run.

use super::Thresholds;
use crate::error::{PortfolioError, PortfolioResult};
use crate::stress::{standard, Scenario};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of holdings rendered in the result.
pub const DEFAULT_TOP_N: usize = 10;

/// Configuration for an analysis run.
///
/// Bundles the thresholds and scenario set injected into the engine together
/// with a few computation parameters. Every field has a default, so a config
/// file only needs to list what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of largest holdings echoed in the result.
    pub top_n: usize,

    /// Enable parallel scenario evaluation (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum scenario count to trigger parallel evaluation.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,

    /// Concentration and volatility limits.
    pub thresholds: Thresholds,

    /// Stress scenarios, evaluated in order.
    pub scenarios: Vec<Scenario>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            parallel: false,
            parallel_threshold: 8,
            thresholds: Thresholds::default(),
            scenarios: standard::all(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Replaces the scenario set.
    #[must_use]
    pub fn with_scenarios(mut self, scenarios: Vec<Scenario>) -> Self {
        self.scenarios = scenarios;
        self
    }

    /// Sets how many holdings are echoed in the result.
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }

    /// Parses a TOML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Config`] if the document is not valid TOML
    /// or does not match the configuration schema.
    pub fn from_toml_str(s: &str) -> PortfolioResult<Self> {
        toml::from_str(s).map_err(|e| PortfolioError::config(e.to_string()))
    }

    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Config`] if the document is not valid JSON
    /// or does not match the configuration schema.
    pub fn from_json_str(s: &str) -> PortfolioResult<Self> {
        serde_json::from_str(s).map_err(|e| PortfolioError::config(e.to_string()))
    }

    /// Loads a configuration file, choosing the format by extension.
    ///
    /// `.json` files are parsed as JSON; anything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Config`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> PortfolioResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| PortfolioError::config(format!("{}: {}", path.display(), e)))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Serializes the configuration as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Config`] if serialization fails.
    pub fn to_toml_string(&self) -> PortfolioResult<String> {
        toml::to_string_pretty(self).map_err(|e| PortfolioError::config(e.to_string()))
    }
}
