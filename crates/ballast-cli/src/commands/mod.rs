//! CLI command implementations.

pub mod analyze;
pub mod config;
pub mod scenarios;

// Re-export submodules for convenience
pub use analyze::AnalyzeArgs;
pub use config::ConfigArgs;
pub use scenarios::ScenariosArgs;

use std::path::Path;

use anyhow::{Context, Result};
use ballast_portfolio::AnalysisConfig;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Loads the configuration file, or the built-in defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            AnalysisConfig::load(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))
        }
        None => Ok(AnalysisConfig::default()),
    }
}

/// Validates a `--top-n` value.
pub fn validate_top_n(top_n: usize) -> CliResult<usize> {
    if top_n == 0 {
        return Err(CliError::InvalidTopN(top_n));
    }
    Ok(top_n)
}

/// Checks a declared profile against the configured volatility limits.
pub fn validate_profile(profile: &str, config: &AnalysisConfig) -> CliResult<()> {
    let limits = &config.thresholds.vol_profile_limits;
    if limits.contains_key(profile) {
        return Ok(());
    }
    Err(CliError::UnknownProfile {
        profile: profile.to_string(),
        known: limits.keys().cloned().collect::<Vec<_>>().join(", "),
    })
}
