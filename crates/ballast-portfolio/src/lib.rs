//! # Ballast Portfolio
//!
//! Concentration and risk diagnostics for client portfolios.
//!
//! Given a list of holdings (weights, volatilities, scores, countries), this
//! crate computes portfolio-level metrics, flags threshold breaches, proposes
//! simple rebalancing moves and measures the effect of volatility shocks.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations are stateless with explicit inputs
//! - **Missing data degrades, never fails**: numeric fields are `Option<f64>`
//!   and a holding without a value is left out of that aggregate
//! - **Injected limits**: thresholds and scenarios arrive via [`AnalysisConfig`]
//! - **Config-driven parallelism**: Optional rayon support for scenario fan-out
//!
//! ## Features
//!
//! - **Metrics**: weighted score and volatility, Top-1 / Top-3, Herfindahl,
//!   exposure by country, category and currency
//! - **Alerts**: five threshold rules ranked by severity
//! - **Rebalancing**: cap the largest holding or the top three
//! - **Stress**: portfolio-wide and per-country volatility shocks
//! - **Ingestion**: JSON payloads from spreadsheet exports
//!
//! ## Quick Start
//!
//! ```rust
//! use ballast_portfolio::prelude::*;
//!
//! let holdings = vec![
//!     Holding::new("SPY").with_country("USA").with_weight(0.5).with_volatility(18.0),
//!     Holding::new("AL30").with_country("Argentina").with_weight(0.3).with_volatility(35.0),
//!     Holding::new("BND").with_country("USA").with_weight(0.2).with_volatility(6.0),
//! ];
//!
//! let result = run_analysis(&holdings, Some("Moderate"), &AnalysisConfig::default());
//! assert_eq!(result.alerts[0].severity, Severity::High);
//! assert_eq!(result.scenarios.len(), 3);
//! ```
//!
//! ## Module Overview
//!
//! - [`metrics`] - Weighted aggregates, concentration and exposures
//! - [`alerts`] - Threshold rules
//! - [`rebalance`] - Proportional redistribution proposals
//! - [`stress`] - Scenario definitions and impact
//! - [`analysis`] - The combined run
//! - [`ingest`] - Payload parsing
//! - [`types`] - Core types (Holding, Thresholds, Config)
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel scenario evaluation

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

// Module declarations
pub mod alerts;
pub mod analysis;
pub mod error;
pub mod ingest;
pub mod metrics;
pub mod parallel;
pub mod rebalance;
pub mod stress;
pub mod types;

// Re-export error types at crate root
pub use error::{PortfolioError, PortfolioResult};

// Re-export main types
pub use types::{rank_by_weight, AnalysisConfig, Holding, Thresholds};

pub use metrics::{
    compute_metrics, effective_holdings, exposure_by, exposure_by_category, exposure_by_country,
    exposure_by_currency, herfindahl_index, top_n_concentration, ExposureBreakdown, ExposureEntry,
    PortfolioMetrics,
};

pub use alerts::{generate_alerts, Alert, AlertKind, Severity};

pub use rebalance::{recommend_rebalancing, redistribute, Recommendation, RebalanceRule, WeightPreview};

pub use stress::{
    apply_scenario, evaluate_scenario, run_scenarios, standard as stress_scenarios,
    MetricSnapshot, Scenario, ScenarioResult, Shock,
};

pub use analysis::{run_analysis, AnalysisResult, TopHolding};

pub use ingest::{holdings_from_json, parse_payload, payload_from_json, Payload};

pub use parallel::maybe_parallel_filter_map;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use ballast_portfolio::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{PortfolioError, PortfolioResult};

    pub use crate::types::{AnalysisConfig, Holding, Thresholds};

    pub use crate::metrics::{compute_metrics, ExposureBreakdown, PortfolioMetrics};

    pub use crate::alerts::{generate_alerts, Alert, AlertKind, Severity};

    pub use crate::rebalance::{recommend_rebalancing, Recommendation, RebalanceRule};

    pub use crate::stress::{apply_scenario, run_scenarios, Scenario, ScenarioResult, Shock};

    pub use crate::analysis::{run_analysis, AnalysisResult};

    pub use crate::ingest::{parse_payload, payload_from_json, Payload};

    pub use rust_decimal::Decimal;
}
