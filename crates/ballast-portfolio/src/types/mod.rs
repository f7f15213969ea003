//! Domain types for portfolio diagnostics.
//!
//! - [`Holding`]: A single position with optional numeric fields
//! - [`Thresholds`]: Concentration and volatility limits
//! - [`AnalysisConfig`]: Thresholds, scenarios and computation settings

mod config;
mod holding;
mod thresholds;

pub use config::{AnalysisConfig, DEFAULT_TOP_N};
pub use holding::{rank_by_weight, Holding};
pub use thresholds::{
    Thresholds, DEFAULT_COUNTRY_MAX, DEFAULT_HHI_MAX, DEFAULT_TOP1_MAX, DEFAULT_TOP3_MAX,
    DEFAULT_VOL_PROFILE_LIMITS,
};
