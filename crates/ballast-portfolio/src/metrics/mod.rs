//! Portfolio metrics.
//!
//! This module computes the metrics snapshot every other component works
//! from:
//! - Weighted score and volatility
//! - Concentration (Top-1, Top-3, Herfindahl)
//! - Exposure breakdowns by country, category and currency
//!
//! All functions are pure - they take holdings as input and return computed
//! results. No caching, no I/O, no side effects.

mod concentration;
mod exposure;
mod summary;

pub use concentration::*;
pub use exposure::*;
pub use summary::*;
