//! Volatility stress scenarios.
//!
//! This module provides:
//! - Scenario definitions (portfolio-wide and per-country volatility shocks)
//! - The default scenario set
//! - Before/after impact on volatility, Herfindahl and Top-3
//!
//! Shocks are applied to a copy of the holdings; the caller's data is never
//! modified. Impacts are measured by recomputing metrics on the shocked copy.

mod impact;
mod scenarios;

pub use impact::*;
pub use scenarios::*;
