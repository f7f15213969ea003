//! Payload ingestion.
//!
//! Turns the JSON payload produced by spreadsheet exports into holdings. Two
//! shapes are accepted:
//!
//! ```json
//! { "metadata": { "source_file": "client.xlsx" }, "holdings": [ { "name": "SPY", "weight": 0.4 } ] }
//! ```
//!
//! or a bare array of holding records. Records may use the canonical field
//! names or the column headers of the source sheet (`Activo`, `Peso`,
//! `VolatilidadFinal`, ...).
//!
//! Only structural problems are errors. A field that is missing or cannot be
//! read as a number becomes `None` on the holding.

use crate::error::{PortfolioError, PortfolioResult};
use crate::types::Holding;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::{debug, warn};

/// Top-level key holding the record list.
pub const HOLDINGS_KEY: &str = "holdings";

/// Legacy name of [`HOLDINGS_KEY`] in source-sheet exports.
pub const LEGACY_HOLDINGS_KEY: &str = "activos";

/// A weight sum above this is read as percentages.
pub const PERCENT_SCALE_CUTOFF: f64 = 1.5;

/// Tolerance band for the weight sum after scaling.
pub const WEIGHT_SUM_TOLERANCE: (f64, f64) = (0.99, 1.01);

const NAME: &[&str] = &["name", "Activo"];
const CATEGORY: &[&str] = &["category", "type", "Tipo"];
const COUNTRY: &[&str] = &["country", "Pais"];
const CURRENCY: &[&str] = &["currency", "Moneda"];
const MARKET_VALUE: &[&str] = &["market_value", "Valor en USD"];
const WEIGHT: &[&str] = &["weight", "Peso"];
const VOLATILITY: &[&str] = &["volatility", "VolatilidadFinal"];
const SCORE: &[&str] = &["score", "ScoreActivoFinal"];
const COUNTRY_RISK: &[&str] = &["country_risk", "CountryContextScore"];

/// A parsed payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    /// Free-form metadata, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    /// Normalized holdings.
    pub holdings: Vec<Holding>,
}

/// Parses a payload document.
///
/// # Errors
///
/// - [`PortfolioError::InvalidPayload`] if the document is neither an object
///   nor an array, or the holdings entry is not an array.
/// - [`PortfolioError::MissingField`] if an object payload has no holdings
///   entry.
pub fn parse_payload(value: &Value) -> PortfolioResult<Payload> {
    let (metadata, records) = match value {
        Value::Array(records) => (None, records),
        Value::Object(obj) => {
            let holdings = obj
                .get(HOLDINGS_KEY)
                .or_else(|| obj.get(LEGACY_HOLDINGS_KEY))
                .ok_or_else(|| PortfolioError::missing_field(HOLDINGS_KEY))?;
            let Value::Array(records) = holdings else {
                return Err(PortfolioError::invalid_payload(format!(
                    "'{HOLDINGS_KEY}' must be an array, got {}",
                    type_name(holdings)
                )));
            };
            (obj.get("metadata").cloned(), records)
        }
        other => {
            return Err(PortfolioError::invalid_payload(format!(
                "expected an object or an array, got {}",
                type_name(other)
            )))
        }
    };

    let mut holdings = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        match record {
            Value::Object(fields) => holdings.push(holding_from_record(fields)),
            other => warn!("Skipping record {}: expected an object, got {}", i, type_name(other)),
        }
    }

    normalize_weight_scale(&mut holdings);
    debug!("Parsed {} holdings from {} records", holdings.len(), records.len());

    Ok(Payload { metadata, holdings })
}

/// Parses a payload from JSON text.
///
/// # Errors
///
/// Returns [`PortfolioError::InvalidPayload`] if the text is not JSON, and
/// otherwise the errors of [`parse_payload`].
pub fn payload_from_json(s: &str) -> PortfolioResult<Payload> {
    let value: Value =
        serde_json::from_str(s).map_err(|e| PortfolioError::invalid_payload(e.to_string()))?;
    parse_payload(&value)
}

/// Parses JSON text and returns only the holdings.
///
/// # Errors
///
/// Same as [`payload_from_json`].
pub fn holdings_from_json(s: &str) -> PortfolioResult<Vec<Holding>> {
    payload_from_json(s).map(|p| p.holdings)
}

/// Builds a holding from one record, tolerating any missing field.
#[must_use]
pub fn holding_from_record(record: &Map<String, Value>) -> Holding {
    Holding {
        name: field(record, NAME).and_then(coerce_text).unwrap_or_default(),
        category: field(record, CATEGORY).and_then(coerce_text),
        country: field(record, COUNTRY).and_then(coerce_text),
        currency: field(record, CURRENCY).and_then(coerce_text),
        weight: field(record, WEIGHT).and_then(coerce_number),
        market_value: field(record, MARKET_VALUE).and_then(coerce_decimal),
        score: field(record, SCORE).and_then(coerce_number),
        volatility: field(record, VOLATILITY).and_then(coerce_number),
        country_risk: field(record, COUNTRY_RISK).and_then(coerce_number),
    }
}

/// Reads a value as a finite number.
///
/// Accepts JSON numbers and numeric strings. Strings are trimmed, a trailing
/// `%` is dropped, and `,` is read as the decimal separator when there is no
/// `.`. Anything else is `None`.
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => clean_numeric(s).parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|x| x.is_finite())
}

fn coerce_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(&clean_numeric(s))
            .ok()
            .or_else(|| coerce_number(value).and_then(Decimal::from_f64)),
        _ => coerce_number(value).and_then(Decimal::from_f64),
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn clean_numeric(s: &str) -> String {
    let s = s.trim();
    let s = s.strip_suffix('%').unwrap_or(s).trim_end();
    if s.contains(',') && !s.contains('.') {
        s.replace(',', ".")
    } else {
        s.to_string()
    }
}

fn field<'a>(record: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| record.get(*name))
        .find(|v| !v.is_null())
}

/// Rescales percentage weights to fractions.
///
/// If the valid weights sum to more than [`PERCENT_SCALE_CUTOFF`] every
/// weight is divided by 100. A sum still outside [`WEIGHT_SUM_TOLERANCE`]
/// is logged; weights are never re-normalized.
pub fn normalize_weight_scale(holdings: &mut [Holding]) {
    let mut total: f64 = holdings.iter().filter_map(Holding::valid_weight).sum();

    if total > PERCENT_SCALE_CUTOFF {
        debug!("Weights sum to {:.4}; reading them as percentages", total);
        for h in holdings.iter_mut() {
            if let Some(w) = h.valid_weight() {
                h.weight = Some(w / 100.0);
            }
        }
        total /= 100.0;
    }

    let (lo, hi) = WEIGHT_SUM_TOLERANCE;
    if !holdings.is_empty() && !(lo..=hi).contains(&total) {
        warn!("Weights sum to {:.4}, expected 1.0", total);
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
