//! Integration tests for ballast-portfolio.
//!
//! These tests run the full pipeline, from payload JSON to analysis result,
//! on realistic client portfolios.

use approx::assert_relative_eq;
use ballast_portfolio::prelude::*;
use ballast_portfolio::stress_scenarios;
use serde_json::json;

// =============================================================================
// TEST FIXTURES
// =============================================================================

/// Three-holding reference portfolio with known metrics.
fn reference_holdings() -> Vec<Holding> {
    vec![
        Holding::new("A")
            .with_category("Equity")
            .with_country("Argentina")
            .with_currency("ARS")
            .with_weight(0.5)
            .with_score(80.0)
            .with_volatility(20.0),
        Holding::new("B")
            .with_category("Bond")
            .with_country("USA")
            .with_currency("USD")
            .with_weight(0.3)
            .with_score(60.0)
            .with_volatility(15.0),
        Holding::new("C")
            .with_category("Equity")
            .with_country("USA")
            .with_currency("USD")
            .with_weight(0.2)
            .with_score(40.0)
            .with_volatility(10.0),
    ]
}

/// Spreadsheet export of a balanced client portfolio, weights in percent.
fn sheet_payload() -> serde_json::Value {
    json!({
        "metadata": {"source_file": "client_042.xlsx", "generated_at": "2026-01-05T10:00:00"},
        "activos": [
            {"Activo": "SPY",   "Tipo": "ETF",   "Pais": "USA",       "Moneda": "USD", "Valor en USD": 18000, "Peso": 18, "VolatilidadFinal": 17.0, "ScoreActivoFinal": 72},
            {"Activo": "QQQ",   "Tipo": "ETF",   "Pais": "USA",       "Moneda": "USD", "Valor en USD": 12000, "Peso": 12, "VolatilidadFinal": 22.0, "ScoreActivoFinal": 65},
            {"Activo": "AL30",  "Tipo": "Bono",  "Pais": "Argentina", "Moneda": "USD", "Valor en USD": 10000, "Peso": 10, "VolatilidadFinal": 30.0, "ScoreActivoFinal": 45},
            {"Activo": "GD35",  "Tipo": "Bono",  "Pais": "Argentina", "Moneda": "USD", "Valor en USD": 8000,  "Peso": 8,  "VolatilidadFinal": 28.0, "ScoreActivoFinal": 48},
            {"Activo": "EWZ",   "Tipo": "ETF",   "Pais": "Brazil",    "Moneda": "USD", "Valor en USD": 10000, "Peso": 10, "VolatilidadFinal": 26.0, "ScoreActivoFinal": 55},
            {"Activo": "ECH",   "Tipo": "ETF",   "Pais": "Chile",     "Moneda": "USD", "Valor en USD": 10000, "Peso": 10, "VolatilidadFinal": 21.0, "ScoreActivoFinal": 58},
            {"Activo": "BND",   "Tipo": "ETF",   "Pais": "USA",       "Moneda": "USD", "Valor en USD": 12000, "Peso": 12, "VolatilidadFinal": 6.0,  "ScoreActivoFinal": 80},
            {"Activo": "GLD",   "Tipo": "ETF",   "Pais": "Global",    "Moneda": "USD", "Valor en USD": 10000, "Peso": 10, "VolatilidadFinal": 14.0, "ScoreActivoFinal": 70},
            {"Activo": "Cash",  "Tipo": "Cash",  "Pais": "USA",       "Moneda": "USD", "Valor en USD": 10000, "Peso": 10, "VolatilidadFinal": 0.0,  "ScoreActivoFinal": 90}
        ]
    })
}

// =============================================================================
// END-TO-END
// =============================================================================

#[test]
fn test_reference_portfolio_end_to_end() {
    let result = run_analysis(&reference_holdings(), None, &AnalysisConfig::default());
    let m = &result.metrics;

    assert_relative_eq!(m.weighted_score, 66.0, epsilon = 1e-9);
    assert_relative_eq!(m.weighted_volatility, 16.5, epsilon = 1e-9);
    assert_relative_eq!(m.top1_concentration, 0.5);
    assert_relative_eq!(m.top3_concentration, 1.0, epsilon = 1e-12);
    assert_relative_eq!(m.herfindahl_index, 0.38, epsilon = 1e-12);

    let kinds: Vec<AlertKind> = result.alerts.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![
            AlertKind::Top1Concentration,
            AlertKind::Top3Concentration,
            AlertKind::Herfindahl
        ]
    );
    let severities: Vec<Severity> = result.alerts.iter().map(|a| a.severity).collect();
    assert_eq!(severities, vec![Severity::High, Severity::High, Severity::Medium]);

    let rules: Vec<RebalanceRule> = result.recommendations.iter().map(|r| r.rule).collect();
    assert_eq!(rules, vec![RebalanceRule::CapTop1, RebalanceRule::CapTop3]);

    let ids: Vec<&str> = result.scenarios.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["risk_off", "shock_arg", "shock_usa"]);
}

#[test]
fn test_sheet_payload_end_to_end() {
    let payload = parse_payload(&sheet_payload()).unwrap();
    assert_eq!(payload.holdings.len(), 9);
    assert_eq!(payload.metadata.as_ref().unwrap()["source_file"], "client_042.xlsx");

    let total: f64 = payload.holdings.iter().filter_map(Holding::valid_weight).sum();
    assert_relative_eq!(total, 1.0, epsilon = 1e-9);

    let result = run_analysis(&payload.holdings, Some("Moderate"), &AnalysisConfig::default());

    // Diversified: top3 = 0.42, largest country USA = 0.52
    assert!(result.alerts.is_empty(), "unexpected alerts: {:?}", result.alerts);
    assert!(result.recommendations.is_empty());
    assert_relative_eq!(result.metrics.top3_concentration, 0.42, epsilon = 1e-9);
    assert_eq!(result.metrics.exposure_by_country.top().unwrap().key, "USA");
    assert_relative_eq!(
        result.metrics.exposure_by_country.get("Argentina").unwrap(),
        0.18,
        epsilon = 1e-9
    );

    assert_eq!(result.top_holdings.len(), 9);
    assert_eq!(result.top_holdings[0].name, "SPY");

    // Argentina shock: 0.10 × 30 × 0.4 + 0.08 × 28 × 0.4
    assert_relative_eq!(result.scenarios[1].delta.weighted_volatility, 2.096, epsilon = 1e-9);
}

#[test]
fn test_conservative_profile_mismatch() {
    let payload = parse_payload(&sheet_payload()).unwrap();
    let result = run_analysis(&payload.holdings, Some("Conservative"), &AnalysisConfig::default());

    assert_eq!(result.alerts.len(), 1);
    assert_eq!(result.alerts[0].kind, AlertKind::ProfileMismatch);
    assert_eq!(result.declared_profile.as_deref(), Some("Conservative"));
}

// =============================================================================
// CONFIGURATION
// =============================================================================

#[test]
fn test_custom_config_changes_outcome() {
    let config = AnalysisConfig::from_toml_str(
        r#"
        top_n = 2

        [thresholds]
        top1_max = 0.60
        top3_max = 1.00
        hhi_max = 0.50

        [[scenarios]]
        id = "calm"
        type = "scale_all_volatility"
        multiplier = 0.5
        "#,
    )
    .unwrap();

    let result = run_analysis(&reference_holdings(), None, &config);

    assert!(result.alerts.is_empty());
    assert!(result.recommendations.is_empty());
    assert_eq!(result.top_holdings.len(), 2);
    assert_eq!(result.scenarios.len(), 1);
    assert_eq!(result.scenarios[0].label, "calm");
    assert_relative_eq!(result.scenarios[0].delta.weighted_volatility, -8.25, epsilon = 1e-9);
}

#[test]
fn test_empty_scenario_list_means_no_scenarios() {
    let config = AnalysisConfig::default().with_scenarios(Vec::new());
    let result = run_analysis(&reference_holdings(), None, &config);
    assert!(result.scenarios.is_empty());
}

#[test]
fn test_standard_scenarios_reexported() {
    assert_eq!(stress_scenarios::all(), AnalysisConfig::default().scenarios);
}

// =============================================================================
// SERIALIZATION
// =============================================================================

#[test]
fn test_result_json_shape() {
    let result = run_analysis(&reference_holdings(), Some("Moderate"), &AnalysisConfig::default());
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["alerts"][0]["severity"], "high");
    assert_eq!(json["alerts"][0]["kind"], "top1_concentration");
    assert_eq!(json["recommendations"][0]["rule"], "cap_top1");
    assert_eq!(json["metrics"]["exposure_by_country"][0]["key"], "Argentina");
    assert!(json["scenarios"][0]["delta"]["weighted_volatility"].is_number());
    assert!(json["scenarios"][0]["metrics_after"]["top3_concentration"].is_number());
    assert_eq!(json["declared_profile"], "Moderate");

    let back: AnalysisResult = serde_json::from_value(json).unwrap();
    assert_eq!(back.alerts, result.alerts);
}

#[test]
fn test_missing_holdings_key_is_an_error() {
    let err = parse_payload(&json!({"metadata": {}})).unwrap_err();
    assert!(matches!(err, PortfolioError::MissingField { .. }));
}
