//! Analyze command implementation.
//!
//! Runs the full diagnostics on a portfolio payload.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ballast_portfolio::{payload_from_json, run_analysis, AnalysisResult, ExposureBreakdown};
use clap::Args;
use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;
use tracing::info;

use crate::cli::OutputFormat;
use crate::commands::{load_config, validate_profile, validate_top_n};
use crate::error::CliError;
use crate::output::{
    format_delta, format_opt, format_pct, print_csv, print_header, print_info, print_json,
    print_success, print_table, severity_label, KeyValue,
};

/// File name written under the dated output directory.
pub const REPORT_FILE: &str = "analysis.json";

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Portfolio payload (JSON object with `holdings`, or a bare array)
    pub payload: PathBuf,

    /// Declared risk profile (e.g. Conservative, Moderate, Aggressive)
    #[arg(short, long, env = "BALLAST_PROFILE")]
    pub profile: Option<String>,

    /// Configuration file (.toml or .json)
    #[arg(short, long, env = "BALLAST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of largest holdings to show
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Also write the report to DIR/YYYY-MM-DD/analysis.json
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// What gets written to disk and printed as JSON.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// Payload metadata, untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<&'a Value>,
    /// The analysis.
    pub analysis: &'a AnalysisResult,
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(top_n) = args.top_n {
        config.top_n = validate_top_n(top_n)?;
    }

    let profile = args.profile.as_deref().filter(|p| !p.is_empty());
    if let Some(p) = profile {
        validate_profile(p, &config)?;
    }

    let text = std::fs::read_to_string(&args.payload).map_err(|source| CliError::ReadPayload {
        path: args.payload.clone(),
        source,
    })?;
    let payload = payload_from_json(&text)
        .with_context(|| format!("Failed to parse payload {}", args.payload.display()))?;

    info!(
        "Analyzing {} holdings from {}",
        payload.holdings.len(),
        args.payload.display()
    );

    let result = run_analysis(&payload.holdings, profile, &config);
    let report = Report {
        metadata: payload.metadata.as_ref(),
        analysis: &result,
    };

    let written = match &args.output_dir {
        Some(dir) => Some(write_report(dir, &report)?),
        None => None,
    };

    match format {
        OutputFormat::Table => {
            print_report_tables(&result)?;
            if let Some(path) = &written {
                if !quiet {
                    print_success(&format!("Wrote {}", path.display()));
                }
            }
        }
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Csv => print_csv(&metric_rows(&result))?,
    }

    Ok(())
}

/// Writes the report to `dir/YYYY-MM-DD/analysis.json` and returns the path.
pub fn write_report(dir: &Path, report: &Report<'_>) -> Result<PathBuf> {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let out_dir = dir.join(today);
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let path = out_dir.join(REPORT_FILE);
    std::fs::write(&path, serde_json::to_string_pretty(report)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!("Wrote report to {}", path.display());
    Ok(path)
}

fn metric_rows(result: &AnalysisResult) -> Vec<KeyValue> {
    let m = &result.metrics;
    let mut rows = vec![
        KeyValue::new("Holdings", m.holding_count.to_string()),
        KeyValue::from_pct("Total Weight", m.total_weight),
        KeyValue::from_f64("Weighted Score", m.weighted_score, 2),
        KeyValue::new("Weighted Volatility", format!("{:.2}%", m.weighted_volatility)),
        KeyValue::from_pct("Top 1", m.top1_concentration),
        KeyValue::from_pct("Top 3", m.top3_concentration),
        KeyValue::from_f64("Herfindahl", m.herfindahl_index, 4),
        KeyValue::new("Effective Holdings", format_opt(m.effective_holdings, 2)),
    ];
    if let Some(risk) = m.weighted_country_risk {
        rows.push(KeyValue::from_f64("Country Risk", risk, 2));
    }
    if let Some(profile) = &result.declared_profile {
        rows.push(KeyValue::new("Declared Profile", profile.clone()));
    }
    rows
}

#[derive(Tabled)]
struct HoldingRow {
    #[tabled(rename = "Holding")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Vol %")]
    volatility: String,
    #[tabled(rename = "Score")]
    score: String,
}

#[derive(Tabled)]
struct ExposureRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Weight")]
    weight: String,
}

#[derive(Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Scenario")]
    label: String,
    #[tabled(rename = "Vol After")]
    vol_after: String,
    #[tabled(rename = "Δ Vol")]
    vol_delta: String,
    #[tabled(rename = "Δ HHI")]
    hhi_delta: String,
    #[tabled(rename = "Δ Top 3")]
    top3_delta: String,
}

fn exposure_rows(exposure: &ExposureBreakdown) -> Vec<ExposureRow> {
    exposure
        .iter()
        .map(|(key, weight)| ExposureRow {
            key: key.to_string(),
            weight: format_pct(weight),
        })
        .collect()
}

fn print_report_tables(result: &AnalysisResult) -> Result<()> {
    print_header("Portfolio Metrics");
    print_table(&metric_rows(result))?;

    print_header("Top Holdings");
    let holdings: Vec<HoldingRow> = result
        .top_holdings
        .iter()
        .map(|h| HoldingRow {
            name: h.name.clone(),
            category: h.category.clone().unwrap_or_default(),
            country: h.country.clone().unwrap_or_default(),
            weight: h.weight.map_or_else(|| "-".to_string(), format_pct),
            volatility: format_opt(h.volatility, 2),
            score: format_opt(h.score, 1),
        })
        .collect();
    print_table(&holdings)?;

    print_header("Exposure by Country");
    print_table(&exposure_rows(&result.metrics.exposure_by_country))?;

    print_header("Exposure by Category");
    print_table(&exposure_rows(&result.metrics.exposure_by_category))?;

    print_header("Exposure by Currency");
    print_table(&exposure_rows(&result.metrics.exposure_by_currency))?;

    print_header("Alerts");
    if result.alerts.is_empty() {
        print_info("No alerts.");
    }
    for alert in &result.alerts {
        println!("  [{}] {}", severity_label(alert.severity), alert.message);
    }

    print_header("Recommendations");
    if result.recommendations.is_empty() {
        print_info("No rebalancing needed.");
    }
    for rec in &result.recommendations {
        println!("  {}: {}", rec.title, rec.detail);
        let preview: Vec<String> = rec
            .proposed_weights_preview
            .iter()
            .map(|p| {
                format!(
                    "{} {}",
                    p.name,
                    p.weight.map_or_else(|| "-".to_string(), format_pct)
                )
            })
            .collect();
        println!("    -> {}", preview.join(", "));
    }

    print_header("Stress Scenarios");
    let scenarios: Vec<ScenarioRow> = result
        .scenarios
        .iter()
        .map(|s| ScenarioRow {
            label: s.label.clone(),
            vol_after: format!("{:.2}%", s.metrics_after.weighted_volatility),
            vol_delta: format_delta(s.delta.weighted_volatility, 2),
            hhi_delta: format_delta(s.delta.herfindahl_index, 4),
            top3_delta: format_delta(s.delta.top3_concentration, 4),
        })
        .collect();
    print_table(&scenarios)?;

    Ok(())
}
