//! Scenarios command implementation.
//!
//! Lists the stress scenarios an analysis would evaluate.

use std::path::PathBuf;

use anyhow::Result;
use ballast_portfolio::Scenario;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::load_config;
use crate::output::{print_header, print_output};

/// Arguments for the scenarios command.
#[derive(Args, Debug)]
pub struct ScenariosArgs {
    /// Configuration file (.toml or .json); defaults to the built-in set
    #[arg(short, long, env = "BALLAST_CONFIG")]
    pub config: Option<PathBuf>,
}

/// One scenario, flattened for display.
#[derive(Debug, Serialize, Tabled)]
pub struct ScenarioRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Shock")]
    pub shock: String,
    #[tabled(rename = "Multiplier")]
    pub multiplier: f64,
    #[tabled(rename = "Valid")]
    pub valid: bool,
}

impl From<&Scenario> for ScenarioRow {
    fn from(s: &Scenario) -> Self {
        Self {
            id: s.id.clone(),
            label: s.label().to_string(),
            shock: s.shock.describe(),
            multiplier: s.shock.multiplier(),
            valid: s.validate().is_ok(),
        }
    }
}

/// Execute the scenarios command.
pub fn execute(args: ScenariosArgs, format: OutputFormat) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let rows: Vec<ScenarioRow> = config.scenarios.iter().map(ScenarioRow::from).collect();

    if format == OutputFormat::Table {
        print_header("Stress Scenarios");
    }
    print_output(&rows, format)
}
