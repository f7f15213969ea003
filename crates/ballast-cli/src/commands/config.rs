//! Config command implementation.
//!
//! Prints the effective analysis configuration, or writes a starter file.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use crate::cli::OutputFormat;
use crate::commands::load_config;
use crate::output::{print_csv, print_json, print_success, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Configuration file to load (.toml or .json); defaults to built-ins
    #[arg(short, long, env = "BALLAST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the effective configuration as TOML to this path
    #[arg(long, value_name = "PATH")]
    pub init: Option<PathBuf>,

    /// Overwrite the file given to --init
    #[arg(long, requires = "init")]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    if let Some(path) = &args.init {
        if path.exists() && !args.force {
            bail!("{} already exists (use --force to overwrite)", path.display());
        }
        std::fs::write(path, config.to_toml_string()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        print_success(&format!("Wrote {}", path.display()));
        return Ok(());
    }

    match format {
        OutputFormat::Table => print!("{}", config.to_toml_string()?),
        OutputFormat::Json => print_json(&config)?,
        OutputFormat::Csv => {
            let t = &config.thresholds;
            let mut rows = vec![
                KeyValue::new("top_n", config.top_n.to_string()),
                KeyValue::new("parallel", config.parallel.to_string()),
                KeyValue::new("parallel_threshold", config.parallel_threshold.to_string()),
                KeyValue::new("thresholds.top1_max", t.top1_max.to_string()),
                KeyValue::new("thresholds.top3_max", t.top3_max.to_string()),
                KeyValue::new("thresholds.hhi_max", t.hhi_max.to_string()),
                KeyValue::new("thresholds.country_max", t.country_max.to_string()),
            ];
            for (profile, limit) in &t.vol_profile_limits {
                rows.push(KeyValue::new(
                    format!("thresholds.vol_profile_limits.{profile}"),
                    limit.to_string(),
                ));
            }
            rows.push(KeyValue::new("scenarios", config.scenarios.len().to_string()));
            print_csv(&rows)?;
        }
    }

    Ok(())
}
