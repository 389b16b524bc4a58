//! Analysis SR command line
//!
//! analysis_sr build <measurements.{json,yaml}> <target.json> <out.json> [purpose]
//! analysis_sr extract <document.json> [name ...]

use analysis_sr::{
    extract_all_values, find_by_name_and_optional_subtype, AnalysisSrBuilder, SrConfig,
};
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage:
  analysis_sr build <measurements.{json,yaml}> <target.json> <out.json> [purpose]
  analysis_sr extract <document.json> [name ...]";

fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("analysis_sr=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = SrConfig::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("build") if args.len() >= 4 => {
            let purpose = args.get(4).map(String::as_str).unwrap_or("Radiobiology analysis");
            build(Path::new(&args[1]), Path::new(&args[2]), Path::new(&args[3]), purpose, config)
        }
        Some("extract") if args.len() >= 2 => extract(Path::new(&args[1]), &args[2..], &config),
        _ => bail!(USAGE),
    }
}

fn load_measurement_file(path: &Path) -> Result<Vec<Value>> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let items: Vec<Value> = if is_yaml {
        serde_yaml::from_str(&raw).with_context(|| format!("Invalid YAML in {:?}", path))?
    } else {
        serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {:?}", path))?
    };
    Ok(items)
}

fn build(
    measurements: &Path,
    target: &Path,
    out: &Path,
    purpose: &str,
    config: SrConfig,
) -> Result<()> {
    let items = load_measurement_file(measurements)?;

    let mut builder = AnalysisSrBuilder::with_config(target, purpose, config);
    let added = builder.add_values(&items).context("Rejected measurement file")?;
    builder.build().context("Failed to build SR")?;
    builder.save_sr_to(out).with_context(|| format!("Failed to save SR to {:?}", out))?;

    info!("Stored {} measurements in {:?}", added, out);
    Ok(())
}

fn extract(document: &Path, names: &[String], config: &SrConfig) -> Result<()> {
    let all = extract_all_values(document, config)
        .with_context(|| format!("Failed to extract values from {:?}", document))?;

    let output = if names.is_empty() {
        serde_json::to_value(&all)?
    } else {
        serde_json::to_value(find_by_name_and_optional_subtype(&all, names, None)?)?
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
