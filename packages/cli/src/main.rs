#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line adapter for the fire map data core.
//!
//! Translates flags into core calls and core results into printed tables;
//! all filtering, aggregation, and caching logic lives in the library
//! packages. This is the same boundary the browser dashboard keeps
//! between its controls and the data layer.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use fire_map_analytics::{aggregate_by_month, filter_by_cause};
use fire_map_cost::SuppressionCosts;
use fire_map_dataset::{DatasetCache, HttpPeriodSource};
use fire_map_dataset_models::DatasetConfig;
use fire_map_fire_models::CausePredicate;
use fire_map_period::PeriodKey;

#[derive(Parser)]
#[command(name = "fire-map", about = "Wildfire incident dashboard data tools")]
struct Cli {
    /// Path to a TOML config file overriding the dataset defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print monthly incident counts and acreage for a period range.
    Trend {
        /// First period, as M/YYYY. Defaults to the start of the
        /// configured range.
        #[arg(long, value_parser = parse_period)]
        from: Option<PeriodKey>,

        /// Last period, as M/YYYY. Defaults to the end of the configured
        /// range.
        #[arg(long, value_parser = parse_period)]
        to: Option<PeriodKey>,

        /// Cause filter: any, human, or natural.
        #[arg(long, value_parser = parse_cause, default_value = "any")]
        cause: CausePredicate,
    },

    /// Print the incidents for one period.
    Map {
        /// Calendar year.
        #[arg(long)]
        year: i32,

        /// Month of year, 1-12.
        #[arg(long)]
        month: u8,

        /// Cause filter: any, human, or natural.
        #[arg(long, value_parser = parse_cause, default_value = "any")]
        cause: CausePredicate,
    },

    /// Print the annual suppression cost table.
    Costs {
        /// URL of the cost document. Defaults to costs.json under the
        /// configured data endpoint.
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Trend { from, to, cause } => cmd_trend(config, from, to, cause).await,
        Commands::Map { year, month, cause } => cmd_map(config, year, month, cause).await,
        Commands::Costs { url } => cmd_costs(&config, url).await,
    }
}

/// Loads the dataset config from `path`, or the defaults when no file
/// was given.
fn load_config(path: Option<&Path>) -> Result<DatasetConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&raw)?)
        }
        None => Ok(DatasetConfig::default()),
    }
}

/// Parses a `M/YYYY` period argument.
fn parse_period(value: &str) -> Result<PeriodKey, String> {
    let (month, year) = value
        .split_once('/')
        .ok_or_else(|| format!("expected M/YYYY, got '{value}'"))?;
    let month: u8 = month
        .trim()
        .parse()
        .map_err(|e| format!("invalid month in '{value}': {e}"))?;
    let year: i32 = year
        .trim()
        .parse()
        .map_err(|e| format!("invalid year in '{value}': {e}"))?;
    PeriodKey::new(year, month).map_err(|e| e.to_string())
}

/// Parses a cause filter argument. Accepts `both` as an alias for `any`,
/// matching the dashboard's radio label.
fn parse_cause(value: &str) -> Result<CausePredicate, String> {
    match value.to_ascii_lowercase().as_str() {
        "any" | "both" => Ok(CausePredicate::Any),
        "human" => Ok(CausePredicate::Human),
        "natural" => Ok(CausePredicate::Natural),
        other => Err(format!(
            "unknown cause filter '{other}': expected any, human, or natural"
        )),
    }
}

/// Fetches each period in the range, filters, aggregates, and prints a
/// table of monthly totals.
async fn cmd_trend(
    config: DatasetConfig,
    from: Option<PeriodKey>,
    to: Option<PeriodKey>,
    cause: CausePredicate,
) -> Result<(), Box<dyn std::error::Error>> {
    let bounds = config.bounds;
    let from = from.unwrap_or_else(|| bounds.first());
    let to = to.unwrap_or_else(|| bounds.last());
    if from > to {
        return Err(format!("range start {from} is after range end {to}").into());
    }

    let source = HttpPeriodSource::new(config)?;
    let cache = DatasetCache::new(source, bounds);

    let mut incidents = Vec::new();
    let mut period = from;
    loop {
        // A failed period shouldn't hide the rest of the range.
        match cache.get(period).await {
            Ok(collection) => {
                let filtered = filter_by_cause(&collection, cause);
                incidents.extend(filtered.incidents);
            }
            Err(e) => log::warn!("skipping {period}: {e}"),
        }
        if period == to {
            break;
        }
        period = period.next();
    }

    let aggregates = aggregate_by_month(&incidents);
    if aggregates.is_empty() {
        println!("No incidents in {from} - {to} for cause filter {cause}");
        return Ok(());
    }

    println!("{:>8}  {:>8}  {:>14}", "period", "fires", "acres burned");
    for aggregate in &aggregates {
        println!(
            "{:>8}  {:>8}  {:>14.1}",
            aggregate.period, aggregate.incident_count, aggregate.total_acres_burned,
        );
    }

    Ok(())
}

/// Fetches one period and prints its incidents.
async fn cmd_map(
    config: DatasetConfig,
    year: i32,
    month: u8,
    cause: CausePredicate,
) -> Result<(), Box<dyn std::error::Error>> {
    let period = PeriodKey::new(year, month)?;
    let bounds = config.bounds;

    let source = HttpPeriodSource::new(config)?;
    let cache = DatasetCache::new(source, bounds);

    let collection = cache.get(period).await?;
    let filtered = filter_by_cause(&collection, cause);

    println!(
        "{} incidents in {period} (cause filter: {cause})",
        filtered.len()
    );
    for incident in &filtered.incidents {
        println!(
            "  {:<24}  {:>8}  {:>10}  ({:.4}, {:.4})",
            incident.incident_name.as_deref().unwrap_or("(unnamed)"),
            incident.cause,
            incident
                .incident_size
                .map_or_else(|| "-".to_string(), |size| format!("{size:.1} ac")),
            incident.latitude,
            incident.longitude,
        );
    }

    Ok(())
}

/// Loads and prints the annual suppression cost table.
async fn cmd_costs(
    config: &DatasetConfig,
    url: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = url.unwrap_or_else(|| {
        format!("{}/data/costs.json", config.base_url.trim_end_matches('/'))
    });

    let client = reqwest::Client::new();
    let costs = SuppressionCosts::fetch(&client, &url).await?;

    if costs.is_empty() {
        println!("No suppression cost data at {url}");
        return Ok(());
    }

    println!("{:>6}  {:>18}", "year", "suppression cost");
    for (year, cost) in costs.iter() {
        println!("{year:>6}  {cost:>18.0}");
    }

    Ok(())
}
