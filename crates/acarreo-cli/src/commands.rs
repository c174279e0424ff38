//! Command handlers

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::output::{output_allocation, output_conversion, output_reviews, Conversion};
use acarreo_app::app::{review_events, suggest_allocation, summarize};
use acarreo_app::config::{Config, CONFIG_KEYS};
use acarreo_app::repository::{open_event_repo, open_snapshot_repo};
use acarreo_domain::repository::HaulEventSource;
use acarreo_domain::service::{
    percentage_from_quantity, quantity_from_percentage, AllocationRequest,
};
use acarreo_types::{Error, OutputFormat, Result};

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let config = Config::load()?;
    let output_format = cli.format.unwrap_or(config.output_format);
    let now = cli.now.unwrap_or_else(Utc::now);
    debug!(%output_format, now = %now.to_rfc3339(), "starting command");

    match cli.command {
        Commands::Check { snapshot, events } => {
            cmd_check(&config, snapshot, events, output_format, now)
        }

        Commands::Allocate {
            snapshot,
            site,
            material,
            quantity,
            carrier,
        } => {
            let request = AllocationRequest {
                site_ref: site,
                material_ref: material,
                quantity,
                carrier_ref: carrier,
            };
            cmd_allocate(&config, snapshot, &request, output_format)
        }

        Commands::Convert {
            capacity,
            percentage,
            quantity,
        } => cmd_convert(capacity, percentage, quantity, output_format),

        Commands::Config { set, show } => cmd_config(config, &set, show),
    }
}

fn cmd_check(
    config: &Config,
    snapshot: PathBuf,
    events: PathBuf,
    output_format: OutputFormat,
    now: DateTime<Utc>,
) -> Result<()> {
    let repo = open_snapshot_repo(snapshot)?;
    let events = open_event_repo(events).find_all()?;

    if events.is_empty() {
        eprintln!("No haul events found.");
        return Ok(());
    }

    let reviews = review_events(&repo, &events, &config.engine_settings(), now)?;
    output_reviews(output_format, &reviews)?;

    let summary = summarize(&reviews);
    if summary.invalid > 0 {
        return Err(Error::ValidationFailed(summary.invalid));
    }
    Ok(())
}

fn cmd_allocate(
    config: &Config,
    snapshot: PathBuf,
    request: &AllocationRequest,
    output_format: OutputFormat,
) -> Result<()> {
    if !(request.quantity.is_finite() && request.quantity > 0.0) {
        return Err(Error::InvalidArgument(format!(
            "quantity must be a positive number (got {})",
            request.quantity
        )));
    }

    let repo = open_snapshot_repo(snapshot)?;
    let result = suggest_allocation(&repo, request, config.allocation)?;
    output_allocation(output_format, &result)
}

fn cmd_convert(
    capacity: f64,
    percentage: Option<f64>,
    quantity: Option<f64>,
    output_format: OutputFormat,
) -> Result<()> {
    let conversion = match (percentage, quantity) {
        (Some(pct), _) => Conversion {
            capacity,
            quantity: Some(quantity_from_percentage(pct, capacity)),
            percentage: Some(pct),
        },
        (None, Some(qty)) => Conversion {
            capacity,
            quantity: Some(qty),
            percentage: percentage_from_quantity(qty, capacity),
        },
        (None, None) => {
            return Err(Error::InvalidArgument(
                "either --percentage or --quantity is required".to_string(),
            ))
        }
    };
    output_conversion(output_format, &conversion)
}

fn cmd_config(mut config: Config, set: &[String], show: bool) -> Result<()> {
    if !set.is_empty() {
        for entry in set {
            let (key, value) = entry.split_once('=').ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "expected KEY=VALUE, got '{}' (keys: {})",
                    entry,
                    CONFIG_KEYS.join(", ")
                ))
            })?;
            config.set(key.trim(), value)?;
        }
        config.save()?;
        println!("Configuration saved.");
    }

    if show || set.is_empty() {
        println!("{}", config);
    }

    Ok(())
}
