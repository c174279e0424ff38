//! CLI definition using clap

use std::path::PathBuf;

use acarreo_types::OutputFormat;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "acarreo")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Validate captured truck trips and suggest requisition allocations")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Reference time for timestamp checks (RFC 3339). Defaults to now.
    #[arg(long, global = true)]
    pub now: Option<DateTime<Utc>>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate captured haul events and suggest allocations
    Check {
        /// Snapshot file with master data and requisitions (.toml or .json)
        snapshot: PathBuf,

        /// File with captured haul events (.toml or .json)
        events: PathBuf,
    },

    /// Find the requisition line a quantity would be charged against
    Allocate {
        /// Snapshot file with requisitions (.toml or .json)
        snapshot: PathBuf,

        /// Site (obra) reference
        #[arg(long)]
        site: String,

        /// Material reference
        #[arg(long)]
        material: String,

        /// Quantity to allocate
        #[arg(long, short = 'q')]
        quantity: f64,

        /// Carrier (transportista) reference, used when carrier matching is enabled
        #[arg(long)]
        carrier: Option<String>,
    },

    /// Convert between load percentage and quantity for a truck capacity
    Convert {
        /// Truck capacity
        #[arg(long, short = 'c')]
        capacity: f64,

        /// Load percentage to convert to a quantity
        #[arg(long, short = 'p', conflicts_with = "quantity", required_unless_present = "quantity")]
        percentage: Option<f64>,

        /// Quantity to convert to a load percentage
        #[arg(long, short = 'q')]
        quantity: Option<f64>,
    },

    /// Show or update configuration
    Config {
        /// Set a value (e.g. --set direction_policy=mirrored). Repeatable.
        #[arg(long, value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
