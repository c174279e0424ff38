//! Acarreo - haul-event validation and requisition allocation
//!
//! A CLI tool that checks captured truck trips against master data and
//! suggests which open requisition line each trip should be charged against.

mod cli;
mod commands;
mod logging;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
