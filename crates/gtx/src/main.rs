//! gtx - Entry Point
//!
//! Binary entry point for the `gtx` command line.

// Force-link gtx-providers to ensure linkme registrations are included
extern crate gtx_providers;

use clap::Parser;
use gtx::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    gtx::run(cli).await
}
