//! tickguard-demo - supervision stack demonstration harness
//!
//! Runs the TickGuard clock, background memory scanner, and checksum-gated
//! watchdog controller against simulated hardware, with selectable fault
//! injection scenarios.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod error;
mod runner;
mod scenario;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::runner::DemoReport;
use crate::scenario::{DemoConfig, Scenario};

#[derive(Parser)]
#[command(name = "tickguard-demo")]
#[command(about = "Run the TickGuard supervision stack against simulated hardware")]
#[command(version)]
struct Cli {
    /// Fault to inject into the control loop
    #[arg(long, value_enum, default_value = "nominal")]
    scenario: Scenario,

    /// Number of control-loop iterations to run
    #[arg(long)]
    iterations: Option<u32>,

    /// JSON configuration file overriding the built-in defaults
    #[arg(long, env = "TICKGUARD_DEMO_CONFIG")]
    config: Option<PathBuf>,

    /// Output the run report as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tickguard_demo={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let mut config = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    if let Some(iterations) = cli.iterations {
        config.iterations = iterations;
    }
    config.validate()?;

    let report = runner::run(cli.scenario, &config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &DemoReport) {
    println!("scenario:              {}", report.scenario);
    println!("iterations completed:  {}", report.iterations_completed);
    println!("services granted:      {}", report.services_granted);
    println!("withheld (flow):       {}", report.withheld_flow);
    println!("withheld (disabled):   {}", report.withheld_disabled);
    println!("watchdog services:     {}", report.watchdog_service_count);
    println!(
        "watchdog expired:      {}{}",
        report.watchdog_expired,
        match report.expiry_millis {
            Some(ms) => format!(" (at {ms} ms)"),
            None => String::new(),
        }
    );
    println!("simulated time:        {} ms", report.final_millis);
    println!(
        "background scan:       {} passes, {} mismatches (reference {:#06X})",
        report.scan_passes, report.scan_mismatches, report.reference_checksum
    );
    if let Some(checksum) = report.last_scan_checksum {
        println!("last scan checksum:    {checksum:#06X}");
    }
}
