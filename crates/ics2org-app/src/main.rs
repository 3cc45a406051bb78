use std::process;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use ics2org_app::cli::Cli;
use ics2org_app::convert;
use ics2org_core::Settings;
use ics2org_core::config::load_config;
use ics2org_core::constants::DEFAULT_LOG_LEVEL;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new(DEFAULT_LOG_LEVEL));

    // stdout carries the agenda, so all diagnostics go to stderr.
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();

    let settings = match load_config(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("Error: {error}");
            process::exit(1);
        }
    };

    tracing::debug!(settings = ?settings, "Configuration loaded");

    let filter = log_filter(cli.verbose, &settings.log_level);
    if let Ok(filter) = EnvFilter::try_new(&filter) {
        if let Err(error) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %error, "Failed to update log filter");
        }
    } else {
        tracing::warn!(filter = %filter, "Invalid log filter, keeping the default");
    }

    if let Err(error) = run(&cli, &settings) {
        eprintln!("Error: {error:#}");
        process::exit(1);
    }
}

/// Picks the log filter: `RUST_LOG` wins, then the `-v` count, then the
/// configured level.
fn log_filter(verbose: u8, configured: &str) -> String {
    if let Ok(filter) = std::env::var("RUST_LOG") {
        return filter;
    }
    match verbose {
        0 => configured.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn run(cli: &Cli, settings: &Settings) -> anyhow::Result<()> {
    let display = settings.resolve_timezone()?;

    let input = convert::read_input(cli.input.as_deref()).with_context(|| match &cli.input {
        Some(path) => format!("failed to read {}", path.display()),
        None => "failed to read stdin".to_string(),
    })?;

    let agenda = convert::convert(&input, settings, display, Utc::now())
        .context("failed to parse calendar")?;

    convert::write_output(cli.output.as_deref(), &agenda).with_context(|| match &cli.output {
        Some(path) => format!("failed to write {}", path.display()),
        None => "failed to write stdout".to_string(),
    })?;

    Ok(())
}
