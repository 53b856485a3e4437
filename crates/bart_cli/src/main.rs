//! BART CLI

#![allow(clippy::print_stdout)]

use anyhow::Context;
use bart_api::BartClient;
use bart_cli::cli::{Cli, log_filter_from_verbosity};
use bart_cli::{commands, settings};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON
    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    cli.apply(&mut config);

    let client = BartClient::new(Some(config))?;
    let response = commands::execute(&client, cli.command).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
