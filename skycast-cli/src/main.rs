//! Binary crate for the `skycast` terminal weather app.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration and consent prompts
//! - Rendering the weather screen in the terminal

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod platform;
mod screen;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
