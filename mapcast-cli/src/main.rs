//! Binary crate for the `mapcast` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive point-picking loop and configuration prompts
//! - Painting the weather panels and heatmap table to the terminal

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the panels; logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mapcast=info,mapcast_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
