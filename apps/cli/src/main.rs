//! keywordlens CLI — keyword directories and business-context analysis.
//!
//! Turns a folder of context documents into a ranked keyword directory and
//! classifies site text by business and content type.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
