//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod detail;
pub mod occurrences;
pub mod serve;

use clap::{Parser, Subcommand};

/// Biodiversity occurrence map explorer
#[derive(Parser)]
#[command(name = "terra-atlas")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch and cluster occurrence records for a species
    Occurrences(occurrences::OccurrencesArgs),

    /// Show climate, biota and reference-city detail for a site
    Detail(detail::DetailArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Occurrences(args) => occurrences::run(args).await,
        Commands::Detail(args) => detail::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}
