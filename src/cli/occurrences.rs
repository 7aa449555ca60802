//! Occurrences command handler
//!
//! Runs one species selection cycle and prints the clustered markers.

use crate::climate::open_meteo::OpenMeteoClient;
use crate::config::Config;
use crate::format::{available_formats, get_formatter};
use crate::inat::client::InatClient;
use crate::session::AtlasSession;
use crate::species::{find_species, species_catalog};
use clap::Args;

/// Occurrences command arguments
#[derive(Args)]
pub struct OccurrencesArgs {
    /// Species catalog id (see --list-species)
    #[arg(long, short = 's')]
    pub species: Option<String>,

    /// Grid cell size in kilometers (0 disables clustering)
    #[arg(long, short = 'g')]
    pub grid_km: Option<f64>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available species
    #[arg(short = 'S', long = "list-species")]
    pub list_species: bool,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the occurrences command
pub async fn run(args: OccurrencesArgs) -> crate::error::Result<()> {
    // Handle list flags first
    if args.list_species {
        list_species();
        return Ok(());
    }

    if args.list_formats {
        list_formats();
        return Ok(());
    }

    // Load config
    let config = Config::load()?;

    // Get parameters with config defaults
    let species_id = args.species.unwrap_or(config.defaults.species.clone());
    let grid_km = args.grid_km.unwrap_or(config.defaults.grid_km);
    let format = args.format.unwrap_or(config.defaults.format.clone());

    let species = match find_species(&species_id) {
        Some(species) => species,
        None => {
            eprintln!("Error: Unknown species id '{}'", species_id);
            eprintln!("\nAvailable species:");
            for s in species_catalog() {
                eprintln!("  {:<10} {}", s.id, s.scientific_name);
            }
            std::process::exit(1);
        }
    };

    eprintln!(
        "Fetching occurrences for {} ({})...",
        species.common_name, species.scientific_name
    );

    // Fetch and cluster
    let session = AtlasSession::new(InatClient::new(), OpenMeteoClient::new());
    let selection = session.select_species(&species).await;
    let report = selection.report(grid_km);

    // Format output
    let formatter = get_formatter(&format)
        .ok_or_else(|| crate::error::Error::Config(format!("Unknown format: {}", format)))?;
    let output = formatter.format(&report)?;

    // Write output
    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Print available species to stdout
fn list_species() {
    println!("Available species:");
    for species in species_catalog() {
        println!(
            "  {:<10} {:<22} {}",
            species.id, species.scientific_name, species.common_name
        );
    }
}

/// Print available formats to stdout
fn list_formats() {
    println!("Available formats:");
    for format in available_formats() {
        println!("  {:<6} {}", format.name, format.description);
    }
}
