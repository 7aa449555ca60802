//! Detail command handler
//!
//! Assembles the climate/biota/reference detail bundle for a site.

use crate::climate::open_meteo::OpenMeteoClient;
use crate::coord::Coordinates;
use crate::inat::client::InatClient;
use crate::inat::Observation;
use crate::session::{AtlasSession, DetailBundle};
use clap::Args;

/// Detail command arguments
#[derive(Args)]
pub struct DetailArgs {
    /// Latitude of the occurrence site
    #[arg(long)]
    pub lat: f64,

    /// Longitude of the occurrence site
    #[arg(long)]
    pub lng: f64,

    /// Output raw JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Run the detail command
pub async fn run(args: DetailArgs) -> crate::error::Result<()> {
    let center = Coordinates::new(args.lat, args.lng);
    center.validate()?;

    eprintln!("Fetching habitat detail for ({}, {})...", center.lat, center.lng);

    let session = AtlasSession::new(InatClient::new(), OpenMeteoClient::new());
    let bundle = session.open_detail(center).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    } else {
        print!("{}", render_text(&bundle));
    }

    Ok(())
}

/// Render the bundle as human-readable text
fn render_text(bundle: &DetailBundle) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Site: ({:.4}, {:.4})\n",
        bundle.center.lat, bundle.center.lng
    ));

    match &bundle.reference {
        Some(reference) if reference.similar => output.push_str(&format!(
            "Latitude analog: {} ({}°N, {:.1}° away)\n",
            reference.name, reference.lat, reference.delta_deg
        )),
        Some(reference) => output.push_str(&format!(
            "Closest reference latitude: {} ({}°N, {:.1}° away)\n",
            reference.name, reference.lat, reference.delta_deg
        )),
        None => {}
    }
    output.push('\n');

    match &bundle.summary {
        Some(summary) => {
            output.push_str(&format!(
                "Mean temperature: {:.1}°C\n",
                summary.mean_temperature
            ));
            output.push_str(&format!(
                "Humidity range: {:.0}-{:.0}%\n\n",
                summary.humidity_min, summary.humidity_max
            ));
        }
        None => output.push_str("No climate data.\n\n"),
    }

    if !bundle.monthly.is_empty() {
        output.push_str("Month  Temp (°C)  Humidity (%)\n");
        for row in &bundle.monthly {
            output.push_str(&format!(
                "{:<5}  {:>9}  {:>12}\n",
                row.label, row.temperature, row.humidity
            ));
        }
        output.push('\n');
    }

    output.push_str(&biota_section("Plants", &bundle.biota.plants));
    output.push_str(&biota_section("Insects", &bundle.biota.insects));
    output.push_str(&biota_section("Animals", &bundle.biota.animals));

    output
}

fn biota_section(title: &str, records: &[Observation]) -> String {
    let mut output = format!("{} nearby:\n", title);
    if records.is_empty() {
        output.push_str("  (no records)\n");
        return output;
    }
    for record in records {
        match &record.taxon {
            Some(taxon) => output.push_str(&format!(
                "  {} ({})\n",
                record.display_name(),
                taxon.name
            )),
            None => output.push_str(&format!("  observation {}\n", record.id)),
        }
    }
    output
}
