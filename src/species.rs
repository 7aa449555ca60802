//! The fixed species catalog
//!
//! Nine box turtle (Terrapene) species with their scientific names and a
//! sensible default map view over each species' range. This table drives
//! the species selector; it is fixed in code, with no config file or
//! environment surface behind it.

use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};

/// One selectable species
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesConfig {
    /// Short catalog id used in the CLI and API
    pub id: String,
    /// Scientific name, used for the taxon lookup
    pub scientific_name: String,
    /// Display name
    pub common_name: String,
    /// Default map center over the species' range
    pub default_center: Coordinates,
    /// Default map zoom level
    pub default_zoom: u8,
}

/// The fixed species table
pub fn species_catalog() -> Vec<SpeciesConfig> {
    [
        ("carolina", "Terrapene carolina", "Eastern Box Turtle", 35.5, -80.0, 6),
        ("triunguis", "Terrapene triunguis", "Three-toed Box Turtle", 36.0, -92.0, 6),
        ("ornata", "Terrapene ornata", "Ornate Box Turtle", 38.0, -98.0, 6),
        ("bauri", "Terrapene bauri", "Florida Box Turtle", 27.0, -81.5, 7),
        ("major", "Terrapene major", "Gulf Coast Box Turtle", 30.5, -87.0, 7),
        ("mexicana", "Terrapene mexicana", "Mexican Box Turtle", 22.5, -98.5, 7),
        ("yucatana", "Terrapene yucatana", "Yucatan Box Turtle", 20.5, -89.0, 7),
        ("coahuila", "Terrapene coahuila", "Coahuilan Box Turtle", 26.9, -102.1, 9),
        ("nelsoni", "Terrapene nelsoni", "Spotted Box Turtle", 25.0, -107.0, 7),
    ]
    .into_iter()
    .map(
        |(id, scientific_name, common_name, lat, lng, default_zoom)| SpeciesConfig {
            id: id.to_string(),
            scientific_name: scientific_name.to_string(),
            common_name: common_name.to_string(),
            default_center: Coordinates::new(lat, lng),
            default_zoom,
        },
    )
    .collect()
}

/// Look up a species by catalog id
pub fn find_species(id: &str) -> Option<SpeciesConfig> {
    species_catalog().into_iter().find(|s| s.id == id)
}
