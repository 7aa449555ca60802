//! terra-atlas: Biodiversity Occurrence Map Explorer
//!
//! A library and CLI tool for exploring occurrence records of box turtle
//! (*Terrapene*) species from the iNaturalist API, deduplicated onto a
//! coarse geographic grid, with habitat detail (historical climate,
//! co-located biota, latitude-analog reference city) for any site.
//!
//! ## Features
//!
//! - Parallel paged occurrence fetching with taxon resolution
//! - Grid-bucketed spatial deduplication (one marker per cell,
//!   research-grade records preferred)
//! - Monthly climate normals from the Open-Meteo archive
//! - Latitude-analog reference city hinting
//! - HTTP JSON API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use terra_atlas::reference::{match_reference, reference_cities};
//! use terra_atlas::species::find_species;
//!
//! let species = find_species("carolina").expect("known species");
//! let analog = match_reference(&reference_cities(), species.default_center.lat)
//!     .expect("non-empty reference table");
//! println!(
//!     "{} range sits at a latitude similar to {}",
//!     species.common_name, analog.name
//! );
//! ```

pub mod cli;
pub mod climate;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod inat;
pub mod reference;
pub mod server;
pub mod session;
pub mod species;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use inat::{BiotaResult, Observation, QualityGrade, Taxon};
pub use session::AtlasSession;
pub use species::SpeciesConfig;
