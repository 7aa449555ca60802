//! Centralized constants for the terra-atlas crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Kilometers per degree of latitude (approximate, varies slightly with latitude)
    ///
    /// Applied uniformly to both axes when sizing grid cells, so cell width in
    /// ground distance narrows at higher latitudes. Accepted distortion: the
    /// grid only deduplicates nearby markers, it is not a geodesic measure.
    pub const KM_PER_DEGREE_LAT: f64 = 111.0;
}

/// External API endpoints
pub mod api {
    /// iNaturalist v1 API (taxon search and occurrence records; no key required)
    pub const INAT_API_BASE: &str = "https://api.inaturalist.org/v1";

    /// Open-Meteo historical weather archive (free, no key required)
    pub const OPEN_METEO_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";
}

/// Fixed query parameters for the occurrence and biota lookups
pub mod query {
    /// Records per occurrence page (iNaturalist maximum)
    pub const OCCURRENCE_PAGE_SIZE: usize = 200;

    /// Number of occurrence pages fetched in parallel per species selection
    pub const OCCURRENCE_PAGE_COUNT: u32 = 3;

    /// Search radius for the co-located biota lookup, in kilometers
    pub const BIOTA_RADIUS_KM: f64 = 15.0;

    /// Records per biota group query
    pub const BIOTA_PAGE_SIZE: usize = 3;

    /// iNaturalist taxon id for Plantae
    pub const TAXON_PLANTS: u64 = 47126;

    /// iNaturalist taxon id for Insecta
    pub const TAXON_INSECTS: u64 = 47158;

    /// iNaturalist taxon id for Vertebrata
    pub const TAXON_VERTEBRATES: u64 = 355675;
}
