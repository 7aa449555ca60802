//! Occurrence records and the iNaturalist source
//!
//! This module defines the occurrence data model, the `OccurrenceSource`
//! trait, and the concurrent biota lookup built on top of it. The real
//! HTTP client lives in `client.rs`; the trait exists so orchestration
//! code can be exercised against scripted sources in tests.

pub mod client;

use crate::constants::query::{
    BIOTA_PAGE_SIZE, BIOTA_RADIUS_KM, TAXON_INSECTS, TAXON_PLANTS, TAXON_VERTEBRATES,
};
use crate::coord::Coordinates;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Upstream quality classification for an occurrence record
///
/// iNaturalist grades observations as research (community-verified),
/// needs_id (awaiting identification) or casual. Only the first two are
/// requested; the catch-all keeps deserialization total if upstream adds
/// another grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityGrade {
    Research,
    NeedsId,
    #[serde(other)]
    Casual,
}

impl QualityGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Research => "research",
            Self::NeedsId => "needs_id",
            Self::Casual => "casual",
        }
    }
}

impl std::fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A taxon reference attached to an occurrence record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxon {
    pub id: u64,
    /// Scientific name
    pub name: String,
    /// Common name, when the upstream record carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_common_name: Option<String>,
}

/// A photo reference on an occurrence record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub url: String,
}

/// GeoJSON point as served by the occurrence API: `[lng, lat]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoJsonPoint {
    pub coordinates: [f64; 2],
}

/// A single reported sighting of an organism
///
/// Immutable once fetched; owned by the session's in-memory result set and
/// discarded on the next species selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    pub quality_grade: QualityGrade,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Geographic point; records without one are filtered out by the fetcher
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geojson: Option<GeoJsonPoint>,
    /// Free-text "lat,lng" location label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxon: Option<Taxon>,
}

impl Observation {
    /// The record's geographic point, if it carries one
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.geojson
            .as_ref()
            .map(|g| Coordinates::new(g.coordinates[1], g.coordinates[0]))
    }

    /// Whether this record is research grade
    pub fn is_research(&self) -> bool {
        self.quality_grade == QualityGrade::Research
    }

    /// Display name: common name when present, scientific name otherwise
    pub fn display_name(&self) -> &str {
        match &self.taxon {
            Some(taxon) => taxon
                .preferred_common_name
                .as_deref()
                .unwrap_or(&taxon.name),
            None => "unknown taxon",
        }
    }
}

#[cfg(test)]
impl Observation {
    /// Minimal record with just a point and a grade, for routine tests
    pub fn test_point(id: u64, lng: f64, lat: f64, quality_grade: QualityGrade) -> Self {
        Self {
            id,
            uuid: None,
            quality_grade,
            observed_on: None,
            description: None,
            geojson: Some(GeoJsonPoint {
                coordinates: [lng, lat],
            }),
            location: None,
            photos: Vec::new(),
            taxon: None,
        }
    }
}

/// Co-located species near a selected occurrence, one list per broad group
///
/// Each list is independently capped and independently best-effort: a failed
/// group query leaves that list empty without affecting the others.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BiotaResult {
    pub plants: Vec<Observation>,
    pub insects: Vec<Observation>,
    pub animals: Vec<Observation>,
}

/// Trait for occurrence record sources
///
/// Implementations must be thread-safe (Send + Sync) to work with the
/// async server.
pub trait OccurrenceSource: Send + Sync {
    /// Resolve a scientific name to a taxon
    ///
    /// First search result wins. No result at all is a valid `None`
    /// outcome meaning "no data available", not an error.
    fn lookup_taxon(
        &self,
        scientific_name: &str,
    ) -> impl std::future::Future<Output = Result<Option<Taxon>>> + Send;

    /// Fetch one page of occurrence records for a taxon
    ///
    /// Server-side filters exclude captive/cultivated records and restrict
    /// to the research and needs_id grades, sorted by observed date.
    /// Records lacking a geographic point are filtered out client-side.
    fn fetch_page(
        &self,
        taxon_id: u64,
        page: u32,
    ) -> impl std::future::Future<Output = Result<Vec<Observation>>> + Send;

    /// Fetch records of a taxon group near a point, capped at `limit`
    fn fetch_nearby(
        &self,
        center: Coordinates,
        radius_km: f64,
        taxon_id: u64,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<Observation>>> + Send;
}

/// Fetch co-located biota around a point, three broad groups in parallel
///
/// Each group query that fails is logged and degrades to an empty list for
/// that group alone; sibling queries are never aborted.
pub async fn fetch_nearby_biota<S: OccurrenceSource>(
    source: &S,
    center: Coordinates,
) -> BiotaResult {
    let (plants, insects, animals) = tokio::join!(
        source.fetch_nearby(center, BIOTA_RADIUS_KM, TAXON_PLANTS, BIOTA_PAGE_SIZE),
        source.fetch_nearby(center, BIOTA_RADIUS_KM, TAXON_INSECTS, BIOTA_PAGE_SIZE),
        source.fetch_nearby(center, BIOTA_RADIUS_KM, TAXON_VERTEBRATES, BIOTA_PAGE_SIZE),
    );

    let collect = |group: &'static str, result: Result<Vec<Observation>>| match result {
        Ok(records) => records,
        Err(e) => {
            warn!(group, error = %e, "biota group query failed");
            Vec::new()
        }
    };

    BiotaResult {
        plants: collect("plants", plants),
        insects: collect("insects", insects),
        animals: collect("animals", animals),
    }
}
