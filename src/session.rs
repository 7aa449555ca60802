//! Selection orchestration
//!
//! An `AtlasSession` owns the boundary clients and the two result slots of
//! the viewer: the current species selection (occurrence records) and the
//! current detail bundle (climate + biota for one selected occurrence).
//!
//! Boundary calls are joined in parallel at exactly two points: the three
//! occurrence pages of a species selection, and the climate + biota
//! lookups of a detail open. A failed call is logged and degrades to an
//! empty result for that call alone; siblings are never aborted and
//! nothing is retried.
//!
//! Each slot is guarded by a monotonically increasing epoch. A selection
//! cycle takes its epoch up front and publishes its result only if that
//! epoch is still current, so a slow response from an older selection can
//! never overwrite a newer one. In-flight calls are not cancelled; their
//! results are simply dropped on arrival.

use crate::climate::monthly::{aggregate_monthly, MonthlyNormal};
use crate::climate::{ClimateSeries, ClimateSource, ClimateSummary};
use crate::coord::cluster::cluster_observations;
use crate::coord::Coordinates;
use crate::inat::{fetch_nearby_biota, BiotaResult, Observation, OccurrenceSource, Taxon};
use crate::reference::{match_reference, reference_cities, ReferenceMatch};
use crate::species::SpeciesConfig;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// The occurrence result set for one species selection
#[derive(Debug, Clone)]
pub struct SpeciesSelection {
    pub epoch: u64,
    pub species: SpeciesConfig,
    /// Resolved taxon; `None` when the lookup found nothing
    pub taxon: Option<Taxon>,
    /// Merged pages, in issue order
    pub observations: Vec<Observation>,
}

impl SpeciesSelection {
    /// Reduce this selection to one marker per grid cell
    pub fn report(&self, grid_km: f64) -> OccurrenceReport {
        let markers = cluster_observations(&self.observations, grid_km);
        OccurrenceReport {
            species: self.species.clone(),
            taxon: self.taxon.clone(),
            grid_km,
            total_fetched: self.observations.len(),
            markers,
        }
    }
}

/// A clustered view of a species selection, ready for rendering or export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccurrenceReport {
    pub species: SpeciesConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxon: Option<Taxon>,
    pub grid_km: f64,
    /// Records fetched before deduplication
    pub total_fetched: usize,
    pub markers: Vec<Observation>,
}

/// Everything the detail overlay needs for one selected occurrence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailBundle {
    #[serde(skip)]
    pub epoch: u64,
    pub center: Coordinates,
    /// Raw daily series; `None` when the source had no data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climate: Option<ClimateSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<ClimateSummary>,
    pub monthly: Vec<MonthlyNormal>,
    pub biota: BiotaResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceMatch>,
}

/// Session state over a pair of boundary clients
pub struct AtlasSession<O, C> {
    source: O,
    climate: C,
    selection_epoch: AtomicU64,
    detail_epoch: AtomicU64,
    selection: RwLock<Option<SpeciesSelection>>,
    detail: RwLock<Option<DetailBundle>>,
}

impl<O: OccurrenceSource, C: ClimateSource> AtlasSession<O, C> {
    /// Create a session over the given boundary clients
    pub fn new(source: O, climate: C) -> Self {
        Self {
            source,
            climate,
            selection_epoch: AtomicU64::new(0),
            detail_epoch: AtomicU64::new(0),
            selection: RwLock::new(None),
            detail: RwLock::new(None),
        }
    }

    /// Run one species selection cycle
    ///
    /// Resolves the taxon, fetches three occurrence pages in parallel and
    /// merges them in issue order. The result is returned to the caller
    /// and published to the session slot unless a newer selection has
    /// started in the meantime.
    pub async fn select_species(&self, species: &SpeciesConfig) -> SpeciesSelection {
        let epoch = self.selection_epoch.fetch_add(1, Ordering::SeqCst) + 1;

        let taxon = match self.source.lookup_taxon(&species.scientific_name).await {
            Ok(taxon) => taxon,
            Err(e) => {
                warn!(species = %species.scientific_name, error = %e, "taxon lookup failed");
                None
            }
        };

        let observations = match &taxon {
            Some(taxon) => self.fetch_pages(taxon.id).await,
            None => {
                info!(species = %species.scientific_name, "no taxon match, empty selection");
                Vec::new()
            }
        };

        let selection = SpeciesSelection {
            epoch,
            species: species.clone(),
            taxon,
            observations,
        };

        let mut slot = self.selection.write().await;
        if selection.epoch == self.selection_epoch.load(Ordering::SeqCst) {
            *slot = Some(selection.clone());
        } else {
            debug!(epoch = selection.epoch, "dropping stale species selection");
        }

        selection
    }

    async fn fetch_pages(&self, taxon_id: u64) -> Vec<Observation> {
        let (p1, p2, p3) = tokio::join!(
            self.source.fetch_page(taxon_id, 1),
            self.source.fetch_page(taxon_id, 2),
            self.source.fetch_page(taxon_id, 3),
        );

        let mut merged = Vec::new();
        for (page, result) in [(1u32, p1), (2, p2), (3, p3)] {
            match result {
                Ok(mut observations) => merged.append(&mut observations),
                Err(e) => warn!(page, error = %e, "occurrence page fetch failed"),
            }
        }
        merged
    }

    /// Assemble the detail bundle for an occurrence site
    ///
    /// Climate and biota are fetched in parallel; the monthly normals and
    /// the reference-city match are derived locally. Same epoch rules as
    /// `select_species`.
    pub async fn open_detail(&self, center: Coordinates) -> DetailBundle {
        let epoch = self.detail_epoch.fetch_add(1, Ordering::SeqCst) + 1;

        let (climate, biota) = tokio::join!(
            self.fetch_climate(center),
            fetch_nearby_biota(&self.source, center),
        );

        let monthly = climate.as_ref().map(aggregate_monthly).unwrap_or_default();
        let summary = climate.as_ref().and_then(ClimateSummary::from_series);
        let reference = match_reference(&reference_cities(), center.lat);

        let bundle = DetailBundle {
            epoch,
            center,
            climate,
            summary,
            monthly,
            biota,
            reference,
        };

        let mut slot = self.detail.write().await;
        if bundle.epoch == self.detail_epoch.load(Ordering::SeqCst) {
            *slot = Some(bundle.clone());
        } else {
            debug!(epoch = bundle.epoch, "dropping stale detail bundle");
        }

        bundle
    }

    async fn fetch_climate(&self, center: Coordinates) -> Option<ClimateSeries> {
        match self.climate.fetch_daily(center).await {
            Ok(series) => series,
            Err(e) => {
                warn!(error = %e, "climate fetch failed");
                None
            }
        }
    }

    /// The currently published species selection
    pub async fn selection(&self) -> Option<SpeciesSelection> {
        self.selection.read().await.clone()
    }

    /// The currently published detail bundle
    pub async fn detail(&self) -> Option<DetailBundle> {
        self.detail.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::query::OCCURRENCE_PAGE_COUNT;
    use crate::error::{Error, Result};
    use crate::inat::QualityGrade;
    use crate::species::find_species;
    use std::sync::Arc;
    use tokio::sync::Notify;

    struct EmptyClimate;

    impl ClimateSource for EmptyClimate {
        async fn fetch_daily(&self, _center: Coordinates) -> Result<Option<ClimateSeries>> {
            Ok(None)
        }
    }

    struct FixedClimate(ClimateSeries);

    impl ClimateSource for FixedClimate {
        async fn fetch_daily(&self, _center: Coordinates) -> Result<Option<ClimateSeries>> {
            Ok(Some(self.0.clone()))
        }
    }

    struct FailingClimate;

    impl ClimateSource for FailingClimate {
        async fn fetch_daily(&self, _center: Coordinates) -> Result<Option<ClimateSeries>> {
            Err(Error::Climate("unreachable".to_string()))
        }
    }

    /// Source with a fixed taxon per name; page 2 fails when `flaky_page`
    struct ScriptedSource {
        flaky_page: bool,
    }

    impl OccurrenceSource for ScriptedSource {
        async fn lookup_taxon(&self, scientific_name: &str) -> Result<Option<Taxon>> {
            if scientific_name == "Terrapene nelsoni" {
                return Ok(None);
            }
            Ok(Some(Taxon {
                id: 39782,
                name: scientific_name.to_string(),
                preferred_common_name: None,
            }))
        }

        async fn fetch_page(&self, taxon_id: u64, page: u32) -> Result<Vec<Observation>> {
            if self.flaky_page && page == 2 {
                return Err(Error::Occurrence("page 2 down".to_string()));
            }
            Ok(vec![Observation::test_point(
                taxon_id * 10 + u64::from(page),
                -80.0 + f64::from(page),
                35.5,
                QualityGrade::Research,
            )])
        }

        async fn fetch_nearby(
            &self,
            _center: Coordinates,
            _radius_km: f64,
            taxon_id: u64,
            _limit: usize,
        ) -> Result<Vec<Observation>> {
            Ok(vec![Observation::test_point(
                taxon_id,
                -80.0,
                35.5,
                QualityGrade::NeedsId,
            )])
        }
    }

    #[tokio::test]
    async fn test_pages_merged_in_issue_order() {
        let session = AtlasSession::new(ScriptedSource { flaky_page: false }, EmptyClimate);
        let species = find_species("carolina").unwrap();

        let selection = session.select_species(&species).await;
        let ids: Vec<u64> = selection.observations.iter().map(|o| o.id).collect();
        assert_eq!(ids.len(), OCCURRENCE_PAGE_COUNT as usize);
        assert_eq!(ids, vec![397821, 397822, 397823]);

        let published = session.selection().await.unwrap();
        assert_eq!(published.epoch, selection.epoch);
    }

    #[tokio::test]
    async fn test_failed_page_does_not_abort_siblings() {
        let session = AtlasSession::new(ScriptedSource { flaky_page: true }, EmptyClimate);
        let species = find_species("carolina").unwrap();

        let selection = session.select_species(&species).await;
        let ids: Vec<u64> = selection.observations.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![397821, 397823]);
    }

    #[tokio::test]
    async fn test_lookup_miss_yields_empty_selection() {
        let session = AtlasSession::new(ScriptedSource { flaky_page: false }, EmptyClimate);
        let species = find_species("nelsoni").unwrap();

        let selection = session.select_species(&species).await;
        assert!(selection.taxon.is_none());
        assert!(selection.observations.is_empty());
    }

    #[tokio::test]
    async fn test_detail_bundle_composition() {
        let series = ClimateSeries {
            time: vec!["2023-08-01".to_string(), "2023-08-02".to_string()],
            temperature: vec![26.0, 28.0],
            humidity: vec![70.0, 72.0],
        };
        let session = AtlasSession::new(
            ScriptedSource { flaky_page: false },
            FixedClimate(series),
        );

        let bundle = session.open_detail(Coordinates::new(31.5, -80.0)).await;

        assert_eq!(bundle.monthly.len(), 1);
        assert_eq!(bundle.monthly[0].label, "Aug");
        assert_eq!(bundle.monthly[0].temperature, 27);

        let summary = bundle.summary.unwrap();
        assert_eq!(summary.humidity_min, 70.0);
        assert_eq!(summary.humidity_max, 72.0);

        assert_eq!(bundle.biota.plants.len(), 1);
        assert_eq!(bundle.biota.insects.len(), 1);
        assert_eq!(bundle.biota.animals.len(), 1);

        let reference = bundle.reference.unwrap();
        assert_eq!(reference.name, "Shanghai");
        assert!(reference.similar);

        assert!(session.detail().await.is_some());
    }

    #[tokio::test]
    async fn test_climate_failure_degrades_to_no_data() {
        let session = AtlasSession::new(ScriptedSource { flaky_page: false }, FailingClimate);

        let bundle = session.open_detail(Coordinates::new(31.5, -80.0)).await;
        assert!(bundle.climate.is_none());
        assert!(bundle.summary.is_none());
        assert!(bundle.monthly.is_empty());
        // Biota is unaffected by the climate failure
        assert_eq!(bundle.biota.plants.len(), 1);
    }

    /// Source whose lookup for one species blocks until released, to force
    /// an old selection to complete after a newer one
    struct GatedSource {
        started: Arc<Notify>,
        gate: Arc<Notify>,
    }

    impl OccurrenceSource for GatedSource {
        async fn lookup_taxon(&self, scientific_name: &str) -> Result<Option<Taxon>> {
            if scientific_name == "Terrapene carolina" {
                self.started.notify_one();
                self.gate.notified().await;
            }
            Ok(Some(Taxon {
                id: 1,
                name: scientific_name.to_string(),
                preferred_common_name: None,
            }))
        }

        async fn fetch_page(&self, _taxon_id: u64, page: u32) -> Result<Vec<Observation>> {
            Ok(vec![Observation::test_point(
                u64::from(page),
                -80.0,
                35.5,
                QualityGrade::Research,
            )])
        }

        async fn fetch_nearby(
            &self,
            _center: Coordinates,
            _radius_km: f64,
            _taxon_id: u64,
            _limit: usize,
        ) -> Result<Vec<Observation>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_stale_selection_is_discarded() {
        let started = Arc::new(Notify::new());
        let gate = Arc::new(Notify::new());
        let session = Arc::new(AtlasSession::new(
            GatedSource {
                started: started.clone(),
                gate: gate.clone(),
            },
            EmptyClimate,
        ));

        // Old selection takes its epoch and stalls inside the lookup
        let old = {
            let session = session.clone();
            let species = find_species("carolina").unwrap();
            tokio::spawn(async move { session.select_species(&species).await })
        };
        started.notified().await;

        // Newer selection completes while the old one is still in flight
        let newer = session
            .select_species(&find_species("ornata").unwrap())
            .await;
        assert_eq!(session.selection().await.unwrap().species.id, "ornata");

        // Release the old selection; its late result must not win the slot
        gate.notify_one();
        let stale = old.await.unwrap();
        assert!(stale.epoch < newer.epoch);

        let published = session.selection().await.unwrap();
        assert_eq!(published.species.id, "ornata");
        assert_eq!(published.epoch, newer.epoch);
    }
}
