//! iNaturalist HTTP client
//!
//! Talks to the free iNaturalist v1 API. Unauthenticated and externally
//! rate-limited; the polite User-Agent identifies the tool.

use crate::constants::api::INAT_API_BASE;
use crate::constants::query::OCCURRENCE_PAGE_SIZE;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::inat::{Observation, OccurrenceSource, Taxon};
use serde::Deserialize;

const USER_AGENT: &str = "terra-atlas/0.1.0";

/// iNaturalist occurrence source
#[derive(Debug, Clone)]
pub struct InatClient {
    client: reqwest::Client,
}

/// Envelope shared by the taxa and observations endpoints
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::Deserialize<'de>"))]
struct ResultsPage<T> {
    #[serde(default)]
    results: Vec<T>,
}

impl InatClient {
    /// Create a new iNaturalist client
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    async fn get_results<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Occurrence(format!("iNaturalist request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Occurrence(format!(
                "iNaturalist returned status: {}",
                response.status()
            )));
        }

        let page: ResultsPage<T> = response
            .json()
            .await
            .map_err(|e| Error::Occurrence(format!("Failed to parse iNaturalist response: {}", e)))?;

        Ok(page.results)
    }
}

impl Default for InatClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OccurrenceSource for InatClient {
    async fn lookup_taxon(&self, scientific_name: &str) -> Result<Option<Taxon>> {
        let url = format!(
            "{}/taxa?q={}&per_page=1",
            INAT_API_BASE,
            urlencoding::encode(scientific_name)
        );

        let results: Vec<Taxon> = self.get_results(&url).await?;
        Ok(results.into_iter().next())
    }

    async fn fetch_page(&self, taxon_id: u64, page: u32) -> Result<Vec<Observation>> {
        let url = format!(
            "{}/observations?taxon_id={}&per_page={}&page={}&captive=false&order_by=observed_on&quality_grade=research,needs_id",
            INAT_API_BASE, taxon_id, OCCURRENCE_PAGE_SIZE, page
        );

        let results: Vec<Observation> = self.get_results(&url).await?;

        // Server-side filters do not guarantee a point on every record
        Ok(results
            .into_iter()
            .filter(|obs| obs.coordinates().is_some())
            .collect())
    }

    async fn fetch_nearby(
        &self,
        center: Coordinates,
        radius_km: f64,
        taxon_id: u64,
        limit: usize,
    ) -> Result<Vec<Observation>> {
        let url = format!(
            "{}/observations?lat={}&lng={}&radius={}&taxon_id={}&per_page={}&order_by=created_at",
            INAT_API_BASE, center.lat, center.lng, radius_km, taxon_id, limit
        );

        self.get_results(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inat::QualityGrade;

    #[test]
    fn test_client_creation() {
        let client = InatClient::new();
        assert!(format!("{:?}", client).contains("InatClient"));
    }

    #[test]
    fn test_results_page_deserialization() {
        let json = r#"{
            "total_results": 2,
            "page": 1,
            "per_page": 200,
            "results": [
                { "id": 1, "quality_grade": "research",
                  "geojson": { "coordinates": [-80.0, 35.5] } },
                { "id": 2, "quality_grade": "needs_id" }
            ]
        }"#;

        let page: ResultsPage<Observation> = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].quality_grade, QualityGrade::Research);
        assert!(page.results[1].coordinates().is_none());
    }

    #[test]
    fn test_results_page_missing_results_field() {
        let page: ResultsPage<Taxon> = serde_json::from_str("{}").unwrap();
        assert!(page.results.is_empty());
    }

    // Integration tests hit the live API and are disabled by default
    #[tokio::test]
    #[ignore = "Requires network access to the iNaturalist API"]
    async fn test_lookup_taxon_live() {
        let client = InatClient::new();
        let taxon = client.lookup_taxon("Terrapene carolina").await.unwrap();
        assert!(taxon.is_some());
    }

    #[tokio::test]
    #[ignore = "Requires network access to the iNaturalist API"]
    async fn test_fetch_page_live() {
        let client = InatClient::new();
        let taxon = client
            .lookup_taxon("Terrapene carolina")
            .await
            .unwrap()
            .unwrap();
        let observations = client.fetch_page(taxon.id, 1).await.unwrap();
        assert!(observations.iter().all(|o| o.coordinates().is_some()));
    }
}
