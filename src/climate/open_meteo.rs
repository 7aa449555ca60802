//! Open-Meteo archive backend
//!
//! Fetches one year of daily mean temperature and relative humidity from
//! the free Open-Meteo historical archive. No API key required.

use crate::climate::{ClimateSeries, ClimateSource};
use crate::constants::api::OPEN_METEO_ARCHIVE_URL;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use chrono::{Months, Utc};
use serde::Deserialize;

const USER_AGENT: &str = "terra-atlas/0.1.0";

/// Open-Meteo archive climate source
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
}

/// Archive response; `daily` is absent when the source has no data
#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    #[serde(default)]
    daily: Option<DailyBlock>,
}

/// Index-aligned daily arrays as served by the archive
#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    temperature_2m_mean: Vec<f64>,
    relative_humidity_2m_mean: Vec<f64>,
}

impl OpenMeteoClient {
    /// Create a new Open-Meteo client
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ClimateSource for OpenMeteoClient {
    async fn fetch_daily(&self, center: Coordinates) -> Result<Option<ClimateSeries>> {
        let end = Utc::now().date_naive();
        let start = end.checked_sub_months(Months::new(12)).unwrap_or(end);

        let url = format!(
            "{}?latitude={}&longitude={}&start_date={}&end_date={}&daily=temperature_2m_mean,relative_humidity_2m_mean&timezone=auto",
            OPEN_METEO_ARCHIVE_URL, center.lat, center.lng, start, end
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Climate(format!("Open-Meteo request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Climate(format!(
                "Open-Meteo returned status: {}",
                response.status()
            )));
        }

        let archive: ArchiveResponse = response
            .json()
            .await
            .map_err(|e| Error::Climate(format!("Failed to parse Open-Meteo response: {}", e)))?;

        Ok(archive.daily.map(|daily| ClimateSeries {
            time: daily.time,
            temperature: daily.temperature_2m_mean,
            humidity: daily.relative_humidity_2m_mean,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_response_with_daily() {
        let json = r#"{
            "latitude": 35.5,
            "longitude": -80.0,
            "timezone": "America/New_York",
            "daily": {
                "time": ["2023-08-01", "2023-08-02"],
                "temperature_2m_mean": [26.4, 27.1],
                "relative_humidity_2m_mean": [71.0, 68.0]
            }
        }"#;

        let archive: ArchiveResponse = serde_json::from_str(json).unwrap();
        let daily = archive.daily.unwrap();
        assert_eq!(daily.time.len(), 2);
        assert_eq!(daily.temperature_2m_mean[1], 27.1);
    }

    #[test]
    fn test_archive_response_without_daily_means_no_data() {
        let json = r#"{ "latitude": 0.0, "longitude": 0.0 }"#;
        let archive: ArchiveResponse = serde_json::from_str(json).unwrap();
        assert!(archive.daily.is_none());
    }

    #[tokio::test]
    #[ignore = "Requires network access to the Open-Meteo API"]
    async fn test_fetch_daily_live() {
        let client = OpenMeteoClient::new();
        let series = client
            .fetch_daily(Coordinates::new(35.5, -80.0))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(series.time.len(), series.temperature.len());
        assert_eq!(series.time.len(), series.humidity.len());
        assert!(series.time.len() > 300);
    }
}
