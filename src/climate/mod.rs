//! Historical climate data
//!
//! Daily temperature and humidity series for an occurrence site, fetched
//! from the Open-Meteo archive and aggregated into calendar-month normals
//! for the detail overlay.

pub mod monthly;
pub mod open_meteo;

use crate::coord::Coordinates;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// One year of daily climate data, index-aligned by day
///
/// All three arrays have equal length. Immutable once fetched; scoped to
/// the lifetime of one detail overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimateSeries {
    /// ISO dates, one per day (`YYYY-MM-DD`)
    pub time: Vec<String>,
    /// Daily mean temperature, degrees Celsius
    pub temperature: Vec<f64>,
    /// Daily mean relative humidity, percent
    pub humidity: Vec<f64>,
}

impl ClimateSeries {
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Arithmetic mean of the daily temperatures, `None` on an empty series
    pub fn mean_temperature(&self) -> Option<f64> {
        if self.temperature.is_empty() {
            return None;
        }
        Some(self.temperature.iter().sum::<f64>() / self.temperature.len() as f64)
    }

    /// Minimum and maximum daily humidity, `None` on an empty series
    pub fn humidity_range(&self) -> Option<(f64, f64)> {
        let first = *self.humidity.first()?;
        Some(
            self.humidity
                .iter()
                .fold((first, first), |(lo, hi), &h| (lo.min(h), hi.max(h))),
        )
    }
}

/// Headline numbers for the detail overlay's stat tiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimateSummary {
    pub mean_temperature: f64,
    pub humidity_min: f64,
    pub humidity_max: f64,
}

impl ClimateSummary {
    /// Compute the summary, `None` on an empty series
    pub fn from_series(series: &ClimateSeries) -> Option<Self> {
        let mean_temperature = series.mean_temperature()?;
        let (humidity_min, humidity_max) = series.humidity_range()?;
        Some(Self {
            mean_temperature,
            humidity_min,
            humidity_max,
        })
    }
}

/// Trait for historical climate sources
///
/// Implementations must be thread-safe (Send + Sync) to work with the
/// async server.
pub trait ClimateSource: Send + Sync {
    /// Fetch one year of daily data ending today
    ///
    /// `Ok(None)` means the source has no data for this point, which the
    /// caller must render as an explicit "no data" state.
    fn fetch_daily(
        &self,
        center: Coordinates,
    ) -> impl std::future::Future<Output = Result<Option<ClimateSeries>>> + Send;
}
