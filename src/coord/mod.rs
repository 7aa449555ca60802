//! Geographic coordinates and spatial deduplication
//!
//! This module handles:
//! - The `Coordinates` pair used throughout the crate
//! - Grid-bucketed deduplication of occurrence records (one marker per cell)

pub mod cluster;

use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.lat < -90.0 || self.lat > 90.0 {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if self.lng < -180.0 || self.lng > 180.0 {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        assert!(Coordinates::new(35.5, -80.0).validate().is_ok());
        assert!(Coordinates::new(-90.0, 180.0).validate().is_ok());
        assert!(Coordinates::new(90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(Coordinates::new(91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(-90.1, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, 180.5).validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let coords = Coordinates::new(35.5, -80.0);
        let json = serde_json::to_string(&coords).unwrap();
        let parsed: Coordinates = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, coords);
    }
}
