//! Core data types for museum trip planning

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A museum listing as served by the API
///
/// `city` is always the city the caller asked for, not whatever the upstream
/// record carried. `distance` is only present on trip-plan responses and holds
/// the kilometers from the previous stop (or from the start location for the
/// first stop).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Museum {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl Museum {
    /// The museum's position as a coordinate pair
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
