//! IP-geolocation client
//!
//! Resolves the caller's approximate position from an ipinfo-style service
//! whose response carries a `loc` field formatted `"<lat>,<lon>"`. Every
//! failure path degrades to `None`; callers decide whether that is an error.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::GeolocationConfig;
use crate::models::Coordinate;

/// Client for the IP-geolocation provider
#[derive(Debug, Clone)]
pub struct GeolocationClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GeolocationResponse {
    loc: Option<String>,
}

impl GeolocationClient {
    /// Create a new client from the provider configuration
    pub fn new(config: &GeolocationConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("musetrip/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create geolocation HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up the caller's current position from its network address
    ///
    /// Single attempt, no retry. Network errors, non-success statuses, a
    /// missing `loc` field and unparseable coordinates all log a warning and
    /// come back as `None`.
    pub async fn current_location(&self) -> Option<Coordinate> {
        let response = match self.client.get(&self.base_url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Geolocation request failed: {e}");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("Geolocation provider answered {}", response.status());
            return None;
        }

        let body: GeolocationResponse = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to parse geolocation response: {e}");
                return None;
            }
        };

        let Some(loc) = body.loc else {
            warn!("Geolocation response is missing the loc field");
            return None;
        };

        match parse_loc(&loc) {
            Some(coordinate) => {
                debug!(
                    "Resolved current location to ({}, {})",
                    coordinate.latitude, coordinate.longitude
                );
                Some(coordinate)
            }
            None => {
                warn!("Geolocation loc field is malformed: {loc:?}");
                None
            }
        }
    }
}

/// Parse a `"<lat>,<lon>"` string into a coordinate pair
fn parse_loc(loc: &str) -> Option<Coordinate> {
    let (latitude, longitude) = loc.split_once(',')?;
    let latitude: f64 = latitude.trim().parse().ok()?;
    let longitude: f64 = longitude.trim().parse().ok()?;
    Some(Coordinate::new(latitude, longitude))
}
