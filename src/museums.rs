//! Museum data provider client and per-city aggregation
//!
//! Talks to the upstream museum API at `<base>/Museums/city/{city}`. A city
//! whose fetch fails is skipped rather than failing the whole request, so
//! callers may get partial results.

use std::time::Duration;

use anyhow::{Context, Result};
use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::MuseTripError;
use crate::config::MuseumProviderConfig;
use crate::models::Museum;

/// Client for the museum data provider
#[derive(Debug, Clone)]
pub struct MuseumApiClient {
    client: Client,
    base_url: String,
}

/// One museum record as the upstream serves it
///
/// The upstream `id` field is deliberately not modeled; deserializing into
/// this struct strips it along with any other field we do not care about.
/// Missing required fields fail deserialization instead of producing a
/// half-empty record.
#[derive(Debug, Deserialize)]
struct UpstreamMuseum {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(rename = "imageUrl")]
    image_url: Option<String>,
}

impl MuseumApiClient {
    /// Create a new client from the provider configuration
    pub fn new(config: &MuseumProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("musetrip/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create museum HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the museums of a single city, tagged with that city's name
    ///
    /// Returns `None` when the upstream is unreachable, answers non-200 or
    /// serves a payload that fails schema validation. The failure is scoped
    /// to this city; other cities are unaffected.
    pub async fn fetch_city(&self, city: &str) -> Option<Vec<Museum>> {
        let url = format!(
            "{}/Museums/city/{}",
            self.base_url,
            urlencoding::encode(city)
        );
        debug!("Fetching museums for '{city}' from {url}");

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Museum request for '{city}' failed: {e}");
                return None;
            }
        };

        if response.status() != reqwest::StatusCode::OK {
            warn!(
                "Museum provider answered {} for '{city}'",
                response.status()
            );
            return None;
        }

        let records: Vec<UpstreamMuseum> = match response.json().await {
            Ok(records) => records,
            Err(e) => {
                let err = MuseTripError::upstream_schema(format!(
                    "Malformed museum payload for '{city}': {e}"
                ));
                warn!("{err}");
                return None;
            }
        };

        // The query city wins over whatever city the upstream record carried.
        Some(
            records
                .into_iter()
                .map(|record| Museum {
                    name: record.name,
                    latitude: record.latitude,
                    longitude: record.longitude,
                    city: city.to_string(),
                    image_url: record.image_url,
                    distance: None,
                })
                .collect(),
        )
    }

    /// Fetch and concatenate the museums of every requested city
    ///
    /// Cities are fetched concurrently but the output keeps input city order,
    /// with upstream order within each city. Failed or empty cities are
    /// skipped; an empty result is the caller's signal that nothing matched.
    pub async fn fetch_all(&self, cities: &[String]) -> Vec<Museum> {
        let fetches = cities.iter().map(|city| self.fetch_city(city));

        let mut museums = Vec::new();
        for (city, result) in cities.iter().zip(join_all(fetches).await) {
            match result {
                Some(records) if !records.is_empty() => museums.extend(records),
                Some(_) => debug!("Museum provider has no records for '{city}'"),
                None => debug!("Skipping '{city}' after a failed fetch"),
            }
        }
        museums
    }
}
