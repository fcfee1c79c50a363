//! Router assembly and server loop
//!
//! Builds the application router with its shared client state and a
//! permissive CORS layer, then serves it on the configured address.

use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::cors::{Any, CorsLayer};

use crate::api::{self, AppState};
use crate::config::MuseTripConfig;
use crate::geolocation::GeolocationClient;
use crate::museums::MuseumApiClient;

/// Build the application router with its shared state
pub fn app(config: &MuseTripConfig) -> Result<axum::Router> {
    let state = Arc::new(AppState {
        museums: MuseumApiClient::new(&config.museums)?,
        geolocation: GeolocationClient::new(&config.geolocation)?,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(api::router(state).layer(cors))
}

/// Bind the configured address and serve until shutdown
pub async fn run(config: &MuseTripConfig) -> Result<()> {
    let app = app(config)?;

    let addr = config.listen_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Museum trip planner listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .with_context(|| "Server error")?;
    Ok(())
}
