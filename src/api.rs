//! HTTP API surface
//!
//! Two JSON endpoints glue the clients and the sequencer together:
//! `POST /plan_trip` orders museums into a visiting route and
//! `POST /show_museums` returns the flat aggregated list. Every failure a
//! caller can trigger comes back as `{"error": ...}` with status 400.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::MuseTripError;
use crate::geolocation::GeolocationClient;
use crate::models::{Coordinate, Museum};
use crate::museums::MuseumApiClient;
use crate::trip::plan_route;

const NO_MUSEUMS_FOUND: &str =
    "No valid museums found for the provided cities. Please enter valid city names.";
const CURRENT_LOCATION_UNAVAILABLE: &str = "Unable to fetch current location.";
const INVALID_START_NUMBER: &str =
    "Invalid start location number. Please enter a valid number or museum name.";
const INVALID_START_INPUT: &str =
    "Invalid start location input. Please enter a valid number or museum name.";

/// Shared handles the handlers need
pub struct AppState {
    pub museums: MuseumApiClient,
    pub geolocation: GeolocationClient,
}

#[derive(Debug, Deserialize)]
pub struct PlanTripRequest {
    pub cities: Vec<String>,
    pub start_location: String,
}

#[derive(Debug, Deserialize)]
pub struct ShowMuseumsRequest {
    pub cities: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TripPlanResponse {
    pub trip_plan: Vec<Museum>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Wrapper that renders domain errors as the API's 400 error body
struct ApiError(MuseTripError);

impl From<MuseTripError> for ApiError {
    fn from(err: MuseTripError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!("Request rejected: {}", self.0);
        let body = Json(ErrorResponse {
            error: self.0.user_message(),
        });
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/plan_trip", post(plan_trip))
        .route("/show_museums", post(show_museums))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[instrument(skip(state, request), fields(cities = request.cities.len()))]
async fn plan_trip(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlanTripRequest>,
) -> Result<Json<TripPlanResponse>, ApiError> {
    let museums = state.museums.fetch_all(&request.cities).await;
    if museums.is_empty() {
        return Err(MuseTripError::no_data(NO_MUSEUMS_FOUND).into());
    }

    let start = resolve_start(&state, &request.start_location, &museums).await?;
    info!(
        "Planning a route over {} museums from ({}, {})",
        museums.len(),
        start.latitude,
        start.longitude
    );

    let trip_plan = plan_route(start, museums);
    Ok(Json(TripPlanResponse { trip_plan }))
}

#[instrument(skip(state, request), fields(cities = request.cities.len()))]
async fn show_museums(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ShowMuseumsRequest>,
) -> Result<Json<Vec<Museum>>, ApiError> {
    let museums = state.museums.fetch_all(&request.cities).await;
    if museums.is_empty() {
        return Err(MuseTripError::no_data(NO_MUSEUMS_FOUND).into());
    }
    Ok(Json(museums))
}

/// Turn the caller's `start_location` into a coordinate
///
/// Accepted forms, tried in order: the literal `"current location"`
/// (case-insensitive), an exact museum name match (case-insensitive), or a
/// 1-based index into the aggregated museum list.
async fn resolve_start(
    state: &AppState,
    start_location: &str,
    museums: &[Museum],
) -> Result<Coordinate, MuseTripError> {
    if start_location.eq_ignore_ascii_case("current location") {
        return state
            .geolocation
            .current_location()
            .await
            .ok_or_else(|| MuseTripError::upstream(CURRENT_LOCATION_UNAVAILABLE));
    }

    if let Some(chosen) = museums
        .iter()
        .find(|museum| museum.name.eq_ignore_ascii_case(start_location))
    {
        return Ok(chosen.coordinate());
    }

    match start_location.trim().parse::<i64>() {
        Ok(number) => {
            let index = usize::try_from(number - 1)
                .map_err(|_| MuseTripError::validation(INVALID_START_NUMBER))?;
            museums
                .get(index)
                .map(Museum::coordinate)
                .ok_or_else(|| MuseTripError::validation(INVALID_START_NUMBER))
        }
        Err(_) => Err(MuseTripError::validation(INVALID_START_INPUT)),
    }
}
