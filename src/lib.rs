//! `MuseTrip` - museum trip planning service
//!
//! This library aggregates museum listings for a set of cities from an
//! external data provider and orders them into a visiting sequence with a
//! greedy nearest-neighbor walk, starting from the caller's IP-geolocation,
//! a named museum, or an index into the aggregated list.

pub mod api;
pub mod config;
pub mod error;
pub mod geolocation;
pub mod models;
pub mod museums;
pub mod trip;
pub mod web;

// Re-export core types for public API
pub use config::MuseTripConfig;
pub use error::MuseTripError;
pub use geolocation::GeolocationClient;
pub use models::{Coordinate, Museum};
pub use museums::MuseumApiClient;
pub use trip::{distance_km, plan_route};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, MuseTripError>;
