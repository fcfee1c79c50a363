//! Visiting-order computation
//!
//! Orders museums with a greedy nearest-neighbor walk: from the start
//! coordinate, repeatedly hop to the closest remaining museum. This is a
//! heuristic tour, not a shortest-tour search; with tens of museums per
//! request the O(n²) scan is fine.

use haversine::{Location as HaversineLocation, Units, distance};
use tracing::debug;

use crate::models::{Coordinate, Museum};

/// Great-circle distance between two coordinates, in kilometers
#[must_use]
pub fn distance_km(from: Coordinate, to: Coordinate) -> f64 {
    let from = HaversineLocation {
        latitude: from.latitude,
        longitude: from.longitude,
    };
    let to = HaversineLocation {
        latitude: to.latitude,
        longitude: to.longitude,
    };
    distance(from, to, Units::Kilometers)
}

/// Order museums into a visiting sequence starting from `start`
///
/// Each returned museum carries `distance`, the kilometers from the previous
/// stop (the start coordinate for the first stop). The output is a
/// permutation of the input; ties on distance keep the earliest input
/// position, so the ordering is deterministic.
#[must_use]
pub fn plan_route(start: Coordinate, museums: Vec<Museum>) -> Vec<Museum> {
    let mut remaining: Vec<Option<Museum>> = museums.into_iter().map(Some).collect();
    let mut route = Vec::with_capacity(remaining.len());
    let mut current = start;

    for _ in 0..remaining.len() {
        let mut nearest: Option<(usize, f64)> = None;
        for (index, slot) in remaining.iter().enumerate() {
            if let Some(museum) = slot {
                let km = distance_km(current, museum.coordinate());
                // Strict comparison keeps the first-seen museum on a tie.
                if nearest.is_none_or(|(_, best)| km < best) {
                    nearest = Some((index, km));
                }
            }
        }

        let Some((index, km)) = nearest else {
            break;
        };
        let Some(mut museum) = remaining[index].take() else {
            break;
        };

        debug!("Next stop: '{}' at {km:.2} km", museum.name);
        museum.distance = Some(km);
        current = museum.coordinate();
        route.push(museum);
    }

    route
}
