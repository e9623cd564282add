// src/gps/distance.rs
//! Great-circle distance from the current fix

use super::data::{Coordinate, Fix};

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default satellite threshold: a distance is only reported with more
/// satellites than this.
pub const DEFAULT_MIN_SATELLITES: u32 = 4;

/// Haversine distance between two points in kilometers
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (to.longitude - from.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Clamp guards asin against rounding just above 1.0 for antipodes
    let c = 2.0 * a.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// Distance from `current` to `target`, or `None` when the fix has
/// `min_satellites` or fewer satellites.
///
/// This threshold is independent of `Fix::has_fix`, which follows the
/// quality indicator.
pub fn distance_to(current: &Fix, target: Coordinate, min_satellites: u32) -> Option<f64> {
    if current.satellites <= min_satellites {
        return None;
    }
    Some(haversine_km(current.coordinate(), target))
}
