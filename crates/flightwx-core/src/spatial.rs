//! Great-circle distance calculations.

use crate::models::Coordinate;

/// Mean Earth radius used for all distance math.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate distance between two points in kilometers using the haversine formula.
///
/// The haversine intermediate is clamped to `[0, 1]` so rounding on nearly
/// antipodal or identical points never produces a NaN.
///
/// Inputs are not range-checked; validation belongs to whoever built the
/// coordinates.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let dphi = (b.latitude - a.latitude).to_radians();
    let dlambda = (b.longitude - a.longitude).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Sum of consecutive leg distances along `points`.
pub fn path_distance_km(points: &[Coordinate]) -> f64 {
    points
        .windows(2)
        .map(|leg| distance_km(leg[0], leg[1]))
        .sum()
}
