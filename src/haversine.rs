//! Straight-line (great-circle) distance and the duration estimate used
//! when no road route is available.
//!
//! Less accurate than a routing service (ignores roads) but always available.

use crate::place::Coordinates;

/// Average driving speed assumption for time estimation.
pub const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, rounded to one decimal (km).
///
/// Does not validate its input; non-finite coordinates produce NaN. Use
/// [`Coordinates::new`] at the boundary.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1_rad = from.latitude().to_radians();
    let lat2_rad = to.latitude().to_radians();
    let delta_lat = (to.latitude() - from.latitude()).to_radians();
    let delta_lng = (to.longitude() - from.longitude()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    round_tenth(EARTH_RADIUS_KM * c)
}

/// Travel time in whole minutes for `km` at a constant `speed_kmh`.
pub fn estimate_duration_minutes(km: f64, speed_kmh: f64) -> u32 {
    if km <= 0.0 || speed_kmh <= 0.0 {
        return 0;
    }
    (km / speed_kmh * 60.0).round() as u32
}

pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
