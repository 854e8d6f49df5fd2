#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Geodesic math utilities: haversine distance, bounding boxes, and random
//! point scatter.
//!
//! Two distinct scatter distributions are deliberately kept under separate
//! names. [`points_in_radius`] draws an intermediate radius uniformly in
//! `[0, sqrt(radius_km)]` and squares it before converting to a degree
//! offset; [`scatter_offset`] draws the distance uniformly in degree space.
//! Callers depend on the exact distributional shape of each, so they must
//! not be unified or "corrected" to area-uniform disc sampling.

use crime_pulse_crime_models::Location;
use rand::Rng;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per degree of latitude (and of longitude at the equator).
pub const KM_PER_DEGREE: f64 = 111.32;

/// Great-circle distance between two points in kilometers.
///
/// Inputs are in degrees. NaN inputs propagate to a NaN result.
#[must_use]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * a.sqrt().asin() * EARTH_RADIUS_KM
}

/// Generates `count` random points around a center.
///
/// For each point the angle is drawn uniformly in `[0, 2pi)` and an
/// intermediate radius uniformly in `[0, sqrt(radius_km)]`, which is then
/// squared before conversion to a degree offset. The squared draw
/// concentrates points toward the center; this is the contracted behavior,
/// not a bug (see module docs).
pub fn points_in_radius<R: Rng + ?Sized>(
    center_lat: f64,
    center_lon: f64,
    radius_km: f64,
    count: usize,
    rng: &mut R,
) -> Vec<Location> {
    (0..count)
        .map(|_| {
            let angle = rng.gen_range(0.0..std::f64::consts::TAU);
            let rand_radius = rng.gen_range(0.0..=radius_km.sqrt());
            let distance_km = rand_radius * rand_radius;

            let lat_offset = distance_km * angle.cos() / KM_PER_DEGREE;
            let lon_offset =
                distance_km * angle.sin() / (KM_PER_DEGREE * center_lat.to_radians().cos());

            Location {
                latitude: center_lat + lat_offset,
                longitude: center_lon + lon_offset,
            }
        })
        .collect()
}

/// Bounding box for a radius around a center, as
/// `[min_lon, min_lat, max_lon, max_lat]`.
///
/// The longitude delta is widened via `asin(sin(r) / cos(lat))` to account
/// for meridian convergence. The poles are a disallowed input: at
/// `cos(lat) == 0` the longitude delta is undefined and the result contains
/// NaN.
#[must_use]
pub fn bounding_box(center_lat: f64, center_lon: f64, radius_km: f64) -> [f64; 4] {
    let radius_rad = radius_km / EARTH_RADIUS_KM;
    let lat_rad = center_lat.to_radians();
    let lon_rad = center_lon.to_radians();

    let min_lat = lat_rad - radius_rad;
    let max_lat = lat_rad + radius_rad;

    let delta_lon = (radius_rad.sin() / lat_rad.cos()).asin();
    let min_lon = lon_rad - delta_lon;
    let max_lon = lon_rad + delta_lon;

    [
        min_lon.to_degrees(),
        min_lat.to_degrees(),
        max_lon.to_degrees(),
        max_lat.to_degrees(),
    ]
}

/// Offsets a center by a uniformly drawn distance in degree space.
///
/// Angle uniform in `[0, 2pi)`, distance uniform in `[0, max_distance_deg)`,
/// applied as `lat += d*cos(angle)`, `lon += d*sin(angle)`. This is the
/// jitter used by the incident generator and the prediction stub; it is a
/// different distribution from [`points_in_radius`].
pub fn scatter_offset<R: Rng + ?Sized>(
    center: Location,
    max_distance_deg: f64,
    rng: &mut R,
) -> Location {
    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
    let distance = rng.gen_range(0.0..max_distance_deg);
    Location {
        latitude: center.latitude + distance * angle.cos(),
        longitude: center.longitude + distance * angle.sin(),
    }
}
