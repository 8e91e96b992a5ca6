//! Geodesy primitives: haversine distance, forward destination, initial
//! bearing. Purely functional, no error conditions, spherical-earth
//! approximation (sub-percent accuracy for distances under ~100 km).

use crate::constants::EARTH_RADIUS_KM;
use crate::models::GeoPoint;

/// Great-circle distance between two points, in kilometers.
pub fn haversine(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Forward geodesic on a spherical earth model: the point `distance_km` from
/// `origin` along `bearing_deg`.
pub fn destination(origin: &GeoPoint, bearing_deg: f64, distance_km: f64) -> GeoPoint {
    let lat1 = origin.lat.to_radians();
    let lng1 = origin.lng.to_radians();
    let bearing = bearing_deg.to_radians();
    let angular_distance = distance_km / EARTH_RADIUS_KM;

    let lat2 = (lat1.sin() * angular_distance.cos()
        + lat1.cos() * angular_distance.sin() * bearing.cos())
    .asin();
    let lng2 = lng1
        + (bearing.sin() * angular_distance.sin() * lat1.cos())
            .atan2(angular_distance.cos() - lat1.sin() * lat2.sin());

    GeoPoint::new(lat2.to_degrees(), normalize_lng(lng2.to_degrees()))
        .expect("destination of a valid GeoPoint is always valid")
}

/// Forward azimuth from `a` to `b`, normalized to `[0, 360)` degrees.
pub fn initial_bearing(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let y = dlng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlng.cos();
    let bearing = y.atan2(x).to_degrees();
    (bearing + 360.0) % 360.0
}

/// Sum of haversine distances along consecutive polyline vertices, in km.
pub fn path_length_km(points: &[GeoPoint]) -> f64 {
    points.windows(2).map(|w| haversine(&w[0], &w[1])).sum()
}

fn normalize_lng(lng: f64) -> f64 {
    let mut v = lng;
    while v > 180.0 {
        v -= 360.0;
    }
    while v < -180.0 {
        v += 360.0;
    }
    v
}
