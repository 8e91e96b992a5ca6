//! Loop and out-and-back waypoint placement, iteratively refined against
//! distance and climb targets.

mod loop_generator;
mod out_and_back_generator;

pub use loop_generator::generate_loop;
pub use out_and_back_generator::generate_out_and_back;

use crate::geo::haversine;
use crate::models::{GeoPoint, TrailAttractor};

/// The outcome of one fan iteration: the routed polyline, its measured
/// distance, and (when an elevation target is active) the measured gain.
#[derive(Debug, Clone)]
pub struct FanIteration {
    pub polyline: Vec<GeoPoint>,
    pub distance_km: f64,
    pub elevation_gain_m: Option<f64>,
    pub score: f64,
}

/// Attractor-snapping: moves `point` toward the nearest attractor within
/// `max_dist_km` by linear interpolation in (lat, lng) with the given
/// strength. Euclidean interpolation is approximate near the poles;
/// acceptable at the target latitudes. A pure function independent of the
/// generator so it stays testable and reusable on its own.
pub fn snap_to_attractor(
    point: &GeoPoint,
    attractors: &[TrailAttractor],
    max_dist_km: f64,
    strength: f64,
) -> GeoPoint {
    let nearest = attractors
        .iter()
        .map(|a| a.point())
        .map(|p| (p, haversine(point, &p)))
        .filter(|(_, d)| *d <= max_dist_km)
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap());

    match nearest {
        Some((target, _)) => GeoPoint::new(
            point.lat + (target.lat - point.lat) * strength,
            point.lng + (target.lng - point.lng) * strength,
        )
        .unwrap_or(*point),
        None => *point,
    }
}
