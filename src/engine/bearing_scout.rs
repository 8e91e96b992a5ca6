//! Evaluates N compass bearings on elevation and trail-density signals and
//! picks the best one to become the fan generator's "uphill bearing".
//!
//! The random fallback source is an injected parameter, not a hidden
//! global, so callers can make the fallback reproducible in tests.

use crate::constants::*;
use crate::geo::{destination, haversine, initial_bearing};
use crate::models::{GeoPoint, TrailAttractor};
use crate::services::ElevationService;
use rand::Rng;

/// Result of a bearing scout pass.
#[derive(Debug, Clone, Copy)]
pub struct ScoutResult {
    pub bearing_deg: f64,
}

/// Samples `N_SCOUT` evenly spaced bearings at `scout_radius_km`, scores
/// each on elevation and trail density, and returns the best-scoring
/// bearing. Falls back to a uniformly random bearing when elevations are
/// all null and the attractor bag is empty.
pub async fn scout(
    start: &GeoPoint,
    scout_radius_km: f64,
    attractors: &[TrailAttractor],
    dem: &dyn ElevationService,
    rng: &mut impl Rng,
) -> ScoutResult {
    let bearings: Vec<f64> = (0..N_SCOUT)
        .map(|i| (i as f64) * (360.0 / N_SCOUT as f64))
        .collect();
    let candidates: Vec<GeoPoint> = bearings
        .iter()
        .map(|b| destination(start, *b, scout_radius_km))
        .collect();

    let elevations = dem.elevations(&candidates).await;
    let elev_scores = normalized_elevation_scores(&elevations);
    let trail_scores: Vec<f64> = bearings
        .iter()
        .map(|b| trail_density_score(start, *b, scout_radius_km, attractors))
        .collect();

    let has_attractors = !attractors.is_empty();
    let has_elevation = elevations.iter().any(|e| e.is_some());

    if !has_elevation && !has_attractors {
        let bearing = rng.gen_range(0.0..360.0);
        return ScoutResult { bearing_deg: bearing };
    }

    let mut best_idx = 0;
    let mut best_score = f64::NEG_INFINITY;
    for i in 0..N_SCOUT {
        let score = if has_attractors {
            SCOUT_ELEV_WEIGHT * elev_scores[i] + SCOUT_TRAIL_WEIGHT * trail_scores[i]
        } else {
            elev_scores[i]
        };
        if score > best_score {
            best_score = score;
            best_idx = i;
        }
    }

    ScoutResult {
        bearing_deg: bearings[best_idx],
    }
}

/// Simpler elevation-free operation: bins attractors into the `N_SCOUT`
/// angular sectors by bearing-from-start and returns the center of the
/// heaviest sector, or `None` if no attractors.
pub fn trail_bearing(start: &GeoPoint, attractors: &[TrailAttractor]) -> Option<f64> {
    if attractors.is_empty() {
        return None;
    }

    let sector_width = 360.0 / N_SCOUT as f64;
    let mut bins = vec![0usize; N_SCOUT];
    for a in attractors {
        let bearing = initial_bearing(start, &a.point());
        let sector = ((bearing / sector_width) as usize).min(N_SCOUT - 1);
        bins[sector] += 1;
    }

    let (heaviest, _) = bins
        .iter()
        .enumerate()
        .max_by_key(|(_, count)| **count)
        .unwrap();

    Some(heaviest as f64 * sector_width + sector_width / 2.0)
}

fn normalized_elevation_scores(elevations: &[Option<f64>]) -> Vec<f64> {
    let known: Vec<f64> = elevations.iter().filter_map(|e| *e).collect();
    if known.is_empty() {
        return vec![0.0; elevations.len()];
    }

    let min = known.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = known.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    elevations
        .iter()
        .map(|e| match e {
            Some(v) if range > 1e-9 => (v - min) / range,
            _ => 0.0,
        })
        .collect()
}

/// Count of attractor points whose bearing from `start` lies within
/// `SCOUT_CONE_HALF_ANGLE_DEG` of `candidate_bearing` and whose distance is
/// within `SCOUT_TRAIL_DISTANCE_FACTOR * scout_radius_km`, divided by
/// `SCOUT_TRAIL_COUNT_DIVISOR` and clamped to [0, 1].
fn trail_density_score(
    start: &GeoPoint,
    candidate_bearing: f64,
    scout_radius_km: f64,
    attractors: &[TrailAttractor],
) -> f64 {
    let max_dist = SCOUT_TRAIL_DISTANCE_FACTOR * scout_radius_km;
    let count = attractors
        .iter()
        .filter(|a| {
            let point = a.point();
            let dist = haversine(start, &point);
            if dist > max_dist {
                return false;
            }
            let bearing = initial_bearing(start, &point);
            angular_diff(bearing, candidate_bearing) <= SCOUT_CONE_HALF_ANGLE_DEG
        })
        .count();

    (count as f64 / SCOUT_TRAIL_COUNT_DIVISOR).clamp(0.0, 1.0)
}

fn angular_diff(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    diff.min(360.0 - diff)
}
