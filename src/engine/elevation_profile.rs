//! Downsamples a polyline and builds its elevation profile via batched DEM
//! queries, dispatched concurrently via `futures::future::join_all` so
//! multiple in-flight batches don't block each other.

use crate::constants::*;
use crate::geo::haversine;
use crate::models::{ElevationProfile, ElevationSample, GeoPoint};
use crate::services::ElevationService;
use futures::future::join_all;

/// Downsamples `polyline` to exactly `MAX_PROFILE_POINTS` vertices using a
/// floating-point stride, always including the final vertex, then
/// batch-queries elevations and assembles the profile with cumulative
/// great-circle distance.
pub async fn profile(polyline: &[GeoPoint], dem: &dyn ElevationService) -> ElevationProfile {
    let sampled = downsample(polyline, MAX_PROFILE_POINTS);
    if sampled.is_empty() {
        return ElevationProfile::default();
    }

    let batches: Vec<&[GeoPoint]> = sampled.chunks(DEM_BATCH_SIZE).collect();
    let results = join_all(batches.iter().map(|batch| dem.elevations(batch))).await;

    let elevations: Vec<Option<f64>> = results.into_iter().flatten().collect();

    let mut samples = Vec::with_capacity(sampled.len());
    let mut cumulative = 0.0;
    for (i, point) in sampled.iter().enumerate() {
        if i > 0 {
            cumulative += haversine(&sampled[i - 1], point);
        }
        samples.push(ElevationSample {
            cumulative_km: cumulative,
            elevation_m: elevations.get(i).copied().flatten(),
            point: *point,
        });
    }

    ElevationProfile::new(samples)
}

/// Floating-step downsampling: picks `max_points - 1` vertices at indices
/// `floor(i * len / max_points)` for `i` in `0..max_points-1`, then appends
/// the last vertex, yielding exactly `max_points` vertices (fewer only if
/// `polyline` itself is shorter).
fn downsample(polyline: &[GeoPoint], max_points: usize) -> Vec<GeoPoint> {
    if polyline.len() <= max_points || max_points == 0 {
        return polyline.to_vec();
    }

    let step = polyline.len() as f64 / max_points as f64;
    let mut out: Vec<GeoPoint> = (0..max_points - 1)
        .map(|i| polyline[(i as f64 * step) as usize])
        .collect();
    out.push(*polyline.last().unwrap());
    out
}
