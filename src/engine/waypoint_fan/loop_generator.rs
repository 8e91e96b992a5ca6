use super::{snap_to_attractor, FanIteration};
use crate::constants::*;
use crate::engine::elevation_profile;
use crate::error::Result;
use crate::geo::destination;
use crate::models::{GeoPoint, TrailAttractor};
use crate::services::{ElevationService, RoutingService};
use rand::Rng;
use std::f64::consts::PI;

/// Generates a loop route by placing `FAN_LOOP_WAYPOINTS` waypoints on a
/// (possibly elongated) polygon around `start` and iteratively refining the
/// radius and elongation against the measured distance and climb.
#[allow(clippy::too_many_arguments)]
pub async fn generate_loop(
    start: &GeoPoint,
    distance_km: f64,
    elevation_target_m: Option<f64>,
    uphill_bearing: Option<f64>,
    attractors: &[TrailAttractor],
    router: &dyn RoutingService,
    dem: &dyn ElevationService,
    rng: &mut impl Rng,
) -> Result<FanIteration> {
    let w = FAN_LOOP_WAYPOINTS;

    let base_angle = match uphill_bearing {
        Some(b) => b - (360.0 / w as f64) / 2.0,
        None => rng.gen_range(0.0..360.0),
    };

    let mut radius_km = distance_km / (2.0 * w as f64 * (PI / w as f64).sin());

    let shaping_active = elevation_target_m.map(|t| t > 0.0).unwrap_or(false) && uphill_bearing.is_some();
    let mut elongation = if shaping_active {
        1.0 + (elevation_target_m.unwrap() / 1000.0).min(FAN_INITIAL_ELONGATION_CAP)
    } else {
        1.0
    };

    let mut best: Option<FanIteration> = None;

    for iteration in 0..FAN_MAX_ITER {
        let waypoints = compute_loop_waypoints(
            start,
            base_angle,
            radius_km,
            elongation,
            uphill_bearing,
            attractors,
            w,
        );

        let (polyline, actual_km) = router.route(&waypoints).await?;
        let dist_err = (actual_km - distance_km).abs() / distance_km;

        let mut elev_err = 0.0;
        let mut measured_gain = None;
        if shaping_active {
            let target = elevation_target_m.unwrap();
            let profile = elevation_profile::profile(&polyline, dem).await;
            let (gain, _loss) = profile.gain_loss();
            elev_err = if target > 0.0 {
                (gain - target).abs() / target
            } else {
                0.0
            };
            measured_gain = Some(gain);
            if gain > 0.0 {
                elongation = (elongation * target / gain).clamp(FAN_ELONGATION_MIN, FAN_ELONGATION_MAX);
            }
        }

        let score = dist_err + elev_err;
        tracing::info!(iteration, score, dist_err, elev_err, "fan loop iteration scored");

        let candidate = FanIteration {
            polyline,
            distance_km: actual_km,
            elevation_gain_m: measured_gain,
            score,
        };

        let is_better = best.as_ref().map(|b| candidate.score < b.score).unwrap_or(true);
        if is_better {
            best = Some(candidate);
        }

        if dist_err <= FAN_DISTANCE_TOLERANCE && elev_err <= FAN_ELEVATION_TOLERANCE {
            break;
        }

        if iteration + 1 < FAN_MAX_ITER && actual_km > 0.0 {
            radius_km *= distance_km / actual_km;
        }
    }

    Ok(best.expect("at least one iteration always runs"))
}

/// Places `w` waypoints at `angle_i = base_angle + i*(360/w)`; radius for
/// waypoint `i` is elongated toward `uphill_bearing` when elongation is
/// active, then snapped toward the nearest attractor within `radius_km` by
/// linear interpolation. Prepends/appends `start` to close the loop.
fn compute_loop_waypoints(
    start: &GeoPoint,
    base_angle: f64,
    radius_km: f64,
    elongation: f64,
    uphill_bearing: Option<f64>,
    attractors: &[TrailAttractor],
    w: usize,
) -> Vec<GeoPoint> {
    let mut plan = Vec::with_capacity(w + 2);
    plan.push(*start);

    for i in 0..w {
        let angle_i = base_angle + i as f64 * (360.0 / w as f64);

        let radius = match uphill_bearing {
            Some(uphill) if elongation > FAN_ELONGATION_MIN => {
                let diff = (angle_i - uphill).to_radians();
                radius_km * (1.0 + (elongation - 1.0) * diff.cos().max(0.0))
            }
            _ => radius_km,
        };

        let waypoint = destination(start, angle_i, radius);
        let snapped = if attractors.is_empty() {
            waypoint
        } else {
            snap_to_attractor(&waypoint, attractors, radius_km, FAN_LOOP_SNAP_STRENGTH)
        };
        plan.push(snapped);
    }

    plan.push(*start);
    plan
}
