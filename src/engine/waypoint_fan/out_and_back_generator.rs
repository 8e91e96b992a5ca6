use super::{snap_to_attractor, FanIteration};
use crate::constants::*;
use crate::engine::elevation_profile;
use crate::error::Result;
use crate::geo::destination;
use crate::models::{GeoPoint, TrailAttractor};
use crate::services::{ElevationService, RoutingService};
use rand::Rng;

/// Generates an out-and-back route: a single turnaround waypoint placed
/// along `bearing` at `half * straight_factor`, iteratively refined against
/// the round-trip distance target.
#[allow(clippy::too_many_arguments)]
pub async fn generate_out_and_back(
    start: &GeoPoint,
    distance_km: f64,
    elevation_target_m: Option<f64>,
    uphill_bearing: Option<f64>,
    attractors: &[TrailAttractor],
    router: &dyn RoutingService,
    dem: &dyn ElevationService,
    rng: &mut impl Rng,
) -> Result<FanIteration> {
    let bearing = uphill_bearing.unwrap_or_else(|| rng.gen_range(0.0..360.0));
    let half = distance_km / 2.0;

    let shaping_active = elevation_target_m.map(|t| t > 0.0).unwrap_or(false);
    let straight_factor = if shaping_active {
        FAN_OAB_STRAIGHT_FACTOR_ELEVATION
    } else {
        FAN_OAB_STRAIGHT_FACTOR_DEFAULT
    };

    let mut target_straight = half * straight_factor;
    let mut best: Option<FanIteration> = None;

    for iteration in 0..FAN_MAX_ITER {
        let turnaround = destination(start, bearing, target_straight);
        let snapped = if attractors.is_empty() {
            turnaround
        } else {
            snap_to_attractor(
                &turnaround,
                attractors,
                FAN_OAB_SNAP_RADIUS_KM,
                FAN_OAB_SNAP_STRENGTH,
            )
        };

        let plan = vec![*start, snapped, *start];
        let (polyline, actual_km) = router.route(&plan).await?;
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
        }

        let score = dist_err + elev_err;
        tracing::info!(iteration, score, dist_err, elev_err, "fan out-and-back iteration scored");

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
            target_straight *= distance_km / actual_km;
        }
    }

    Ok(best.expect("at least one iteration always runs"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct StubRouter {
        distance_km: f64,
    }

    #[async_trait]
    impl RoutingService for StubRouter {
        async fn route(&self, waypoints: &[GeoPoint]) -> Result<(Vec<GeoPoint>, f64)> {
            Ok((waypoints.to_vec(), self.distance_km))
        }
    }

    struct FlatDem;

    #[async_trait]
    impl ElevationService for FlatDem {
        async fn elevations(&self, points: &[GeoPoint]) -> Vec<Option<f64>> {
            vec![Some(50.0); points.len()]
        }
    }

    #[tokio::test]
    async fn plan_is_start_turnaround_start() {
        let start = GeoPoint::new(0.0, 0.0).unwrap();
        let router = StubRouter { distance_km: 6.0 };
        let dem = FlatDem;
        let mut rng = StdRng::seed_from_u64(3);

        let result = generate_out_and_back(&start, 6.0, None, Some(90.0), &[], &router, &dem, &mut rng)
            .await
            .unwrap();

        assert_eq!(result.distance_km, 6.0);
        assert_eq!(result.polyline.len(), 3);
        assert_eq!(result.polyline[0], start);
        assert_eq!(result.polyline[2], start);
    }

    #[tokio::test]
    async fn straight_distance_uses_default_straight_factor() {
        // 6 km out-and-back, no elevation target -> straight_factor 0.7,
        // half = 3.0, target_straight = 2.1 km.
        let start = GeoPoint::new(0.0, 0.0).unwrap();
        let router = StubRouter { distance_km: 6.0 };
        let dem = FlatDem;
        let mut rng = StdRng::seed_from_u64(3);

        let result = generate_out_and_back(&start, 6.0, None, Some(90.0), &[], &router, &dem, &mut rng)
            .await
            .unwrap();

        let turnaround = result.polyline[1];
        let dist = crate::geo::haversine(&start, &turnaround);
        assert!((dist - 2.1).abs() < 0.01, "got {dist}");
    }
}
