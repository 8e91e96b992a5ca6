//! Detects and excises out-and-back detours the routing service inserts
//! when a pass-through waypoint forces it to poke out and return along the
//! same trail.
//!
//! The scan restarts from 0 after every cut rather than continuing from the
//! cut point, so a route with several spurs is always fully re-scanned
//! before it's considered clean.

use crate::constants::*;
use crate::geo::haversine;
use crate::models::GeoPoint;

/// Re-scan fixpoint removal of spurs. Returns the input unchanged if it has
/// fewer than `SPUR_MIN_POLYLINE_LEN` vertices.
pub fn remove_spurs(route: &[GeoPoint]) -> Vec<GeoPoint> {
    if route.len() < SPUR_MIN_POLYLINE_LEN {
        return route.to_vec();
    }

    let mut result = route.to_vec();

    loop {
        let max_spur = result.len() / 3;
        let mut cut = None;
        let mut i = 0;
        while i < result.len() {
            let upper = (i + max_spur).min(result.len());
            let lower = i + SPUR_MIN_SPAN;
            if lower >= upper {
                i += 1;
                continue;
            }
            let mut found = None;
            for j in lower..upper {
                if haversine(&result[i], &result[j]) * 1000.0 < SPUR_THRESHOLD_M {
                    found = Some(j);
                    break;
                }
            }
            if let Some(j) = found {
                cut = Some((i, j));
                break;
            }
            i += 1;
        }

        match cut {
            Some((i, j)) => {
                let mut spliced = result[..i].to_vec();
                spliced.extend_from_slice(&result[j..]);
                result = spliced;
                // Restart the scan from 0 after every cut.
            }
            None => break,
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn east_line(start_lng: f64, n: usize, step_deg: f64) -> Vec<GeoPoint> {
        (0..n)
            .map(|i| GeoPoint::new(0.0, start_lng + i as f64 * step_deg).unwrap())
            .collect()
    }

    #[test]
    fn short_polylines_are_returned_unchanged() {
        let route = east_line(0.0, 10, 0.001);
        assert_eq!(remove_spurs(&route), route);
    }

    #[test]
    fn removes_a_visible_out_and_back_spur() {
        // ~20m steps in longitude near the equator: 1 degree ~= 111km, so
        // 20m ~= 0.00018 degrees.
        let step = 0.00018;
        let mut route = east_line(0.0, 20, step);
        // Return path back toward the start along the same line.
        let turnaround_lng = route.last().unwrap().lng;
        for i in 1..=20 {
            route.push(GeoPoint::new(0.0, turnaround_lng - i as f64 * step).unwrap());
        }
        // Continue east past the original point.
        for i in 1..=20 {
            route.push(GeoPoint::new(0.0, route[0].lng + i as f64 * step).unwrap());
        }

        let original_len = route.len();
        let cleaned = remove_spurs(&route);

        assert!(cleaned.len() < original_len);
        for w in cleaned.windows(2) {
            assert!(w[1].lng >= w[0].lng - 1e-9, "route should not backtrack west");
        }
    }

    #[test]
    fn idempotent_on_a_cleaned_route() {
        let step = 0.00018;
        let mut route = east_line(0.0, 20, step);
        let turnaround_lng = route.last().unwrap().lng;
        for i in 1..=20 {
            route.push(GeoPoint::new(0.0, turnaround_lng - i as f64 * step).unwrap());
        }
        for i in 1..=20 {
            route.push(GeoPoint::new(0.0, route[0].lng + i as f64 * step).unwrap());
        }

        let once = remove_spurs(&route);
        let twice = remove_spurs(&once);
        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert!((a.lat - b.lat).abs() < 1e-12);
            assert!((a.lng - b.lng).abs() < 1e-12);
        }
    }

    #[test]
    fn distance_monotone() {
        let step = 0.00018;
        let mut route = east_line(0.0, 20, step);
        let turnaround_lng = route.last().unwrap().lng;
        for i in 1..=20 {
            route.push(GeoPoint::new(0.0, turnaround_lng - i as f64 * step).unwrap());
        }
        for i in 1..=20 {
            route.push(GeoPoint::new(0.0, route[0].lng + i as f64 * step).unwrap());
        }
        let cleaned = remove_spurs(&route);
        assert!(cleaned.len() <= route.len());
    }
}
