use super::GeoPoint;
use serde::{Deserialize, Serialize};

/// One vertex of an elevation profile: cumulative distance from the
/// polyline start (km), elevation (meters, nullable because the DEM may not
/// cover the point), and the source GeoPoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElevationSample {
    pub cumulative_km: f64,
    pub elevation_m: Option<f64>,
    pub point: GeoPoint,
}

/// Ordered sequence of `ElevationSample`s whose cumulative distances are
/// monotonically non-decreasing and whose first distance is 0.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ElevationProfile {
    pub samples: Vec<ElevationSample>,
}

impl ElevationProfile {
    pub fn new(samples: Vec<ElevationSample>) -> Self {
        ElevationProfile { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sums positive and absolute negative adjacent-sample elevation deltas.
    /// Unknown endpoints skip the pair. Values rounded to one decimal.
    pub fn gain_loss(&self) -> (f64, f64) {
        let mut gain = 0.0;
        let mut loss = 0.0;
        for pair in self.samples.windows(2) {
            if let (Some(a), Some(b)) = (pair[0].elevation_m, pair[1].elevation_m) {
                let delta = b - a;
                if delta > 0.0 {
                    gain += delta;
                } else {
                    loss += -delta;
                }
            }
        }
        (round1(gain), round1(loss))
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
