use super::GeoPoint;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteShape {
    Loop,
    OutAndBack,
}

/// (start, target distance km ∈ (0,100], shape, optional target elevation
/// gain m ≥ 0, prefer-trails flag).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub start: GeoPoint,
    pub distance_km: f64,
    pub shape: RouteShape,
    pub elevation_target_m: Option<f64>,
    pub prefer_trails: bool,
}

impl GenerationRequest {
    pub fn new(
        start: GeoPoint,
        distance_km: f64,
        shape: RouteShape,
        elevation_target_m: Option<f64>,
        prefer_trails: bool,
    ) -> Result<Self, EngineError> {
        if !(distance_km > 0.0 && distance_km <= 100.0) {
            return Err(EngineError::InvalidInput(format!(
                "distance_km {distance_km} must be in (0, 100]"
            )));
        }
        if let Some(target) = elevation_target_m {
            if target < 0.0 {
                return Err(EngineError::InvalidInput(format!(
                    "elevation_target_m {target} must be >= 0"
                )));
            }
        }
        Ok(GenerationRequest {
            start,
            distance_km,
            shape,
            elevation_target_m,
            prefer_trails,
        })
    }

    /// Whether the fan generator has both an elevation target and an uphill
    /// bearing to work with; the waypoint-radius formula differs
    /// structurally depending on this tag.
    pub fn wants_elevation_shaping(&self) -> bool {
        self.elevation_target_m.map(|t| t > 0.0).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_distance_out_of_bounds() {
        let start = GeoPoint::new(0.0, 0.0).unwrap();
        assert!(GenerationRequest::new(start, 0.0, RouteShape::Loop, None, false).is_err());
        assert!(GenerationRequest::new(start, 100.1, RouteShape::Loop, None, false).is_err());
    }

    #[test]
    fn rejects_negative_elevation_target() {
        let start = GeoPoint::new(0.0, 0.0).unwrap();
        assert!(
            GenerationRequest::new(start, 10.0, RouteShape::Loop, Some(-5.0), false).is_err()
        );
    }

    #[test]
    fn accepts_valid_request() {
        let start = GeoPoint::new(47.0, 8.0).unwrap();
        assert!(
            GenerationRequest::new(start, 10.0, RouteShape::Loop, Some(800.0), false).is_ok()
        );
    }
}
