use async_trait::async_trait;
use trailfan::error::{EngineError, Result};
use trailfan::geo::path_length_km;
use trailfan::models::{GeoPoint, TrailAttractor};
use trailfan::services::{ElevationService, RoutingService, TrailAttractorService};

/// Router fake that treats the given waypoints as the routed path itself,
/// so `actual_km` is exactly the geometric perimeter the fan generator
/// constructed. Stubs the router directly rather than pulling in a
/// mock-server crate.
pub struct GeometricRouter;

#[async_trait]
impl RoutingService for GeometricRouter {
    async fn route(&self, waypoints: &[GeoPoint]) -> Result<(Vec<GeoPoint>, f64)> {
        Ok((waypoints.to_vec(), path_length_km(waypoints)))
    }
}

/// Router fake returning a fixed polyline and distance regardless of input,
/// for exercising spur removal and failure paths end to end.
pub struct FixedRouter {
    pub polyline: Vec<GeoPoint>,
    pub distance_km: f64,
}

#[async_trait]
impl RoutingService for FixedRouter {
    async fn route(&self, _waypoints: &[GeoPoint]) -> Result<(Vec<GeoPoint>, f64)> {
        Ok((self.polyline.clone(), self.distance_km))
    }
}

pub struct FailingRouter {
    pub status: u16,
}

#[async_trait]
impl RoutingService for FailingRouter {
    async fn route(&self, _waypoints: &[GeoPoint]) -> Result<(Vec<GeoPoint>, f64)> {
        Err(EngineError::UpstreamRouterError(format!(
            "router returned status {}",
            self.status
        )))
    }
}

/// DEM fake with elevation proportional to latitude, simulating "north is
/// uphill" (S2).
pub struct NorthUphillDem {
    pub scale: f64,
}

#[async_trait]
impl ElevationService for NorthUphillDem {
    async fn elevations(&self, points: &[GeoPoint]) -> Vec<Option<f64>> {
        points.iter().map(|p| Some(p.lat * self.scale)).collect()
    }
}

pub struct FlatDem;

#[async_trait]
impl ElevationService for FlatDem {
    async fn elevations(&self, points: &[GeoPoint]) -> Vec<Option<f64>> {
        vec![Some(0.0); points.len()]
    }
}

/// DEM fake that fails every other batch, for S6.
pub struct FlakyDem {
    pub call_count: std::sync::atomic::AtomicUsize,
}

impl FlakyDem {
    pub fn new() -> Self {
        FlakyDem {
            call_count: std::sync::atomic::AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ElevationService for FlakyDem {
    async fn elevations(&self, points: &[GeoPoint]) -> Vec<Option<f64>> {
        let call = self.call_count.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if call % 2 == 0 {
            vec![Some(200.0); points.len()]
        } else {
            vec![None; points.len()]
        }
    }
}

pub struct EmptyOverpass;

#[async_trait]
impl TrailAttractorService for EmptyOverpass {
    async fn trail_attractors(
        &self,
        _center: &GeoPoint,
        _radius_km: f64,
        _types: &[&str],
    ) -> Result<Vec<TrailAttractor>> {
        Ok(Vec::new())
    }
}

pub struct FailingOverpass;

#[async_trait]
impl TrailAttractorService for FailingOverpass {
    async fn trail_attractors(
        &self,
        _center: &GeoPoint,
        _radius_km: f64,
        _types: &[&str],
    ) -> Result<Vec<TrailAttractor>> {
        Err(EngineError::UpstreamOverpassError("Overpass API timeout".to_string()))
    }
}
