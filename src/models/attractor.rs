use super::GeoPoint;

/// A GeoPoint sampled along a known OSM trail relation. A bag, duplicates
/// allowed: density matters more than identity.
#[derive(Debug, Clone, Copy)]
pub struct TrailAttractor(pub GeoPoint);

impl TrailAttractor {
    pub fn point(&self) -> GeoPoint {
        self.0
    }
}

impl From<GeoPoint> for TrailAttractor {
    fn from(point: GeoPoint) -> Self {
        TrailAttractor(point)
    }
}
