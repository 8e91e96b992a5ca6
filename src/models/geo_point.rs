use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees, WGS84.
/// Immutable once constructed; `new` is the only way to build one so every
/// `GeoPoint` in the system is guaranteed in-range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Result<Self, EngineError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(EngineError::InvalidInput(format!(
                "latitude {lat} out of range [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(EngineError::InvalidInput(format!(
                "longitude {lng} out of range [-180, 180]"
            )));
        }
        Ok(GeoPoint { lat, lng })
    }

    /// [lng, lat] ordering, matching GeoJSON coordinate convention.
    pub fn as_geojson_pair(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}
