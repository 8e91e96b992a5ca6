use super::{ElevationProfile, GeoPoint};
use geojson::{Feature, Geometry, Value};
use serde_json::json;

/// The engine's output: a cleaned polyline with recomputed distance,
/// elevation gain/loss, and its elevation profile.
#[derive(Debug, Clone)]
pub struct GeneratedRoute {
    pub polyline: Vec<GeoPoint>,
    pub distance_km: f64,
    pub elevation_gain_m: f64,
    pub elevation_loss_m: f64,
    pub profile: ElevationProfile,
}

/// GeoJSON `Feature` wrapping a `GeneratedRoute`'s polyline as a
/// `LineString`, with the elevation profile attached as a sibling field
/// rather than nested in `properties`.
pub struct RouteFeature {
    pub feature: Feature,
    pub elevation_profile: ElevationProfile,
}

impl From<GeneratedRoute> for RouteFeature {
    fn from(route: GeneratedRoute) -> Self {
        let coordinates: Vec<Vec<f64>> = route
            .polyline
            .iter()
            .map(|p| p.as_geojson_pair().to_vec())
            .collect();

        let geometry = Geometry::new(Value::LineString(coordinates));
        let properties = json!({
            "distance_km": round2(route.distance_km),
            "elevation_gain_m": route.elevation_gain_m,
            "elevation_loss_m": route.elevation_loss_m,
        });

        let feature = Feature {
            bbox: None,
            geometry: Some(geometry),
            id: None,
            properties: properties.as_object().cloned(),
            foreign_members: None,
        };

        RouteFeature {
            feature,
            elevation_profile: route.profile,
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
