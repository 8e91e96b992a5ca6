//! Waypoint -> polyline request against a Valhalla-style routing service,
//! with trail-biased pedestrian costing and through-waypoint hints.

use crate::constants::*;
use crate::error::{EngineError, Result};
use crate::models::GeoPoint;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

/// Seam the fan generator iterates against, so its refinement loop is
/// testable with a fake router implementation.
#[async_trait]
pub trait RoutingService: Send + Sync {
    /// Routes through `waypoints` in order, returning the concatenated
    /// polyline and the total distance in km.
    async fn route(&self, waypoints: &[GeoPoint]) -> Result<(Vec<GeoPoint>, f64)>;
}

pub struct RoutingClient {
    http: reqwest::Client,
    base_url: String,
}

impl RoutingClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(ROUTER_TIMEOUT)
            .build()
            .expect("reqwest client build");
        RoutingClient {
            http,
            base_url: base_url.into(),
        }
    }

    fn build_body(&self, waypoints: &[GeoPoint]) -> serde_json::Value {
        let last_idx = waypoints.len() - 1;
        let locations: Vec<_> = waypoints
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let mut loc = json!({
                    "lat": p.lat,
                    "lon": p.lng,
                    "radius": ROUTER_SEARCH_RADIUS_M,
                });
                if i != 0 && i != last_idx {
                    loc["type"] = json!("through");
                }
                loc
            })
            .collect();

        json!({
            "locations": locations,
            "costing": "pedestrian",
            "costing_options": {
                "pedestrian": {
                    "use_roads": ROUTER_USE_ROADS_WEIGHT,
                    "max_hiking_difficulty": ROUTER_MAX_HIKING_DIFFICULTY,
                    "sidewalk_factor": 1.5,
                }
            },
            "directions_options": { "units": "kilometers" },
        })
    }
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    trip: Trip,
}

#[derive(Debug, Deserialize)]
struct Trip {
    legs: Vec<Leg>,
}

#[derive(Debug, Deserialize)]
struct Leg {
    summary: Summary,
    shape: String,
}

#[derive(Debug, Deserialize)]
struct Summary {
    length: f64,
}

#[async_trait]
impl RoutingService for RoutingClient {
    async fn route(&self, waypoints: &[GeoPoint]) -> Result<(Vec<GeoPoint>, f64)> {
        if waypoints.len() < 2 {
            return Err(EngineError::InvalidInput(
                "routing requires at least 2 waypoints".to_string(),
            ));
        }

        let body = self.build_body(waypoints);
        tracing::debug!(waypoints = waypoints.len(), "calling routing service");

        let resp = self
            .http
            .post(format!("{}/route", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| EngineError::UpstreamRouterError(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(EngineError::UpstreamRouterError(format!(
                "router returned status {}",
                resp.status()
            )));
        }

        let parsed: RouteResponse = resp
            .json()
            .await
            .map_err(|e| EngineError::UpstreamRouterError(e.to_string()))?;

        let mut total_km = 0.0;
        let mut polyline: Vec<GeoPoint> = Vec::new();

        for leg in parsed.trip.legs {
            total_km += leg.summary.length;
            let decoded = polyline::decode_polyline(&leg.shape, ROUTER_POLYLINE_PRECISION)
                .map_err(|e| EngineError::UpstreamRouterError(format!("bad polyline: {e}")))?;

            let leg_points: Vec<GeoPoint> = decoded
                .coords()
                .map(|c| GeoPoint::new(c.y, c.x))
                .collect::<std::result::Result<Vec<_>, _>>()?;

            // Drop the duplicated junction vertex shared with the previous leg.
            if !polyline.is_empty() && !leg_points.is_empty() {
                polyline.extend_from_slice(&leg_points[1..]);
            } else {
                polyline.extend_from_slice(&leg_points);
            }
        }

        Ok((polyline, total_km))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_body_flags_intermediate_waypoints_as_through() {
        let client = RoutingClient::new("http://localhost");
        let waypoints = vec![
            GeoPoint::new(0.0, 0.0).unwrap(),
            GeoPoint::new(1.0, 0.0).unwrap(),
            GeoPoint::new(0.0, 0.0).unwrap(),
        ];
        let body = client.build_body(&waypoints);
        let locations = body["locations"].as_array().unwrap();
        assert_eq!(locations[0].get("type"), None);
        assert_eq!(locations[1]["type"], json!("through"));
        assert_eq!(locations[2].get("type"), None);
    }
}
