//! Fetches OSM route relations from a single Overpass endpoint and samples
//! points along the assembled geometry: index elements by kind, merge
//! member-way coordinate sequences greedily into lines, then walk each line
//! emitting a point every `interval_km` of accumulated length.

use crate::constants::*;
use crate::error::{EngineError, Result};
use crate::geo::haversine;
use crate::models::{GeoPoint, TrailAttractor};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

#[async_trait]
pub trait TrailAttractorService: Send + Sync {
    /// Fetches OSM route relations around `center` within `radius_km`
    /// matching `types`, and returns the sampled attractor bag. A non-fatal
    /// upstream failure (timeout, rate-limit, other non-200) is surfaced as
    /// an `Err`; callers that tolerate a degraded path should catch it and
    /// proceed with an empty bag.
    async fn trail_attractors(
        &self,
        center: &GeoPoint,
        radius_km: f64,
        types: &[&str],
    ) -> Result<Vec<TrailAttractor>>;
}

pub struct OverpassClient {
    http: reqwest::Client,
    endpoint: String,
}

impl OverpassClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(OVERPASS_TIMEOUT)
            .build()
            .expect("reqwest client build");
        OverpassClient {
            http,
            endpoint: endpoint.into(),
        }
    }

    fn build_query(center: &GeoPoint, radius_m: i64, types: &[&str]) -> String {
        let pattern = types.join("|");
        format!(
            "[out:json][timeout:55];relation[type=route][route~\"^({pattern})$\"](around:{radius_m},{},{});out body;>;out skel qt;",
            center.lat, center.lng
        )
    }
}

#[async_trait]
impl TrailAttractorService for OverpassClient {
    async fn trail_attractors(
        &self,
        center: &GeoPoint,
        radius_km: f64,
        types: &[&str],
    ) -> Result<Vec<TrailAttractor>> {
        let filtered: Vec<&str> = types
            .iter()
            .copied()
            .filter(|t| ALLOWED_ROUTE_TYPES.contains(t))
            .collect();
        let effective_types: Vec<&str> = if filtered.is_empty() {
            DEFAULT_ROUTE_TYPES.to_vec()
        } else {
            filtered
        };

        let radius_m = (radius_km * 1000.0).round() as i64;
        let query = Self::build_query(center, radius_m, &effective_types);

        tracing::debug!(radius_m, types = ?effective_types, "querying overpass");

        let resp = self
            .http
            .post(&self.endpoint)
            .form(&[("data", query.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EngineError::UpstreamOverpassError("Overpass API timeout".to_string())
                } else {
                    EngineError::UpstreamOverpassError(e.to_string())
                }
            })?;

        match resp.status().as_u16() {
            200 => {}
            429 => {
                return Err(EngineError::UpstreamOverpassError(
                    "rate limited by Overpass API".to_string(),
                ))
            }
            other => {
                return Err(EngineError::UpstreamOverpassError(format!(
                    "Overpass API returned status {other}"
                )))
            }
        }

        let body: OverpassResponse = resp
            .json()
            .await
            .map_err(|e| EngineError::UpstreamOverpassError(e.to_string()))?;

        Ok(assemble_and_sample(&body, DEFAULT_ATTRACTOR_INTERVAL_KM))
    }
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "lowercase")]
enum OverpassElement {
    Node {
        id: i64,
        lat: f64,
        lon: f64,
    },
    Way {
        id: i64,
        #[serde(default)]
        nodes: Vec<i64>,
        #[serde(default)]
        geometry: Vec<OverpassLatLon>,
    },
    Relation {
        id: i64,
        #[serde(default)]
        members: Vec<OverpassMember>,
    },
}

#[derive(Debug, Deserialize)]
struct OverpassLatLon {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OverpassMember {
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "ref")]
    reference: i64,
}

/// A resolved chain of coordinates, either a single continuous run
/// (LineString) or several disjoint ones (MultiLineString).
type AssembledGeometry = Vec<Vec<GeoPoint>>;

fn assemble_and_sample(body: &OverpassResponse, interval_km: f64) -> Vec<TrailAttractor> {
    let mut nodes: HashMap<i64, GeoPoint> = HashMap::new();
    let mut ways: HashMap<i64, Vec<GeoPoint>> = HashMap::new();
    let mut relations: Vec<&Vec<OverpassMember>> = Vec::new();

    for el in &body.elements {
        match el {
            OverpassElement::Node { id, lat, lon } => {
                if let Ok(p) = GeoPoint::new(*lat, *lon) {
                    nodes.insert(*id, p);
                }
            }
            OverpassElement::Way { .. } => {}
            OverpassElement::Relation { members, .. } => relations.push(members),
        }
    }

    for el in &body.elements {
        if let OverpassElement::Way { id, nodes: node_ids, geometry } = el {
            let coords: Vec<GeoPoint> = if !geometry.is_empty() {
                geometry
                    .iter()
                    .filter_map(|g| GeoPoint::new(g.lat, g.lon).ok())
                    .collect()
            } else {
                node_ids.iter().filter_map(|n| nodes.get(n).copied()).collect()
            };
            ways.insert(*id, coords);
        }
    }

    let mut attractors = Vec::new();
    for members in relations {
        let way_sequences: Vec<Vec<GeoPoint>> = members
            .iter()
            .filter(|m| m.kind == "way")
            .filter_map(|m| ways.get(&m.reference).cloned())
            .filter(|seq| !seq.is_empty())
            .collect();

        for line in assemble_geometry(&way_sequences) {
            attractors.extend(sample_points_from_line(&line, interval_km));
        }
    }

    attractors
}

/// Greedy merge of way coordinate sequences: if the
/// tail of the assembled line equals the head of the next sequence,
/// concatenate; if it equals the reversed head, concatenate reversed;
/// otherwise start a new line.
fn assemble_geometry(sequences: &[Vec<GeoPoint>]) -> AssembledGeometry {
    let mut lines: AssembledGeometry = Vec::new();

    for seq in sequences {
        if seq.is_empty() {
            continue;
        }
        match lines.last_mut() {
            Some(current) if points_match(current.last(), seq.first()) => {
                current.extend_from_slice(&seq[1..]);
            }
            Some(current) if points_match(current.last(), seq.last()) => {
                current.extend(seq.iter().rev().skip(1).copied());
            }
            _ => lines.push(seq.clone()),
        }
    }

    lines
}

fn points_match(a: Option<&GeoPoint>, b: Option<&GeoPoint>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => (a.lat - b.lat).abs() < 1e-9 && (a.lng - b.lng).abs() < 1e-9,
        _ => false,
    }
}

/// Walks `line` and emits a sampled point every `interval_km` of
/// accumulated great-circle length, always starting with the first vertex.
fn sample_points_from_line(line: &[GeoPoint], interval_km: f64) -> Vec<TrailAttractor> {
    if line.is_empty() {
        return Vec::new();
    }

    let mut out = vec![TrailAttractor::from(line[0])];
    let mut accumulated = 0.0;
    let mut next_threshold = interval_km;

    for pair in line.windows(2) {
        let seg_len = haversine(&pair[0], &pair[1]);
        if seg_len <= 0.0 {
            continue;
        }
        let mut covered = 0.0;
        while accumulated + (seg_len - covered) >= next_threshold {
            let remaining = next_threshold - accumulated;
            let fraction = (covered + remaining) / seg_len;
            let lat = pair[0].lat + (pair[1].lat - pair[0].lat) * fraction;
            let lng = pair[0].lng + (pair[1].lng - pair[0].lng) * fraction;
            if let Ok(p) = GeoPoint::new(lat, lng) {
                out.push(TrailAttractor::from(p));
            }
            covered += remaining;
            accumulated = next_threshold;
            next_threshold += interval_km;
        }
        accumulated += seg_len - covered;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).unwrap()
    }

    #[test]
    fn assemble_concatenates_matching_tail_head() {
        let a = vec![p(0.0, 0.0), p(0.0, 1.0)];
        let b = vec![p(0.0, 1.0), p(0.0, 2.0)];
        let lines = assemble_geometry(&[a, b]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 3);
    }

    #[test]
    fn assemble_concatenates_reversed_tail() {
        let a = vec![p(0.0, 0.0), p(0.0, 1.0)];
        let b = vec![p(0.0, 2.0), p(0.0, 1.0)];
        let lines = assemble_geometry(&[a, b]);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 3);
        assert!((lines[0][2].lng - 2.0).abs() < 1e-9);
    }

    #[test]
    fn assemble_starts_new_line_when_disjoint() {
        let a = vec![p(0.0, 0.0), p(0.0, 1.0)];
        let b = vec![p(5.0, 5.0), p(5.0, 6.0)];
        let lines = assemble_geometry(&[a, b]);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn sample_points_starts_with_first_vertex() {
        let line = vec![p(0.0, 0.0), p(0.0, 1.0)];
        let sampled = sample_points_from_line(&line, 100.0);
        assert_eq!(sampled[0].point().lat, 0.0);
        assert_eq!(sampled[0].point().lng, 0.0);
    }

    #[test]
    fn sample_points_respects_interval() {
        let line = vec![p(0.0, 0.0), p(0.0, 1.0)];
        let full_len = haversine(&line[0], &line[1]);
        let sampled = sample_points_from_line(&line, full_len / 4.0);
        // first vertex + 3 interior samples at minimum
        assert!(sampled.len() >= 4);
    }
}
