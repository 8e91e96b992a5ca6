//! Batched elevation point-query client, modeled on the OpenTopoData
//! `srtm30m` endpoint's request/response shape. A failed batch degrades to
//! null elevations rather than failing the whole profile.

use crate::constants::*;
use crate::error::Result;
use crate::models::GeoPoint;
use async_trait::async_trait;
use serde::Deserialize;

/// Seam for the elevation profile builder, so a batch-failure path is
/// testable without a real DEM endpoint.
#[async_trait]
pub trait ElevationService: Send + Sync {
    /// Queries elevations for up to `DEM_BATCH_SIZE` points in one call.
    /// A failed batch (network or non-200) returns a vector of `None` the
    /// same length as `points` rather than an error — the caller treats a
    /// batch failure as a degraded path, not a fatal one.
    async fn elevations(&self, points: &[GeoPoint]) -> Vec<Option<f64>>;
}

pub struct DemClient {
    http: reqwest::Client,
    base_url: String,
}

impl DemClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(DEM_TIMEOUT)
            .build()
            .expect("reqwest client build");
        DemClient {
            http,
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DemResponse {
    results: Vec<DemResult>,
}

#[derive(Debug, Deserialize)]
struct DemResult {
    elevation: Option<f64>,
}

#[async_trait]
impl ElevationService for DemClient {
    async fn elevations(&self, points: &[GeoPoint]) -> Vec<Option<f64>> {
        if points.is_empty() {
            return Vec::new();
        }

        let locations = points
            .iter()
            .map(|p| format!("{},{}", p.lat, p.lng))
            .collect::<Vec<_>>()
            .join("|");

        let url = format!("{}/v1/srtm30m", self.base_url);
        let send = self.http.get(&url).query(&[("locations", locations)]).send();

        match send.await {
            Ok(resp) if resp.status().is_success() => match resp.json::<DemResponse>().await {
                Ok(parsed) if parsed.results.len() == points.len() => {
                    parsed.results.into_iter().map(|r| r.elevation).collect()
                }
                Ok(_) => {
                    tracing::warn!("DEM batch returned a mismatched result count");
                    vec![None; points.len()]
                }
                Err(e) => {
                    tracing::warn!(error = %e, "DEM batch response parse failed");
                    vec![None; points.len()]
                }
            },
            Ok(resp) => {
                tracing::warn!(status = %resp.status(), "DEM batch returned non-200");
                vec![None; points.len()]
            }
            Err(e) => {
                tracing::warn!(error = %e, "DEM batch request failed");
                vec![None; points.len()]
            }
        }
    }
}
