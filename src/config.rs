use crate::constants::*;
use std::env;
use std::time::Duration;

/// Read-only service endpoints and per-client timeouts, constructed once at
/// startup and passed by reference into `RouteGenerationEngine::new`.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub router_base_url: String,
    pub dem_base_url: String,
    pub overpass_url: String,
    pub overpass_timeout: Duration,
    pub router_timeout: Duration,
    pub dem_timeout: Duration,
    pub probe_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            router_base_url: DEFAULT_ROUTER_BASE_URL.to_string(),
            dem_base_url: DEFAULT_DEM_BASE_URL.to_string(),
            overpass_url: OVERPASS_ENDPOINT.to_string(),
            overpass_timeout: OVERPASS_TIMEOUT,
            router_timeout: ROUTER_TIMEOUT,
            dem_timeout: DEM_TIMEOUT,
            probe_timeout: AUX_PROBE_TIMEOUT,
        }
    }
}

impl EngineConfig {
    /// Reads `ROUTER_BASE_URL` / `DEM_BASE_URL` / `OVERPASS_URL` from the
    /// environment, falling back to the documented defaults when unset.
    /// No host/port and no process bootstrap here — that belongs to the
    /// HTTP layer wrapping this engine.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        EngineConfig {
            router_base_url: env::var("ROUTER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_ROUTER_BASE_URL.to_string()),
            dem_base_url: env::var("DEM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_DEM_BASE_URL.to_string()),
            overpass_url: env::var("OVERPASS_URL").unwrap_or_else(|_| OVERPASS_ENDPOINT.to_string()),
            ..EngineConfig::default()
        }
    }
}
