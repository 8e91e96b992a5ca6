//! The Route Generation Engine: the crate's single stateful facade holding
//! the three service clients and exposing `generate()`.

mod bearing_scout;
pub mod elevation_profile;
mod result_assembler;
mod spur_remover;
mod waypoint_fan;

use crate::config::EngineConfig;
use crate::constants::*;
use crate::error::Result;
use crate::models::{GeneratedRoute, GenerationRequest, RouteShape};
use crate::services::{DemClient, ElevationService, OverpassClient, RoutingClient, RoutingService, TrailAttractorService};
use rand::rngs::ThreadRng;

pub use bearing_scout::{scout, trail_bearing, ScoutResult};
pub use waypoint_fan::{generate_loop, generate_out_and_back, snap_to_attractor, FanIteration};

/// Holds the three upstream service clients; stateless between requests.
pub struct RouteGenerationEngine {
    router: Box<dyn RoutingService>,
    dem: Box<dyn ElevationService>,
    overpass: Box<dyn TrailAttractorService>,
}

impl RouteGenerationEngine {
    pub fn new(config: &EngineConfig) -> Self {
        RouteGenerationEngine {
            router: Box::new(RoutingClient::new(config.router_base_url.clone())),
            dem: Box::new(DemClient::new(config.dem_base_url.clone())),
            overpass: Box::new(OverpassClient::new(config.overpass_url.clone())),
        }
    }

    /// Constructs an engine from explicit service implementations, the seam
    /// tests use to inject fakes.
    pub fn from_services(
        router: Box<dyn RoutingService>,
        dem: Box<dyn ElevationService>,
        overpass: Box<dyn TrailAttractorService>,
    ) -> Self {
        RouteGenerationEngine { router, dem, overpass }
    }

    /// `generate(start, distance_km, shape, elevation_target?, prefer_trails?)
    /// -> GeneratedRoute`. Scout -> fan iterations -> spur removal (loops
    /// only; an out-and-back's return leg is an intentional retrace, not a
    /// detour) -> profile -> assemble, strictly serialized.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedRoute> {
        tracing::info!(
            distance_km = request.distance_km,
            shape = ?request.shape,
            "generating route"
        );

        let attractors = if request.prefer_trails {
            match self
                .overpass
                .trail_attractors(&request.start, request.distance_km / 2.0, ALLOWED_ROUTE_TYPES)
                .await
            {
                Ok(bag) => bag,
                Err(e) => {
                    tracing::warn!(error = %e, "overpass lookup failed, proceeding without attractors");
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let uphill_bearing = if request.wants_elevation_shaping() {
            let scout_radius = match request.shape {
                RouteShape::Loop => {
                    request.distance_km / (2.0 * std::f64::consts::PI)
                }
                RouteShape::OutAndBack => request.distance_km * SCOUT_OAB_RADIUS_FACTOR,
            };
            let mut rng = rand::thread_rng();
            let result = scout(&request.start, scout_radius, &attractors, self.dem.as_ref(), &mut rng).await;
            Some(result.bearing_deg)
        } else if request.prefer_trails {
            trail_bearing(&request.start, &attractors)
        } else {
            None
        };

        let mut rng: ThreadRng = rand::thread_rng();
        let iteration = match request.shape {
            RouteShape::Loop => {
                generate_loop(
                    &request.start,
                    request.distance_km,
                    request.elevation_target_m,
                    uphill_bearing,
                    &attractors,
                    self.router.as_ref(),
                    self.dem.as_ref(),
                    &mut rng,
                )
                .await?
            }
            RouteShape::OutAndBack => {
                generate_out_and_back(
                    &request.start,
                    request.distance_km,
                    request.elevation_target_m,
                    uphill_bearing,
                    &attractors,
                    self.router.as_ref(),
                    self.dem.as_ref(),
                    &mut rng,
                )
                .await?
            }
        };

        let cleaned = if request.shape == RouteShape::Loop {
            spur_remover::remove_spurs(&iteration.polyline)
        } else {
            iteration.polyline
        };
        let route = result_assembler::assemble(cleaned, self.dem.as_ref()).await;

        tracing::info!(
            distance_km = route.distance_km,
            elevation_gain_m = route.elevation_gain_m,
            "route generated"
        );

        Ok(route)
    }
}
