mod dem_client;
mod overpass_client;
mod routing_client;

pub use dem_client::{DemClient, ElevationService};
pub use overpass_client::{OverpassClient, TrailAttractorService};
pub use routing_client::{RoutingClient, RoutingService};
