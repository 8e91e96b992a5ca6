mod attractor;
mod elevation;
mod geo_point;
mod request;
mod route;

pub use attractor::TrailAttractor;
pub use elevation::{ElevationProfile, ElevationSample};
pub use geo_point::GeoPoint;
pub use request::{GenerationRequest, RouteShape};
pub use route::{GeneratedRoute, RouteFeature};
