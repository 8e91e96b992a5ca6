// Centralizes magic numbers referenced across the engine instead of
// scattering them through the modules that use them.

use std::time::Duration;

/// Mean earth radius used throughout the geodesy primitives (km).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// --- Elevation profile builder ---

/// Maximum number of samples in a downsampled elevation profile.
pub const MAX_PROFILE_POINTS: usize = 200;
/// Maximum number of points per DEM batch request.
pub const DEM_BATCH_SIZE: usize = 100;

// --- Routing-service client ---

/// Default per-waypoint search radius (meters).
pub const ROUTER_SEARCH_RADIUS_M: f64 = 500.0;
/// Road-use weight for the trail-biased pedestrian costing profile.
pub const ROUTER_USE_ROADS_WEIGHT: f64 = 0.1;
/// Maximum hiking difficulty admitted (Valhalla-style scale, 3 = hard alpine).
pub const ROUTER_MAX_HIKING_DIFFICULTY: u8 = 3;
/// Polyline precision used by the routing service's encoded geometry.
pub const ROUTER_POLYLINE_PRECISION: u32 = 6;

// --- Trail-attractor sampler ---

/// Route-relation tags accepted from Overpass; anything else is dropped.
pub const ALLOWED_ROUTE_TYPES: &[&str] = &["hiking", "foot", "running", "bicycle", "mtb"];
/// Fallback route types used when the caller's allow-list filters to nothing.
pub const DEFAULT_ROUTE_TYPES: &[&str] = &["hiking", "foot"];
/// Default spacing (km) between sampled attractor points along a trail.
pub const DEFAULT_ATTRACTOR_INTERVAL_KM: f64 = 0.2;
pub const OVERPASS_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

// --- Bearing scout ---

/// Number of evenly spaced compass bearings the scout evaluates.
pub const N_SCOUT: usize = 12;
/// Half-angle (degrees) of the cone used for trail-density scoring.
pub const SCOUT_CONE_HALF_ANGLE_DEG: f64 = 15.0;
/// Multiplier applied to scout radius for the trail-density distance cutoff.
pub const SCOUT_TRAIL_DISTANCE_FACTOR: f64 = 1.5;
/// Weight of the elevation term in the combined bearing score.
pub const SCOUT_ELEV_WEIGHT: f64 = 0.6;
/// Weight of the trail-density term in the combined bearing score.
pub const SCOUT_TRAIL_WEIGHT: f64 = 0.4;
/// Divisor applied to raw attractor counts before clamping to [0, 1].
pub const SCOUT_TRAIL_COUNT_DIVISOR: f64 = 10.0;
/// Out-and-back scout radius as a fraction of target distance.
pub const SCOUT_OAB_RADIUS_FACTOR: f64 = 0.35;

// --- Waypoint Fan generator ---

/// Number of waypoints placed on the loop polygon.
pub const FAN_LOOP_WAYPOINTS: usize = 6;
/// Maximum refinement iterations before returning the best-scoring attempt.
pub const FAN_MAX_ITER: usize = 6;
/// Acceptable relative distance error to stop refining.
pub const FAN_DISTANCE_TOLERANCE: f64 = 0.15;
/// Acceptable relative elevation-gain error to stop refining.
pub const FAN_ELEVATION_TOLERANCE: f64 = 0.30;
/// Clamp bounds on the elongation factor while it's being adjusted.
pub const FAN_ELONGATION_MIN: f64 = 1.0;
pub const FAN_ELONGATION_MAX: f64 = 5.0;
/// Cap on the initial elongation estimate derived from the elevation target.
pub const FAN_INITIAL_ELONGATION_CAP: f64 = 3.0;
/// Attractor-snapping interpolation strength for loop waypoints.
pub const FAN_LOOP_SNAP_STRENGTH: f64 = 0.4;
/// Attractor-snapping interpolation strength for the out-and-back turnaround.
pub const FAN_OAB_SNAP_STRENGTH: f64 = 0.5;
/// Attractor search radius (km) for the out-and-back turnaround snap.
pub const FAN_OAB_SNAP_RADIUS_KM: f64 = 2.0;
/// Straight-line factor applied to the out-and-back half-distance when an
/// elevation target is set (mountain trails wind more).
pub const FAN_OAB_STRAIGHT_FACTOR_ELEVATION: f64 = 0.5;
/// Straight-line factor applied otherwise.
pub const FAN_OAB_STRAIGHT_FACTOR_DEFAULT: f64 = 0.7;

// --- Spur remover ---

/// Polylines shorter than this are returned unchanged.
pub const SPUR_MIN_POLYLINE_LEN: usize = 20;
/// Distance (meters) below which two vertices are considered the same spot.
pub const SPUR_THRESHOLD_M: f64 = 30.0;
/// Minimum number of vertices a cut span must cover to count as a spur.
pub const SPUR_MIN_SPAN: usize = 6;

// --- Per-client timeouts ---

pub const OVERPASS_TIMEOUT: Duration = Duration::from_secs(60);
pub const ROUTER_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEM_TIMEOUT: Duration = Duration::from_secs(15);
pub const AUX_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

// --- Engine configuration defaults ---

pub const DEFAULT_ROUTER_BASE_URL: &str = "http://localhost:8002";
pub const DEFAULT_DEM_BASE_URL: &str = "https://api.opentopodata.org";
