//! Recomputes distance over the cleaned polyline, builds the elevation
//! profile, and emits the final `GeneratedRoute`.

use crate::engine::elevation_profile;
use crate::geo::path_length_km;
use crate::models::GeoPoint;
use crate::models::GeneratedRoute;
use crate::services::ElevationService;

pub async fn assemble(cleaned_polyline: Vec<GeoPoint>, dem: &dyn ElevationService) -> GeneratedRoute {
    let distance_km = path_length_km(&cleaned_polyline);
    let profile = elevation_profile::profile(&cleaned_polyline, dem).await;
    let (elevation_gain_m, elevation_loss_m) = profile.gain_loss();

    GeneratedRoute {
        polyline: cleaned_polyline,
        distance_km,
        elevation_gain_m,
        elevation_loss_m,
        profile,
    }
}
