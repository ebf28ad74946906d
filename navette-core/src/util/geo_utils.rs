use geo::{Distance, Haversine};

use crate::model::{LatLng, Point};

/// great-circle distance between two coordinates in kilometers.
pub fn haversine_km(a: &LatLng, b: &LatLng) -> f64 {
    let origin: geo::Point<f64> = (*a).into();
    let destination: geo::Point<f64> = (*b).into();
    Haversine.distance(origin, destination) / 1000.0
}

/// keeps the points within `radius_km` of `center`, in their original order.
/// each kept point gets its distance to the center filled in when the
/// service did not provide one.
///
/// # Arguments
///
/// * `points` - pickup points, as returned by the routing service
/// * `center` - usually the depot
/// * `radius_km` - service area radius
///
/// # Returns
///
/// * the points inside the service area
pub fn within_radius(points: &[Point], center: &LatLng, radius_km: f64) -> Vec<Point> {
    points
        .iter()
        .filter_map(|p| {
            let distance = haversine_km(center, &p.lat_lng());
            if distance <= radius_km {
                let mut kept = p.clone();
                kept.distance_to_depot_km.get_or_insert(distance);
                Some(kept)
            } else {
                None
            }
        })
        .collect()
}
