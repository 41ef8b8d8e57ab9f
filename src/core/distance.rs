use crate::models::{BoundingBox, Coordinate};

/// Earth's radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance in kilometers between two coordinates
#[inline]
pub fn distance_between(from: Coordinate, to: Coordinate) -> f64 {
    haversine_distance(from.latitude, from.longitude, to.latitude, to.longitude)
}

/// Round a distance to one decimal place for display
#[inline]
pub fn round_km(distance_km: f64) -> f64 {
    (distance_km * 10.0).round() / 10.0
}

/// Calculate a bounding box around a center point
///
/// Cheaper than Haversine, used to pre-filter before the exact distance.
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude)
///
/// Latitudes are clamped to ±90. A box that crosses the antimeridian keeps its
/// wrapped longitudes, so `min_lon > max_lon`. A box that reaches a pole or
/// spans the globe covers every longitude.
pub fn calculate_bounding_box(center: Coordinate, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / 111.0;
    let min_lat = (center.latitude - lat_delta).max(-90.0);
    let max_lat = (center.latitude + lat_delta).min(90.0);

    let lon_delta = radius_km / (111.0 * center.latitude.to_radians().cos().abs());
    if min_lat <= -90.0 || max_lat >= 90.0 || !lon_delta.is_finite() || lon_delta >= 180.0 {
        return BoundingBox { min_lat, max_lat, min_lon: -180.0, max_lon: 180.0 };
    }

    BoundingBox {
        min_lat,
        max_lat,
        min_lon: wrap_longitude(center.longitude - lon_delta),
        max_lon: wrap_longitude(center.longitude + lon_delta),
    }
}

/// Bring a longitude back into [-180, 180]
#[inline]
fn wrap_longitude(lon: f64) -> f64 {
    if lon < -180.0 {
        lon + 360.0
    } else if lon > 180.0 {
        lon - 360.0
    } else {
        lon
    }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(point: Coordinate, bbox: &BoundingBox) -> bool {
    let within_lat = point.latitude >= bbox.min_lat && point.latitude <= bbox.max_lat;
    let within_lon = if bbox.min_lon <= bbox.max_lon {
        point.longitude >= bbox.min_lon && point.longitude <= bbox.max_lon
    } else {
        point.longitude >= bbox.min_lon || point.longitude <= bbox.max_lon
    };

    within_lat && within_lon
}
