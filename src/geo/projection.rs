//! Spherical Web Mercator projection
//!
//! Maps latitude/longitude onto a square world of `WORLD_SIZE` units with
//! the origin at the north-west corner. Distances in this space are uniform
//! in screen-proportional terms, which is what the cluster grid needs.

use crate::constants::projection::{MAX_LATITUDE, WORLD_SIZE};
use crate::geo::{Coordinates, MapPoint};
use std::f64::consts::PI;

/// Project a coordinate onto the map plane
///
/// Latitudes beyond the Mercator limit are clamped to it.
pub fn project(coords: Coordinates) -> MapPoint {
    let lat = coords.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let sin_lat = lat.to_radians().sin();

    let x = (coords.lng + 180.0) / 360.0 * WORLD_SIZE;
    let y = (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * PI)) * WORLD_SIZE;

    MapPoint::new(x, y)
}

/// Inverse of [`project`]
pub fn unproject(point: MapPoint) -> Coordinates {
    let lng = point.x / WORLD_SIZE * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * point.y / WORLD_SIZE);
    let lat = n.sinh().atan().to_degrees();

    Coordinates::new(lat, lng)
}
