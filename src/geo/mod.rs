//! Geographic and projected geometry
//!
//! This module handles:
//! - Latitude/longitude coordinates for input and output
//! - Projected map points used by every clustering computation
//! - Axis-aligned map rectangles (viewports and cluster cells)

pub mod projection;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// Project onto the planar map
    pub fn to_map_point(self) -> MapPoint {
        projection::project(self)
    }
}

/// A point in projected map units
///
/// x grows eastward, y grows southward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

impl MapPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert back to latitude/longitude
    pub fn to_coordinates(self) -> Coordinates {
        projection::unproject(self)
    }
}

impl From<Coordinates> for MapPoint {
    fn from(coords: Coordinates) -> Self {
        coords.to_map_point()
    }
}

impl From<MapPoint> for Coordinates {
    fn from(point: MapPoint) -> Self {
        point.to_coordinates()
    }
}

/// An axis-aligned rectangle in projected map units
///
/// `(x, y)` is the minimum corner. Used both for the caller's viewport and
/// for the cluster cells derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The visible map area handed to the cluster engine
pub type Viewport = MapRect;

impl MapRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from a minimum corner point
    pub fn with_origin(origin: MapPoint, width: f64, height: f64) -> Self {
        Self::new(origin.x, origin.y, width, height)
    }

    /// Projected rectangle covering a lat/lng bounding box
    ///
    /// Corners may be given in any order. Boxes crossing the antimeridian
    /// are not supported.
    pub fn from_bounds(a: Coordinates, b: Coordinates) -> Result<Self> {
        a.validate()?;
        b.validate()?;
        let p1 = a.to_map_point();
        let p2 = b.to_map_point();
        Ok(Self::new(
            p1.x.min(p2.x),
            p1.y.min(p2.y),
            (p1.x - p2.x).abs(),
            (p1.y - p2.y).abs(),
        ))
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn mid_point(&self) -> MapPoint {
        MapPoint::new(self.mid_x(), self.mid_y())
    }

    /// Whether the point lies inside the rectangle, edges included
    pub fn contains(&self, point: MapPoint) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }

    /// Shrink (positive) or grow (negative) each side by the given amounts
    pub fn inset_by(&self, dx: f64, dy: f64) -> Self {
        Self::new(
            self.x + dx,
            self.y + dy,
            self.width - 2.0 * dx,
            self.height - 2.0 * dy,
        )
    }

    /// The centered maximal square inscribed in this rectangle
    pub fn middle_square(&self) -> Self {
        if self.width > self.height {
            self.inset_by((self.width - self.height) / 2.0, 0.0)
        } else {
            self.inset_by(0.0, (self.height - self.width) / 2.0)
        }
    }

    /// Closed outline: the four corners followed by the first corner again
    pub fn outline(&self) -> Vec<MapPoint> {
        vec![
            MapPoint::new(self.min_x(), self.min_y()),
            MapPoint::new(self.max_x(), self.min_y()),
            MapPoint::new(self.max_x(), self.max_y()),
            MapPoint::new(self.min_x(), self.max_y()),
            MapPoint::new(self.min_x(), self.min_y()),
        ]
    }

    /// Reject rectangles without a positive finite area
    pub fn validate(&self) -> Result<()> {
        let finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(Error::InvalidViewport(format!(
                "Viewport has non-finite components: {:?}",
                self
            )));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(Error::InvalidViewport(format!(
                "Viewport must have positive size, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}
