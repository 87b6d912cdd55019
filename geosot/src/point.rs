//! Geographic positions accepted and returned by the codecs.

use serde::{Deserialize, Serialize};

/// Point on the surface of the ellipsoid given in decimal degrees.
pub trait GeoPoint {
    /// Latitude in degrees.
    fn lat(&self) -> f64;
    /// Longitude in degrees.
    fn lon(&self) -> f64;
}

/// Point that can be created from its coordinates.
pub trait NewGeoPoint: GeoPoint + Sized {
    /// Creates a point from latitude and longitude.
    fn latlon(lat: f64, lon: f64) -> Self;

    /// Creates a point from longitude and latitude.
    fn lonlat(lon: f64, lat: f64) -> Self {
        Self::latlon(lat, lon)
    }
}

/// 2d point on the surface of the ellipsoid.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint2d {
    lat: f64,
    lon: f64,
}

impl GeoPoint for GeoPoint2d {
    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }
}

impl NewGeoPoint for GeoPoint2d {
    fn latlon(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Point with geodetic height in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint3d {
    lat: f64,
    lon: f64,
    height: f64,
}

impl GeoPoint3d {
    /// Creates a new point.
    pub fn new(lon: f64, lat: f64, height: f64) -> Self {
        Self { lat, lon, height }
    }

    /// Geodetic height in meters.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Drops the height.
    pub fn to_2d(&self) -> GeoPoint2d {
        GeoPoint2d::latlon(self.lat, self.lon)
    }
}

impl GeoPoint for GeoPoint3d {
    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }
}

/// Longitude/latitude bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GeoBbox {
    /// Minimum longitude.
    pub west: f64,
    /// Minimum latitude.
    pub south: f64,
    /// Maximum longitude.
    pub east: f64,
    /// Maximum latitude.
    pub north: f64,
}

impl GeoBbox {
    /// Creates a bounding box from two opposite corners given in any order.
    pub fn from_corners(a: &impl GeoPoint, b: &impl GeoPoint) -> Self {
        Self {
            west: a.lon().min(b.lon()),
            south: a.lat().min(b.lat()),
            east: a.lon().max(b.lon()),
            north: a.lat().max(b.lat()),
        }
    }

    /// Width in degrees.
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Height in degrees.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Returns true if the point is inside the box or on its border.
    pub fn contains(&self, point: &impl GeoPoint) -> bool {
        self.west <= point.lon()
            && self.east >= point.lon()
            && self.south <= point.lat()
            && self.north >= point.lat()
    }
}
