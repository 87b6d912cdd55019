//! Two-dimensional GeoSOT grid: quadtree codes of longitude/latitude cells (see
//! [`GeoSot2dCode`]) and the logarithmic shell elevation code that accompanies them (see
//! [`ShellElevationCodec`]).

mod code;
mod elevation;
mod tile;

pub use code::GeoSot2dCode;
pub use elevation::{ShellElevationCode, ShellElevationCodec};
pub use tile::TileIndex;

use serde::{Deserialize, Serialize};

use crate::degree::DegreeCodec;
use crate::error::Result;
use crate::grid::cell_size_in_degrees;
use crate::morton;
use crate::point::{GeoBbox, GeoPoint, GeoPoint2d, NewGeoPoint};

/// Encodes longitude/latitude pairs into [`GeoSot2dCode`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoSot2dCodec {
    degree_codec: DegreeCodec,
}

impl GeoSot2dCodec {
    /// Creates a codec with the given degree encoding settings.
    pub fn new(degree_codec: DegreeCodec) -> Self {
        Self { degree_codec }
    }

    /// Degree encoding settings.
    pub fn degree_codec(&self) -> &DegreeCodec {
        &self.degree_codec
    }

    /// Sets degree encoding settings.
    pub fn with_degree_codec(mut self, degree_codec: DegreeCodec) -> Self {
        self.degree_codec = degree_codec;
        self
    }

    /// Full precision (level 32) Morton code of a position.
    pub fn morton(&self, lon: f64, lat: f64) -> Result<u64> {
        let lon = self.degree_codec.encode(lon)?;
        let lat = self.degree_codec.encode(lat)?;
        Ok(morton::interleave2(lon.bits(), lat.bits()))
    }

    /// Code of the cell at `level` that contains the position.
    pub fn encode(&self, lon: f64, lat: f64, level: u8) -> Result<GeoSot2dCode> {
        GeoSot2dCode::new(self.morton(lon, lat)?, level)
    }

    /// Code of the cell at `level` that contains the point.
    pub fn encode_point(&self, point: &impl GeoPoint, level: u8) -> Result<GeoSot2dCode> {
        self.encode(point.lon(), point.lat(), level)
    }

    /// Index of the cell at `level` that contains the position.
    pub fn tile(&self, lon: f64, lat: f64, level: u8) -> Result<TileIndex> {
        Ok(self.encode(lon, lat, level)?.tile())
    }

    /// Corner of the cell at `level` that contains the position.
    pub fn corner(&self, lon: f64, lat: f64, level: u8) -> Result<GeoPoint2d> {
        Ok(self.encode(lon, lat, level)?.corner())
    }

    /// Bounding box of the cell at `level` that contains the position.
    pub fn bbox(&self, lon: f64, lat: f64, level: u8) -> Result<GeoBbox> {
        Ok(self.encode(lon, lat, level)?.bbox())
    }

    /// Corner of the grid cell computed by rounding the coordinates down to a multiple of the cell
    /// size, without encoding them.
    ///
    /// Matches [`GeoSot2dCodec::corner`] for positive coordinates. Negative coordinates are rounded
    /// towards negative infinity instead of towards zero.
    pub fn aligned_corner(&self, lon: f64, lat: f64, level: u8) -> Result<GeoPoint2d> {
        let size = cell_size_in_degrees(level)?;
        Ok(GeoPoint2d::lonlat(
            (lon / size).floor() * size,
            (lat / size).floor() * size,
        ))
    }

    /// Bounding box spanning the corners of the cells that contain the position and the position
    /// moved by one cell size along both axes.
    pub fn aligned_bbox(&self, lon: f64, lat: f64, level: u8) -> Result<GeoBbox> {
        let size = cell_size_in_degrees(level)?;
        let near = self.corner(lon, lat, level)?;
        let far = self.corner(lon + size, lat + size, level)?;
        Ok(GeoBbox::from_corners(&near, &far))
    }
}
