use serde::de::Error;
use serde::{Deserialize, Serialize};

use crate::degree::DegreeCode;
use crate::error::{GeoSotError, Result};
use crate::grid::{check_level, MAX_LEVEL};
use crate::point::{GeoBbox, GeoPoint2d, NewGeoPoint};

/// Position of a GeoSOT cell in the grid of its level.
///
/// Indices are the top `level` bits of the axis degree codes, so the highest bit of an index is
/// the sign of the coordinate and indices grow away from the zero meridian and the equator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileIndex {
    x: u32,
    y: u32,
    level: u8,
}

impl TileIndex {
    /// Creates a new index. Both indices must be less than `2^level`.
    pub fn new(x: u32, y: u32, level: u8) -> Result<Self> {
        check_level(level)?;
        if (x as u64) >> level != 0 || (y as u64) >> level != 0 {
            return Err(GeoSotError::Malformed(format!(
                "tile ({x}, {y}) does not exist at level {level}"
            )));
        }

        Ok(Self { x, y, level })
    }

    pub(crate) fn from_parts(x: u32, y: u32, level: u8) -> Self {
        Self { x, y, level }
    }

    /// Longitude index.
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Latitude index.
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Level of the grid.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Corner of the cell that is the closest to the zero meridian and the equator.
    pub fn corner(&self) -> GeoPoint2d {
        corner(self.x, self.y, self.level)
    }

    /// Bounding box of the cell.
    ///
    /// The opposite corner is the corner of the cell `(x + 1, y + 1)`. For the last cell of a level
    /// the index wraps around the degree code.
    pub fn bbox(&self) -> GeoBbox {
        let near = self.corner();
        let far = corner(self.x.wrapping_add(1), self.y.wrapping_add(1), self.level);
        GeoBbox::from_corners(&near, &far)
    }
}

#[derive(Deserialize)]
struct TileIndexSer {
    x: u32,
    y: u32,
    level: u8,
}

impl<'de> Deserialize<'de> for TileIndex {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let TileIndexSer { x, y, level } = TileIndexSer::deserialize(deserializer)?;
        Self::new(x, y, level)
            .map_err(|e| D::Error::custom(format!("failed to deserialize tile index: {e}")))
    }
}

fn corner(x: u32, y: u32, level: u8) -> GeoPoint2d {
    let shift = (MAX_LEVEL - level) as u32;
    let lon = DegreeCode::from_bits(x << shift).to_degrees();
    let lat = DegreeCode::from_bits(y << shift).to_degrees();
    GeoPoint2d::lonlat(lon, lat)
}
