use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::degree::DegreeCode;
use crate::error::{GeoSotError, Result};
use crate::geosot3d::octal::OctalCode;
use crate::grid::{check_level, level_mask, GRID_SIZE};

pub(crate) const LON_OFFSET: u32 = 69;
pub(crate) const LAT_OFFSET: u32 = 37;
pub(crate) const ELE_OFFSET: u32 = 5;
pub(crate) const LEVEL_MASK: u128 = 0x1F;
pub(crate) const CODE_BITS: u32 = 101;
pub(crate) const CODE_MASK: u128 = (1 << CODE_BITS) - 1;

/// Axis of a GeoSOT-3D code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Longitude.
    Lon,
    /// Latitude.
    Lat,
    /// Elevation, expressed as an angle.
    Ele,
}

impl Axis {
    /// All axes in the order of [`Offset`](crate::Offset) components.
    pub const ALL: [Axis; 3] = [Axis::Lon, Axis::Lat, Axis::Ele];

    /// Position of the lowest bit of the axis field in a packed code.
    pub fn bit_offset(&self) -> u32 {
        match self {
            Axis::Lon => LON_OFFSET,
            Axis::Lat => LAT_OFFSET,
            Axis::Ele => ELE_OFFSET,
        }
    }
}

/// GeoSOT-3D cell code packed into an integer.
///
/// ```text
/// 100 ...... 69 | 68 ...... 37 | 36 ....... 5 | 4 ......... 0
///   longitude   |   latitude   |  elevation   |  level - 1
/// ```
///
/// Every axis field is a [`DegreeCode`]. Codes created by [`GeoSot3dCode::from_axes`] and by the
/// codecs keep only the `level` most significant bits of every axis, so that a code identifies
/// exactly one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u128", into = "u128")]
pub struct GeoSot3dCode(u128);

impl GeoSot3dCode {
    /// Creates the code of the cell at `level` containing the given axis values.
    pub fn from_axes(lon: DegreeCode, lat: DegreeCode, ele: DegreeCode, level: u8) -> Result<Self> {
        check_level(level)?;
        let mask = level_mask(level);
        Ok(Self::from_parts(
            lon.bits() & mask,
            lat.bits() & mask,
            ele.bits() & mask,
            level,
        ))
    }

    pub(crate) fn from_parts(lon: u32, lat: u32, ele: u32, level: u8) -> Self {
        Self(
            ((lon as u128) << LON_OFFSET)
                | ((lat as u128) << LAT_OFFSET)
                | ((ele as u128) << ELE_OFFSET)
                | (level - 1) as u128,
        )
    }

    /// Creates a code from its packed representation.
    ///
    /// The bits are taken as is, axis bits below the level are not cleared.
    pub fn from_bits(bits: u128) -> Result<Self> {
        if bits & !CODE_MASK != 0 {
            return Err(GeoSotError::Malformed(format!(
                "{bits:#x} has bits above bit {}",
                CODE_BITS - 1
            )));
        }

        Ok(Self(bits))
    }

    pub(crate) fn from_bits_truncate(bits: u128) -> Self {
        Self(bits & CODE_MASK)
    }

    /// Packed representation.
    pub fn bits(&self) -> u128 {
        self.0
    }

    /// Level of the cell.
    pub fn level(&self) -> u8 {
        (self.0 & LEVEL_MASK) as u8 + 1
    }

    /// Raw 32-bit field of the axis.
    pub fn axis(&self, axis: Axis) -> DegreeCode {
        DegreeCode::from_bits((self.0 >> axis.bit_offset()) as u32)
    }

    /// Longitude field.
    pub fn lon(&self) -> DegreeCode {
        self.axis(Axis::Lon)
    }

    /// Latitude field.
    pub fn lat(&self) -> DegreeCode {
        self.axis(Axis::Lat)
    }

    /// Elevation field.
    pub fn ele(&self) -> DegreeCode {
        self.axis(Axis::Ele)
    }

    /// Returns true if all axis bits below the level are zero.
    pub fn is_canonical(&self) -> bool {
        let unused = !level_mask(self.level());
        Axis::ALL
            .iter()
            .all(|axis| self.axis(*axis).bits() & unused == 0)
    }

    /// Size of the cell in degrees along every axis.
    pub fn cell_size(&self) -> f64 {
        GRID_SIZE[self.level() as usize]
    }

    /// Octal string of the code.
    pub fn to_octal(&self) -> OctalCode {
        OctalCode::from(*self)
    }
}

impl Display for GeoSot3dCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_octal())
    }
}

impl FromStr for GeoSot3dCode {
    type Err = GeoSotError;

    fn from_str(s: &str) -> Result<Self> {
        OctalCode::parse(s)?.to_code()
    }
}

impl TryFrom<u128> for GeoSot3dCode {
    type Error = GeoSotError;

    fn try_from(value: u128) -> Result<Self> {
        Self::from_bits(value)
    }
}

impl From<GeoSot3dCode> for u128 {
    fn from(value: GeoSot3dCode) -> Self {
        value.0
    }
}
