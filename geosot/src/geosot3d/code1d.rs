use serde::{Deserialize, Serialize};

use crate::error::{GeoSotError, Result};
use crate::geosot3d::code::{GeoSot3dCode, LEVEL_MASK};
use crate::morton;

const LEVEL_SHIFT: u32 = 5;
const INTERLEAVED_BITS: u32 = 96;

/// GeoSOT-3D code with the three axes interleaved bit by bit.
///
/// Bit `i` of the longitude, latitude and elevation fields goes to bit `3i`, `3i + 1` and `3i + 2`
/// of a 96-bit value that is stored above the same 5-bit `level - 1` field as in
/// [`GeoSot3dCode`]. Ordering codes of the same level by this value gives Z-order over the cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u128", into = "u128")]
pub struct GeoSot1dCode(u128);

impl GeoSot1dCode {
    /// Creates a code from its packed representation.
    pub fn from_bits(bits: u128) -> Result<Self> {
        if bits >> (INTERLEAVED_BITS + LEVEL_SHIFT) != 0 {
            return Err(GeoSotError::Malformed(format!(
                "{bits:#x} is too large for an interleaved code"
            )));
        }

        Ok(Self(bits))
    }

    /// Packed representation.
    pub fn bits(&self) -> u128 {
        self.0
    }

    /// 96-bit interleaved axes without the level.
    pub fn interleaved(&self) -> u128 {
        self.0 >> LEVEL_SHIFT
    }

    /// Level of the cell.
    pub fn level(&self) -> u8 {
        (self.0 & LEVEL_MASK) as u8 + 1
    }
}

impl TryFrom<u128> for GeoSot1dCode {
    type Error = GeoSotError;

    fn try_from(value: u128) -> Result<Self> {
        Self::from_bits(value)
    }
}

impl From<GeoSot1dCode> for u128 {
    fn from(value: GeoSot1dCode) -> Self {
        value.0
    }
}

impl From<GeoSot3dCode> for GeoSot1dCode {
    fn from(value: GeoSot3dCode) -> Self {
        let interleaved = morton::interleave3(
            value.lon().bits(),
            value.lat().bits(),
            value.ele().bits(),
        );
        Self((interleaved << LEVEL_SHIFT) | (value.bits() & LEVEL_MASK))
    }
}

impl From<GeoSot1dCode> for GeoSot3dCode {
    fn from(value: GeoSot1dCode) -> Self {
        let (lon, lat, ele) = morton::deinterleave3(value.interleaved());
        GeoSot3dCode::from_parts(lon, lat, ele, value.level())
    }
}
