use std::fmt::{Display, Formatter, Write};
use std::str::FromStr;

use serde::de::Error;
use serde::{Deserialize, Serialize};

use crate::error::{GeoSotError, Result};
use crate::geosot2d::tile::TileIndex;
use crate::grid::{check_level, GRID_SIZE, MAX_LEVEL};
use crate::morton;
use crate::point::{GeoBbox, GeoPoint2d};

const MARKER: char = 'G';

/// GeoSOT code of a 2d cell: Morton code of the longitude and latitude degree codes and the level
/// of the cell.
///
/// Only the top `level` digit pairs of the Morton code are meaningful, all lower bits are zero.
///
/// The string form starts with `G` followed by `level` base-4 digits. A `-` is placed after the
/// 9th (degree) and the 15th (minute) digit and a `.` after the 21st (second) digit:
///
/// ```
/// use geosot::geosot2d::GeoSot2dCode;
///
/// let code: GeoSot2dCode = "G001023122-203103-131010.33003300330".parse().unwrap();
/// assert_eq!(code.level(), 32);
/// assert_eq!(code.morton(), 339638376531246140);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GeoSot2dCode {
    morton: u64,
    level: u8,
}

impl GeoSot2dCode {
    /// Creates a code from a Morton value. Bits below the level are cleared.
    pub fn new(morton: u64, level: u8) -> Result<Self> {
        check_level(level)?;
        let free_bits = 2 * (MAX_LEVEL - level) as u32;
        Ok(Self {
            morton: morton & (u64::MAX << free_bits),
            level,
        })
    }

    /// Morton code of the cell.
    pub fn morton(&self) -> u64 {
        self.morton
    }

    /// Level of the cell.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Size of the cell in degrees.
    pub fn cell_size(&self) -> f64 {
        GRID_SIZE[self.level as usize]
    }

    /// Column (longitude) and row (latitude) of the cell.
    pub fn tile(&self) -> TileIndex {
        let (lon, lat) = morton::deinterleave2(self.morton);
        let shift = (MAX_LEVEL - self.level) as u32;
        TileIndex::from_parts(lon >> shift, lat >> shift, self.level)
    }

    /// Corner of the cell that is the closest to the zero meridian and the equator.
    pub fn corner(&self) -> GeoPoint2d {
        self.tile().corner()
    }

    /// Bounding box of the cell.
    pub fn bbox(&self) -> GeoBbox {
        self.tile().bbox()
    }
}

#[derive(Deserialize)]
struct GeoSot2dCodeSer {
    morton: u64,
    level: u8,
}

impl<'de> Deserialize<'de> for GeoSot2dCode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let GeoSot2dCodeSer { morton, level } = GeoSot2dCodeSer::deserialize(deserializer)?;
        Self::new(morton, level)
            .map_err(|e| D::Error::custom(format!("failed to deserialize GeoSOT code: {e}")))
    }
}

impl From<TileIndex> for GeoSot2dCode {
    fn from(value: TileIndex) -> Self {
        let shift = (MAX_LEVEL - value.level()) as u32;
        Self {
            morton: morton::interleave2(value.x() << shift, value.y() << shift),
            level: value.level(),
        }
    }
}

impl Display for GeoSot2dCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_char(MARKER)?;

        let level = self.level as u32;
        for k in 1..=level {
            let digit = (self.morton >> (2 * (MAX_LEVEL as u32 - k))) & 0b11;
            write!(f, "{digit}")?;

            if k < level {
                match k {
                    9 | 15 => f.write_char('-')?,
                    21 => f.write_char('.')?,
                    _ => {}
                }
            }
        }

        Ok(())
    }
}

impl FromStr for GeoSot2dCode {
    type Err = GeoSotError;

    /// Parses the string form of a code.
    ///
    /// Parsing is lenient: all characters except ASCII digits are ignored, so the marker and
    /// separators are optional and may be placed anywhere. Every digit adds a level, digits above
    /// `3` are read as `0`.
    fn from_str(s: &str) -> Result<Self> {
        let mut morton = 0u64;
        let mut level = 0usize;

        for c in s.chars() {
            let Some(digit) = c.to_digit(10) else {
                continue;
            };

            level += 1;
            if level > MAX_LEVEL as usize {
                continue;
            }

            let digit = if digit < 4 {
                digit as u64
            } else {
                log::trace!("Digit {c} of code {s} is not a quaternary digit, reading it as 0");
                0
            };

            morton |= digit << (2 * (MAX_LEVEL as usize - level));
        }

        if level == 0 || level > MAX_LEVEL as usize {
            return Err(GeoSotError::InvalidLevel(level));
        }

        Self::new(morton, level as u8)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;
    use crate::point::GeoPoint;

    #[test]
    fn format_full_code() {
        let code = GeoSot2dCode::new(339638376531246140, 32).unwrap();
        insta::assert_snapshot!(code, @"G001023122-203103-131010.33003300330");
    }

    #[test]
    fn format_truncated_code() {
        let code = GeoSot2dCode::new(339638376531246140, 9).unwrap();
        insta::assert_snapshot!(code, @"G001023122");
        let code = GeoSot2dCode::new(339638376531246140, 10).unwrap();
        insta::assert_snapshot!(code, @"G001023122-2");
        let code = GeoSot2dCode::new(339638376531246140, 21).unwrap();
        insta::assert_snapshot!(code, @"G001023122-203103-131010");
        let code = GeoSot2dCode::new(339638376531246140, 1).unwrap();
        insta::assert_snapshot!(code, @"G0");
    }

    #[test]
    fn parse_formatted_code() {
        for s in ["G001310322-230230", "G001023122-203103-131010.33003300330"] {
            let code: GeoSot2dCode = s.parse().unwrap();
            assert_eq!(code.to_string(), s);
        }
    }

    #[test]
    fn parse_is_lenient() {
        let code: GeoSot2dCode = "G001310322 - 230230".parse().unwrap();
        assert_eq!(code.level(), 15);
        assert_eq!(code.to_string(), "G001310322-230230");

        let bare: GeoSot2dCode = "001310322230230".parse().unwrap();
        assert_eq!(bare, code);

        let with_large_digits: GeoSot2dCode = "G0013103229".parse().unwrap();
        assert_eq!(with_large_digits.level(), 10);
        assert_eq!(with_large_digits.to_string(), "G001310322-0");
    }

    #[test]
    fn parse_invalid_level() {
        assert_matches!(
            "G-.".parse::<GeoSot2dCode>(),
            Err(GeoSotError::InvalidLevel(0))
        );
        let too_long = "0".repeat(33);
        assert_matches!(
            too_long.parse::<GeoSot2dCode>(),
            Err(GeoSotError::InvalidLevel(33))
        );
    }

    #[test]
    fn new_clears_bits_below_level() {
        let code = GeoSot2dCode::new(u64::MAX, 1).unwrap();
        assert_eq!(code.morton(), 0xC000_0000_0000_0000);
        assert_matches!(GeoSot2dCode::new(0, 0), Err(GeoSotError::InvalidLevel(0)));
    }

    #[test]
    fn tile_of_code() {
        let code: GeoSot2dCode = "G001310322-230230".parse().unwrap();
        let tile = code.tile();
        assert_eq!((tile.x(), tile.y(), tile.level()), (7442, 2550, 15));
        assert_eq!(GeoSot2dCode::from(tile), code);
    }

    #[test]
    fn serde_validates_level() {
        let code: GeoSot2dCode = "G001310322-230230".parse().unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(serde_json::from_str::<GeoSot2dCode>(&json).unwrap(), code);

        for json in [r#"{"morton":1,"level":0}"#, r#"{"morton":1,"level":40}"#] {
            assert!(serde_json::from_str::<GeoSot2dCode>(json).is_err());
        }

        let noisy: GeoSot2dCode = serde_json::from_str(r#"{"morton":3,"level":1}"#).unwrap();
        assert_eq!(noisy.morton(), 0);
    }

    #[test]
    fn corner_of_code() {
        let code: GeoSot2dCode = "G001310322 - 230230".parse().unwrap();
        let corner = code.corner();
        assert_abs_diff_eq!(corner.lon(), 116.3, epsilon = 1e-9);
        assert_abs_diff_eq!(corner.lat(), 39.9, epsilon = 1e-9);
        assert_abs_diff_eq!(code.cell_size(), 1.0 / 60.0);
    }
}
