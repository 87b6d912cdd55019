use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GeoSotError, Result};
use crate::geosot3d::code::GeoSot3dCode;
use crate::geosot3d::code1d::GeoSot1dCode;
use crate::grid::MAX_LEVEL;

/// Hierarchical string identifier of a GeoSOT-3D cell.
///
/// Every character is an octal digit `lon | lat << 1 | ele << 2` built from the axis bits of one
/// level, starting from the coarsest one. The length of the string is the level of the cell, so
/// the code of a child cell always starts with the code of its parent.
///
/// The empty string is the root of the hierarchy: the parent of all level 1 cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OctalCode(String);

impl OctalCode {
    /// The root of the hierarchy.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Parses a code.
    ///
    /// The `G` marker and `-`, `.` separators are ignored. Any other character that is not an octal
    /// digit is skipped too. The level is the number of octal digits.
    pub fn parse(s: &str) -> Result<Self> {
        let mut digits = String::with_capacity(MAX_LEVEL as usize);
        for c in s.chars() {
            match c {
                '0'..='7' => digits.push(c),
                'G' | '-' | '.' => {}
                _ => log::trace!("Skipping character {c:?} in octal code {s}"),
            }
        }

        if digits.is_empty() || digits.len() > MAX_LEVEL as usize {
            return Err(GeoSotError::InvalidLevel(digits.len()));
        }

        Ok(Self(digits))
    }

    pub(crate) fn from_digits_unchecked(digits: String) -> Self {
        Self(digits)
    }

    /// Level of the cell. Zero for the root.
    pub fn level(&self) -> u8 {
        self.0.len() as u8
    }

    /// Returns true if this is the root code.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// String representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Packed code of the cell. Axis bits below the level are zero.
    pub fn to_code(&self) -> Result<GeoSot3dCode> {
        if self.is_root() {
            return Err(GeoSotError::InvalidLevel(0));
        }

        let (mut lon, mut lat, mut ele) = (0u32, 0u32, 0u32);
        for (depth, digit) in self.0.bytes().enumerate() {
            let digit = (digit - b'0') as u32;
            let bit = MAX_LEVEL as usize - 1 - depth;
            lon |= (digit & 1) << bit;
            lat |= ((digit >> 1) & 1) << bit;
            ele |= ((digit >> 2) & 1) << bit;
        }

        Ok(GeoSot3dCode::from_parts(lon, lat, ele, self.level()))
    }
}

impl From<GeoSot3dCode> for OctalCode {
    fn from(value: GeoSot3dCode) -> Self {
        let interleaved = GeoSot1dCode::from(value).interleaved();
        let mut digits = format!("{interleaved:032o}");
        digits.truncate(value.level() as usize);
        Self(digits)
    }
}

impl Display for OctalCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for OctalCode {
    type Err = GeoSotError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for OctalCode {
    type Error = GeoSotError;

    fn try_from(value: String) -> Result<Self> {
        if value.is_empty() {
            return Ok(Self::root());
        }

        Self::parse(&value)
    }
}

impl From<OctalCode> for String {
    fn from(value: OctalCode) -> Self {
        value.0
    }
}

impl AsRef<str> for OctalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::degree::DegreeCode;

    fn code(lon: u32, lat: u32, ele: u32, level: u8) -> GeoSot3dCode {
        GeoSot3dCode::from_axes(
            DegreeCode::from_bits(lon),
            DegreeCode::from_bits(lat),
            DegreeCode::from_bits(ele),
            level,
        )
        .unwrap()
    }

    #[test]
    fn digits_combine_axis_bits() {
        insta::assert_snapshot!(code(0x8000_0000, 0, 0, 1).to_octal(), @"1");
        insta::assert_snapshot!(code(0, 0x8000_0000, 0, 1).to_octal(), @"2");
        insta::assert_snapshot!(code(0, 0, 0x8000_0000, 1).to_octal(), @"4");
        insta::assert_snapshot!(code(u32::MAX, u32::MAX, u32::MAX, 3).to_octal(), @"777");
        insta::assert_snapshot!(code(0x4000_0000, 0, u32::MAX, 4).to_octal(), @"4544");
    }

    #[test]
    fn length_is_level() {
        for level in 1..=32 {
            let c = code(u32::MAX, 0, 0, level);
            assert_eq!(c.to_octal().level(), level);
            assert_eq!(c.to_octal().as_str().len(), level as usize);
        }
    }

    #[test]
    fn deepest_level_is_decoded() {
        let c = code(1, 1, 1, 32);
        let octal = c.to_octal();
        assert_eq!(octal.as_str(), format!("{}7", "0".repeat(31)));
        assert_eq!(octal.to_code().unwrap(), c);
    }

    #[test]
    fn round_trip_of_canonical_codes() {
        for level in [1, 2, 9, 10, 15, 21, 26, 31, 32] {
            let c = code(0xBA25_B690, 0x13F5_5200, 0x1C8C_C7FF, level);
            assert_eq!(c.to_octal().to_code().unwrap(), c);
            assert_eq!(c.to_string().parse::<GeoSot3dCode>().unwrap(), c);
        }
    }

    #[test]
    fn parse_ignores_markers() {
        let code = OctalCode::parse("G0017-5432.6").unwrap();
        assert_eq!(code.as_str(), "00175432");
        assert_eq!(code.level(), 8);

        let lenient = OctalCode::parse("0 0 1 7 9 5").unwrap();
        assert_eq!(lenient.as_str(), "00175");
    }

    #[test]
    fn parse_invalid_level() {
        assert_matches!(OctalCode::parse("G-."), Err(GeoSotError::InvalidLevel(0)));
        assert_matches!(
            OctalCode::parse(&"1".repeat(33)),
            Err(GeoSotError::InvalidLevel(33))
        );
        assert_matches!(OctalCode::root().to_code(), Err(GeoSotError::InvalidLevel(0)));
    }

    #[test]
    fn serde_uses_string_form() {
        let code = OctalCode::parse("00175432").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"00175432\"");
        let parsed: OctalCode = serde_json::from_str("\"G0017-5432\"").unwrap();
        assert_eq!(parsed, code);
        let root: OctalCode = serde_json::from_str("\"\"").unwrap();
        assert!(root.is_root());
        assert!(serde_json::from_str::<OctalCode>("\"xyz\"").is_err());
    }
}
