//! Elevation code of the 2d GeoSOT grid based on logarithmic ellipsoidal shells.
//!
//! A height `H` above a sphere of radius `R` lies in the shell with the index
//!
//! ```text
//! n = floor((θ0 / θ) * ln((H + R) / R) / ln(1 + θ0))
//! ```
//!
//! where `θ` is the cell size of the level and `θ0` is one degree, both in radians. Shells get
//! thicker with the height so that cells look like cubes at any altitude.
//!
//! This scheme is not related to the equal-step elevation axis of
//! [`GeoSot3dCode`](crate::GeoSot3dCode) and the codes of the two schemes must not be mixed.

use std::fmt::{Display, Formatter, Write};
use std::str::FromStr;

use serde::de::Error;
use serde::{Deserialize, Serialize};

use crate::ellipsoid::Ellipsoid;
use crate::error::{GeoSotError, Result};
use crate::grid::{check_level, GRID_SIZE, MAX_LEVEL};

/// Signed shell index at a level.
///
/// The string form has exactly `level` characters: the sign bit (`1` for shells below the
/// surface) followed by the magnitude as a `level - 1` bit binary number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ShellElevationCode {
    index: i64,
    level: u8,
}

impl ShellElevationCode {
    /// Creates a code, checking that the index fits into the level.
    pub fn new(index: i64, level: u8) -> Result<Self> {
        check_level(level)?;
        if index.unsigned_abs() >> (level - 1) != 0 {
            return Err(GeoSotError::ElevationOutOfRange { index, level });
        }

        Ok(Self { index, level })
    }

    /// Signed shell index. Zero is the first shell above the surface.
    pub fn index(&self) -> i64 {
        self.index
    }

    /// Level of the code.
    pub fn level(&self) -> u8 {
        self.level
    }
}

#[derive(Deserialize)]
struct ShellElevationCodeSer {
    index: i64,
    level: u8,
}

impl<'de> Deserialize<'de> for ShellElevationCode {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let ShellElevationCodeSer { index, level } =
            ShellElevationCodeSer::deserialize(deserializer)?;
        Self::new(index, level)
            .map_err(|e| D::Error::custom(format!("failed to deserialize elevation code: {e}")))
    }
}

impl Display for ShellElevationCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_char(if self.index < 0 { '1' } else { '0' })?;

        let magnitude = self.index.unsigned_abs();
        for bit in (0..self.level - 1).rev() {
            f.write_char(if (magnitude >> bit) & 1 == 1 { '1' } else { '0' })?;
        }

        Ok(())
    }
}

impl FromStr for ShellElevationCode {
    type Err = GeoSotError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        let negative = match chars.next() {
            Some('0') => false,
            Some('1') => true,
            _ => return Err(GeoSotError::Malformed(s.to_string())),
        };

        let mut magnitude = 0i64;
        let mut level = 1usize;
        for c in chars {
            let bit = match c {
                '0' => 0,
                '1' => 1,
                _ => return Err(GeoSotError::Malformed(s.to_string())),
            };

            level += 1;
            if level > MAX_LEVEL as usize {
                return Err(GeoSotError::InvalidLevel(s.chars().count()));
            }

            magnitude = (magnitude << 1) | bit;
        }

        let index = if negative { -magnitude } else { magnitude };
        Self::new(index, level as u8)
    }
}

/// Converts heights into [`ShellElevationCode`]s and back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShellElevationCodec {
    radius: f64,
}

impl Default for ShellElevationCodec {
    fn default() -> Self {
        Self {
            radius: Ellipsoid::WGS84.semimajor(),
        }
    }
}

impl ShellElevationCodec {
    /// Creates a codec for a sphere with the given radius in meters.
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Radius of the base sphere in meters.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Sets the radius of the reference sphere.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Encodes height in meters.
    pub fn encode(&self, height: f64, level: u8) -> Result<ShellElevationCode> {
        check_level(level)?;

        let ratio = (height + self.radius) / self.radius;
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(GeoSotError::HeightOutOfRange(height));
        }

        let (theta, theta0) = angles(level);
        let n = ((theta0 / theta) * (ratio.ln() / (1.0 + theta0).ln())).floor();
        if n.abs() >= (1u64 << (level - 1)) as f64 {
            return Err(GeoSotError::ElevationOutOfRange {
                index: n as i64,
                level,
            });
        }

        ShellElevationCode::new(n as i64, level)
    }

    /// Height of the bottom of the shell in meters.
    pub fn decode(&self, code: &ShellElevationCode) -> f64 {
        let (theta, theta0) = angles(code.level);
        (1.0 + theta0).powf(code.index as f64 * (theta / theta0)) * self.radius - self.radius
    }
}

fn angles(level: u8) -> (f64, f64) {
    (GRID_SIZE[level as usize].to_radians(), 1f64.to_radians())
}
