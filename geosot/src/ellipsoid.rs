//! Reference ellipsoid used to convert geodetic height into the angular elevation axis of
//! GeoSOT-3D codes.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Reference ellipsoid given by its semi-major (`a`) and semi-minor (`b`) axes in meters.
///
/// GeoSOT-3D treats the elevation axis as an angle: a height `H` is represented by the degree
/// value `D = (H + b) * 180 / (a * PI)`. The ellipsoid center is at `0°`, one degree of elevation
/// is equal to one degree of arc on the equator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    semimajor: f64,
    semiminor: f64,
}

impl Ellipsoid {
    /// Ellipsoid used by GeoSOT-3D by default. Semi-minor axis is rounded to the meter.
    pub const WGS84: Self = Ellipsoid {
        semimajor: 6_378_137.0,
        semiminor: 6_356_752.0,
    };

    /// Creates a new ellipsoid.
    pub fn new(semimajor: f64, semiminor: f64) -> Self {
        Self {
            semimajor,
            semiminor,
        }
    }

    /// Semi-major axis in meters.
    pub fn semimajor(&self) -> f64 {
        self.semimajor
    }

    /// Semi-minor axis in meters.
    pub fn semiminor(&self) -> f64 {
        self.semiminor
    }

    /// Converts geodetic height in meters into the angular elevation value in degrees.
    pub fn height_to_degrees(&self, height: f64) -> f64 {
        ((height + self.semiminor) * 180.0) / (self.semimajor * PI)
    }

    /// Converts angular elevation value in degrees back into geodetic height in meters.
    pub fn degrees_to_height(&self, degrees: f64) -> f64 {
        degrees * self.semimajor * (PI / 180.0) - self.semiminor
    }

    /// Length in meters of an elevation step of `degrees`.
    pub fn degrees_to_meters(&self, degrees: f64) -> f64 {
        degrees * self.semimajor * (PI / 180.0)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn ellipsoid_center_is_zero_degrees() {
        let ellipsoid = Ellipsoid::default();
        assert_abs_diff_eq!(
            ellipsoid.height_to_degrees(-ellipsoid.semiminor()),
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn height_conversion_is_invertible() {
        let ellipsoid = Ellipsoid::default();
        for height in [-10_000.0, -1.0, 0.0, 100.0, 8848.86, 1_000_000.0] {
            let degrees = ellipsoid.height_to_degrees(height);
            assert_abs_diff_eq!(ellipsoid.degrees_to_height(degrees), height, epsilon = 1e-6);
        }
    }

    #[test]
    fn sea_level_is_about_57_degrees() {
        let degrees = Ellipsoid::WGS84.height_to_degrees(100.0);
        assert_abs_diff_eq!(degrees, 57.104573, epsilon = 1e-6);
    }
}
