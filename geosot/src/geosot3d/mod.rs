//! Three-dimensional GeoSOT grid.
//!
//! GeoSOT-3D extends the 2d grid with an elevation axis. Geodetic height is converted into an
//! angle with the reference [`Ellipsoid`] and then subdivided exactly like longitude and latitude,
//! which gives cells of equal height at every altitude. This is a simplification of the GeoSOT
//! standard, which uses shells of growing thickness (see
//! [`ShellElevationCodec`](crate::geosot2d::ShellElevationCodec)).
//!
//! A cell has three equivalent representations:
//! * [`GeoSot3dCode`] - axis fields packed next to each other,
//! * [`GeoSot1dCode`] - axis fields interleaved bit by bit,
//! * [`OctalCode`] - the interleaved value written as `level` octal digits.

mod code;
mod code1d;
mod octal;

pub use code::{Axis, GeoSot3dCode};
pub use code1d::GeoSot1dCode;
pub use octal::OctalCode;

use serde::{Deserialize, Serialize};

use crate::degree::DegreeCodec;
use crate::ellipsoid::Ellipsoid;
use crate::error::Result;
use crate::grid;
use crate::point::{GeoPoint, GeoPoint3d};

/// Converts positions into [`GeoSot3dCode`]s and back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoSot3dCodec {
    degree_codec: DegreeCodec,
    ellipsoid: Ellipsoid,
}

impl GeoSot3dCodec {
    /// Creates a new codec.
    pub fn new(degree_codec: DegreeCodec, ellipsoid: Ellipsoid) -> Self {
        Self {
            degree_codec,
            ellipsoid,
        }
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

    /// Ellipsoid used to convert heights into angles.
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// Sets ellipsoid used to convert heights into angles.
    pub fn with_ellipsoid(mut self, ellipsoid: Ellipsoid) -> Self {
        self.ellipsoid = ellipsoid;
        self
    }

    /// Encodes three angular values in degrees. `ele` is the elevation already converted into an
    /// angle.
    pub fn encode_axis_triplet(
        &self,
        lon: f64,
        lat: f64,
        ele: f64,
        level: u8,
    ) -> Result<GeoSot3dCode> {
        grid::check_level(level)?;
        GeoSot3dCode::from_axes(
            self.degree_codec.encode(lon)?,
            self.degree_codec.encode(lat)?,
            self.degree_codec.encode(ele)?,
            level,
        )
    }

    /// Encodes a position with geodetic height in meters.
    pub fn encode(&self, lon: f64, lat: f64, height: f64, level: u8) -> Result<GeoSot3dCode> {
        let ele = self.ellipsoid.height_to_degrees(height);
        self.encode_axis_triplet(lon, lat, ele, level)
    }

    /// Encodes a point.
    pub fn encode_point(&self, point: &GeoPoint3d, level: u8) -> Result<GeoSot3dCode> {
        self.encode(point.lon(), point.lat(), point.height(), level)
    }

    /// Octal string of the cell containing the position.
    pub fn encode_octal(&self, lon: f64, lat: f64, height: f64, level: u8) -> Result<OctalCode> {
        Ok(self.encode(lon, lat, height, level)?.to_octal())
    }

    /// Decodes the three axes of a code into angular values in degrees.
    pub fn decode_axis_triplet(&self, code: &GeoSot3dCode) -> (f64, f64, f64) {
        (
            code.lon().to_degrees(),
            code.lat().to_degrees(),
            code.ele().to_degrees(),
        )
    }

    /// Decodes the corner of the cell that is the closest to the zero meridian, the equator and
    /// the center of the ellipsoid.
    pub fn decode(&self, code: &GeoSot3dCode) -> GeoPoint3d {
        let (lon, lat, ele) = self.decode_axis_triplet(code);
        GeoPoint3d::new(lon, lat, self.ellipsoid.degrees_to_height(ele))
    }

    /// Parses and decodes an octal string.
    pub fn decode_octal(&self, code: &str) -> Result<GeoPoint3d> {
        Ok(self.decode(&OctalCode::parse(code)?.to_code()?))
    }

    /// Size of a cell at `level` in degrees along every axis.
    pub fn cell_size_in_degrees(&self, level: u8) -> Result<f64> {
        grid::cell_size_in_degrees(level)
    }

    /// Height of a cell at `level` in meters.
    pub fn cell_size_in_meters(&self, level: u8) -> Result<f64> {
        grid::cell_size_in_meters(level, &self.ellipsoid)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;
    use crate::degree::DegreeCode;
    use crate::error::GeoSotError;
    use crate::grid::cell_size_in_degrees;

    const LON: f64 = 116.315228;
    const LAT: f64 = 39.91028;

    #[test]
    fn encode_to_octal() {
        let codec = GeoSot3dCodec::default();
        insta::assert_snapshot!(
            codec.encode_octal(LON, LAT, 100.0, 26).unwrap(),
            @"00175432623067035031215450"
        );
        insta::assert_snapshot!(
            codec.encode_octal(LON, LAT, 100.0, 32).unwrap(),
            @"00175432623067035031215450470400"
        );
        insta::assert_snapshot!(codec.encode_octal(LON, LAT, 100.0, 5).unwrap(), @"00175");
        insta::assert_snapshot!(codec.encode_octal(-LON, -LAT, -100.0, 8).unwrap(), @"30175432");
    }

    #[test]
    fn octal_prefix_is_parent() {
        let codec = GeoSot3dCodec::default();
        let fine = codec.encode_octal(LON, LAT, 100.0, 20).unwrap();
        for level in 1..20 {
            let coarse = codec.encode_octal(LON, LAT, 100.0, level).unwrap();
            assert!(fine.as_str().starts_with(coarse.as_str()));
        }
    }

    #[test]
    fn decode_is_within_one_cell() {
        let codec = GeoSot3dCodec::default();
        let points = [
            (LON, LAT, 100.123456789),
            (-LON, -LAT, -100.123456789),
            (LON, -LAT, 100.123456789),
            (-LON, LAT, 100.123456789),
            (LON, LAT, -100.123456789),
            (0.5, 0.25, 8848.86),
        ];
        let degree_error = 1.0 / (2048.0 * 3600.0);

        for level in [9, 15, 21, 26, 32] {
            let cell = cell_size_in_degrees(level).unwrap();
            let cell_m = codec.cell_size_in_meters(level).unwrap();
            let height_error = codec.ellipsoid().degrees_to_meters(degree_error);

            for (lon, lat, height) in points {
                let octal = codec.encode_octal(lon, lat, height, level).unwrap();
                let decoded = codec.decode_octal(octal.as_str()).unwrap();
                assert_abs_diff_eq!(decoded.lon(), lon, epsilon = cell + degree_error);
                assert_abs_diff_eq!(decoded.lat(), lat, epsilon = cell + degree_error);
                assert_abs_diff_eq!(
                    decoded.height(),
                    height,
                    epsilon = cell_m + height_error + 1e-6
                );
            }
        }
    }

    #[test]
    fn full_level_is_precise() {
        let codec = GeoSot3dCodec::default();
        let code = codec.encode(LON, LAT, 100.123456789, 32).unwrap();
        let decoded = codec.decode(&GeoSot3dCode::from(GeoSot1dCode::from(code)));
        assert_abs_diff_eq!(decoded.lon(), LON, epsilon = 1e-6);
        assert_abs_diff_eq!(decoded.lat(), LAT, epsilon = 1e-6);
        assert!((decoded.height() - 100.123456789).abs() < 1.5);
    }

    #[test]
    fn equal_elevation_steps() {
        let codec = GeoSot3dCodec::default();
        let cell_m = codec.cell_size_in_meters(26).unwrap();
        for height in [-500.0, 100.0, 10_000.0, 400_000.0] {
            let code = codec.encode(LON, LAT, height, 26).unwrap();
            let above = GeoSot3dCode::from_axes(
                code.lon(),
                code.lat(),
                DegreeCode::from_bits(code.ele().bits() + (1 << 6)),
                26,
            )
            .unwrap();
            let step = codec.decode(&above).height() - codec.decode(&code).height();
            assert_abs_diff_eq!(step, cell_m, epsilon = 1e-6);
        }
    }

    #[test]
    fn encode_errors() {
        let codec = GeoSot3dCodec::default();
        assert_matches!(
            codec.encode(LON, LAT, 100.0, 0),
            Err(GeoSotError::InvalidLevel(0))
        );
        assert_matches!(
            codec.encode(LON, LAT, 1e9, 10),
            Err(GeoSotError::DegreeOutOfRange(_))
        );
        assert_matches!(codec.decode_octal("G-"), Err(GeoSotError::InvalidLevel(0)));
    }
}
