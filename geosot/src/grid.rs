//! Grid levels and cell sizes.
//!
//! GeoSOT subdivides the extended `512° x 512°` plane by halving the cell on every level. Levels
//! `1..=9` split degrees, `10..=15` split minutes (the 64' extended minute) and `16..=32` split
//! seconds (the 64" extended second), so a cell at level 9 is 1°, at level 15 is 1' and at level
//! 21 is 1".

use crate::ellipsoid::Ellipsoid;
use crate::error::{GeoSotError, Result};

/// Coarsest level of a code.
pub const MIN_LEVEL: u8 = 1;

/// Finest level of a code. A level-32 code uses all 32 bits of every axis.
pub const MAX_LEVEL: u8 = 32;

/// Size of a grid cell in degrees for every level from 0 to 32.
pub const GRID_SIZE: [f64; 33] = [
    512.0,
    256.0,
    128.0,
    64.0,
    32.0,
    16.0,
    8.0,
    4.0,
    2.0,
    1.0,
    32.0 / 60.0,
    16.0 / 60.0,
    8.0 / 60.0,
    4.0 / 60.0,
    2.0 / 60.0,
    1.0 / 60.0,
    32.0 / 3600.0,
    16.0 / 3600.0,
    8.0 / 3600.0,
    4.0 / 3600.0,
    2.0 / 3600.0,
    1.0 / 3600.0,
    0.5 / 3600.0,
    0.25 / 3600.0,
    0.125 / 3600.0,
    0.0625 / 3600.0,
    0.03125 / 3600.0,
    0.015625 / 3600.0,
    0.0078125 / 3600.0,
    0.00390625 / 3600.0,
    0.001953125 / 3600.0,
    0.0009765625 / 3600.0,
    0.00048828125 / 3600.0,
];

/// Returns an error if the `level` is not in `MIN_LEVEL..=MAX_LEVEL`.
pub fn check_level(level: u8) -> Result<()> {
    if (MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        Ok(())
    } else {
        Err(GeoSotError::InvalidLevel(level as usize))
    }
}

/// Size of a cell at the given level in degrees.
pub fn cell_size_in_degrees(level: u8) -> Result<f64> {
    check_level(level)?;
    Ok(GRID_SIZE[level as usize])
}

/// Height of a GeoSOT-3D cell at the given level in meters.
///
/// The elevation axis of GeoSOT-3D is subdivided in equal angular steps, so the height of a cell
/// does not depend on its altitude.
pub fn cell_size_in_meters(level: u8, ellipsoid: &Ellipsoid) -> Result<f64> {
    Ok(ellipsoid.degrees_to_meters(cell_size_in_degrees(level)?))
}

/// Number of low bits of a 32-bit axis field that are not significant at the given level.
pub(crate) fn free_bits(level: u8) -> u32 {
    (MAX_LEVEL - level) as u32
}

/// Mask of the bits of a 32-bit axis field that are significant at the given level.
pub(crate) fn level_mask(level: u8) -> u32 {
    ((u32::MAX as u64) << free_bits(level)) as u32
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn grid_size_halves_on_every_level() {
        for level in 1..GRID_SIZE.len() {
            if level == 10 || level == 16 {
                // switching from degrees to extended minutes and from minutes to seconds
                assert_abs_diff_eq!(
                    GRID_SIZE[level - 1] / GRID_SIZE[level],
                    1.875,
                    epsilon = 1e-12
                );
            } else {
                assert_abs_diff_eq!(GRID_SIZE[level - 1] / GRID_SIZE[level], 2.0);
            }
        }
    }

    #[test]
    fn named_levels() {
        assert_eq!(cell_size_in_degrees(9), Ok(1.0));
        assert_abs_diff_eq!(cell_size_in_degrees(15).unwrap(), 1.0 / 60.0);
        assert_abs_diff_eq!(cell_size_in_degrees(21).unwrap(), 1.0 / 3600.0);
        assert_abs_diff_eq!(
            cell_size_in_degrees(26).unwrap(),
            8.680555555555556e-6,
            epsilon = 1e-18
        );
    }

    #[test]
    fn invalid_levels() {
        assert_matches!(cell_size_in_degrees(0), Err(GeoSotError::InvalidLevel(0)));
        assert_matches!(cell_size_in_degrees(33), Err(GeoSotError::InvalidLevel(33)));
    }

    #[test]
    fn cell_height_in_meters() {
        let size = cell_size_in_meters(9, &Ellipsoid::WGS84).unwrap();
        assert_abs_diff_eq!(size, 111_319.49, epsilon = 0.01);
    }

    #[test]
    fn level_masks() {
        assert_eq!(level_mask(32), u32::MAX);
        assert_eq!(level_mask(1), 0x8000_0000);
        assert_eq!(level_mask(9), 0xFF80_0000);
    }
}
