//! Moving codes by whole cells without decoding them.
//!
//! A step of one cell along an axis is a single addition to the packed integer: the axis field is
//! a fixed-point number, so one cell at `level` is `1 << (32 - level)` in the field. The addition
//! is done modulo `2^101`, a carry out of an axis field goes into the next field.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{GeoSotError, Result};
use crate::geosot3d::{Axis, GeoSot3dCode};
use crate::grid::free_bits;

/// Signed number of cells along every axis between two codes of the same level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
    /// Longitude steps.
    pub x: i32,
    /// Latitude steps.
    pub y: i32,
    /// Elevation steps.
    pub z: i32,
}

impl Offset {
    /// Zero offset.
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Creates a new offset.
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Component along the axis.
    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Lon => self.x,
            Axis::Lat => self.y,
            Axis::Ele => self.z,
        }
    }
}

impl GeoSot3dCode {
    /// Moves the code by `steps` cells of its own level along the axis.
    pub fn translate(&self, axis: Axis, steps: i32) -> GeoSot3dCode {
        let shift = axis.bit_offset() + free_bits(self.level());
        let delta = (steps as i128 as u128) << shift;
        GeoSot3dCode::from_bits_truncate(self.bits().wrapping_add(delta))
    }

    /// Moves the code along all three axes.
    pub fn add_offset(&self, offset: Offset) -> GeoSot3dCode {
        Axis::ALL
            .iter()
            .fold(*self, |code, axis| code.translate(*axis, offset.get(*axis)))
    }

    /// Number of cells to move `other` by to get `self`.
    ///
    /// Both codes are treated as codes at the level of `self`, the level of `other` is not
    /// checked. Use [`GeoSot3dCode::checked_sub`] to get an error for codes of different levels.
    pub fn offset_from(&self, other: &GeoSot3dCode) -> Offset {
        let shift = free_bits(self.level());
        let diff = |axis: Axis| {
            let a = self.axis(axis).bits() >> shift;
            let b = other.axis(axis).bits() >> shift;
            (a as i32).wrapping_sub(b as i32)
        };

        Offset::new(diff(Axis::Lon), diff(Axis::Lat), diff(Axis::Ele))
    }

    /// Same as [`GeoSot3dCode::offset_from`], but fails if the codes have different levels.
    pub fn checked_sub(&self, other: &GeoSot3dCode) -> Result<Offset> {
        if self.level() != other.level() {
            return Err(GeoSotError::LevelMismatch {
                left: self.level(),
                right: other.level(),
            });
        }

        Ok(self.offset_from(other))
    }
}

impl Add<Offset> for GeoSot3dCode {
    type Output = GeoSot3dCode;

    fn add(self, rhs: Offset) -> Self::Output {
        self.add_offset(rhs)
    }
}

impl Sub for GeoSot3dCode {
    type Output = Offset;

    fn sub(self, rhs: Self) -> Self::Output {
        self.offset_from(&rhs)
    }
}
