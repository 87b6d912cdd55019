//! Fixed-point representation of an angle used by all GeoSOT axes.
//!
//! A [`DegreeCode`] packs a signed decimal degree value into 32 bits:
//!
//! ```text
//!  31 | 30 ..... 23 | 22 .. 17 | 16 .. 11 | 10 ........ 0
//! sign|   degree    |  minute  |  second  | 1/2048 second
//! ```
//!
//! The magnitude is sign-magnitude encoded, so bit `31 - k` of the code is the `k`-th level split
//! of the GeoSOT grid.

use serde::{Deserialize, Serialize};

use crate::error::{GeoSotError, Result};

const SIGN_SHIFT: u32 = 31;
const DEGREE_SHIFT: u32 = 23;
const MINUTE_SHIFT: u32 = 17;
const SECOND_SHIFT: u32 = 11;

const DEGREE_MASK: u32 = 0xFF;
const MINUTE_MASK: u32 = 0x3F;
const SECOND_MASK: u32 = 0x3F;
const SUBSECOND_MASK: u32 = 0x7FF;

/// Number of subsecond units in one second.
pub const SUBSECONDS: u32 = 2048;

/// Largest integer degree value that fits into the degree field.
pub const MAX_DEGREE: u32 = DEGREE_MASK;

/// Fixed-point degree-minute-second code of a single coordinate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct DegreeCode(u32);

impl DegreeCode {
    /// Creates a code from its raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw 32-bit value.
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Returns true if the code represents a negative value.
    pub fn is_negative(&self) -> bool {
        self.0 >> SIGN_SHIFT == 1
    }

    /// Integer degrees of the magnitude.
    pub fn degrees(&self) -> u32 {
        (self.0 >> DEGREE_SHIFT) & DEGREE_MASK
    }

    /// Minutes of the magnitude.
    pub fn minutes(&self) -> u32 {
        (self.0 >> MINUTE_SHIFT) & MINUTE_MASK
    }

    /// Whole seconds of the magnitude.
    pub fn seconds(&self) -> u32 {
        (self.0 >> SECOND_SHIFT) & SECOND_MASK
    }

    /// Fraction of a second in units of `1/2048`.
    pub fn subseconds(&self) -> u32 {
        self.0 & SUBSECOND_MASK
    }

    /// Decodes the value into decimal degrees.
    pub fn to_degrees(&self) -> f64 {
        let seconds = self.seconds() as f64 + self.subseconds() as f64 / SUBSECONDS as f64;
        let value = self.degrees() as f64 + self.minutes() as f64 / 60.0 + seconds / 3600.0;

        if self.is_negative() {
            -value
        } else {
            value
        }
    }
}

impl From<DegreeCode> for u32 {
    fn from(value: DegreeCode) -> Self {
        value.0
    }
}

/// What a [`DegreeCodec`] does with values whose integer part does not fit into 8 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RangeCheck {
    /// Return [`GeoSotError::DegreeOutOfRange`].
    #[default]
    Strict,
    /// Keep only the lower 8 bits of the integer degrees.
    Wrap,
}

/// Converts decimal degrees into [`DegreeCode`]s.
///
/// Minutes and seconds are rounded to a configured number of decimal digits before being
/// truncated. Without this step a value like `116.3` would be encoded as `116°17'59.99..."`
/// because of binary floating point representation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DegreeCodec {
    minute_precision: i32,
    second_precision: i32,
    range_check: RangeCheck,
}

impl Default for DegreeCodec {
    fn default() -> Self {
        Self {
            minute_precision: 6,
            second_precision: 4,
            range_check: RangeCheck::Strict,
        }
    }
}

impl DegreeCodec {
    /// Number of decimal digits minutes are rounded to before truncation.
    pub fn minute_precision(&self) -> i32 {
        self.minute_precision
    }

    /// Sets number of decimal digits minutes are rounded to before truncation.
    pub fn with_minute_precision(mut self, precision: i32) -> Self {
        self.minute_precision = precision;
        self
    }

    /// Number of decimal digits seconds are rounded to before truncation.
    pub fn second_precision(&self) -> i32 {
        self.second_precision
    }

    /// Sets number of decimal digits seconds are rounded to before truncation.
    pub fn with_second_precision(mut self, precision: i32) -> Self {
        self.second_precision = precision;
        self
    }

    /// Handling of values that do not fit into the degree field.
    pub fn range_check(&self) -> RangeCheck {
        self.range_check
    }

    /// Sets handling of values that do not fit into the degree field.
    pub fn with_range_check(mut self, range_check: RangeCheck) -> Self {
        self.range_check = range_check;
        self
    }

    /// Encodes decimal degrees.
    ///
    /// Every component is truncated, so the decoded value is never further from zero than the
    /// input (up to the rounding of the intermediate minutes and seconds).
    pub fn encode(&self, degrees: f64) -> Result<DegreeCode> {
        if !degrees.is_finite() {
            return Err(GeoSotError::DegreeOutOfRange(degrees));
        }

        let sign = u32::from(degrees < 0.0);
        let value = degrees.abs();

        let whole = value.floor();
        let degree = if whole > MAX_DEGREE as f64 {
            match self.range_check {
                RangeCheck::Strict => return Err(GeoSotError::DegreeOutOfRange(degrees)),
                RangeCheck::Wrap => {
                    log::warn!("Degree value {degrees} does not fit into 8 bits and is wrapped");
                    (whole as u64 & DEGREE_MASK as u64) as u32
                }
            }
        } else {
            whole as u32
        };

        let minutes = round_to((value - whole) * 60.0, self.minute_precision);
        let minute = minutes.floor();
        let seconds = round_to((minutes - minute) * 60.0, self.second_precision);
        let second = seconds.floor();
        let subsecond = ((seconds - second) * SUBSECONDS as f64).floor();

        Ok(DegreeCode(
            (sign << SIGN_SHIFT)
                | (degree << DEGREE_SHIFT)
                | ((minute as u32 & MINUTE_MASK) << MINUTE_SHIFT)
                | ((second as u32 & SECOND_MASK) << SECOND_SHIFT)
                | (subsecond as u32 & SUBSECOND_MASK),
        ))
    }

    /// Decodes a code into decimal degrees. Same as [`DegreeCode::to_degrees`].
    pub fn decode(&self, code: DegreeCode) -> f64 {
        code.to_degrees()
    }
}

fn round_to(value: f64, digits: i32) -> f64 {
    let k = 10f64.powi(digits);
    (value * k).round() / k
}
