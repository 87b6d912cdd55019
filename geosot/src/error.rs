//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoSotError {
    /// Grid level is outside of the supported `1..=32` range.
    #[error("level {0} is outside of the supported range [1, 32]")]
    InvalidLevel(usize),
    /// Decimal degree value cannot be represented by a degree code (integer part does not fit into
    /// 8 bits or the value is not finite).
    #[error("degree value {0} cannot be represented by a degree code")]
    DegreeOutOfRange(f64),
    /// Height is below the center of the ellipsoid or is not finite.
    #[error("height {0} cannot be encoded")]
    HeightOutOfRange(f64),
    /// Shell index of the logarithmic elevation code does not fit into the bits available at the
    /// level.
    #[error("elevation shell index {index} does not fit into a level {level} code")]
    ElevationOutOfRange {
        /// Signed shell index that was calculated.
        index: i64,
        /// Requested level.
        level: u8,
    },
    /// Two codes were expected to have the same level.
    #[error("codes have different levels: {left} and {right}")]
    LevelMismatch {
        /// Level of the first operand.
        left: u8,
        /// Level of the second operand.
        right: u8,
    },
    /// Input string cannot be parsed.
    #[error("malformed code: {0}")]
    Malformed(String),
}

/// Result type with [`GeoSotError`] as the error.
pub type Result<T> = std::result::Result<T, GeoSotError>;
