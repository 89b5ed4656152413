//! Construction errors.
//!
//! Hashing itself is total. Only building a value from raw parts can fail,
//! and every failure is reported here before the value can reach a hasher.

use thiserror::Error;

/// Rejected input while constructing a hashable value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Array dimensions do not multiply out to the element count.
    #[error("array shape {dims:?} needs {expected} elements, got {actual}")]
    ShapeMismatch {
        /// Requested dimensions.
        dims: Vec<usize>,
        /// Product of `dims`.
        expected: usize,
        /// Elements supplied.
        actual: usize,
    },
    /// Dimensions overflow `usize` when multiplied.
    #[error("array shape {dims:?} overflows usize")]
    ShapeOverflow {
        /// Requested dimensions.
        dims: Vec<usize>,
    },
    /// Floating-point precision must be at least one bit.
    #[error("floating-point precision must be at least 1 bit")]
    ZeroPrecision,
    /// A rounded binary exponent does not fit `i64`.
    #[error("binary exponent of a {precision}-bit float overflows i64")]
    ExponentOverflow {
        /// Precision the value was being rounded to.
        precision: u32,
    },
    /// `0//0` has no value.
    #[error("rational 0//0 is undefined")]
    ZeroOverZero,
    /// Float range with a NaN or infinite start or step.
    #[error("range start and step must be finite, got start={start}, step={step}")]
    NonFiniteRange {
        /// Range start.
        start: f64,
        /// Range step.
        step: f64,
    },
    /// Integer range whose last element overflows `i64`.
    #[error("range {start}:{step} with {len} elements overflows i64")]
    RangeOverflow {
        /// Range start.
        start: i64,
        /// Range step.
        step: i64,
        /// Requested length.
        len: usize,
    },
}
