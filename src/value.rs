//! Hashable values: numbers and the containers built from them.

use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use num_bigint::BigInt;

use crate::bigfloat::BigFloat;
use crate::error::Error;
use crate::number::{FixedInt, Float, Number, Rational};

/// Any value with a total equality relation and a consistent hash.
///
/// `Value` implements [`Eq`] and [`Hash`] in terms of
/// [`is_equal`](Self::is_equal) and [`crate::hash`], so it can key the std
/// collections directly.
#[derive(Debug, Clone)]
pub enum Value {
    /// A scalar from the numeric tower.
    Number(Number),
    /// Dense array with a shape.
    Array(Array),
    /// Lazily generated arithmetic progression.
    Range(Range),
    /// Fixed-length heterogeneous sequence.
    Tuple(Vec<Value>),
    /// Unordered collection of distinct values.
    Set(HashSet<Value>),
    /// Associative collection.
    Dict(HashMap<Value, Value>),
}

impl Value {
    /// One-dimensional array of `elements`.
    #[must_use]
    pub fn vector(elements: Vec<Self>) -> Self {
        Self::Array(Array::vector(elements))
    }

    /// Tuple of `items`.
    #[must_use]
    pub const fn tuple(items: Vec<Self>) -> Self {
        Self::Tuple(items)
    }

    /// Set of the distinct values in `items`; later duplicates are dropped.
    #[must_use]
    pub fn set(items: impl IntoIterator<Item = Self>) -> Self {
        Self::Set(items.into_iter().collect())
    }

    /// Dictionary from `(key, value)` pairs; a later pair overwrites an
    /// earlier one with an equal key.
    #[must_use]
    pub fn dict(pairs: impl IntoIterator<Item = (Self, Self)>) -> Self {
        Self::Dict(pairs.into_iter().collect())
    }

    /// Returns the number if this value is a scalar.
    #[must_use]
    pub const fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Checks `isequal`-style equality.
    #[must_use]
    pub fn is_equal(&self, other: &Self) -> bool {
        crate::equality::values_equal(self, other)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(crate::hash(self));
    }
}

// ---------------------------------------------------------------------------
// Array
// ---------------------------------------------------------------------------

/// Dense N-dimensional array stored in column-major order.
#[derive(Debug, Clone)]
pub struct Array {
    dims: Vec<usize>,
    elements: Vec<Value>,
}

impl Array {
    /// Builds an array of shape `dims` from column-major `elements`.
    ///
    /// # Errors
    ///
    /// [`Error::ShapeOverflow`] if the dimensions overflow `usize`,
    /// [`Error::ShapeMismatch`] if they do not multiply out to
    /// `elements.len()`.
    pub fn new(dims: Vec<usize>, elements: Vec<Value>) -> Result<Self, Error> {
        let Some(expected) = dims.iter().try_fold(1_usize, |acc, &d| acc.checked_mul(d)) else {
            return Err(Error::ShapeOverflow { dims });
        };
        if expected != elements.len() {
            return Err(Error::ShapeMismatch {
                dims,
                expected,
                actual: elements.len(),
            });
        }
        Ok(Self { dims, elements })
    }

    /// One-dimensional array.
    #[must_use]
    pub fn vector(elements: Vec<Value>) -> Self {
        Self {
            dims: vec![elements.len()],
            elements,
        }
    }

    /// Extent of each dimension.
    #[must_use]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Elements in column-major order.
    #[must_use]
    pub fn elements(&self) -> &[Value] {
        &self.elements
    }

    /// Number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the array has no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// Arithmetic progression whose elements are produced on demand.
///
/// A range is equal to, and hashes like, the vector of its realized
/// elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Range {
    /// `start, start + step, …` as `i64` elements.
    Int {
        /// First element.
        start: i64,
        /// Difference between consecutive elements.
        step: i64,
        /// Number of elements.
        len: usize,
    },
    /// `start + i · step` as `f64` elements, each computed with a single
    /// rounding.
    Float {
        /// First element.
        start: f64,
        /// Difference between consecutive elements.
        step: f64,
        /// Number of elements.
        len: usize,
    },
}

impl Range {
    /// Integer progression of `len` elements.
    ///
    /// # Errors
    ///
    /// [`Error::RangeOverflow`] if the last element does not fit `i64`.
    pub fn int(start: i64, step: i64, len: usize) -> Result<Self, Error> {
        if let Some(last_offset) = len.checked_sub(1) {
            let last = i128::try_from(last_offset)
                .ok()
                .and_then(|n| i128::from(step).checked_mul(n))
                .and_then(|d| i128::from(start).checked_add(d))
                .and_then(|l| i64::try_from(l).ok());
            if last.is_none() {
                return Err(Error::RangeOverflow { start, step, len });
            }
        }
        Ok(Self::Int { start, step, len })
    }

    /// Unit-step integer progression `start..=stop`; empty when
    /// `stop < start`.
    ///
    /// # Errors
    ///
    /// [`Error::RangeOverflow`] if the length does not fit `usize`.
    pub fn unit(start: i64, stop: i64) -> Result<Self, Error> {
        let len = (i128::from(stop) - i128::from(start) + 1).max(0);
        let len = usize::try_from(len).map_err(|_| Error::RangeOverflow {
            start,
            step: 1,
            len: usize::MAX,
        })?;
        Ok(Self::Int {
            start,
            step: 1,
            len,
        })
    }

    /// Float progression of `len` elements.
    ///
    /// # Errors
    ///
    /// [`Error::NonFiniteRange`] if `start` or `step` is NaN or infinite.
    pub const fn float(start: f64, step: f64, len: usize) -> Result<Self, Error> {
        if !start.is_finite() || !step.is_finite() {
            return Err(Error::NonFiniteRange { start, step });
        }
        Ok(Self::Float { start, step, len })
    }

    /// Number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Int { len, .. } | Self::Float { len, .. } => *len,
        }
    }

    /// Returns `true` if the range has no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element `i`, or `None` past the end.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<Number> {
        if i >= self.len() {
            return None;
        }
        Some(match *self {
            Self::Int { start, step, .. } => {
                // In bounds: construction checked the last element fits.
                let x = i128::from(start) + i128::from(step) * i as i128;
                Number::Int(FixedInt::I64(x as i64))
            }
            Self::Float { start, step, .. } => {
                Number::Float(Float::F64(step.mul_add(i as f64, start)))
            }
        })
    }

    /// Iterates over the realized elements.
    pub fn iter(&self) -> impl Iterator<Item = Number> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }

    /// Materializes the range into a vector.
    #[must_use]
    pub fn collect_vector(&self) -> Array {
        Array::vector(self.iter().map(Value::Number).collect())
    }

    /// Returns `true` when consecutive elements can never be equal.
    pub(crate) const fn strictly_monotone(&self) -> bool {
        matches!(self, Self::Int { step, .. } if *step != 0)
    }
}

// ---------------------------------------------------------------------------
// Uniform element access for arrays and ranges
// ---------------------------------------------------------------------------

/// Borrowed or produced element of an [`ArrayView`].
#[derive(Debug)]
pub(crate) enum Element<'a> {
    Value(&'a Value),
    Number(Number),
}

/// Array-like view shared by the combinator and equality, so that an
/// [`Array`] and a [`Range`] are walked identically.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ArrayView<'a> {
    Array(&'a Array),
    Range(&'a Range),
}

impl<'a> ArrayView<'a> {
    pub(crate) const fn of(value: &'a Value) -> Option<Self> {
        match value {
            Value::Array(a) => Some(Self::Array(a)),
            Value::Range(r) => Some(Self::Range(r)),
            _ => None,
        }
    }

    pub(crate) const fn len(self) -> usize {
        match self {
            Self::Array(a) => a.len(),
            Self::Range(r) => r.len(),
        }
    }

    pub(crate) fn dims(self) -> Vec<usize> {
        match self {
            Self::Array(a) => a.dims().to_vec(),
            Self::Range(r) => vec![r.len()],
        }
    }

    /// Element `i`; callers keep `i < len()`.
    pub(crate) fn get(self, i: usize) -> Option<Element<'a>> {
        match self {
            Self::Array(a) => a.elements().get(i).map(Element::Value),
            Self::Range(r) => r.get(i).map(Element::Number),
        }
    }

    /// Largest index `<= from` whose element is not equal to `elt`.
    ///
    /// `elt` must be the element at some index past `from`.
    pub(crate) fn find_prev_distinct(self, from: usize, elt: &Element<'_>) -> Option<usize> {
        let distinct =
            |k: usize| self.get(k).is_some_and(|e| !crate::equality::elements_equal(&e, elt));
        let Self::Range(r) = self else {
            return (0..=from).rev().find(|&k| distinct(k));
        };
        if r.strictly_monotone() {
            return Some(from);
        }
        // Range elements are monotone, so those equal to `elt` form a
        // suffix of `0..=from`. Constant ranges are all suffix.
        let (mut lo, mut hi) = (0, from + 1);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if distinct(mid) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo.checked_sub(1)
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

macro_rules! value_from_number {
    ($($t:ty),* $(,)?) => ($(
        impl From<$t> for Value {
            fn from(x: $t) -> Self {
                Self::Number(Number::from(x))
            }
        }
    )*);
}

value_from_number! { bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, BigInt, BigFloat, Rational }

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Self::Array(a)
    }
}

impl From<Range> for Value {
    fn from(r: Range) -> Self {
        Self::Range(r)
    }
}
