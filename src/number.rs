//! The closed numeric tower.
//!
//! Each representation the hasher understands is one variant here, and
//! [`scalar::hash_number`](crate::scalar::hash_number) is a single match
//! over them. Adding a numeric kind means adding a variant.

use std::hash::{Hash, Hasher};

use num_bigint::BigInt;
use num_rational::Ratio;
use num_traits::Zero;

use crate::HashCode;
use crate::bigfloat::BigFloat;
use crate::decompose::{Decompose, Decomposition};
use crate::error::Error;

/// Fixed-width integer of one of the eight machine widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedInt {
    /// Signed 8-bit.
    I8(i8),
    /// Signed 16-bit.
    I16(i16),
    /// Signed 32-bit.
    I32(i32),
    /// Signed 64-bit.
    I64(i64),
    /// Unsigned 8-bit.
    U8(u8),
    /// Unsigned 16-bit.
    U16(u16),
    /// Unsigned 32-bit.
    U32(u32),
    /// Unsigned 64-bit.
    U64(u64),
}

impl FixedInt {
    /// Width in bits.
    #[must_use]
    pub const fn width(self) -> u32 {
        match self {
            Self::I8(_) | Self::U8(_) => 8,
            Self::I16(_) | Self::U16(_) => 16,
            Self::I32(_) | Self::U32(_) => 32,
            Self::I64(_) | Self::U64(_) => 64,
        }
    }

    /// Returns `true` for the signed widths.
    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::I8(_) | Self::I16(_) | Self::I32(_) | Self::I64(_))
    }

    /// Sign- or zero-extends into a common 128-bit intermediate.
    ///
    /// Every value of every width is preserved exactly.
    #[must_use]
    pub const fn widen(self) -> i128 {
        match self {
            Self::I8(x) => x as i128,
            Self::I16(x) => x as i128,
            Self::I32(x) => x as i128,
            Self::I64(x) => x as i128,
            Self::U8(x) => x as i128,
            Self::U16(x) => x as i128,
            Self::U32(x) => x as i128,
            Self::U64(x) => x as i128,
        }
    }
}

/// Binary floating point at one of the supported precisions.
#[derive(Debug, Clone)]
pub enum Float {
    /// IEEE binary32.
    F32(f32),
    /// IEEE binary64.
    F64(f64),
    /// Arbitrary precision.
    Big(BigFloat),
}

impl Float {
    /// Returns `true` for a zero with the sign bit set.
    #[must_use]
    pub const fn is_negative_zero(&self) -> bool {
        match self {
            Self::F32(x) => *x == 0.0 && x.is_sign_negative(),
            Self::F64(x) => *x == 0.0 && x.is_sign_negative(),
            Self::Big(x) => x.is_zero() && x.is_sign_negative(),
        }
    }

    /// Significand width in bits.
    #[must_use]
    pub const fn precision(&self) -> u32 {
        match self {
            Self::F32(_) => f32::MANTISSA_DIGITS,
            Self::F64(_) => f64::MANTISSA_DIGITS,
            Self::Big(x) => x.precision(),
        }
    }
}

/// Ratio of two integers.
///
/// Not required to be in lowest terms and the denominator may be negative;
/// only the mathematical value matters for equality and hashing. A zero
/// denominator with a non-zero numerator is a signed infinity.
#[derive(Debug, Clone)]
pub enum Rational {
    /// Word-sized numerator and denominator.
    Small(Ratio<i64>),
    /// Arbitrary-precision numerator and denominator.
    Big(Ratio<BigInt>),
}

impl Rational {
    /// Word-sized ratio, stored as given.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroOverZero`] for `0//0`.
    pub const fn new(num: i64, den: i64) -> Result<Self, Error> {
        if num == 0 && den == 0 {
            return Err(Error::ZeroOverZero);
        }
        Ok(Self::Small(Ratio::new_raw(num, den)))
    }

    /// Arbitrary-precision ratio, stored as given.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroOverZero`] for `0//0`.
    pub fn new_big(num: BigInt, den: BigInt) -> Result<Self, Error> {
        if num.is_zero() && den.is_zero() {
            return Err(Error::ZeroOverZero);
        }
        Ok(Self::Big(Ratio::new_raw(num, den)))
    }

    /// Numerator as stored.
    #[must_use]
    pub fn numer(&self) -> BigInt {
        match self {
            Self::Small(r) => BigInt::from(*r.numer()),
            Self::Big(r) => r.numer().clone(),
        }
    }

    /// Denominator as stored.
    #[must_use]
    pub fn denom(&self) -> BigInt {
        match self {
            Self::Small(r) => BigInt::from(*r.denom()),
            Self::Big(r) => r.denom().clone(),
        }
    }
}

/// A scalar from the numeric tower.
#[derive(Debug, Clone)]
pub enum Number {
    /// Boolean; equal to the integers 0 and 1.
    Bool(bool),
    /// Fixed-width integer.
    Int(FixedInt),
    /// Arbitrary-precision integer.
    BigInt(BigInt),
    /// Ratio of integers.
    Rational(Rational),
    /// Floating point.
    Float(Float),
}

impl Number {
    /// Hashes this number with an explicit seed.
    #[must_use]
    pub fn hash_with_seed(&self, seed: HashCode) -> HashCode {
        crate::scalar::hash_number(self, seed)
    }

    /// Returns `true` for a float zero with the sign bit set.
    ///
    /// This is the sign channel decomposition does not carry.
    #[must_use]
    pub const fn is_negative_zero(&self) -> bool {
        match self {
            Self::Float(f) => f.is_negative_zero(),
            Self::Bool(_) | Self::Int(_) | Self::BigInt(_) | Self::Rational(_) => false,
        }
    }

    /// Checks `isequal`-style equality: equal mathematical value, NaN equal
    /// to NaN, `-0.0` distinct from every other zero.
    #[must_use]
    pub fn is_equal(&self, other: &Self) -> bool {
        crate::equality::numbers_equal(self, other)
    }
}

impl Decompose for FixedInt {
    fn decompose(&self) -> Decomposition {
        Decomposition::new(self.widen(), 0, 1)
    }
}

impl Decompose for Float {
    fn decompose(&self) -> Decomposition {
        match self {
            Self::F32(x) => x.decompose(),
            Self::F64(x) => x.decompose(),
            Self::Big(x) => x.decompose(),
        }
    }
}

impl Decompose for Rational {
    fn decompose(&self) -> Decomposition {
        match self {
            Self::Small(r) => r.decompose(),
            Self::Big(r) => r.decompose(),
        }
    }
}

impl Decompose for Number {
    fn decompose(&self) -> Decomposition {
        match self {
            Self::Bool(b) => b.decompose(),
            Self::Int(i) => i.decompose(),
            Self::BigInt(n) => n.decompose(),
            Self::Rational(r) => r.decompose(),
            Self::Float(f) => f.decompose(),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_with_seed(crate::DEFAULT_SEED));
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

macro_rules! number_from_fixed {
    ($($t:ty => $variant:ident),* $(,)?) => ($(
        impl From<$t> for Number {
            fn from(x: $t) -> Self {
                Self::Int(FixedInt::$variant(x))
            }
        }
    )*);
}

number_from_fixed! {
    i8 => I8, i16 => I16, i32 => I32, i64 => I64,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64,
}

impl From<bool> for Number {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<BigInt> for Number {
    fn from(n: BigInt) -> Self {
        Self::BigInt(n)
    }
}

impl From<f32> for Number {
    fn from(x: f32) -> Self {
        Self::Float(Float::F32(x))
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Self {
        Self::Float(Float::F64(x))
    }
}

impl From<BigFloat> for Number {
    fn from(x: BigFloat) -> Self {
        Self::Float(Float::Big(x))
    }
}

impl From<Rational> for Number {
    fn from(r: Rational) -> Self {
        Self::Rational(r)
    }
}
