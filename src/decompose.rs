//! Exact decomposition of real values into `num · 2^pow / den`.
//!
//! [`Decomposition`] is the raw triple a value reports about itself; it is
//! exact but not unique (`1//2` and `2//4` decompose differently).
//! [`Canonical`] is the unique normal form both hashing and equality are
//! defined on.

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_rational::Ratio;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Smallest binary exponent of an `f64` unit in the last place (subnormal).
pub const F64_MIN_POW: i64 = -1074;

/// Largest binary exponent of the leading bit of a finite `f64`.
pub const F64_MAX_TOP: i64 = 1023;

/// Significand width of `f64`, implicit bit included.
pub const F64_MANTISSA_BITS: u64 = 53;

const F64_FRACTION_MASK: u64 = (1 << 52) - 1;
const F64_SIGN_BIT: u64 = 1 << 63;

/// Exact triple with `value == num · 2^pow / den`.
///
/// Finite values have `den > 0`; floats always report `den == 1`.
/// Zero is `(0, 0, 1)` whatever its sign. NaN is `(0, 0, 0)` and `±∞` is
/// `(±1, 0, 0)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    /// Signed numerator.
    pub num: BigInt,
    /// Power of two applied to the numerator.
    pub pow: i64,
    /// Denominator; zero only for NaN and infinities.
    pub den: BigInt,
}

/// Unique normal form of a real value.
///
/// `Finite` holds positive, odd, coprime `num` and `den`, so two finite
/// values are equal exactly when their canonical forms are. `pow` is wider
/// than [`Decomposition::pow`] so moving trailing zeros into it is exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Canonical {
    /// Not a number.
    NaN,
    /// Positive or negative infinity.
    Infinite {
        /// Sign of the infinity.
        negative: bool,
    },
    /// Zero. The sign of a float zero is not part of its magnitude.
    Zero,
    /// `(-1)^negative · num · 2^pow / den`.
    Finite {
        /// Sign of the value.
        negative: bool,
        /// Odd numerator magnitude.
        num: BigUint,
        /// Binary exponent.
        pow: i128,
        /// Odd denominator, coprime with `num`.
        den: BigUint,
    },
}

/// Values that can report themselves exactly as a [`Decomposition`].
pub trait Decompose {
    /// Returns the exact `(num, pow, den)` triple of `self`.
    fn decompose(&self) -> Decomposition;

    /// Returns the canonical form of `self`.
    fn canonical(&self) -> Canonical {
        self.decompose().canonical()
    }
}

impl Decomposition {
    /// Builds a triple from its parts.
    #[must_use]
    pub fn new(num: impl Into<BigInt>, pow: i64, den: impl Into<BigInt>) -> Self {
        Self {
            num: num.into(),
            pow,
            den: den.into(),
        }
    }

    /// The degenerate zero triple `(0, 0, 1)`.
    #[must_use]
    pub fn zero() -> Self {
        Self::new(0, 0, 1)
    }

    /// Returns `true` when the triple denotes a finite value.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        !self.den.is_zero()
    }

    /// Reduces the triple to its unique [`Canonical`] form.
    ///
    /// Powers of two move into `pow`, the odd parts are divided by their
    /// gcd and the sign moves onto the numerator.
    #[must_use]
    pub fn canonical(&self) -> Canonical {
        if self.den.is_zero() {
            return if self.num.is_zero() {
                Canonical::NaN
            } else {
                Canonical::Infinite {
                    negative: self.num.is_negative(),
                }
            };
        }
        if self.num.is_zero() {
            return Canonical::Zero;
        }

        let negative = self.num.is_negative() != self.den.is_negative();
        let mut num = self.num.magnitude().clone();
        let mut den = self.den.magnitude().clone();

        let num_zeros = num.trailing_zeros().unwrap_or(0);
        let den_zeros = den.trailing_zeros().unwrap_or(0);
        num >>= num_zeros;
        den >>= den_zeros;

        let g = num.gcd(&den);
        if !g.is_one() {
            num /= &g;
            den /= &g;
        }

        // |pow| < 2^63 and both zero counts are below 2^64: no overflow.
        let pow = i128::from(self.pow) + i128::from(num_zeros) - i128::from(den_zeros);
        Canonical::Finite {
            negative,
            num,
            pow,
            den,
        }
    }
}

impl Canonical {
    /// Returns `true` for finite values with unit denominator and
    /// non-negative exponent.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        match self {
            Self::Zero => true,
            Self::Finite { pow, den, .. } => *pow >= 0 && den.is_one(),
            Self::NaN | Self::Infinite { .. } => false,
        }
    }

    /// Returns the value as an `f64` if, and only if, it is exactly one.
    ///
    /// Covers normal and subnormal magnitudes, zero, the infinities and
    /// NaN. Zero comes back as `+0.0`.
    #[must_use]
    pub fn to_f64_exact(&self) -> Option<f64> {
        match self {
            Self::NaN => Some(f64::NAN),
            Self::Infinite { negative: false } => Some(f64::INFINITY),
            Self::Infinite { negative: true } => Some(f64::NEG_INFINITY),
            Self::Zero => Some(0.0),
            Self::Finite {
                negative,
                num,
                pow,
                den,
            } => {
                if !den.is_one() {
                    return None;
                }
                let bits = num.bits();
                if bits > F64_MANTISSA_BITS {
                    return None;
                }
                let top = pow + i128::from(bits) - 1;
                if *pow < i128::from(F64_MIN_POW) || top > i128::from(F64_MAX_TOP) {
                    return None;
                }
                let mantissa = num.to_u64()?;
                let magnitude = if top >= -1022 {
                    let biased = (top + 1023) as u64;
                    let fraction = (mantissa << (F64_MANTISSA_BITS - bits)) & F64_FRACTION_MASK;
                    (biased << 52) | fraction
                } else {
                    // Subnormal: the unit in the last place is 2^-1074.
                    mantissa << (pow - i128::from(F64_MIN_POW)) as u32
                };
                let sign = if *negative { F64_SIGN_BIT } else { 0 };
                Some(f64::from_bits(sign | magnitude))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Primitive impls
// ---------------------------------------------------------------------------

macro_rules! decompose_int {
    ($($t:ty)*) => ($(
        impl Decompose for $t {
            fn decompose(&self) -> Decomposition {
                Decomposition::new(*self, 0, 1)
            }
        }
    )*);
}

decompose_int! { i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 }

impl Decompose for bool {
    fn decompose(&self) -> Decomposition {
        Decomposition::new(u8::from(*self), 0, 1)
    }
}

impl Decompose for BigInt {
    fn decompose(&self) -> Decomposition {
        Decomposition::new(self.clone(), 0, 1)
    }
}

impl Decompose for BigUint {
    fn decompose(&self) -> Decomposition {
        Decomposition::new(BigInt::from_biguint(Sign::Plus, self.clone()), 0, 1)
    }
}

impl Decompose for Ratio<i64> {
    fn decompose(&self) -> Decomposition {
        Decomposition::new(*self.numer(), 0, *self.denom())
    }
}

impl Decompose for Ratio<BigInt> {
    fn decompose(&self) -> Decomposition {
        Decomposition::new(self.numer().clone(), 0, self.denom().clone())
    }
}

impl Decompose for f64 {
    fn decompose(&self) -> Decomposition {
        if self.is_nan() {
            return Decomposition::new(0, 0, 0);
        }
        if self.is_infinite() {
            return Decomposition::new(if *self < 0.0 { -1 } else { 1 }, 0, 0);
        }
        let bits = self.to_bits();
        let exponent = ((bits >> 52) & 0x7FF) as i64;
        let fraction = bits & F64_FRACTION_MASK;
        let (mantissa, pow) = if exponent == 0 {
            (fraction, F64_MIN_POW)
        } else {
            (fraction | (1 << 52), exponent - 1075)
        };
        if mantissa == 0 {
            return Decomposition::zero();
        }
        let num = BigInt::from(mantissa);
        let num = if self.is_sign_negative() { -num } else { num };
        Decomposition::new(num, pow, 1)
    }
}

impl Decompose for f32 {
    fn decompose(&self) -> Decomposition {
        if self.is_nan() {
            return Decomposition::new(0, 0, 0);
        }
        if self.is_infinite() {
            return Decomposition::new(if *self < 0.0 { -1 } else { 1 }, 0, 0);
        }
        let bits = self.to_bits();
        let exponent = i64::from((bits >> 23) & 0xFF);
        let fraction = bits & ((1 << 23) - 1);
        let (mantissa, pow) = if exponent == 0 {
            (fraction, -149)
        } else {
            (fraction | (1 << 23), exponent - 150)
        };
        if mantissa == 0 {
            return Decomposition::zero();
        }
        let num = BigInt::from(mantissa);
        let num = if self.is_sign_negative() { -num } else { num };
        Decomposition::new(num, pow, 1)
    }
}
