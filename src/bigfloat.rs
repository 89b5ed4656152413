//! Arbitrary-precision binary floating point.
//!
//! A [`BigFloat`] is a value type: sign, magnitude `mantissa · 2^exponent`
//! and the precision (significand width in bits) it was created at. The
//! crate never does arithmetic on it; it only needs to build values with
//! correct rounding and to take them apart exactly.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::decompose::{Canonical, Decompose, Decomposition};
use crate::error::Error;

/// Precision used when none is given, in bits.
pub const DEFAULT_PRECISION: u32 = 256;

#[derive(Debug, Clone)]
enum Repr {
    NaN,
    Infinite,
    Zero,
    /// Invariant: `mantissa != 0` and `mantissa.bits() <= precision`.
    Finite { mantissa: BigUint, exponent: i64 },
}

/// Binary float with a per-value precision.
#[derive(Debug, Clone)]
pub struct BigFloat {
    negative: bool,
    repr: Repr,
    precision: u32,
}

const fn check_precision(precision: u32) -> Result<u32, Error> {
    if precision == 0 {
        Err(Error::ZeroPrecision)
    } else {
        Ok(precision)
    }
}

impl BigFloat {
    /// Not a number.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroPrecision`] if `precision == 0`.
    pub fn nan(precision: u32) -> Result<Self, Error> {
        let precision = check_precision(precision)?;
        Ok(Self {
            negative: false,
            repr: Repr::NaN,
            precision,
        })
    }

    /// Positive or negative infinity.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroPrecision`] if `precision == 0`.
    pub fn infinity(negative: bool, precision: u32) -> Result<Self, Error> {
        let precision = check_precision(precision)?;
        Ok(Self {
            negative,
            repr: Repr::Infinite,
            precision,
        })
    }

    /// Signed zero.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroPrecision`] if `precision == 0`.
    pub fn zero(negative: bool, precision: u32) -> Result<Self, Error> {
        let precision = check_precision(precision)?;
        Ok(Self {
            negative,
            repr: Repr::Zero,
            precision,
        })
    }

    /// Builds `±mantissa · 2^exponent`, rounding the mantissa to
    /// `precision` bits (nearest, ties to even).
    ///
    /// # Errors
    ///
    /// [`Error::ZeroPrecision`] if `precision == 0`, and
    /// [`Error::ExponentOverflow`] if rounding carries the exponent past
    /// `i64::MAX`.
    pub fn from_parts(
        negative: bool,
        mantissa: BigUint,
        exponent: i64,
        precision: u32,
    ) -> Result<Self, Error> {
        let precision = check_precision(precision)?;
        if mantissa.is_zero() {
            return Self::zero(negative, precision);
        }
        let (mantissa, exponent) =
            round_ratio(&mantissa, &BigUint::one(), i128::from(exponent), precision)?;
        Ok(Self {
            negative,
            repr: Repr::Finite { mantissa, exponent },
            precision,
        })
    }

    /// Converts an `f64`, keeping the sign of zero.
    ///
    /// Exact whenever `precision >= 53`.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroPrecision`] if `precision == 0`.
    pub fn from_f64(x: f64, precision: u32) -> Result<Self, Error> {
        if x == 0.0 {
            return Self::zero(x.is_sign_negative(), precision);
        }
        Self::from_decomposition(&x.decompose(), precision)
    }

    /// Converts an integer, rounding it to `precision` bits.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroPrecision`] if `precision == 0`. The exponent of any
    /// integer that fits in memory fits `i64`.
    pub fn from_bigint(n: &BigInt, precision: u32) -> Result<Self, Error> {
        Self::from_decomposition(&n.decompose(), precision)
    }

    /// Rebuilds the value `num · 2^pow / den` at `precision` bits.
    ///
    /// This is the inverse of [`Decompose::decompose`]: decomposing a value
    /// of precision `P` and rebuilding it at `P` gives back the same value
    /// at the same precision. Zero always comes back positive; the triple
    /// carries no sign for it.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroPrecision`] if `precision == 0`, and
    /// [`Error::ExponentOverflow`] if the rounded exponent does not fit
    /// `i64`.
    pub fn from_decomposition(d: &Decomposition, precision: u32) -> Result<Self, Error> {
        let precision = check_precision(precision)?;
        Self::rebuild(d, precision)
    }

    /// `precision` is already known to be non-zero.
    fn rebuild(d: &Decomposition, precision: u32) -> Result<Self, Error> {
        let (negative, repr) = match d.canonical() {
            Canonical::NaN => (false, Repr::NaN),
            Canonical::Infinite { negative } => (negative, Repr::Infinite),
            Canonical::Zero => (false, Repr::Zero),
            Canonical::Finite {
                negative,
                num,
                pow,
                den,
            } => {
                let (mantissa, exponent) = round_ratio(&num, &den, pow, precision)?;
                (negative, Repr::Finite { mantissa, exponent })
            }
        };
        Ok(Self {
            negative,
            repr,
            precision,
        })
    }

    /// Returns this value rounded to a new precision.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroPrecision`] if `precision == 0`, and
    /// [`Error::ExponentOverflow`] if rounding up carries the exponent past
    /// `i64::MAX`.
    pub fn with_precision(&self, precision: u32) -> Result<Self, Error> {
        match self.repr {
            Repr::Zero => Self::zero(self.negative, precision),
            _ => Self::from_decomposition(&self.decompose(), precision),
        }
    }

    /// Significand width in bits.
    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// Returns `true` for NaN.
    #[must_use]
    pub const fn is_nan(&self) -> bool {
        matches!(self.repr, Repr::NaN)
    }

    /// Returns `true` for either infinity.
    #[must_use]
    pub const fn is_infinite(&self) -> bool {
        matches!(self.repr, Repr::Infinite)
    }

    /// Returns `true` for either zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        matches!(self.repr, Repr::Zero)
    }

    /// Returns `true` if the sign bit is set, including for `-0`.
    #[must_use]
    pub const fn is_sign_negative(&self) -> bool {
        self.negative
    }

    /// Magnitude significand and exponent of a finite non-zero value.
    #[must_use]
    pub const fn parts(&self) -> Option<(&BigUint, i64)> {
        match &self.repr {
            Repr::Finite { mantissa, exponent } => Some((mantissa, *exponent)),
            _ => None,
        }
    }
}

impl From<f64> for BigFloat {
    /// Converts exactly at [`DEFAULT_PRECISION`], keeping the sign of zero.
    fn from(x: f64) -> Self {
        let repr = if x.is_nan() {
            Repr::NaN
        } else if x.is_infinite() {
            Repr::Infinite
        } else if x == 0.0 {
            Repr::Zero
        } else {
            // 53 significant bits always fit the default precision.
            let d = x.decompose();
            Repr::Finite {
                mantissa: d.num.magnitude().clone(),
                exponent: d.pow,
            }
        };
        Self {
            negative: x.is_sign_negative() && !x.is_nan(),
            repr,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl From<&BigInt> for BigFloat {
    /// Converts at [`DEFAULT_PRECISION`]; wider integers are rounded.
    fn from(n: &BigInt) -> Self {
        let negative = n.is_negative();
        if n.is_zero() {
            return Self {
                negative: false,
                repr: Repr::Zero,
                precision: DEFAULT_PRECISION,
            };
        }
        let repr = match round_ratio(n.magnitude(), &BigUint::one(), 0, DEFAULT_PRECISION) {
            Ok((mantissa, exponent)) => Repr::Finite { mantissa, exponent },
            // Only an integer of more than 2^63 bits gets here.
            Err(_) => Repr::Infinite,
        };
        Self {
            negative,
            repr,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl Decomposition {
    /// Rebuilds the triple as a [`BigFloat`] of `precision` bits, rounding
    /// to nearest with ties to even.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroPrecision`] if `precision == 0`, and
    /// [`Error::ExponentOverflow`] if the rounded exponent does not fit
    /// `i64`.
    pub fn to_big_float(&self, precision: u32) -> Result<BigFloat, Error> {
        BigFloat::from_decomposition(self, precision)
    }
}

impl Decompose for BigFloat {
    fn decompose(&self) -> Decomposition {
        match &self.repr {
            Repr::NaN => Decomposition::new(0, 0, 0),
            Repr::Infinite => Decomposition::new(if self.negative { -1 } else { 1 }, 0, 0),
            Repr::Zero => Decomposition::zero(),
            Repr::Finite { mantissa, exponent } => {
                let num = BigInt::from(mantissa.clone());
                let num = if self.negative { -num } else { num };
                Decomposition::new(num, *exponent, 1)
            }
        }
    }
}

/// Rounds the positive ratio `num / den · 2^pow` to `precision` significant
/// bits, nearest with ties to even. Returns `(mantissa, exponent)`.
///
/// An exponent past `i64::MAX` is pulled back into range by shifting the
/// mantissa left while it still fits `precision` bits.
fn round_ratio(
    num: &BigUint,
    den: &BigUint,
    pow: i128,
    precision: u32,
) -> Result<(BigUint, i64), Error> {
    let p = u64::from(precision);
    let (mut mantissa, mut exponent) = if den.is_one() && num.bits() <= p {
        (num.clone(), pow)
    } else {
        round_quotient(num, den, pow, p)
    };

    let max = i128::from(i64::MAX);
    if exponent > max {
        let shift = exponent - max;
        let room = i128::from(p - mantissa.bits());
        if shift > room {
            return Err(Error::ExponentOverflow { precision });
        }
        mantissa <<= shift as u64;
        exponent = max;
    }
    let exponent = i64::try_from(exponent).map_err(|_| Error::ExponentOverflow { precision })?;
    Ok((mantissa, exponent))
}

fn round_quotient(num: &BigUint, den: &BigUint, pow: i128, p: u64) -> (BigUint, i128) {
    // Scale so the integer quotient carries at least two bits past the
    // precision: one to round on, one more so `half` is never fractional.
    let k = i128::from(p + 2) + i128::from(den.bits()) - i128::from(num.bits());
    let (scaled_num, scaled_den) = if k >= 0 {
        (num << k.unsigned_abs(), den.clone())
    } else {
        (num.clone(), den << k.unsigned_abs())
    };
    let (q, r) = scaled_num.div_rem(&scaled_den);

    let excess = q.bits() - p;
    let mut mantissa = &q >> excess;
    let rem = &q - (&mantissa << excess);
    let half = BigUint::one() << (excess - 1);
    let sticky = !r.is_zero();
    let round_up = rem > half || (rem == half && (sticky || mantissa.is_odd()));
    if sticky || !rem.is_zero() {
        tracing::trace!(precision = p, round_up, "inexact BigFloat rounding");
    }
    if round_up {
        mantissa += 1_u32;
    }

    let mut exponent = pow - k + i128::from(excess);
    if mantissa.bits() > p {
        mantissa >>= 1_u32;
        exponent += 1;
    }
    (mantissa, exponent)
}
