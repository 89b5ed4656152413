//! Numeric-scalar hashing.
//!
//! Every number is routed to exactly one of four leaf forms, chosen by its
//! mathematical value and never by its representation:
//!
//! 1. integers in `[-2^63, 2^63)` hash as a signed word,
//! 2. integers in `[2^63, 2^64)` hash as an upper word,
//! 3. other values that are exactly an `f64` hash as that float's bits,
//! 4. everything else hashes its [`Canonical`] triple limb by limb.
//!
//! The per-type functions are fast paths into the same routing; each one
//! must agree with [`hash_canonical`] on every value it accepts.

use num_bigint::{BigInt, BigUint};
use num_rational::Ratio;
use num_traits::{One, Signed, ToPrimitive};

use crate::HashCode;
use crate::bigfloat::BigFloat;
use crate::decompose::{Canonical, Decompose};
use crate::mix::{fold_limb, mix64, seeded};
use crate::number::{FixedInt, Float, Number, Rational};

/// Separates `[2^63, 2^64)` from negative words with the same bit pattern.
const UPPER_WORD_SALT: u64 = 0xA0C4_2B71_E5D3_9F86;

/// Separates float bit patterns from integers with the same bits.
const FLOAT_SALT: u64 = 0x3C6E_F372_FE94_F82B;

/// Quiet NaN with no payload; every NaN hashes as this one.
const CANONICAL_NAN_BITS: u64 = 0x7FF8_0000_0000_0000;

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// Hashes a signed word.
#[inline]
#[must_use]
pub const fn hash_i64(x: i64, seed: HashCode) -> HashCode {
    seeded(x as u64, seed)
}

/// Hashes an unsigned word.
///
/// Values below `2^63` agree with [`hash_i64`].
#[inline]
#[must_use]
pub const fn hash_u64(x: u64, seed: HashCode) -> HashCode {
    if x <= i64::MAX as u64 {
        hash_i64(x as i64, seed)
    } else {
        seeded(mix64(x) ^ UPPER_WORD_SALT, seed)
    }
}

#[inline]
const fn hash_float_bits(bits: u64, seed: HashCode) -> HashCode {
    (mix64(bits) ^ FLOAT_SALT).wrapping_sub(seed.wrapping_mul(3))
}

/// Hashes a boolean as the integer 0 or 1.
#[inline]
#[must_use]
pub const fn hash_bool(b: bool, seed: HashCode) -> HashCode {
    hash_i64(b as i64, seed)
}

/// Hashes any fixed-width integer through its widened value.
#[inline]
#[must_use]
pub const fn hash_fixed(x: FixedInt, seed: HashCode) -> HashCode {
    match x {
        FixedInt::U64(u) => hash_u64(u, seed),
        // Every other width fits a signed word after widening.
        other => hash_i64(other.widen() as i64, seed),
    }
}

/// Hashes an `f64`.
///
/// Integral values in word range hash as integers; `-0.0`, the
/// infinities, NaN and all other values hash their bit pattern, with
/// every NaN collapsed to one canonical pattern.
#[must_use]
pub fn hash_f64(x: f64, seed: HashCode) -> HashCode {
    if x.is_nan() {
        return hash_float_bits(CANONICAL_NAN_BITS, seed);
    }
    let negative_zero = x == 0.0 && x.is_sign_negative();
    if x.is_finite() && x.fract() == 0.0 && !negative_zero {
        if (-TWO_POW_63..TWO_POW_63).contains(&x) {
            return hash_i64(x as i64, seed);
        }
        if (0.0..TWO_POW_64).contains(&x) {
            return hash_u64(x as u64, seed);
        }
    }
    hash_float_bits(x.to_bits(), seed)
}

/// Hashes an `f32` by widening it exactly to `f64`.
#[inline]
#[must_use]
pub fn hash_f32(x: f32, seed: HashCode) -> HashCode {
    hash_f64(f64::from(x), seed)
}

/// Folds an arbitrary integer limb by limb.
///
/// The first limb is the two's-complement low word, the rest are the
/// magnitude's higher limbs, so any value fitting one word folds once.
#[must_use]
pub fn hash_integer(n: &BigInt, seed: HashCode) -> HashCode {
    fold_magnitude(n.magnitude(), n.is_negative(), seed)
}

fn fold_magnitude(magnitude: &BigUint, negative: bool, seed: HashCode) -> HashCode {
    let mut limbs = magnitude.iter_u64_digits();
    let low = limbs.next().unwrap_or(0);
    let low = if negative { low.wrapping_neg() } else { low };
    limbs.fold(fold_limb(seed, low), fold_limb)
}

/// Hashes an arbitrary-precision integer.
///
/// Word-sized values agree with [`hash_i64`] / [`hash_u64`].
#[must_use]
pub fn hash_bigint(n: &BigInt, seed: HashCode) -> HashCode {
    if let Some(x) = n.to_i64() {
        hash_i64(x, seed)
    } else if let Some(x) = n.to_u64() {
        hash_u64(x, seed)
    } else {
        hash_canonical(&n.canonical(), seed)
    }
}

/// Hashes a word-sized ratio by value.
#[must_use]
pub fn hash_ratio_i64(r: &Ratio<i64>, seed: HashCode) -> HashCode {
    if *r.denom() == 1 {
        hash_i64(*r.numer(), seed)
    } else {
        hash_canonical(&r.canonical(), seed)
    }
}

/// Hashes an arbitrary-precision ratio by value.
///
/// `167//1002`, `1//6` and `-1//-6` all hash alike.
#[must_use]
pub fn hash_ratio(r: &Ratio<BigInt>, seed: HashCode) -> HashCode {
    if r.denom().is_one() {
        hash_bigint(r.numer(), seed)
    } else {
        hash_canonical(&r.canonical(), seed)
    }
}

/// Hashes an arbitrary-precision float by value.
#[must_use]
pub fn hash_bigfloat(x: &BigFloat, seed: HashCode) -> HashCode {
    if x.is_zero() && x.is_sign_negative() {
        return hash_f64(-0.0, seed);
    }
    hash_canonical(&x.canonical(), seed)
}

/// Hashes a value given in canonical form.
///
/// This is the reference routing every fast path agrees with. Zero is
/// hashed as the positive zero; callers holding a negative float zero
/// route it through [`hash_f64`].
#[must_use]
pub fn hash_canonical(c: &Canonical, seed: HashCode) -> HashCode {
    let (negative, num, pow, den) = match c {
        Canonical::NaN => return hash_float_bits(CANONICAL_NAN_BITS, seed),
        Canonical::Infinite { negative: false } => return hash_f64(f64::INFINITY, seed),
        Canonical::Infinite { negative: true } => return hash_f64(f64::NEG_INFINITY, seed),
        Canonical::Zero => return hash_i64(0, seed),
        Canonical::Finite {
            negative,
            num,
            pow,
            den,
        } => (*negative, num, *pow, den),
    };

    if den.is_one() {
        if let Some(h) = hash_word(negative, num, pow, seed) {
            return h;
        }
        if let Some(x) = c.to_f64_exact() {
            return hash_f64(x, seed);
        }
    }

    tracing::trace!(pow, num_bits = num.bits(), den_bits = den.bits(), "generic rational hash");
    let h = fold_magnitude(den, false, seed);
    let mut h = fold_limb(h, pow as u64);
    if i64::try_from(pow).is_err() {
        h = fold_limb(h, (pow >> 64) as u64);
    }
    fold_magnitude(num, negative, h)
}

/// Word leaf for an integer `±num · 2^pow`, if it lies in `[-2^63, 2^64)`.
fn hash_word(negative: bool, num: &BigUint, pow: i128, seed: HashCode) -> Option<HashCode> {
    let pow = u64::try_from(pow).ok()?;
    if num.bits().checked_add(pow)? > 64 {
        return None;
    }
    let magnitude = num.to_u64()? << pow;
    if !negative {
        Some(hash_u64(magnitude, seed))
    } else if magnitude <= 1 << 63 {
        // 2^63 itself wraps to i64::MIN, which is exactly -2^63.
        Some(hash_i64((magnitude as i64).wrapping_neg(), seed))
    } else {
        None
    }
}

/// Hashes a float of any precision.
#[must_use]
pub fn hash_float(x: &Float, seed: HashCode) -> HashCode {
    match x {
        Float::F32(f) => hash_f32(*f, seed),
        Float::F64(f) => hash_f64(*f, seed),
        Float::Big(b) => hash_bigfloat(b, seed),
    }
}

/// Hashes a rational of either width.
#[must_use]
pub fn hash_rational(r: &Rational, seed: HashCode) -> HashCode {
    match r {
        Rational::Small(r) => hash_ratio_i64(r, seed),
        Rational::Big(r) => hash_ratio(r, seed),
    }
}

/// Hashes any number in the tower.
#[must_use]
pub fn hash_number(n: &Number, seed: HashCode) -> HashCode {
    match n {
        Number::Bool(b) => hash_bool(*b, seed),
        Number::Int(i) => hash_fixed(*i, seed),
        Number::BigInt(b) => hash_bigint(b, seed),
        Number::Rational(r) => hash_rational(r, seed),
        Number::Float(f) => hash_float(f, seed),
    }
}
