use num_bigint::{BigInt, BigUint};

use crate::decompose::Decompose;
use crate::mix::mix64;
use crate::scalar::{hash_canonical, hash_f64, hash_i64, hash_integer, hash_number, hash_u64};
use crate::{BigFloat, HashCode, Number, Rational, Value, hash};

fn h(v: impl Into<Value>) -> HashCode {
    hash(&v.into())
}

fn ratio(num: i64, den: i64) -> Rational {
    Rational::new(num, den).unwrap()
}

fn big_ratio(num: BigInt, den: BigInt) -> Rational {
    Rational::new_big(num, den).unwrap()
}

fn bigfloat(x: f64, precision: u32) -> BigFloat {
    BigFloat::from_f64(x, precision).unwrap()
}

fn pow2(exp: u32) -> BigInt {
    BigInt::from(1) << exp
}

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

#[test]
fn pinned_leaf_hashes() {
    assert_eq!(h(0_i64), 0x77CF_A1EE_F01B_CA90);
    assert_eq!(h(1_i64), 0x5BCA_7C69_B794_F8CE);
    assert_eq!(h(-1_i64), 0x1F89_206E_3F8E_C794);
    assert_eq!(h(0.5_f64), 0x3146_E22D_550D_E88E);
}

/// Every representation of 5 is one key.
#[test]
fn five_in_every_representation() {
    let expected = h(5_i64);
    let reps: Vec<Value> = vec![
        5_i8.into(),
        5_i16.into(),
        5_i32.into(),
        5_u8.into(),
        5_u16.into(),
        5_u32.into(),
        5_u64.into(),
        BigInt::from(5).into(),
        ratio(5, 1).into(),
        ratio(10, 2).into(),
        ratio(-10, -2).into(),
        big_ratio(BigInt::from(15), BigInt::from(3)).into(),
        5.0_f32.into(),
        5.0_f64.into(),
        bigfloat(5.0, 300).into(),
        bigfloat(5.0, 3).into(),
    ];
    for rep in &reps {
        assert_eq!(hash(rep), expected, "{rep:?}");
        assert!(rep.is_equal(&Value::from(5_i64)), "{rep:?}");
    }
}

#[test]
fn bool_hashes_as_integer() {
    assert_eq!(h(true), h(1_u8));
    assert_eq!(h(false), h(0_i64));
    assert_eq!(h(true), h(1.0_f64));
    assert_ne!(h(true), h(false));
}

/// `0 == 0.0 == 0//1`, but `-0.0` is its own key.
#[test]
fn signed_zeros() {
    let zero = h(0_i64);
    assert_eq!(h(0.0_f64), zero);
    assert_eq!(h(0.0_f32), zero);
    assert_eq!(h(ratio(0, 1)), zero);
    assert_eq!(h(ratio(0, -7)), zero);
    assert_eq!(h(BigInt::from(0)), zero);
    assert_eq!(h(BigFloat::zero(false, 64).unwrap()), zero);

    let negative = h(-0.0_f64);
    assert_ne!(negative, zero);
    assert_eq!(h(-0.0_f32), negative);
    assert_eq!(h(BigFloat::zero(true, 64).unwrap()), negative);
    assert_eq!(h(bigfloat(-0.0, 200)), negative);
}

#[test]
fn nan_payloads_collapse() {
    let expected = h(f64::NAN);
    let nans = [
        f64::from_bits(0x7FF8_0000_0000_0001),
        f64::from_bits(0xFFF8_0000_0000_0000),
        f64::from_bits(0x7FF0_0000_0000_0001),
        -f64::NAN,
    ];
    for x in nans {
        assert_eq!(h(x), expected, "{:#x}", x.to_bits());
    }
    assert_eq!(h(f32::NAN), expected);
    assert_eq!(h(f32::from_bits(0xFFC0_0001)), expected);
    assert_eq!(h(BigFloat::nan(128).unwrap()), expected);
}

#[test]
fn infinities_by_sign() {
    let pos = h(f64::INFINITY);
    let neg = h(f64::NEG_INFINITY);
    assert_ne!(pos, neg);

    assert_eq!(h(f32::INFINITY), pos);
    assert_eq!(h(ratio(1, 0)), pos);
    assert_eq!(h(ratio(7, 0)), pos);
    assert_eq!(h(big_ratio(pow2(200), BigInt::from(0))), pos);
    assert_eq!(h(BigFloat::infinity(false, 512).unwrap()), pos);

    assert_eq!(h(f32::NEG_INFINITY), neg);
    assert_eq!(h(ratio(-1, 0)), neg);
    assert_eq!(h(ratio(-3, 0)), neg);
    assert_eq!(h(BigFloat::infinity(true, 512).unwrap()), neg);
}

/// Values at the edges of the signed and unsigned word ranges agree across
/// integer and float representations.
#[test]
fn word_range_boundaries() {
    let after_2_63 = f64::from_bits(TWO_POW_63.to_bits() + 1);
    let n = after_2_63 as u64;
    assert_eq!(h(after_2_63), h(n));
    assert_eq!(h(after_2_63), h(BigInt::from(n)));

    let before_2_64 = f64::from_bits(TWO_POW_64.to_bits() - 1);
    let n = before_2_64 as u64;
    assert_eq!(h(before_2_64), h(n));
    assert_eq!(h(before_2_64), h(BigInt::from(n)));

    assert_eq!(h(TWO_POW_63), h(1_u64 << 63));
    assert_eq!(h(TWO_POW_63), h(pow2(63)));
    assert_eq!(h(-TWO_POW_63), h(i64::MIN));
    assert_eq!(h(-TWO_POW_63), h(-pow2(63)));

    assert_eq!(h(TWO_POW_64), h(pow2(64)));
    assert_eq!(h(-TWO_POW_64), h(-pow2(64)));
    assert_eq!(h(TWO_POW_64), h(big_ratio(pow2(65), BigInt::from(2))));

    assert_eq!(h(u64::MAX), h(BigInt::from(u64::MAX)));
    assert_eq!(h(i64::MAX), h(BigInt::from(i64::MAX)));
}

/// A negative word and the unsigned word with the same bits differ.
#[test]
fn upper_words_do_not_alias_negatives() {
    assert_ne!(h(-1_i64), h(u64::MAX));
    assert_ne!(h(i64::MIN), h(1_u64 << 63));
    assert_ne!(hash_u64(u64::MAX, 0), hash_i64(-1, 0));
}

#[test]
fn integers_beyond_words_follow_floats() {
    let x = f64::from_bits((1023 + 100) << 52);
    assert_eq!(h(x), h(pow2(100)));
    assert_eq!(h(x), h(bigfloat(x, 512)));

    let three_2_70 = BigInt::from(3) << 70_u32;
    assert_eq!(h(3.0 * f64::from_bits((1023 + 70) << 52)), h(three_2_70));
}

/// Integers no `f64` holds still agree across big representations.
#[test]
fn integers_beyond_f64() {
    let n = pow2(100) + 1_u32;
    let expected = h(n.clone());
    assert_eq!(h(big_ratio(n.clone() * 3_u32, BigInt::from(3))), expected);
    assert_eq!(h(BigFloat::from_bigint(&n, 128).unwrap()), expected);
    assert_ne!(h(pow2(100)), expected);

    let negative = -(pow2(63) + 1_u32);
    assert_ne!(h(negative.clone()), h(i64::MIN));
    assert_eq!(h(big_ratio(negative.clone(), BigInt::from(1))), h(negative));
}

#[test]
fn fractions() {
    let half = h(0.5_f64);
    assert_eq!(h(0.5_f32), half);
    assert_eq!(h(ratio(1, 2)), half);
    assert_eq!(h(ratio(3, 6)), half);
    assert_eq!(h(ratio(-4, -8)), half);
    assert_eq!(h(bigfloat(0.5, 300)), half);

    assert_eq!(h(0.1_f32), h(f64::from(0.1_f32)));
    assert_ne!(h(0.1_f32), h(0.1_f64));

    let d = 0.1_f64.decompose();
    let exact = big_ratio(d.num, pow2(u32::try_from(-d.pow).unwrap()));
    assert_eq!(h(exact), h(0.1_f64));
}

#[test]
fn subnormals() {
    let tiny = f64::from_bits(1);
    assert_eq!(h(tiny), h(big_ratio(BigInt::from(1), pow2(1074))));
    assert_eq!(h(tiny), h(bigfloat(tiny, 53)));
    assert_eq!(h(tiny), h(bigfloat(tiny, 1)));

    let smallest_normal = f64::MIN_POSITIVE;
    assert_eq!(h(smallest_normal), h(big_ratio(BigInt::from(1), pow2(1022))));
    assert_ne!(h(tiny), h(smallest_normal));
}

/// Values past the `f64` range use the generic limb fold.
#[test]
fn outside_f64_range() {
    let below = big_ratio(BigInt::from(1), pow2(1075));
    let above = pow2(1024);
    let rebuilt = BigFloat::from_decomposition(&below.decompose(), 8).unwrap();
    assert_eq!(h(below.clone()), h(rebuilt));
    assert_eq!(h(above.clone()), h(BigFloat::from_bigint(&above, 8).unwrap()));
    assert_ne!(h(above), h(f64::INFINITY));
    assert_ne!(h(below), h(0.0_f64));
}

/// Every fast path agrees with the canonical routing.
#[test]
fn fast_paths_agree_with_canonical() {
    let numbers: Vec<Number> = vec![
        true.into(),
        (-128_i8).into(),
        u16::MAX.into(),
        i32::MIN.into(),
        i64::MAX.into(),
        u64::MAX.into(),
        (1_u64 << 63).into(),
        BigInt::from(-42).into(),
        pow2(64).into(),
        (pow2(90) + 3_u32).into(),
        ratio(3, 4).into(),
        ratio(-9, 3).into(),
        ratio(1, 3).into(),
        big_ratio(pow2(70), BigInt::from(6)).into(),
        0.0_f64.into(),
        1e300_f64.into(),
        (-2.5_f32).into(),
        f64::NAN.into(),
        f64::NEG_INFINITY.into(),
        f64::from_bits(3).into(),
        bigfloat(1.0 / 3.0, 200).into(),
        BigFloat::from_decomposition(&ratio(1, 3).decompose(), 200)
            .unwrap()
            .into(),
    ];
    for n in &numbers {
        for seed in [0, 1, 0xDEAD_BEEF, u64::MAX] {
            assert_eq!(
                hash_number(n, seed),
                hash_canonical(&n.canonical(), seed),
                "{n:?} seed {seed}"
            );
        }
    }
}

#[test]
fn canonical_of_big_magnitude() {
    let c = (pow2(64) * 3_u32).canonical();
    assert_eq!(hash_canonical(&c, 0), h(3.0 * TWO_POW_64));
    assert!(c.is_integer());
    assert_eq!(
        c,
        crate::Canonical::Finite {
            negative: false,
            num: BigUint::from(3_u32),
            pow: 64,
            den: BigUint::from(1_u32),
        }
    );
}

/// The seed reaches every leaf.
#[test]
fn seeds_are_threaded() {
    for x in [Number::from(5_i64), 0.5_f64.into(), ratio(1, 3).into(), u64::MAX.into()] {
        assert_ne!(hash_number(&x, 0), hash_number(&x, 1), "{x:?}");
    }
    assert_eq!(hash_f64(2.0, 17), hash_i64(2, 17));
}

#[test]
fn hashing_is_deterministic() {
    let v = Value::from(big_ratio(pow2(80) + 1_u32, BigInt::from(7)));
    assert_eq!(hash(&v), hash(&v.clone()));
}

/// The limb fold: one step per 64-bit limb, low limb in two's complement.
#[test]
fn integer_limb_fold() {
    assert_eq!(hash_integer(&BigInt::from(5), 0), mix64(5));
    assert_eq!(hash_integer(&BigInt::from(-5), 0), mix64(5_u64.wrapping_neg()));
    assert_eq!(hash_integer(&BigInt::from(0), 9), 9 ^ mix64(9));

    let wide = pow2(64) + 7_u32;
    let low = 9 ^ mix64(7 ^ 9);
    assert_eq!(hash_integer(&wide, 9), low ^ mix64(1 ^ low));
    assert_ne!(hash_integer(&wide, 9), hash_integer(&-&wide, 9));
}
