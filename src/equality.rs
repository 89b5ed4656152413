//! The equality relation hashing must respect.
//!
//! `isequal`-style: numbers compare by mathematical value, every NaN equals
//! every other NaN, and a float `-0.0` equals only other negative zeros.
//! Arrays and ranges compare by shape and elements, so a range equals the
//! vector it generates.

use crate::decompose::Decompose;
use crate::number::{Float, Number};
use crate::value::{ArrayView, Element, Value};

/// Numeric `isequal`.
#[must_use]
pub fn numbers_equal(a: &Number, b: &Number) -> bool {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => x.widen() == y.widen(),
        (Number::Bool(x), Number::Bool(y)) => x == y,
        (Number::Float(Float::F64(x)), Number::Float(Float::F64(y))) => f64_equal(*x, *y),
        _ => a.is_negative_zero() == b.is_negative_zero() && a.canonical() == b.canonical(),
    }
}

const fn f64_equal(x: f64, y: f64) -> bool {
    if x.is_nan() || y.is_nan() {
        return x.is_nan() && y.is_nan();
    }
    // Past NaN, equal values have equal bits and `-0.0` differs from `0.0`.
    x.to_bits() == y.to_bits()
}

/// Structural `isequal` over values.
#[must_use]
pub fn values_equal(a: &Value, b: &Value) -> bool {
    if let (Some(x), Some(y)) = (ArrayView::of(a), ArrayView::of(b)) {
        return arrays_equal(x, y);
    }
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Tuple(x), Value::Tuple(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(p, q)| values_equal(p, q))
        }
        (Value::Set(x), Value::Set(y)) => x.len() == y.len() && x.iter().all(|v| y.contains(v)),
        (Value::Dict(x), Value::Dict(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .all(|(k, v)| y.get(k).is_some_and(|w| values_equal(v, w)))
        }
        _ => false,
    }
}

fn arrays_equal(a: ArrayView<'_>, b: ArrayView<'_>) -> bool {
    if a.dims() != b.dims() {
        return false;
    }
    (0..a.len()).all(|i| match (a.get(i), b.get(i)) {
        (Some(x), Some(y)) => elements_equal(&x, &y),
        _ => false,
    })
}

pub(crate) fn elements_equal(a: &Element<'_>, b: &Element<'_>) -> bool {
    match (a, b) {
        (Element::Value(x), Element::Value(y)) => values_equal(x, y),
        (Element::Number(x), Element::Number(y)) => numbers_equal(x, y),
        (Element::Value(v), Element::Number(n)) | (Element::Number(n), Element::Value(v)) => {
            v.as_number().is_some_and(|m| numbers_equal(m, n))
        }
    }
}
