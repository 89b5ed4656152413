//! Equality-consistent hashing across a numeric tower and containers.
//!
//! Two values that are equal under numeric `isequal` always hash to the
//! same code, whichever representation produced them: `5_i8`, `BigInt(5)`,
//! `10//2`, `5.0_f32` and a 300-bit `BigFloat` holding 5 are one key.
//! Containers keep the same contract: a range hashes like the vector it
//! generates, and sets and dictionaries ignore iteration order.
//!
//! # Key properties
//!
//! - **Value-based routing**: every number hashes through the leaf chosen by
//!   its canonical value ([`scalar`])
//! - **Exact decomposition**: `num · 2^pow / den` for any finite value
//!   ([`decompose`])
//! - **Order-independent unordered containers**: via `AdHash` ([`adhash`])
//! - **No recursion**: nested containers are folded on an explicit stack
//!   ([`combine`])
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! # Hash width
//!
//! [`HashCode`] is 64 bits on every target. Consumers with 32-bit tables
//! fold codes through [`mix::narrow`], which keeps equal codes equal.
//!
//! # Stability
//!
//! The mixing constants and container seeds are versioned: the same value
//! hashes identically across runs, threads and platforms.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

pub mod adhash;
pub mod bigfloat;
pub mod combine;
pub mod decompose;
pub mod equality;
pub mod error;
pub mod mix;
pub mod number;
pub mod scalar;
pub mod value;

#[cfg(test)]
mod tests;

pub use bigfloat::BigFloat;
pub use decompose::{Canonical, Decompose, Decomposition};
pub use error::Error;
pub use number::{FixedInt, Float, Number, Rational};
pub use value::{Array, Range, Value};

/// Word-sized hash code; 64 bits on every target.
pub type HashCode = u64;

/// Seed used by [`hash`].
pub const DEFAULT_SEED: HashCode = 0;

/// Hashes `value` with [`DEFAULT_SEED`].
///
/// `a.is_equal(&b)` implies `hash(&a) == hash(&b)`.
#[must_use]
pub fn hash(value: &Value) -> HashCode {
    hash_with_seed(value, DEFAULT_SEED)
}

/// Hashes `value` starting from `seed`.
///
/// Containers thread the running hash through their elements as the seed,
/// so nested structure is decorrelated. Different seeds are not
/// guaranteed to give different codes.
#[must_use]
pub fn hash_with_seed(value: &Value, seed: HashCode) -> HashCode {
    combine::hash_value(value, seed)
}
