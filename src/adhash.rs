//! `AdHash`: order-independent accumulation for unordered containers.
//!
//! Computes `φ(S) = base + Σ f(e)` over all members using wrapping
//! arithmetic, so iteration and bucket order never matter. Two mixing
//! seeds keep a dictionary entry from degenerating when one side hashes
//! to zero.

use crate::HashCode;
use crate::scalar::hash_u64;

/// First mixing seed (golden ratio constant).
const SEED_1: u64 = 0x9E37_79B9_7F4A_7C15;

/// Second mixing seed (large prime).
const SEED_2: u64 = 0x517C_C1B7_2722_0A95;

/// Computes the `AdHash` contribution of a single dictionary entry.
///
/// `f(k, v) = key_hash · SEED₁ ⊕ value_hash · SEED₂`
#[must_use]
pub const fn entry_adhash(key_hash: u64, value_hash: u64) -> u64 {
    key_hash.wrapping_mul(SEED_1) ^ value_hash.wrapping_mul(SEED_2)
}

/// Running commutative sum over the members of one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdHash {
    sum: u64,
}

impl AdHash {
    /// Starts from the container kind's base constant.
    #[must_use]
    pub const fn new(base: u64) -> Self {
        Self { sum: base }
    }

    /// Adds one set member's hash.
    pub const fn add(&mut self, member_hash: u64) {
        self.sum = self.sum.wrapping_add(member_hash);
    }

    /// Adds one dictionary entry.
    pub const fn add_entry(&mut self, key_hash: u64, value_hash: u64) {
        self.add(entry_adhash(key_hash, value_hash));
    }

    /// Current sum.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.sum
    }

    /// Mixes the sum with the caller's seed into the container's hash.
    #[must_use]
    pub const fn finish(self, seed: HashCode) -> HashCode {
        hash_u64(self.sum, seed)
    }
}
