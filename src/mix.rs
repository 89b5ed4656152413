//! Fixed-width avalanche mixers.
//!
//! Every hash code in the crate bottoms out in [`mix64`]. The shift and add
//! constants below are a compatibility surface: changing any of them changes
//! every hash the crate has ever produced, so they are pinned by tests.

use crate::HashCode;

/// 64-bit integer mix (Thomas Wang).
///
/// Bijective on `u64`; every input bit reaches every output bit.
#[inline]
#[must_use]
pub const fn mix64(word: u64) -> u64 {
    let mut a = word;
    a = (!a).wrapping_add(a << 21);
    a ^= a >> 24;
    a = a.wrapping_add(a << 3).wrapping_add(a << 8);
    a ^= a >> 14;
    a = a.wrapping_add(a << 2).wrapping_add(a << 4);
    a ^= a >> 28;
    a.wrapping_add(a << 31)
}

/// 32-bit integer mix (Bob Jenkins).
#[inline]
#[must_use]
pub const fn mix32(word: u32) -> u32 {
    let mut a = word;
    a = a.wrapping_add(0x7ED5_5D16).wrapping_add(a << 12);
    a = (a ^ 0xC761_C23C) ^ (a >> 19);
    a = a.wrapping_add(0x1656_67B1).wrapping_add(a << 5);
    a = a.wrapping_add(0xD3A2_646C) ^ (a << 9);
    a = a.wrapping_add(0xFD70_46C5).wrapping_add(a << 3);
    (a ^ 0xB55A_4F09) ^ (a >> 16)
}

/// Folds a 64-bit hash code into 32 bits for 32-bit hash tables.
///
/// Equal codes narrow to equal words, so the equality contract survives.
#[inline]
#[must_use]
pub const fn narrow(code: HashCode) -> u32 {
    let lo = code as u32;
    let hi = (code >> 32) as u32;
    mix32(hi ^ mix32(lo))
}

/// Mixes `word` and subtracts the scaled seed: the leaf step shared by all
/// word-sized scalar paths.
#[inline]
#[must_use]
pub(crate) const fn seeded(word: u64, seed: HashCode) -> HashCode {
    mix64(word).wrapping_sub(seed.wrapping_mul(3))
}

/// One limb step of an arbitrary-length integer fold.
#[inline]
#[must_use]
pub(crate) const fn fold_limb(acc: HashCode, limb: u64) -> HashCode {
    acc ^ mix64(limb ^ acc)
}
