use crate::adhash::{AdHash, entry_adhash};
use crate::combine::{DICT_SEED, SET_SEED};
use crate::scalar::{hash_i64, hash_u64};
use crate::{Value, hash, hash_with_seed};

/// φ(∅) = base.
#[test]
fn empty_sum_is_base() {
    assert_eq!(AdHash::new(SET_SEED).value(), SET_SEED);
    assert_eq!(AdHash::new(DICT_SEED).value(), DICT_SEED);
}

/// φ(S ∪ {e}) = φ(S) + f(e).
#[test]
fn incremental_add() {
    let mut sum = AdHash::new(0);
    sum.add(7);
    sum.add(u64::MAX);
    assert_eq!(sum.value(), 6);

    let mut entries = AdHash::new(1);
    entries.add_entry(3, 4);
    assert_eq!(entries.value(), 1_u64.wrapping_add(entry_adhash(3, 4)));
}

/// Commutativity: φ({a,b}) = φ({b,a}).
#[test]
fn commutativity() {
    let mut ab = AdHash::new(SET_SEED);
    ab.add(hash_i64(1, 0));
    ab.add(hash_i64(2, 0));

    let mut ba = AdHash::new(SET_SEED);
    ba.add(hash_i64(2, 0));
    ba.add(hash_i64(1, 0));

    assert_eq!(ab, ba);
}

/// f(k, v) ≠ f(v, k) for distinct k and v.
#[test]
fn entry_is_not_symmetric() {
    let (k, v) = (hash_i64(1, 0), hash_i64(2, 0));
    assert_ne!(entry_adhash(k, v), entry_adhash(v, k));
}

/// A zero-hash side does not erase the other.
#[test]
fn entry_with_zero_side() {
    assert_ne!(entry_adhash(0, 5), 0);
    assert_ne!(entry_adhash(5, 0), 0);
    assert_ne!(entry_adhash(0, 5), entry_adhash(5, 0));
}

/// The set hash is the finished sum of seed-0 member hashes.
#[test]
fn set_hash_is_finished_sum() {
    let set = Value::set([Value::from(10_i64), Value::from(20_i64)]);

    let mut sum = AdHash::new(SET_SEED);
    sum.add(hash_i64(10, 0));
    sum.add(hash_i64(20, 0));

    assert_eq!(hash(&set), sum.finish(0));
    assert_eq!(hash_with_seed(&set, 99), sum.finish(99));
}

#[test]
fn dict_hash_is_finished_entry_sum() {
    let dict = Value::dict([(Value::from(1_i64), Value::from(2_i64))]);

    let mut sum = AdHash::new(DICT_SEED);
    sum.add_entry(hash_i64(1, 0), hash_i64(2, 0));

    assert_eq!(hash(&dict), sum.finish(0));
}

/// Empty containers hash to their finished base constants.
#[test]
fn pinned_empty_container_hashes() {
    assert_eq!(hash(&Value::set(Vec::<Value>::new())), 0x0463_FC55_9D96_23AE);
    assert_eq!(hash(&Value::dict(Vec::<(Value, Value)>::new())), 0x172A_F099_A2A3_A421);
    assert_eq!(hash(&Value::set(Vec::<Value>::new())), hash_u64(SET_SEED, 0));
}
