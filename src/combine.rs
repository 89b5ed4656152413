//! Container hash combinator.
//!
//! Folds element hashes into a container hash without native recursion:
//! every open container is a [`Frame`] on an explicit stack, so nesting
//! depth is bounded by the heap rather than the call stack.
//!
//! - Arrays and ranges: shape first, then an ordered fold over the realized
//!   elements. Long arrays are sampled, walking backwards with a growing
//!   Fibonacci stride and always landing on a value distinct from the last
//!   one hashed.
//! - Tuples: ordered fold.
//! - Sets and dictionaries: [`AdHash`] over members hashed with a fresh seed.

use std::collections::{hash_map, hash_set};

use crate::HashCode;
use crate::adhash::AdHash;
use crate::scalar::{hash_number, hash_u64};
use crate::value::{ArrayView, Element, Value};

/// Added to the seed before hashing an array or range.
pub const ARRAY_SEED: u64 = 0x7E2D_6FB6_448B_EB77;

/// Added to the seed before hashing a tuple.
pub const TUPLE_SEED: u64 = 0x1F83_D9AB_FB41_BD6B;

/// Base of the `AdHash` sum of a set.
pub const SET_SEED: u64 = 0x852A_DA37_CFE8_E0CE;

/// Base of the `AdHash` sum of a dictionary.
pub const DICT_SEED: u64 = 0x6D35_BB51_952D_5539;

/// Arrays with at least this many elements are sampled instead of folded.
pub const SPARSE_THRESHOLD: usize = 8192;

/// Sampled elements between two increases of the Fibonacci stride.
pub const FIB_GROWTH_INTERVAL: usize = 4096;

/// Hashes any value with an explicit seed.
#[must_use]
pub fn hash_value(value: &Value, seed: HashCode) -> HashCode {
    let mut stack = match open(Element::Value(value), seed) {
        Opened::Leaf(h) => return h,
        Opened::Frame(frame) => vec![frame],
    };

    let mut incoming = None;
    while let Some(top) = stack.last_mut() {
        match top.step(incoming.take()) {
            Step::Descend(child, child_seed) => match open(child, child_seed) {
                Opened::Leaf(h) => incoming = Some(h),
                Opened::Frame(frame) => stack.push(frame),
            },
            Step::Done(h) => {
                stack.pop();
                incoming = Some(h);
            }
        }
    }
    // The root frame always finishes with `Done`.
    incoming.unwrap_or(seed)
}

/// Folds an integer tuple exactly as a [`Value::Tuple`] of `i64` would be.
fn hash_int_tuple(items: impl IntoIterator<Item = u64>, seed: HashCode) -> HashCode {
    items
        .into_iter()
        .fold(seed.wrapping_add(TUPLE_SEED), |h, x| hash_u64(x, h))
}

enum Opened<'a> {
    Leaf(HashCode),
    Frame(Frame<'a>),
}

enum Step<'a> {
    Descend(Element<'a>, HashCode),
    Done(HashCode),
}

fn open(element: Element<'_>, seed: HashCode) -> Opened<'_> {
    let value = match element {
        Element::Number(n) => return Opened::Leaf(hash_number(&n, seed)),
        Element::Value(v) => v,
    };
    let frame = match value {
        Value::Number(n) => return Opened::Leaf(hash_number(n, seed)),
        Value::Array(_) | Value::Range(_) => match ArrayView::of(value) {
            Some(view) => Frame::array(view, seed),
            None => return Opened::Leaf(seed),
        },
        Value::Tuple(items) => Frame::Tuple {
            items: items.iter(),
            acc: seed.wrapping_add(TUPLE_SEED),
        },
        Value::Set(members) => Frame::Set {
            members: members.iter(),
            sum: AdHash::new(SET_SEED),
            seed,
        },
        Value::Dict(entries) => Frame::Dict {
            entries: entries.iter(),
            pending: Pending::Idle,
            sum: AdHash::new(DICT_SEED),
            seed,
        },
    };
    Opened::Frame(frame)
}

// ---------------------------------------------------------------------------
// Frames
// ---------------------------------------------------------------------------

enum Frame<'a> {
    Array {
        view: ArrayView<'a>,
        cursor: Cursor,
        acc: HashCode,
    },
    Tuple {
        items: std::slice::Iter<'a, Value>,
        acc: HashCode,
    },
    Set {
        members: hash_set::Iter<'a, Value>,
        sum: AdHash,
        seed: HashCode,
    },
    Dict {
        entries: hash_map::Iter<'a, Value, Value>,
        pending: Pending<'a>,
        sum: AdHash,
        seed: HashCode,
    },
}

/// Which half of a dictionary entry the last child was.
enum Pending<'a> {
    Idle,
    Key { value: &'a Value },
    Value { key_hash: HashCode },
}

enum Cursor {
    /// Next element of a full fold.
    Dense { next: usize },
    /// Backwards sampling walk.
    Sparse(Sampler),
}

/// State of the sampling walk over a long array.
struct Sampler {
    /// Zero-based index of the element hashed last.
    key: usize,
    fib: usize,
    prev_fib: usize,
    hashed: usize,
}

impl<'a> Frame<'a> {
    fn array(view: ArrayView<'a>, seed: HashCode) -> Self {
        let dims = view.dims();
        let mut acc = seed.wrapping_add(ARRAY_SEED);
        acc = hash_int_tuple(dims.iter().map(|_| 1), acc);
        acc = hash_int_tuple(dims.iter().map(|&d| d as u64), acc);

        let len = view.len();
        let cursor = if len < SPARSE_THRESHOLD {
            Cursor::Dense { next: 0 }
        } else {
            tracing::debug!(len, ?dims, "sampling long array");
            Cursor::Sparse(Sampler {
                key: len - 1,
                fib: 1,
                prev_fib: 1,
                hashed: 0,
            })
        };
        Self::Array { view, cursor, acc }
    }

    /// Advances the frame. `incoming` is the hash of the child requested by
    /// the previous step, `None` on the first step.
    fn step(&mut self, incoming: Option<HashCode>) -> Step<'a> {
        match self {
            Self::Array { view, cursor, acc } => {
                let first = incoming.is_none();
                if let Some(h) = incoming {
                    *acc = h;
                }
                match cursor {
                    Cursor::Dense { next } => match view.get(*next) {
                        Some(element) => {
                            *next += 1;
                            Step::Descend(element, *acc)
                        }
                        None => Step::Done(*acc),
                    },
                    Cursor::Sparse(sampler) => {
                        if !first && !sampler.advance(*view) {
                            return Step::Done(*acc);
                        }
                        // Each sample hashes the pair (1-based index, element).
                        *acc = hash_u64(sampler.key as u64 + 1, *acc);
                        match view.get(sampler.key) {
                            Some(element) => Step::Descend(element, *acc),
                            None => Step::Done(*acc),
                        }
                    }
                }
            }
            Self::Tuple { items, acc } => {
                if let Some(h) = incoming {
                    *acc = h;
                }
                match items.next() {
                    Some(item) => Step::Descend(Element::Value(item), *acc),
                    None => Step::Done(*acc),
                }
            }
            Self::Set { members, sum, seed } => {
                if let Some(h) = incoming {
                    sum.add(h);
                }
                match members.next() {
                    Some(member) => Step::Descend(Element::Value(member), 0),
                    None => Step::Done(sum.finish(*seed)),
                }
            }
            Self::Dict {
                entries,
                pending,
                sum,
                seed,
            } => {
                match (std::mem::replace(pending, Pending::Idle), incoming) {
                    (Pending::Key { value }, Some(key_hash)) => {
                        *pending = Pending::Value { key_hash };
                        return Step::Descend(Element::Value(value), 0);
                    }
                    (Pending::Value { key_hash }, Some(value_hash)) => {
                        sum.add_entry(key_hash, value_hash);
                    }
                    _ => {}
                }
                match entries.next() {
                    Some((key, value)) => {
                        *pending = Pending::Key { value };
                        Step::Descend(Element::Value(key), 0)
                    }
                    None => Step::Done(sum.finish(*seed)),
                }
            }
        }
    }
}

impl Sampler {
    /// Moves to the next sample. Returns `false` when the walk is over.
    fn advance(&mut self, view: ArrayView<'_>) -> bool {
        self.hashed += 1;
        if self.key < self.fib {
            return false;
        }
        let from = self.key - self.fib;
        if self.hashed % FIB_GROWTH_INTERVAL == 0 {
            (self.fib, self.prev_fib) = (self.fib + self.prev_fib, self.fib);
        }
        let Some(last) = view.get(self.key) else {
            return false;
        };
        match view.find_prev_distinct(from, &last) {
            Some(key) => {
                self.key = key;
                true
            }
            None => false,
        }
    }
}
