//! Value-equality hash containers.
//!
//! Every identity lookup in the box office (is this seat selected? which
//! showings run on this date?) goes through these two types.  They compare
//! keys with `Eq` and place them with `Hash`, so two separately constructed
//! values that denote the same seat or date are the same key.

pub mod hash_map;
pub mod hash_set;

pub use hash_map::{FixedState, ValueHashMap, DEFAULT_CAPACITY};
pub use hash_set::ValueHashSet;
