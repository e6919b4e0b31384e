//! Bucketed hash map keyed by structural equality.
//!
//! [`ValueHashMap`] stores its entries in a fixed-width array of buckets.  The
//! bucket for a key is `hash(key) mod capacity`; inside a bucket, keys are
//! compared with `==`.  Two keys that are equal by value therefore always land
//! in the same bucket and can never be stored twice.
//!
//! # Growth (for beginners)
//!
//! Every bucket is a small `Vec`.  As more entries are inserted the buckets
//! get longer and lookups degrade towards a linear scan.  To keep chains
//! short the map doubles its bucket count whenever the number of entries
//! exceeds the number of buckets, and moves ("rehashes") every entry into the
//! new array.
//!
//! Growth runs inside the [`ValueHashMap::put`] call that crossed the
//! threshold.  When `put` returns, the table is never over-full.
//!
//! # Key contract
//!
//! Keys must implement `Eq` and `Hash` consistently: `a == b` implies
//! `hash(a) == hash(b)`.  A key type that breaks this produces silently wrong
//! lookups; the map does not try to detect it.

use std::borrow::Borrow;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault, Hash};
use std::iter::{Flatten, FusedIterator};
use std::mem;

use tracing::trace;

/// Number of buckets a freshly created (or cleared) map starts with.
pub const DEFAULT_CAPACITY: usize = 10;

/// Deterministic hasher factory used by default.
///
/// Unlike `std::collections::hash_map::RandomState` it is not seeded per
/// process, so the same key always lands in the same bucket across runs.
pub type FixedState = BuildHasherDefault<DefaultHasher>;

#[derive(Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// A hash map that compares keys by value and grows synchronously.
///
/// # Examples
///
/// ```rust
/// use cinema_core::collections::ValueHashMap;
/// use cinema_core::SeatCoordinate;
///
/// let mut prices = ValueHashMap::new();
/// prices.put(SeatCoordinate::new(5, 5), 700);
///
/// // A different instance denoting the same seat finds the entry.
/// assert_eq!(prices.get(&SeatCoordinate::new(5, 5)), Some(&700));
/// ```
#[derive(Clone)]
pub struct ValueHashMap<K, V, S = FixedState> {
    buckets: Vec<Vec<Entry<K, V>>>,
    len: usize,
    hash_builder: S,
}

impl<K, V> ValueHashMap<K, V, FixedState> {
    /// Creates an empty map with [`DEFAULT_CAPACITY`] buckets.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty map with `capacity` buckets (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, FixedState::default())
    }
}

impl<K, V, S> ValueHashMap<K, V, S> {
    /// Creates an empty map with [`DEFAULT_CAPACITY`] buckets that hashes keys
    /// with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hash_builder)
    }

    /// Creates an empty map with `capacity` buckets (at least one) that hashes
    /// keys with `hash_builder`.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            buckets: empty_buckets(capacity.max(1)),
            len: 0,
            hash_builder,
        }
    }

    /// Returns the number of distinct keys currently stored.
    pub fn size(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Drops every entry and resets the bucket count to [`DEFAULT_CAPACITY`].
    pub fn clear(&mut self) {
        self.buckets = empty_buckets(DEFAULT_CAPACITY);
        self.len = 0;
    }

    /// Visits every entry.
    ///
    /// Iteration order is unspecified.  The callback may mutate values; the
    /// changes are visible afterwards.  Keys are only handed out by shared
    /// reference so their identity cannot change underneath the table.
    pub fn for_each<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V),
    {
        for entry in self.buckets.iter_mut().flatten() {
            f(&entry.key, &mut entry.value);
        }
    }

    /// Returns an iterator over `(key, value)` pairs in unspecified order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.buckets.iter().flatten(),
            remaining: self.len,
        }
    }

    /// Returns an iterator over the keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values in unspecified order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }
}

impl<K, V, S> ValueHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Inserts `value` under `key`.
    ///
    /// Returns the previous value if an equal key was already present; the
    /// stored key is kept and only the value is replaced.  Otherwise the entry
    /// is appended and `None` is returned.  If the insertion pushes the number
    /// of entries above the bucket count, the table grows before returning.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let bucket = &mut self.buckets[index];

        if let Some(entry) = bucket.iter_mut().find(|entry| entry.key == key) {
            return Some(mem::replace(&mut entry.value, value));
        }

        bucket.push(Entry { key, value });
        self.len += 1;

        if self.len > self.buckets.len() {
            self.grow();
        }
        None
    }

    /// Returns a reference to the value stored under a key equal to `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.buckets[self.bucket_index(key)]
            .iter()
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &mut entry.value)
    }

    /// Returns `true` if a key equal to `key` is stored.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.get(key).is_some()
    }

    /// Removes the entry for `key` and returns its value, or `None` if absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        let position = bucket.iter().position(|entry| entry.key.borrow() == key)?;
        let entry = bucket.swap_remove(position);
        self.len -= 1;
        Some(entry.value)
    }

    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        (self.hash_builder.hash_one(key) % self.buckets.len() as u64) as usize
    }

    /// Doubles the bucket count and rehashes every entry into the new array.
    fn grow(&mut self) {
        let new_capacity = self.buckets.len() * 2;
        let old = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for entry in old.into_iter().flatten() {
            let index = self.bucket_index(&entry.key);
            self.buckets[index].push(entry);
        }
        trace!("value hash map grew to {new_capacity} buckets ({} entries)", self.len);
    }
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Vec<Entry<K, V>>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Vec::new);
    buckets
}

// ── Trait impls ───────────────────────────────────────────────────────────────

impl<K, V, S: Default> Default for ValueHashMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ValueHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for ValueHashMap<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

impl<K, V, S> Eq for ValueHashMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> FromIterator<(K, V)> for ValueHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for ValueHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a ValueHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for ValueHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            remaining: self.len,
            inner: self.buckets.into_iter().flatten(),
        }
    }
}

// ── Iterators ─────────────────────────────────────────────────────────────────

/// Borrowing iterator over a [`ValueHashMap`].
pub struct Iter<'a, K, V> {
    inner: Flatten<std::slice::Iter<'a, Vec<Entry<K, V>>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next()?;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Owning iterator over a [`ValueHashMap`].
pub struct IntoIter<K, V> {
    inner: Flatten<std::vec::IntoIter<Vec<Entry<K, V>>>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next()?;
        self.remaining -= 1;
        Some((entry.key, entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::{MoneyAmount, SeatCoordinate};
    use std::hash::Hasher;

    fn filled_map() -> ValueHashMap<SeatCoordinate, i32> {
        let mut map = ValueHashMap::new();
        map.put(SeatCoordinate::new(5, 5), 0);
        map.put(SeatCoordinate::new(5, 6), 1);
        map.put(SeatCoordinate::new(6, 5), 2);
        map.put(SeatCoordinate::new(6, 6), 3);
        map
    }

    /// Key that is equal by `id` only; `label` is payload that may differ
    /// between equal instances.
    #[derive(Debug, Clone)]
    struct Ticket {
        id: u32,
        label: &'static str,
    }

    impl PartialEq for Ticket {
        fn eq(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }

    impl Eq for Ticket {}

    impl Hash for Ticket {
        fn hash<H: Hasher>(&self, state: &mut H) {
            self.id.hash(state);
        }
    }

    /// Hasher that sends every key to the same bucket.
    #[derive(Default, Clone)]
    struct CollidingHasher;

    impl Hasher for CollidingHasher {
        fn finish(&self) -> u64 {
            7
        }
        fn write(&mut self, _bytes: &[u8]) {}
    }

    // ── put / get ─────────────────────────────────────────────────────────────

    #[test]
    fn test_put_returns_previous_value_for_equal_key() {
        // Arrange
        let mut map = filled_map();

        // Act / Assert
        assert_eq!(map.put(SeatCoordinate::new(5, 5), 5), Some(0));
        assert_eq!(map.put(SeatCoordinate::new(5, 6), 6), Some(1));
        assert_eq!(map.put(SeatCoordinate::new(6, 5), 7), Some(2));
        assert_eq!(map.put(SeatCoordinate::new(6, 6), 8), Some(3));
        assert_eq!(map.size(), 4);
        assert_eq!(map.get(&SeatCoordinate::new(5, 5)), Some(&5));
        assert_eq!(map.get(&SeatCoordinate::new(6, 6)), Some(&8));
    }

    #[test]
    fn test_put_new_key_returns_none_and_increments_size() {
        let mut map = filled_map();
        assert_eq!(map.put(SeatCoordinate::new(0, 0), 9), None);
        assert_eq!(map.size(), 5);
    }

    #[test]
    fn test_money_keys_with_equal_amounts_collapse_into_one_entry() {
        // Arrange
        let mut map = ValueHashMap::new();

        // Act
        map.put(MoneyAmount::from_cents(0), 0);
        map.put(MoneyAmount::from_cents(101), 1);
        map.put("1,01 €".parse::<MoneyAmount>().unwrap(), 2);

        // Assert
        assert_eq!(map.size(), 2);
        assert_eq!(map.get(&MoneyAmount::from_cents(101)), Some(&2));
    }

    #[test]
    fn test_get_on_empty_map_returns_none() {
        let map: ValueHashMap<SeatCoordinate, i32> = ValueHashMap::new();
        assert_eq!(map.get(&SeatCoordinate::new(0, 0)), None);
        assert!(map.is_empty());
    }

    #[test]
    fn test_get_with_borrowed_key_type() {
        let mut map = ValueHashMap::new();
        map.put("Saal 1".to_string(), 20);
        assert_eq!(map.get("Saal 1"), Some(&20));
        assert!(map.contains("Saal 1"));
    }

    #[test]
    fn test_get_mut_changes_are_visible() {
        let mut map = filled_map();
        if let Some(value) = map.get_mut(&SeatCoordinate::new(6, 5)) {
            *value = 42;
        }
        assert_eq!(map.get(&SeatCoordinate::new(6, 5)), Some(&42));
    }

    #[test]
    fn test_put_keeps_original_key_instance_when_overwriting() {
        // Arrange
        let mut map = ValueHashMap::new();
        map.put(Ticket { id: 1, label: "first" }, 10);

        // Act
        map.put(Ticket { id: 1, label: "second" }, 20);

        // Assert
        let (key, value) = map.iter().next().expect("one entry");
        assert_eq!(key.label, "first");
        assert_eq!(*value, 20);
    }

    // ── contains / clear ──────────────────────────────────────────────────────

    #[test]
    fn test_contains_and_clear() {
        // Arrange
        let mut map = filled_map();
        assert!(map.contains(&SeatCoordinate::new(5, 5)));
        assert!(map.contains(&SeatCoordinate::new(6, 6)));
        assert!(!map.contains(&SeatCoordinate::new(8, 0)));

        // Act
        map.clear();

        // Assert
        assert!(!map.contains(&SeatCoordinate::new(5, 5)));
        assert_eq!(map.get(&SeatCoordinate::new(5, 5)), None);
        assert_eq!(map.size(), 0);
    }

    #[test]
    fn test_clear_resets_capacity_to_default() {
        let mut map = ValueHashMap::new();
        for i in 0..50 {
            map.put(i, i);
        }
        assert!(map.capacity() > DEFAULT_CAPACITY);

        map.clear();

        assert_eq!(map.capacity(), DEFAULT_CAPACITY);
    }

    // ── remove ────────────────────────────────────────────────────────────────

    #[test]
    fn test_remove_returns_value_and_decrements_size() {
        // Arrange
        let mut map = filled_map();

        // Act / Assert
        assert_eq!(map.remove(&SeatCoordinate::new(5, 5)), Some(0));
        assert_eq!(map.size(), 3);
        map.put(SeatCoordinate::new(0, 0), 9);
        assert_eq!(map.size(), 4);
        assert_eq!(map.remove(&SeatCoordinate::new(5, 6)), Some(1));
        assert_eq!(map.remove(&SeatCoordinate::new(6, 6)), Some(3));
        assert_eq!(map.remove(&SeatCoordinate::new(6, 6)), None);
        assert_eq!(map.size(), 2);
    }

    #[test]
    fn test_remove_then_get_returns_none() {
        let mut map = filled_map();
        map.remove(&SeatCoordinate::new(6, 5));
        assert_eq!(map.get(&SeatCoordinate::new(6, 5)), None);
    }

    // ── for_each ──────────────────────────────────────────────────────────────

    #[test]
    fn test_for_each_visits_every_entry_once_and_mutations_are_visible() {
        // Arrange
        let mut map = filled_map();
        let mut visited = 0;

        // Act
        map.for_each(|_, value| {
            *value += 100;
            visited += 1;
        });

        // Assert
        assert_eq!(visited, 4);
        assert_eq!(map.get(&SeatCoordinate::new(5, 5)), Some(&100));
        assert_eq!(map.get(&SeatCoordinate::new(6, 6)), Some(&103));
    }

    #[test]
    fn test_equal_keys_share_one_entry_in_for_each() {
        let mut map = ValueHashMap::new();
        map.put(Ticket { id: 0, label: "a" }, 2);
        map.put(Ticket { id: 0, label: "b" }, 3);
        map.put(Ticket { id: 1, label: "c" }, 4);

        let mut seen = Vec::new();
        map.for_each(|key, value| seen.push((key.id, *value)));
        seen.sort_unstable();

        assert_eq!(seen, vec![(0, 3), (1, 4)]);
    }

    // ── growth ────────────────────────────────────────────────────────────────

    #[test]
    fn test_growth_happens_inside_the_crossing_put() {
        // Arrange
        let mut map = ValueHashMap::new();
        for i in 0..DEFAULT_CAPACITY {
            map.put(i, i);
        }
        assert_eq!(map.capacity(), DEFAULT_CAPACITY);

        // Act – the eleventh entry crosses the threshold
        map.put(DEFAULT_CAPACITY, DEFAULT_CAPACITY);

        // Assert – no deferred work: capacity has already doubled
        assert_eq!(map.capacity(), DEFAULT_CAPACITY * 2);
        assert!(map.size() <= map.capacity());
    }

    #[test]
    fn test_growth_preserves_every_entry() {
        // Arrange
        let mut map = ValueHashMap::new();

        // Act
        for row in 0..20u32 {
            for seat in 0..25u32 {
                map.put(SeatCoordinate::new(row, seat), row * 100 + seat);
            }
        }

        // Assert
        assert_eq!(map.size(), 500);
        assert!(map.size() <= map.capacity());
        for row in 0..20u32 {
            for seat in 0..25u32 {
                assert_eq!(map.get(&SeatCoordinate::new(row, seat)), Some(&(row * 100 + seat)));
            }
        }
        assert_eq!(map.iter().count(), 500);
    }

    #[test]
    fn test_full_collisions_still_keep_keys_distinct() {
        // Arrange
        let mut map: ValueHashMap<u32, u32, BuildHasherDefault<CollidingHasher>> =
            ValueHashMap::with_hasher(BuildHasherDefault::default());

        // Act
        for i in 0..30 {
            map.put(i, i * 2);
        }
        map.put(3, 99);

        // Assert
        assert_eq!(map.size(), 30);
        assert_eq!(map.get(&3), Some(&99));
        assert_eq!(map.remove(&29), Some(58));
        assert_eq!(map.size(), 29);
    }

    #[test]
    fn test_with_capacity_zero_is_clamped_to_one_bucket() {
        let mut map = ValueHashMap::with_capacity(0);
        assert_eq!(map.capacity(), 1);
        map.put(1, "one");
        map.put(2, "two");
        assert_eq!(map.get(&2), Some(&"two"));
    }

    // ── copies / equality ─────────────────────────────────────────────────────

    #[test]
    fn test_clone_is_an_independent_copy() {
        // Arrange
        let original = filled_map();

        // Act
        let mut copy = original.clone();
        copy.put(SeatCoordinate::new(9, 9), 9);
        copy.remove(&SeatCoordinate::new(5, 5));

        // Assert
        assert_eq!(original.size(), 4);
        assert!(original.contains(&SeatCoordinate::new(5, 5)));
        assert!(!original.contains(&SeatCoordinate::new(9, 9)));
    }

    #[test]
    fn test_from_iterator_last_value_wins_for_equal_keys() {
        let map: ValueHashMap<SeatCoordinate, i32> = vec![
            (SeatCoordinate::new(1, 1), 1),
            (SeatCoordinate::new(1, 1), 2),
            (SeatCoordinate::new(2, 2), 3),
        ]
        .into_iter()
        .collect();

        assert_eq!(map.size(), 2);
        assert_eq!(map.get(&SeatCoordinate::new(1, 1)), Some(&2));
    }

    #[test]
    fn test_maps_with_same_entries_are_equal_regardless_of_capacity() {
        let mut small = ValueHashMap::with_capacity(1);
        let mut large = ValueHashMap::with_capacity(64);
        for i in 0..5 {
            small.put(i, i);
            large.put(4 - i, 4 - i);
        }
        assert_eq!(small, large);

        large.put(0, 100);
        assert_ne!(small, large);
    }

    #[test]
    fn test_into_iter_yields_all_owned_entries() {
        let map = filled_map();
        let mut values: Vec<i32> = map.into_iter().map(|(_, v)| v).collect();
        values.sort_unstable();
        assert_eq!(values, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_iter_reports_exact_length() {
        let map = filled_map();
        assert_eq!(map.iter().len(), 4);
    }
}
