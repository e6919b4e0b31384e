//! Set form of the value-equality hash container.
//!
//! [`ValueHashSet`] is a thin wrapper around [`ValueHashMap`] with `()` values.
//! It is the type exchanged between the seat selection and a
//! [`Showing`](crate::domain::showing::Showing): because membership is decided
//! by value, selecting the same seat twice never produces two entries.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;

use super::hash_map::{self, FixedState, ValueHashMap};

/// A hash set that compares members by value and grows synchronously.
#[derive(Clone)]
pub struct ValueHashSet<T, S = FixedState> {
    map: ValueHashMap<T, (), S>,
}

impl<T> ValueHashSet<T, FixedState> {
    /// Creates an empty set with the default bucket count.
    pub fn new() -> Self {
        Self {
            map: ValueHashMap::new(),
        }
    }

    /// Creates an empty set with `capacity` buckets (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: ValueHashMap::with_capacity(capacity),
        }
    }
}

impl<T, S> ValueHashSet<T, S> {
    /// Creates an empty set that hashes members with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            map: ValueHashMap::with_hasher(hash_builder),
        }
    }

    /// Returns the number of distinct members.
    pub fn size(&self) -> usize {
        self.map.size()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the current number of buckets.
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Removes every member and resets the bucket count.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Visits every member in unspecified order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&T),
    {
        for member in self.iter() {
            f(member);
        }
    }

    /// Returns an iterator over the members in unspecified order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.map.iter(),
        }
    }
}

impl<T, S> ValueHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Adds `value` to the set.
    ///
    /// Returns `true` if no equal member was present.  An equal member that is
    /// already stored is kept as-is.
    pub fn add(&mut self, value: T) -> bool {
        self.map.put(value, ()).is_none()
    }

    /// Returns `true` if a member equal to `value` is stored.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.map.contains(value)
    }

    /// Removes the member equal to `value`; returns `true` if one was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Eq + Hash,
    {
        self.map.remove(value).is_some()
    }

    /// Adds `value` if absent, removes it if present.
    ///
    /// Returns `true` if the value is a member afterwards.
    pub fn toggle(&mut self, value: T) -> bool {
        if self.remove(&value) {
            false
        } else {
            self.add(value)
        }
    }

    /// Returns `true` if every member of `self` is also in `other`.
    pub fn is_subset<S2: BuildHasher>(&self, other: &ValueHashSet<T, S2>) -> bool {
        self.size() <= other.size() && self.iter().all(|member| other.contains(member))
    }
}

// ── Trait impls ───────────────────────────────────────────────────────────────

impl<T, S: Default> Default for ValueHashSet<T, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T: fmt::Debug, S> fmt::Debug for ValueHashSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> PartialEq for ValueHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.is_subset(other)
    }
}

impl<T, S> Eq for ValueHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
}

impl<T, S> FromIterator<T> for ValueHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T, S> Extend<T> for ValueHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for member in iter {
            self.add(member);
        }
    }
}

impl<T, const N: usize> From<[T; N]> for ValueHashSet<T>
where
    T: Eq + Hash,
{
    fn from(members: [T; N]) -> Self {
        members.into_iter().collect()
    }
}

impl<T> From<&[T]> for ValueHashSet<T>
where
    T: Eq + Hash + Clone,
{
    fn from(members: &[T]) -> Self {
        members.iter().cloned().collect()
    }
}

impl<'a, T, S> IntoIterator for &'a ValueHashSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> IntoIterator for ValueHashSet<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.map.into_iter(),
        }
    }
}

/// Borrowing iterator over a [`ValueHashSet`].
pub struct Iter<'a, T> {
    inner: hash_map::Iter<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(member, _)| member)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator over a [`ValueHashSet`].
pub struct IntoIter<T> {
    inner: hash_map::IntoIter<T, ()>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(member, _)| member)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}
