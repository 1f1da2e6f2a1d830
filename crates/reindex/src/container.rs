//! Container capability contracts.
//!
//! Adapters never implement storage themselves; they forward translated keys
//! to a container through these traits:
//!
//! - [`Container`] - length, checked access ([`at`](Container::at)) and
//!   unchecked access ([`subscript`](Container::subscript))
//! - [`Sequence`] - positional insertion and removal over `usize` positions
//! - [`Associative`] - key-based insertion and removal
//!
//! Implementations are provided for `[T; N]`, `Vec<T>`, `VecDeque<T>`,
//! `HashMap<K, V, S>` and `BTreeMap<K, V>`.

use std::{
    collections::{BTreeMap, HashMap, VecDeque},
    hash::{BuildHasher, Hash},
    ops::Range,
};

use crate::AccessError;

/// A container addressed by storage keys.
pub trait Container {
    /// The native key type.
    type Key: Copy;
    /// The element type.
    type Value;

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the container holds no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a shared reference to the element at `key`.
    ///
    /// # Errors
    ///
    /// Returns an [`AccessError`] if the container holds no element at `key`.
    fn at(&self, key: Self::Key) -> Result<&Self::Value, AccessError>;

    /// Returns an exclusive reference to the element at `key`.
    ///
    /// # Errors
    ///
    /// Returns an [`AccessError`] if the container holds no element at `key`.
    fn at_mut(&mut self, key: Self::Key) -> Result<&mut Self::Value, AccessError>;

    /// Returns a shared reference to the element at `key`.
    ///
    /// # Panics
    ///
    /// Panics if the container holds no element at `key`.
    fn subscript(&self, key: Self::Key) -> &Self::Value;

    /// Returns an exclusive reference to the element at `key`.
    ///
    /// # Panics
    ///
    /// Panics if the container holds no element at `key`.
    fn subscript_mut(&mut self, key: Self::Key) -> &mut Self::Value;
}

/// A random-access container supporting positional insertion and removal.
pub trait Sequence: Container<Key = usize> {
    /// Inserts `value` at `position`, shifting later elements back.
    ///
    /// # Panics
    ///
    /// Panics if `position > len`.
    fn insert(&mut self, position: usize, value: Self::Value);

    /// Inserts every value of `values` starting at `position`, preserving their
    /// order, and returns how many were inserted.
    ///
    /// # Panics
    ///
    /// Panics if `position > len`.
    fn insert_iter<I>(&mut self, position: usize, values: I) -> usize
    where
        I: IntoIterator<Item = Self::Value>;

    /// Removes and returns the element at `position`, shifting later elements
    /// forward.
    ///
    /// # Panics
    ///
    /// Panics if `position >= len`.
    fn remove(&mut self, position: usize) -> Self::Value;

    /// Removes the elements in the half-open `range` and returns how many were
    /// removed.
    ///
    /// # Panics
    ///
    /// Panics if the range is decreasing or extends past the end.
    fn remove_range(&mut self, range: Range<usize>) -> usize;
}

/// A container addressed by arbitrary keys.
pub trait Associative: Container {
    /// Inserts `value` under `key`, returning the value it replaced.
    fn insert(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value>;

    /// Removes and returns the value under `key`.
    fn remove(&mut self, key: Self::Key) -> Option<Self::Value>;

    /// Returns `true` if an entry exists for `key`.
    fn contains_key(&self, key: Self::Key) -> bool;

    /// Removes the entry under `key` and returns how many entries were removed
    /// (0 or 1).
    #[inline]
    fn erase(&mut self, key: Self::Key) -> usize {
        usize::from(self.remove(key).is_some())
    }
}

fn out_of_range(index: usize, len: usize) -> AccessError {
    AccessError::OutOfRange { index, len }
}

impl<T, const N: usize> Container for [T; N] {
    type Key = usize;
    type Value = T;

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn at(&self, key: usize) -> Result<&T, AccessError> {
        self.get(key).ok_or(out_of_range(key, N))
    }

    #[inline]
    fn at_mut(&mut self, key: usize) -> Result<&mut T, AccessError> {
        self.get_mut(key).ok_or(out_of_range(key, N))
    }

    #[inline]
    fn subscript(&self, key: usize) -> &T {
        &self[key]
    }

    #[inline]
    fn subscript_mut(&mut self, key: usize) -> &mut T {
        &mut self[key]
    }
}

impl<T> Container for Vec<T> {
    type Key = usize;
    type Value = T;

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn at(&self, key: usize) -> Result<&T, AccessError> {
        let len = Vec::len(self);
        self.get(key).ok_or(out_of_range(key, len))
    }

    #[inline]
    fn at_mut(&mut self, key: usize) -> Result<&mut T, AccessError> {
        let len = Vec::len(self);
        self.get_mut(key).ok_or(out_of_range(key, len))
    }

    #[inline]
    fn subscript(&self, key: usize) -> &T {
        &self[key]
    }

    #[inline]
    fn subscript_mut(&mut self, key: usize) -> &mut T {
        &mut self[key]
    }
}

impl<T> Sequence for Vec<T> {
    #[inline]
    fn insert(&mut self, position: usize, value: T) {
        Vec::insert(self, position, value);
    }

    fn insert_iter<I>(&mut self, position: usize, values: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let before = Vec::len(self);
        self.splice(position..position, values);
        Vec::len(self) - before
    }

    #[inline]
    fn remove(&mut self, position: usize) -> T {
        Vec::remove(self, position)
    }

    fn remove_range(&mut self, range: Range<usize>) -> usize {
        let count = range.len();
        self.drain(range);
        count
    }
}

impl<T> Container for VecDeque<T> {
    type Key = usize;
    type Value = T;

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    #[inline]
    fn at(&self, key: usize) -> Result<&T, AccessError> {
        let len = VecDeque::len(self);
        self.get(key).ok_or(out_of_range(key, len))
    }

    #[inline]
    fn at_mut(&mut self, key: usize) -> Result<&mut T, AccessError> {
        let len = VecDeque::len(self);
        self.get_mut(key).ok_or(out_of_range(key, len))
    }

    #[inline]
    fn subscript(&self, key: usize) -> &T {
        &self[key]
    }

    #[inline]
    fn subscript_mut(&mut self, key: usize) -> &mut T {
        &mut self[key]
    }
}

impl<T> Sequence for VecDeque<T> {
    #[inline]
    fn insert(&mut self, position: usize, value: T) {
        VecDeque::insert(self, position, value);
    }

    fn insert_iter<I>(&mut self, position: usize, values: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let mut tail = self.split_off(position);
        let before = VecDeque::len(self);
        self.extend(values);
        let count = VecDeque::len(self) - before;
        self.append(&mut tail);
        count
    }

    fn remove(&mut self, position: usize) -> T {
        let len = VecDeque::len(self);
        VecDeque::remove(self, position)
            .unwrap_or_else(|| panic!("removal index (is {position}) should be < len (is {len})"))
    }

    fn remove_range(&mut self, range: Range<usize>) -> usize {
        let count = range.len();
        self.drain(range);
        count
    }
}

impl<K, V, S> Container for HashMap<K, V, S>
where
    K: Copy + Eq + Hash,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;

    #[inline]
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    #[inline]
    fn at(&self, key: K) -> Result<&V, AccessError> {
        self.get(&key).ok_or(AccessError::KeyNotFound)
    }

    #[inline]
    fn at_mut(&mut self, key: K) -> Result<&mut V, AccessError> {
        self.get_mut(&key).ok_or(AccessError::KeyNotFound)
    }

    #[inline]
    fn subscript(&self, key: K) -> &V {
        &self[&key]
    }

    fn subscript_mut(&mut self, key: K) -> &mut V {
        self.get_mut(&key)
            .unwrap_or_else(|| panic!("key not present in map"))
    }
}

impl<K, V, S> Associative for HashMap<K, V, S>
where
    K: Copy + Eq + Hash,
    S: BuildHasher,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        HashMap::insert(self, key, value)
    }

    #[inline]
    fn remove(&mut self, key: K) -> Option<V> {
        HashMap::remove(self, &key)
    }

    #[inline]
    fn contains_key(&self, key: K) -> bool {
        HashMap::contains_key(self, &key)
    }
}

impl<K, V> Container for BTreeMap<K, V>
where
    K: Copy + Ord,
{
    type Key = K;
    type Value = V;

    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    #[inline]
    fn at(&self, key: K) -> Result<&V, AccessError> {
        self.get(&key).ok_or(AccessError::KeyNotFound)
    }

    #[inline]
    fn at_mut(&mut self, key: K) -> Result<&mut V, AccessError> {
        self.get_mut(&key).ok_or(AccessError::KeyNotFound)
    }

    #[inline]
    fn subscript(&self, key: K) -> &V {
        &self[&key]
    }

    fn subscript_mut(&mut self, key: K) -> &mut V {
        self.get_mut(&key)
            .unwrap_or_else(|| panic!("key not present in map"))
    }
}

impl<K, V> Associative for BTreeMap<K, V>
where
    K: Copy + Ord,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        BTreeMap::insert(self, key, value)
    }

    #[inline]
    fn remove(&mut self, key: K) -> Option<V> {
        BTreeMap::remove(self, &key)
    }

    #[inline]
    fn contains_key(&self, key: K) -> bool {
        BTreeMap::contains_key(self, &key)
    }
}
