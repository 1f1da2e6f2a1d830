//! User-domain range derivation for order-preserving converters.
//!
//! Only positional adapters have a contiguous storage range. Associative
//! containers hold sparse keys, so [`Remap`](crate::Remap) has no range.

use super::Reindex;
use crate::{Container, Handle, Monotonic};

impl<H, Conv> Reindex<H, Conv>
where
    H: Handle,
    H::Target: Container<Key = usize>,
    Conv: Monotonic<StorageKey = usize>,
{
    /// Returns the user key of the first storage slot, `revert(0)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use reindex::{Reindex, Slit};
    ///
    /// let slit = Reindex::new(Slit::<usize>::new(1000, 5), vec![0; 500]);
    /// assert_eq!(slit.begin_index(), 1000);
    /// assert_eq!(slit.end_index(), 3500);
    /// ```
    ///
    /// Keyed adapters have no range:
    ///
    /// ```compile_fail
    /// use std::collections::BTreeMap;
    ///
    /// use reindex::{Rebase, Remap};
    ///
    /// let remap = Remap::new(Rebase::<usize>::new(1000), BTreeMap::from([(0_usize, 'a')]));
    /// let _ = remap.begin_index();
    /// ```
    #[must_use]
    #[inline]
    pub fn begin_index(&self) -> Conv::UserKey {
        self.converter.monotonic_revert(0)
    }

    /// Returns the exclusive upper bound of valid user keys,
    /// `revert(container.len())`.
    ///
    /// Valid user keys are `begin_index()`, `begin_index() + stride()`, ...
    /// strictly below this bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use reindex::{Reindex, Slit};
    ///
    /// let slit = Reindex::new(Slit::<usize>::new(10, 3), vec!['a', 'b', 'c']);
    ///
    /// let mut keys = Vec::new();
    /// let mut key = slit.begin_index();
    /// while key < slit.end_index() {
    ///     keys.push(key);
    ///     key += slit.stride();
    /// }
    /// assert_eq!(keys, [10, 13, 16]);
    /// ```
    #[must_use]
    #[inline]
    pub fn end_index(&self) -> Conv::UserKey {
        self.converter.monotonic_revert(self.container().len())
    }

    /// Returns the user-domain distance between consecutive storage slots.
    #[must_use]
    #[inline]
    pub fn stride(&self) -> Conv::UserKey {
        self.converter.stride()
    }

    /// Returns `true` if `user` converts cleanly to a slot within the
    /// container.
    #[must_use]
    pub fn contains_index(&self, user: Conv::UserKey) -> bool {
        self.converter
            .try_convert(user)
            .is_ok_and(|index| index < self.container().len())
    }
}
