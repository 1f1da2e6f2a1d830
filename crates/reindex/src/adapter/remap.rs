//! Key-based mutation of associative containers through user keys.
//!
//! The container's native key type must be exactly the converter's storage
//! key type; this is enforced by the trait bounds, not at runtime.

use super::Remap;
use crate::{Associative, Container, Converter, Error, Handle, HandleMut};

type Value<H> = <<H as Handle>::Target as Container>::Value;

impl<H, Conv> Remap<H, Conv>
where
    H: Handle,
    H::Target: Associative,
    Conv: Converter<StorageKey = <H::Target as Container>::Key>,
{
    /// Returns `true` if the container holds an entry for `user`.
    ///
    /// Keys that do not convert into the storage domain are never present.
    #[must_use]
    pub fn contains_key(&self, user: Conv::UserKey) -> bool {
        self.converter
            .try_convert(user)
            .is_ok_and(|key| self.container().contains_key(key))
    }
}

impl<H, Conv> Remap<H, Conv>
where
    H: HandleMut,
    H::Target: Associative,
    Conv: Converter<StorageKey = <H::Target as Container>::Key>,
{
    /// Inserts `value` under `user`, returning the value it replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use reindex::{Rebase, Remap};
    ///
    /// let mut table = Remap::new(Rebase::<u32>::new(100), HashMap::new());
    /// assert_eq!(table.insert(105, "five"), None);
    /// assert_eq!(table.container()[&5], "five");
    /// ```
    pub fn insert(&mut self, user: Conv::UserKey, value: Value<H>) -> Option<Value<H>> {
        let key = self.converter.convert(user);
        self.handle.target_mut().insert(key, value)
    }

    /// Inserts `value` under `user` after checking the key conversion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Convert`] if the key cannot be converted.
    pub fn try_insert(
        &mut self,
        user: Conv::UserKey,
        value: Value<H>,
    ) -> Result<Option<Value<H>>, Error> {
        let key = self.converter.try_convert(user)?;
        Ok(self.handle.target_mut().insert(key, value))
    }

    /// Removes and returns the value under `user`.
    pub fn remove(&mut self, user: Conv::UserKey) -> Option<Value<H>> {
        let key = self.converter.convert(user);
        self.handle.target_mut().remove(key)
    }

    /// Removes the entry under `user` and returns how many entries were
    /// removed (0 or 1).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    ///
    /// use reindex::{Rebase, Remap};
    ///
    /// let mut map = BTreeMap::from([(0_u64, 'a'), (1, 'b')]);
    /// let mut remap = Remap::borrowed(Rebase::<u64>::new(10), &mut map);
    /// assert_eq!(remap.erase(11), 1);
    /// assert_eq!(remap.erase(11), 0);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn erase(&mut self, user: Conv::UserKey) -> usize {
        let key = self.converter.convert(user);
        self.handle.target_mut().erase(key)
    }

    /// Removes the entry under `user` after checking the key conversion, and
    /// returns how many entries were removed (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Convert`] if the key cannot be converted.
    pub fn try_erase(&mut self, user: Conv::UserKey) -> Result<usize, Error> {
        let key = self.converter.try_convert(user)?;
        Ok(self.handle.target_mut().erase(key))
    }
}
