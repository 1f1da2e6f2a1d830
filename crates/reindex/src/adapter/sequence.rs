//! Positional mutation of sequence containers through user keys.
//!
//! Each operation converts its user key(s) to storage positions and forwards
//! to the [`Sequence`] operation of the same shape. Positional mutation shifts
//! later elements, so the user keys of every element after the mutation point
//! change accordingly.

use super::Reindex;
use crate::{AccessError, Container, Converter, Error, HandleMut, Sequence};

type Value<H> = <<H as crate::Handle>::Target as Container>::Value;

impl<H, Conv> Reindex<H, Conv>
where
    H: HandleMut,
    H::Target: Sequence,
    Conv: Converter<StorageKey = usize>,
{
    /// Inserts `value` at `user`, shifting later elements back, and returns a
    /// reference to the inserted element.
    ///
    /// # Panics
    ///
    /// Panics if the converted position is past the end of the container.
    ///
    /// # Examples
    ///
    /// ```
    /// use reindex::{Reindex, Slit};
    ///
    /// let mut slit = Reindex::new(Slit::<usize>::new(1000, 5), vec![0; 10]);
    /// *slit.insert(1010, 7) += 1;
    /// assert_eq!(slit[1010], 8);
    /// assert_eq!(slit.container().len(), 11);
    /// ```
    pub fn insert(&mut self, user: Conv::UserKey, value: Value<H>) -> &mut Value<H> {
        let position = self.converter.convert(user);
        let container = self.handle.target_mut();
        container.insert(position, value);
        container.subscript_mut(position)
    }

    /// Inserts `value` at `user` after checking the key and position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Convert`] if the key cannot be converted and
    /// [`Error::Access`] if the position is past the end of the container.
    pub fn try_insert(
        &mut self,
        user: Conv::UserKey,
        value: Value<H>,
    ) -> Result<&mut Value<H>, Error> {
        let position = self.insertion_position(user)?;
        let container = self.handle.target_mut();
        container.insert(position, value);
        Ok(container.subscript_mut(position))
    }

    /// Constructs an element in place at `user` and returns a reference to it.
    ///
    /// # Panics
    ///
    /// Panics if the converted position is past the end of the container.
    pub fn emplace<F>(&mut self, user: Conv::UserKey, make: F) -> &mut Value<H>
    where
        F: FnOnce() -> Value<H>,
    {
        self.insert(user, make())
    }

    /// Constructs an element in place at `user` after checking the key and
    /// position. `make` is not called on failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Convert`] if the key cannot be converted and
    /// [`Error::Access`] if the position is past the end of the container.
    pub fn try_emplace<F>(&mut self, user: Conv::UserKey, make: F) -> Result<&mut Value<H>, Error>
    where
        F: FnOnce() -> Value<H>,
    {
        let position = self.insertion_position(user)?;
        let container = self.handle.target_mut();
        container.insert(position, make());
        Ok(container.subscript_mut(position))
    }

    /// Inserts all `values` in order starting at `user` and returns how many
    /// were inserted.
    ///
    /// # Panics
    ///
    /// Panics if the converted position is past the end of the container.
    ///
    /// # Examples
    ///
    /// ```
    /// use reindex::{Rebase, Reindex};
    ///
    /// let mut rebase = Reindex::new(Rebase::<usize>::new(100), vec![1, 5]);
    /// assert_eq!(rebase.insert_iter(101, [2, 3, 4]), 3);
    /// assert_eq!(rebase.container(), &[1, 2, 3, 4, 5]);
    /// ```
    pub fn insert_iter<I>(&mut self, user: Conv::UserKey, values: I) -> usize
    where
        I: IntoIterator<Item = Value<H>>,
    {
        let position = self.converter.convert(user);
        self.handle.target_mut().insert_iter(position, values)
    }

    /// Inserts all `values` in order starting at `user` after checking the key
    /// and position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Convert`] if the key cannot be converted and
    /// [`Error::Access`] if the position is past the end of the container.
    pub fn try_insert_iter<I>(&mut self, user: Conv::UserKey, values: I) -> Result<usize, Error>
    where
        I: IntoIterator<Item = Value<H>>,
    {
        let position = self.insertion_position(user)?;
        Ok(self.handle.target_mut().insert_iter(position, values))
    }

    /// Removes and returns the element at `user`, shifting later elements
    /// forward.
    ///
    /// # Panics
    ///
    /// Panics if the converted position is out of range.
    pub fn erase(&mut self, user: Conv::UserKey) -> Value<H> {
        let position = self.converter.convert(user);
        self.handle.target_mut().remove(position)
    }

    /// Removes and returns the element at `user` after checking the key and
    /// position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Convert`] if the key cannot be converted and
    /// [`Error::Access`] if the position is out of range.
    pub fn try_erase(&mut self, user: Conv::UserKey) -> Result<Value<H>, Error> {
        let position = self.converter.try_convert(user)?;
        let len = self.handle.target().len();
        if position >= len {
            return Err(AccessError::OutOfRange {
                index: position,
                len,
            }
            .into());
        }
        Ok(self.handle.target_mut().remove(position))
    }

    /// Removes the elements in the half-open user range `first..last` and
    /// returns how many were removed.
    ///
    /// Both endpoints are converted independently.
    ///
    /// # Panics
    ///
    /// Panics if the converted range is decreasing or extends past the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use reindex::{Reindex, Slit};
    ///
    /// let mut slit = Reindex::new(Slit::<usize>::new(0, 10), vec!['a', 'b', 'c', 'd']);
    /// assert_eq!(slit.erase_range(10, 30), 2);
    /// assert_eq!(slit.container(), &['a', 'd']);
    /// ```
    pub fn erase_range(&mut self, first: Conv::UserKey, last: Conv::UserKey) -> usize {
        let first = self.converter.convert(first);
        let last = self.converter.convert(last);
        self.handle.target_mut().remove_range(first..last)
    }

    /// Removes the elements in the half-open user range `first..last` after
    /// checking both endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Convert`] if either key cannot be converted and
    /// [`Error::Access`] if the converted range is decreasing or extends past
    /// the end.
    pub fn try_erase_range(
        &mut self,
        first: Conv::UserKey,
        last: Conv::UserKey,
    ) -> Result<usize, Error> {
        let first = self.converter.try_convert(first)?;
        let last = self.converter.try_convert(last)?;
        if first > last {
            return Err(AccessError::InvalidRange { first, last }.into());
        }
        let len = self.handle.target().len();
        if last > len {
            return Err(AccessError::OutOfRange { index: last, len }.into());
        }
        Ok(self.handle.target_mut().remove_range(first..last))
    }

    fn insertion_position(&self, user: Conv::UserKey) -> Result<usize, Error> {
        let position = self.converter.try_convert(user)?;
        let len = self.handle.target().len();
        if position > len {
            log::trace!("insertion position {position} is past the end ({len})");
            return Err(AccessError::OutOfRange {
                index: position,
                len,
            }
            .into());
        }
        Ok(position)
    }
}
