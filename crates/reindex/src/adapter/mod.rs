//! Key-translating container adapters.
//!
//! [`Adapter`] pairs one converter with one container handle and exposes the
//! container's operations keyed in the user domain. Every operation converts
//! the user key first and then forwards the storage key to the container.
//!
//! Two shapes are public:
//!
//! - [`Reindex`] - over positional containers (`Vec`, `VecDeque`, arrays),
//!   with positional `insert` / `emplace` / `erase` and,
//!   for monotonic converters, `begin_index` / `end_index`
//! - [`Remap`] - over associative containers (`HashMap`, `BTreeMap`), with
//!   key-based `insert` / `erase`
//!
//! Both share checked access ([`at`](Adapter::at)), unchecked subscript access
//! (`adapter[key]`) and the [`container`](Adapter::container) escape hatch.
//!
//! Iteration is only available in the storage domain, through the container.
//!
//! # Examples
//!
//! ```
//! use reindex::{Rebase, Reindex};
//!
//! let mut window = Reindex::new(Rebase::<usize>::new(1000), vec![0_u32; 500]);
//! window[1000] = 7;
//! assert_eq!(window.container()[0], 7);
//! assert_eq!(window.at(1499), Ok(&0));
//! assert!(window.at(1500).unwrap_err().is_out_of_range());
//! ```

use std::{fmt, marker::PhantomData, ops};

use crate::{
    Container, ConvertError, Converter, Error, Handle, HandleMut, Key, Owned, Rebase, Slit,
};

mod monotonic;
mod remap;
mod sequence;

/// Kind tag for adapters over positional containers.
#[derive(Debug, Clone, Copy)]
pub enum Positional {}

/// Kind tag for adapters over associative containers.
#[derive(Debug, Clone, Copy)]
pub enum Keyed {}

/// A container re-keyed through a converter.
///
/// - `H` is the container [handle](crate::handle): [`Owned<C>`], `&mut C` or
///   `&C`
/// - `Conv` is the [`Converter`]
/// - `Kind` selects the positional ([`Reindex`]) or keyed ([`Remap`]) operation
///   set
pub struct Adapter<H, Conv, Kind> {
    converter: Conv,
    handle: H,
    kind: PhantomData<fn() -> Kind>,
}

/// An adapter over a positional container.
pub type Reindex<H, Conv> = Adapter<H, Conv, Positional>;

/// An adapter over an associative container.
pub type Remap<H, Conv> = Adapter<H, Conv, Keyed>;

impl<C, Conv, Kind> Adapter<Owned<C>, Conv, Kind> {
    /// Creates an adapter that owns `container`.
    ///
    /// # Examples
    ///
    /// ```
    /// use reindex::{Reindex, Slit};
    ///
    /// let slit = Reindex::new(Slit::<usize>::new(1000, 5), vec!['a'; 500]);
    /// assert_eq!(slit[2000], 'a');
    /// ```
    #[must_use]
    pub fn new(converter: Conv, container: C) -> Self {
        Self::from_parts(converter, Owned::new(container))
    }

    /// Releases the container.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.handle.into_inner()
    }

    /// Releases the converter and the container.
    #[must_use]
    pub fn into_parts(self) -> (Conv, C) {
        (self.converter, self.handle.into_inner())
    }
}

impl<C, Conv, Kind> Adapter<Owned<C>, Conv, Kind>
where
    C: Default,
{
    /// Creates an adapter that owns a default-constructed container.
    ///
    /// # Examples
    ///
    /// ```
    /// use reindex::{Owned, Rebase, Reindex};
    ///
    /// let rebase: Reindex<Owned<[u8; 32]>, _> = Reindex::with_default(Rebase::<usize>::new(1000));
    /// assert_eq!(rebase.len(), 32);
    /// assert_eq!(rebase.end_index(), 1032);
    /// ```
    #[must_use]
    pub fn with_default(converter: Conv) -> Self {
        Self::new(converter, C::default())
    }
}

impl<'a, C, Conv, Kind> Adapter<&'a mut C, Conv, Kind> {
    /// Creates an adapter over a container borrowed mutably from the caller.
    ///
    /// Mutations through the adapter are visible through `container` once the
    /// adapter is dropped.
    #[must_use]
    pub fn borrowed(converter: Conv, container: &'a mut C) -> Self {
        Self::from_parts(converter, container)
    }
}

impl<'a, C, Conv, Kind> Adapter<&'a C, Conv, Kind> {
    /// Creates a read-only adapter over a shared borrow.
    #[must_use]
    pub fn shared(converter: Conv, container: &'a C) -> Self {
        Self::from_parts(converter, container)
    }
}

impl<H, Conv, Kind> Adapter<H, Conv, Kind> {
    /// Creates an adapter from a converter and an arbitrary handle.
    #[must_use]
    pub fn from_parts(converter: Conv, handle: H) -> Self {
        Self {
            converter,
            handle,
            kind: PhantomData,
        }
    }

    /// Returns the converter.
    #[must_use]
    pub fn converter(&self) -> &Conv {
        &self.converter
    }

    /// Returns the converter mutably.
    ///
    /// Changing converter parameters re-seats the key mapping without moving
    /// any element.
    #[must_use]
    pub fn converter_mut(&mut self) -> &mut Conv {
        &mut self.converter
    }

    /// Replaces the converter, returning the previous one.
    pub fn set_converter(&mut self, converter: Conv) -> Conv
    where
        Conv: fmt::Debug,
    {
        log::debug!("replacing converter {:?} with {converter:?}", self.converter);
        std::mem::replace(&mut self.converter, converter)
    }
}

impl<H, Conv, Kind> Adapter<H, Conv, Kind>
where
    H: Handle,
{
    /// Returns the wrapped container.
    ///
    /// The container is addressed by storage keys; iterating it walks the
    /// storage domain.
    #[must_use]
    pub fn container(&self) -> &H::Target {
        self.handle.target()
    }
}

impl<H, Conv, Kind> Adapter<H, Conv, Kind>
where
    H: HandleMut,
{
    /// Returns the wrapped container mutably.
    #[must_use]
    pub fn container_mut(&mut self) -> &mut H::Target {
        self.handle.target_mut()
    }
}

impl<H, Conv, Kind> Adapter<H, Conv, Kind>
where
    H: Handle,
    H::Target: Container,
    Conv: Converter<StorageKey = <H::Target as Container>::Key>,
{
    /// Converts a user key to a storage key without validation.
    #[must_use]
    #[inline]
    pub fn convert_key(&self, user: Conv::UserKey) -> Conv::StorageKey {
        self.converter.convert(user)
    }

    /// Converts a user key to a storage key.
    ///
    /// # Errors
    ///
    /// Returns a [`ConvertError`] if the key cannot be mapped into the storage
    /// domain.
    #[inline]
    pub fn try_convert_key(&self, user: Conv::UserKey) -> Result<Conv::StorageKey, ConvertError> {
        self.converter.try_convert(user)
    }

    /// Returns the number of elements in the container.
    #[must_use]
    pub fn len(&self) -> usize {
        self.container().len()
    }

    /// Returns `true` if the container holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.container().is_empty()
    }

    /// Returns a shared reference to the element at `user`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Convert`] if the key cannot be converted and
    /// [`Error::Access`] if the container has no element at the converted key.
    pub fn at(&self, user: Conv::UserKey) -> Result<&<H::Target as Container>::Value, Error> {
        let key = self.converter.try_convert(user).inspect_err(trace_failure)?;
        let value = self.container().at(key).inspect_err(trace_failure)?;
        Ok(value)
    }

    /// Returns a shared reference to the element at `user`, or `None` if
    /// [`at`](Self::at) would fail.
    #[must_use]
    pub fn get(&self, user: Conv::UserKey) -> Option<&<H::Target as Container>::Value> {
        self.at(user).ok()
    }
}

impl<H, Conv, Kind> Adapter<H, Conv, Kind>
where
    H: HandleMut,
    H::Target: Container,
    Conv: Converter<StorageKey = <H::Target as Container>::Key>,
{
    /// Returns an exclusive reference to the element at `user`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Convert`] if the key cannot be converted and
    /// [`Error::Access`] if the container has no element at the converted key.
    pub fn at_mut(
        &mut self,
        user: Conv::UserKey,
    ) -> Result<&mut <H::Target as Container>::Value, Error> {
        let key = self.converter.try_convert(user).inspect_err(trace_failure)?;
        let value = self
            .handle
            .target_mut()
            .at_mut(key)
            .inspect_err(trace_failure)?;
        Ok(value)
    }

    /// Returns an exclusive reference to the element at `user`, or `None` if
    /// [`at_mut`](Self::at_mut) would fail.
    #[must_use]
    pub fn get_mut(&mut self, user: Conv::UserKey) -> Option<&mut <H::Target as Container>::Value> {
        self.at_mut(user).ok()
    }
}

fn trace_failure<E: fmt::Display>(err: &E) {
    log::trace!("checked access failed: {err}");
}

impl<H, U, S, Kind> Adapter<H, Rebase<U, S>, Kind>
where
    U: Key,
    S: Key,
{
    /// Re-seats the key mapping onto a new offset.
    ///
    /// No element moves: the element previously at user key `k` is afterwards
    /// at `k - old_offset + offset`.
    pub fn reindex(&mut self, offset: U) {
        self.converter.reindex(offset);
    }
}

impl<H, U, S, Kind> Adapter<H, Slit<U, S>, Kind>
where
    U: Key,
    S: Key,
{
    /// Re-seats the key mapping onto a new offset and step.
    ///
    /// No element moves: the element in storage slot `i` is afterwards at user
    /// key `offset + i * step`.
    ///
    /// # Panics
    ///
    /// Panics if `step` is not positive.
    #[track_caller]
    pub fn reindex(&mut self, offset: U, step: U) {
        self.converter.reindex(offset, step);
    }

    /// Re-seats the key mapping onto a new offset and step.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::NonPositiveStep`] if `step` is not positive; the
    /// mapping is left unchanged.
    pub fn try_reindex(&mut self, offset: U, step: U) -> Result<(), ConvertError> {
        self.converter.try_reindex(offset, step)
    }
}

impl<H, Conv, Kind> ops::Index<Conv::UserKey> for Adapter<H, Conv, Kind>
where
    H: Handle,
    H::Target: Container,
    Conv: Converter<StorageKey = <H::Target as Container>::Key>,
{
    type Output = <H::Target as Container>::Value;

    /// Returns the element at the given user key.
    ///
    /// # Panics
    ///
    /// Panics under the container's own contract if the converted key is out of
    /// range.
    #[inline]
    fn index(&self, user: Conv::UserKey) -> &Self::Output {
        self.container().subscript(self.converter.convert(user))
    }
}

impl<H, Conv, Kind> ops::IndexMut<Conv::UserKey> for Adapter<H, Conv, Kind>
where
    H: HandleMut,
    H::Target: Container,
    Conv: Converter<StorageKey = <H::Target as Container>::Key>,
{
    /// Returns the element at the given user key mutably.
    ///
    /// # Panics
    ///
    /// Panics under the container's own contract if the converted key is out of
    /// range.
    #[inline]
    fn index_mut(&mut self, user: Conv::UserKey) -> &mut Self::Output {
        let key = self.converter.convert(user);
        self.handle.target_mut().subscript_mut(key)
    }
}

impl<H, Conv, Kind> fmt::Debug for Adapter<H, Conv, Kind>
where
    H: fmt::Debug,
    Conv: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("converter", &self.converter)
            .field("handle", &self.handle)
            .finish()
    }
}

impl<H, Conv, Kind> Clone for Adapter<H, Conv, Kind>
where
    H: Clone,
    Conv: Clone,
{
    fn clone(&self) -> Self {
        Self::from_parts(self.converter.clone(), self.handle.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, ptr};

    use proptest::prelude::*;

    use super::*;
    use crate::{AccessError, Bijective as _, Monotonic as _};

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    struct Pair {
        a: i32,
        b: i32,
    }

    /// Exercises a strided adapter over 500 slots at offset 1000, step 5.
    fn check_slit<H>(slit: &mut Reindex<H, Slit<usize>>)
    where
        H: HandleMut,
        H::Target: Container<Key = usize, Value = Pair>,
    {
        assert_eq!(slit.begin_index(), 1000);
        assert_eq!(slit.end_index(), 3500);

        *slit.at_mut(1000).unwrap() = Pair { a: 10, b: 20 };
        slit[2000] = Pair { a: 20, b: 30 };
        assert_eq!(slit.at(1000).unwrap().a, 10);
        assert_eq!(slit[1000].b, 20);
        assert_eq!(slit.at(2000).unwrap().b, 30);
        assert!(ptr::eq(slit.at(1000).unwrap(), &slit[1000]));

        assert_eq!(slit.convert_key(1000), 0);
        assert_eq!(slit.convert_key(1005), 1);
        assert_eq!(slit.convert_key(2000), (2000 - 1000) / 5);

        let x1: *const Pair = &slit[1000];
        let x2: *const Pair = &slit[2000];
        slit.reindex(2000, 10);
        assert!(ptr::eq(x1, &slit[2000]));
        assert!(!ptr::eq(x2, &slit[2000]));
        assert_eq!(slit[2000], Pair { a: 10, b: 20 });
        slit.reindex(1000, 5);
        assert_eq!(slit[2000], Pair { a: 20, b: 30 });
    }

    /// Exercises an offset adapter over 500 slots at offset 1000.
    fn check_rebase<H>(rebase: &mut Reindex<H, Rebase<usize>>)
    where
        H: HandleMut,
        H::Target: Container<Key = usize, Value = Pair>,
    {
        assert_eq!(rebase.begin_index(), 1000);
        assert_eq!(rebase.end_index(), 1500);

        *rebase.at_mut(1000).unwrap() = Pair { a: 10, b: 20 };
        rebase[1100] = Pair { a: 20, b: 30 };
        assert_eq!(rebase.at(1000).unwrap().a, 10);
        assert_eq!(rebase[1100].b, 30);
        assert!(ptr::eq(rebase.at(1499).unwrap(), rebase.container().subscript(499)));
        assert_eq!(
            rebase.at(1500),
            Err(Error::Access(AccessError::OutOfRange {
                index: 500,
                len: 500,
            }))
        );
    }

    mod slit {
        use super::*;

        #[test]
        fn test_vec() {
            let mut slit = Reindex::new(Slit::new(1000, 5), vec![Pair::default(); 500]);
            check_slit(&mut slit);
        }

        #[test]
        fn test_array() {
            let mut slit = Reindex::new(Slit::new(1000, 5), [Pair::default(); 500]);
            check_slit(&mut slit);
        }

        #[test]
        fn test_vec_deque() {
            let mut slit = Reindex::new(
                Slit::new(1000, 5),
                VecDeque::from(vec![Pair::default(); 500]),
            );
            check_slit(&mut slit);
        }

        #[test]
        fn test_resize_through_container() {
            let mut slit: Reindex<Owned<Vec<Pair>>, _> =
                Reindex::with_default(Slit::new(1000, 5));
            assert_eq!(slit.end_index(), 1000);
            slit.container_mut().resize(500, Pair::default());
            check_slit(&mut slit);
        }

        #[test]
        fn test_checked_access_rejects_misaligned_key() {
            let slit = Reindex::new(Slit::<usize>::new(1000, 5), vec![0_u8; 500]);
            assert_eq!(
                slit.at(1003),
                Err(Error::Convert(ConvertError::Misaligned {
                    key: 1003,
                    offset: 1000,
                    step: 5,
                }))
            );
            assert_eq!(slit.get(995), None);
            assert_eq!(slit.get(1005), Some(&0));
        }
    }

    mod rebase {
        use super::*;

        #[test]
        fn test_array() {
            let mut rebase = Reindex::new(Rebase::new(1000), [Pair::default(); 500]);
            check_rebase(&mut rebase);
        }

        #[test]
        fn test_owned_and_borrowed_read_alike() {
            let mut container = [Pair::default(); 500];
            {
                let mut borrowed = Reindex::borrowed(Rebase::new(1000), &mut container);
                check_rebase(&mut borrowed);
            }
            assert_eq!(container[100], Pair { a: 20, b: 30 });

            let mut owned = Reindex::new(Rebase::new(1000), container);
            check_rebase(&mut owned);

            let shared = Reindex::shared(Rebase::<usize>::new(1000), &container);
            for user in shared.begin_index()..shared.end_index() {
                assert_eq!(shared.at(user), owned.at(user));
            }

            owned[1200] = Pair { a: 1, b: 1 };
            assert_eq!(owned[1200], Pair { a: 1, b: 1 });
            assert_eq!(container[200], Pair::default());
        }

        #[test]
        fn test_signed_user_keys() {
            let mut rebase = Reindex::new(Rebase::<i64, usize>::new(-3), vec![0; 6]);
            rebase[-3] = 1;
            rebase[2] = 6;
            assert_eq!(rebase.container(), &[1, 0, 0, 0, 0, 6]);
            assert_eq!(rebase.begin_index(), -3);
            assert_eq!(rebase.end_index(), 3);
            assert_eq!(
                rebase.at(-4),
                Err(Error::Convert(ConvertError::OutOfDomain { key: -1 }))
            );
        }

        #[test]
        fn test_reindex_moves_no_element() {
            let mut rebase = Reindex::new(Rebase::<usize>::new(10), vec![1, 2, 3]);
            rebase.reindex(20);
            assert_eq!(rebase.converter().offset(), 20);
            assert_eq!(rebase.at(20), Ok(&1));
            assert_eq!(rebase.at(22), Ok(&3));
            assert_eq!(rebase.container(), &[1, 2, 3]);
        }

        #[test]
        #[should_panic(expected = "index out of bounds")]
        fn test_index_out_of_range_panics() {
            let rebase = Reindex::new(Rebase::<usize>::new(1000), vec![0; 500]);
            let _value = rebase[1500];
        }
    }

    #[test]
    fn test_set_converter_and_into_parts() {
        let mut adapter = Reindex::new(Slit::<usize>::new(0, 2), vec!['a', 'b']);
        let old = adapter.set_converter(Slit::new(10, 1));
        assert_eq!(old, Slit::new(0, 2));
        assert_eq!(adapter[11], 'b');

        adapter.converter_mut().reindex(0, 3);
        assert_eq!(adapter[3], 'b');

        let (converter, container) = adapter.into_parts();
        assert_eq!(converter.step(), 3);
        assert_eq!(container, vec!['a', 'b']);
    }

    #[test]
    fn test_try_reindex_rejects_zero_step() {
        let mut adapter = Reindex::new(Slit::<usize>::new(0, 2), vec![0; 4]);
        assert_eq!(
            adapter.try_reindex(5, 0),
            Err(ConvertError::NonPositiveStep { step: 0 })
        );
        assert_eq!(adapter.end_index(), 8);
    }

    #[test]
    fn test_clone_owned_adapter_is_independent() {
        let mut a = Reindex::new(Rebase::<usize>::new(1), vec![0, 0]);
        let b = a.clone();
        a[1] = 5;
        assert_eq!(b[1], 0);
        assert_eq!(a.into_inner(), vec![5, 0]);
    }

    proptest! {
        #[test]
        fn test_access_equivalence(
            offset in 0_usize..10_000,
            step in 1_usize..16,
            len in 1_usize..64,
            slot in 0_usize..64,
        ) {
            let container: Vec<usize> = (0..len).collect();
            let adapter = Reindex::new(Slit::<usize>::new(offset, step), container.clone());
            let user = offset + slot * step;
            if slot < len {
                let expected = container.at(adapter.convert_key(user)).map_err(Error::from);
                prop_assert_eq!(adapter.at(user), expected);
                prop_assert_eq!(&adapter[user], &container[slot]);
            } else {
                prop_assert!(adapter.at(user).unwrap_err().is_out_of_range());
            }
        }

        #[test]
        fn test_range_consistency(
            offset in -10_000_i64..10_000,
            step in 1_i64..16,
            len in 0_usize..64,
        ) {
            let mut adapter = Reindex::new(Slit::<i64, usize>::new(offset, step), vec![(); len]);
            prop_assert_eq!(adapter.begin_index(), adapter.converter().revert(0));
            prop_assert_eq!(adapter.end_index(), adapter.converter().revert(len));

            adapter.container_mut().push(());
            prop_assert_eq!(adapter.end_index(), adapter.converter().revert(len + 1));

            adapter.reindex(offset + 1, step + 1);
            prop_assert_eq!(adapter.begin_index(), offset + 1);
            prop_assert_eq!(adapter.end_index(), adapter.converter().monotonic_revert(len + 1));
        }

        #[test]
        fn test_user_round_trip(
            offset in -10_000_i64..10_000,
            step in 1_i64..16,
            len in 1_usize..64,
        ) {
            let adapter = Reindex::new(Slit::<i64, usize>::new(offset, step), vec![(); len]);
            let mut user = adapter.begin_index();
            while user < adapter.end_index() {
                let key = adapter.try_convert_key(user);
                prop_assert!(key.is_ok());
                prop_assert_eq!(adapter.converter().revert(adapter.convert_key(user)), user);
                user += adapter.stride();
            }
        }
    }
}
