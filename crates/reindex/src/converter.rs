//! Key converters.
//!
//! A converter is a small value-type policy that translates a *user key* into
//! the *storage key* of a wrapped container, and optionally back. Adapters hold
//! one converter by value and run every key through it before touching the
//! container.
//!
//! # Capability traits
//!
//! - [`Converter`] - the mandatory forward mapping
//! - [`Bijective`] - adds the reverse mapping
//! - [`Monotonic`] - an order-preserving bijection with a fixed stride, which
//!   lets adapters derive the valid user-key range
//!
//! # Converters
//!
//! - [`Rebase`] - `storage = user - offset`
//! - [`Slit`] - `storage = (user - offset) / step`
//!
//! Each converter exposes an unchecked fast path ([`Converter::convert`]) and a
//! checked one ([`Converter::try_convert`]). The fast path does no validation
//! beyond debug assertions, Rust's own overflow checks and the panicking
//! [`Key::cast`] between key types.
//!
//! # Examples
//!
//! ```
//! use reindex::{Bijective, Converter, Slit};
//!
//! let slit = Slit::<usize>::new(1000, 5);
//! assert_eq!(slit.convert(1005), 1);
//! assert_eq!(slit.revert(200), 2000);
//! assert!(slit.try_convert(1003).is_err());
//! ```
//!
//! ## Implementing a custom converter
//!
//! ```
//! use reindex::{ConvertError, Converter};
//!
//! /// Maps keys counting down from `top` onto ascending slots.
//! struct Countdown {
//!     top: usize,
//! }
//!
//! impl Converter for Countdown {
//!     type UserKey = usize;
//!     type StorageKey = usize;
//!
//!     fn convert(&self, user: usize) -> usize {
//!         self.top - user
//!     }
//!
//!     fn try_convert(&self, user: usize) -> Result<usize, ConvertError> {
//!         self.top.checked_sub(user).ok_or(ConvertError::Overflow {
//!             key: i128::try_from(user).unwrap_or(i128::MAX),
//!         })
//!     }
//! }
//!
//! assert_eq!(Countdown { top: 10 }.convert(7), 3);
//! ```

use std::{fmt, marker::PhantomData};

use crate::{ConvertError, Key};

/// Translates user keys into storage keys.
pub trait Converter {
    /// The key domain exposed to adapter callers.
    type UserKey: Copy;
    /// The native key domain of the wrapped container.
    type StorageKey: Copy;

    /// Converts a user key without validation.
    ///
    /// The result is not range checked; it is only validated when dereferenced
    /// against a container.
    ///
    /// # Panics
    ///
    /// Implementations may panic in debug builds when a precondition of the
    /// mapping is violated (e.g. key arithmetic overflow).
    fn convert(&self, user: Self::UserKey) -> Self::StorageKey;

    /// Converts a user key, reporting any precondition violation.
    ///
    /// # Errors
    ///
    /// Returns a [`ConvertError`] if the key cannot be mapped into the storage
    /// domain.
    fn try_convert(&self, user: Self::UserKey) -> Result<Self::StorageKey, ConvertError>;
}

/// A converter that can also map storage keys back to user keys.
pub trait Bijective: Converter {
    /// Converts a storage key back into the user domain without validation.
    ///
    /// # Panics
    ///
    /// Implementations may panic in debug builds on key arithmetic overflow.
    fn revert(&self, storage: Self::StorageKey) -> Self::UserKey;

    /// Converts a storage key back into the user domain.
    ///
    /// # Errors
    ///
    /// Returns a [`ConvertError`] if the result is not representable as a user
    /// key.
    fn try_revert(&self, storage: Self::StorageKey) -> Result<Self::UserKey, ConvertError>;
}

/// An order-preserving bijective converter with a fixed stride.
///
/// Consecutive storage keys map to user keys exactly [`stride`](Self::stride)
/// apart, so the valid user domain of a sequence of length `n` is
/// `revert(0), revert(0) + stride, ..` up to (excluding) `revert(n)`.
pub trait Monotonic: Bijective {
    /// The user-domain distance between consecutive storage keys.
    fn stride(&self) -> Self::UserKey;

    /// Alias of [`Converter::convert`] for order-preserving use.
    #[inline]
    fn monotonic_convert(&self, user: Self::UserKey) -> Self::StorageKey {
        self.convert(user)
    }

    /// Alias of [`Bijective::revert`] for order-preserving use.
    #[inline]
    fn monotonic_revert(&self, storage: Self::StorageKey) -> Self::UserKey {
        self.revert(storage)
    }
}

/// Offset-only converter: `storage = user - offset`.
///
/// `U` is the user key type and `S` the storage key type (`U` by default).
///
/// # Examples
///
/// ```
/// use reindex::{Bijective, Converter, Rebase};
///
/// let rebase = Rebase::<i64, usize>::new(-100);
/// assert_eq!(rebase.convert(-100), 0);
/// assert_eq!(rebase.convert(-1), 99);
/// assert_eq!(rebase.revert(150), 50);
/// ```
pub struct Rebase<U, S = U> {
    offset: U,
    marker: PhantomData<fn(U) -> S>,
}

impl<U, S> Rebase<U, S>
where
    U: Key,
    S: Key,
{
    /// Creates a converter with the given offset.
    #[must_use]
    pub const fn new(offset: U) -> Self {
        Self {
            offset,
            marker: PhantomData,
        }
    }

    /// Returns the user key mapped to storage key zero.
    #[must_use]
    pub const fn offset(&self) -> U {
        self.offset
    }

    /// Replaces the offset in place.
    ///
    /// Storage is not touched; keys computed under the old offset no longer
    /// address the same elements.
    pub fn reindex(&mut self, offset: U) {
        log::debug!("rebase: offset {} -> {}", self.offset, offset);
        self.offset = offset;
    }
}

impl<U, S> Converter for Rebase<U, S>
where
    U: Key,
    S: Key,
{
    type UserKey = U;
    type StorageKey = S;

    #[inline]
    fn convert(&self, user: U) -> S {
        (user - self.offset).cast()
    }

    #[inline]
    fn try_convert(&self, user: U) -> Result<S, ConvertError> {
        let diff = user.checked_sub(self.offset).ok_or(ConvertError::Overflow {
            key: user.to_i128(),
        })?;
        diff.try_cast().ok_or(ConvertError::OutOfDomain {
            key: diff.to_i128(),
        })
    }
}

impl<U, S> Bijective for Rebase<U, S>
where
    U: Key,
    S: Key,
{
    #[inline]
    fn revert(&self, storage: S) -> U {
        storage.cast::<U>() + self.offset
    }

    #[inline]
    fn try_revert(&self, storage: S) -> Result<U, ConvertError> {
        let key = storage.to_i128();
        storage
            .try_cast::<U>()
            .ok_or(ConvertError::OutOfDomain { key })?
            .checked_add(self.offset)
            .ok_or(ConvertError::Overflow { key })
    }
}

impl<U, S> Monotonic for Rebase<U, S>
where
    U: Key,
    S: Key,
{
    #[inline]
    fn stride(&self) -> U {
        U::ONE
    }
}

/// Offset-plus-stride converter: `storage = (user - offset) / step`.
///
/// Only user keys on the grid `offset + k * step` are valid. `step` is always
/// positive.
///
/// # Examples
///
/// ```
/// use reindex::{Bijective, Converter, Slit};
///
/// let slit = Slit::<usize>::new(1000, 5);
/// assert_eq!(slit.convert(1000), 0);
/// assert_eq!(slit.convert(2000), 200);
/// assert_eq!(slit.revert(500), 3500);
/// ```
pub struct Slit<U, S = U> {
    offset: U,
    step: U,
    marker: PhantomData<fn(U) -> S>,
}

impl<U, S> Slit<U, S>
where
    U: Key,
    S: Key,
{
    /// Creates a converter with the given offset and step.
    ///
    /// # Panics
    ///
    /// Panics if `step` is not positive.
    #[must_use]
    #[track_caller]
    pub fn new(offset: U, step: U) -> Self {
        assert!(step > U::ZERO, "step must be positive, got {step}");
        Self {
            offset,
            step,
            marker: PhantomData,
        }
    }

    /// Creates a converter with the given offset and step.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::NonPositiveStep`] if `step` is not positive.
    pub fn try_new(offset: U, step: U) -> Result<Self, ConvertError> {
        ensure_positive(step)?;
        Ok(Self {
            offset,
            step,
            marker: PhantomData,
        })
    }

    /// Returns the user key mapped to storage key zero.
    #[must_use]
    pub const fn offset(&self) -> U {
        self.offset
    }

    /// Returns the user-domain distance between consecutive slots.
    #[must_use]
    pub const fn step(&self) -> U {
        self.step
    }

    /// Replaces the offset and step in place.
    ///
    /// Storage is not touched; keys computed under the old mapping no longer
    /// address the same elements.
    ///
    /// # Panics
    ///
    /// Panics if `step` is not positive.
    #[track_caller]
    pub fn reindex(&mut self, offset: U, step: U) {
        assert!(step > U::ZERO, "step must be positive, got {step}");
        self.reseat(offset, step);
    }

    /// Replaces the offset and step in place.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::NonPositiveStep`] if `step` is not positive. The
    /// converter is left unchanged in that case.
    pub fn try_reindex(&mut self, offset: U, step: U) -> Result<(), ConvertError> {
        ensure_positive(step)?;
        self.reseat(offset, step);
        Ok(())
    }

    fn reseat(&mut self, offset: U, step: U) {
        log::debug!(
            "slit: offset {} -> {}, step {} -> {}",
            self.offset,
            offset,
            self.step,
            step
        );
        self.offset = offset;
        self.step = step;
    }
}

fn ensure_positive<U: Key>(step: U) -> Result<(), ConvertError> {
    if step > U::ZERO {
        Ok(())
    } else {
        Err(ConvertError::NonPositiveStep {
            step: step.to_i128(),
        })
    }
}

impl<U, S> Converter for Slit<U, S>
where
    U: Key,
    S: Key,
{
    type UserKey = U;
    type StorageKey = S;

    #[inline]
    fn convert(&self, user: U) -> S {
        let diff = user - self.offset;
        debug_assert!(
            diff % self.step == U::ZERO,
            "key {user} is not a multiple of step {} away from offset {}",
            self.step,
            self.offset
        );
        (diff / self.step).cast()
    }

    #[inline]
    fn try_convert(&self, user: U) -> Result<S, ConvertError> {
        let diff = user.checked_sub(self.offset).ok_or(ConvertError::Overflow {
            key: user.to_i128(),
        })?;
        if diff.checked_rem(self.step) != Some(U::ZERO) {
            return Err(ConvertError::Misaligned {
                key: user.to_i128(),
                offset: self.offset.to_i128(),
                step: self.step.to_i128(),
            });
        }
        let index = diff / self.step;
        index.try_cast().ok_or(ConvertError::OutOfDomain {
            key: index.to_i128(),
        })
    }
}

impl<U, S> Bijective for Slit<U, S>
where
    U: Key,
    S: Key,
{
    #[inline]
    fn revert(&self, storage: S) -> U {
        storage.cast::<U>() * self.step + self.offset
    }

    #[inline]
    fn try_revert(&self, storage: S) -> Result<U, ConvertError> {
        let key = storage.to_i128();
        storage
            .try_cast::<U>()
            .ok_or(ConvertError::OutOfDomain { key })?
            .checked_mul(self.step)
            .and_then(|scaled| scaled.checked_add(self.offset))
            .ok_or(ConvertError::Overflow { key })
    }
}

impl<U, S> Monotonic for Slit<U, S>
where
    U: Key,
    S: Key,
{
    #[inline]
    fn stride(&self) -> U {
        self.step
    }
}

// Manual impls: derives would bound `S` through the marker.

impl<U: Copy, S> Clone for Rebase<U, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U: Copy, S> Copy for Rebase<U, S> {}

impl<U: PartialEq, S> PartialEq for Rebase<U, S> {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl<U: Eq, S> Eq for Rebase<U, S> {}

impl<U: std::hash::Hash, S> std::hash::Hash for Rebase<U, S> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.offset.hash(state);
    }
}

impl<U: fmt::Debug, S> fmt::Debug for Rebase<U, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rebase")
            .field("offset", &self.offset)
            .finish()
    }
}

impl<U: Copy, S> Clone for Slit<U, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U: Copy, S> Copy for Slit<U, S> {}

impl<U: PartialEq, S> PartialEq for Slit<U, S> {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && self.step == other.step
    }
}

impl<U: Eq, S> Eq for Slit<U, S> {}

impl<U: std::hash::Hash, S> std::hash::Hash for Slit<U, S> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.offset.hash(state);
        self.step.hash(state);
    }
}

impl<U: fmt::Debug, S> fmt::Debug for Slit<U, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slit")
            .field("offset", &self.offset)
            .field("step", &self.step)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    mod rebase {
        use super::*;

        #[test]
        fn test_convert_and_revert() {
            let rebase = Rebase::<usize>::new(1000);
            assert_eq!(rebase.convert(1000), 0);
            assert_eq!(rebase.convert(1499), 499);
            assert_eq!(rebase.revert(0), 1000);
            assert_eq!(rebase.revert(500), 1500);
            assert_eq!(rebase.stride(), 1);
        }

        #[test]
        fn test_signed_user_keys() {
            let rebase = Rebase::<i64, usize>::new(-10);
            assert_eq!(rebase.convert(-10), 0);
            assert_eq!(rebase.convert(5), 15);
            assert_eq!(rebase.revert(3), -7);
            assert_eq!(
                rebase.try_convert(-11),
                Err(ConvertError::OutOfDomain { key: -1 })
            );
        }

        #[test]
        #[should_panic(expected = "does not fit the target key domain")]
        fn test_convert_below_offset_into_unsigned_storage_panics() {
            let rebase = Rebase::<i64, usize>::new(-10);
            let _ = rebase.convert(-11);
        }

        #[test]
        fn test_try_convert_underflow() {
            let rebase = Rebase::<usize>::new(1000);
            assert_eq!(
                rebase.try_convert(999),
                Err(ConvertError::Overflow { key: 999 })
            );
            assert_eq!(rebase.try_convert(1001), Ok(1));
        }

        #[test]
        fn test_try_revert_overflow() {
            let rebase = Rebase::<u8, usize>::new(200);
            assert_eq!(rebase.try_revert(55), Ok(255));
            assert_eq!(rebase.try_revert(56), Err(ConvertError::Overflow { key: 56 }));
            assert_eq!(
                rebase.try_revert(1000),
                Err(ConvertError::OutOfDomain { key: 1000 })
            );
        }

        #[test]
        fn test_reindex() {
            let mut rebase = Rebase::<usize>::new(1000);
            rebase.reindex(2000);
            assert_eq!(rebase.offset(), 2000);
            assert_eq!(rebase.convert(2001), 1);
        }

        #[test]
        #[cfg(debug_assertions)]
        #[should_panic(expected = "overflow")]
        fn test_convert_underflow_panics_in_debug() {
            let rebase = Rebase::<usize>::new(1000);
            let _ = rebase.convert(999);
        }
    }

    mod slit {
        use super::*;

        #[test]
        fn test_convert_and_revert() {
            let slit = Slit::<usize>::new(1000, 5);
            assert_eq!(slit.convert(1000), 0);
            assert_eq!(slit.convert(1005), 1);
            assert_eq!(slit.convert(2000), 200);
            assert_eq!(slit.revert(0), 1000);
            assert_eq!(slit.revert(500), 3500);
            assert_eq!(slit.stride(), 5);
        }

        #[test]
        fn test_try_convert_misaligned() {
            let slit = Slit::<usize>::new(1000, 5);
            assert_eq!(
                slit.try_convert(1003),
                Err(ConvertError::Misaligned {
                    key: 1003,
                    offset: 1000,
                    step: 5,
                })
            );
            assert_eq!(slit.try_convert(1010), Ok(2));
        }

        #[test]
        fn test_try_convert_below_offset() {
            let slit = Slit::<usize>::new(1000, 5);
            assert_eq!(
                slit.try_convert(995),
                Err(ConvertError::Overflow { key: 995 })
            );

            let slit = Slit::<i32, usize>::new(0, 5);
            assert_eq!(
                slit.try_convert(-5),
                Err(ConvertError::OutOfDomain { key: -1 })
            );
        }

        #[test]
        fn test_rejects_non_positive_step() {
            assert_eq!(
                Slit::<i32>::try_new(0, 0),
                Err(ConvertError::NonPositiveStep { step: 0 })
            );
            assert_eq!(
                Slit::<i32>::try_new(0, -3),
                Err(ConvertError::NonPositiveStep { step: -3 })
            );
            assert!(Slit::<i32>::try_new(0, 1).is_ok());
        }

        #[test]
        #[should_panic(expected = "step must be positive")]
        fn test_new_panics_on_zero_step() {
            let _ = Slit::<usize>::new(1000, 0);
        }

        #[test]
        fn test_reindex() {
            let mut slit = Slit::<usize>::new(1000, 5);
            slit.reindex(2000, 10);
            assert_eq!((slit.offset(), slit.step()), (2000, 10));
            assert_eq!(slit.convert(2010), 1);

            assert_eq!(
                slit.try_reindex(0, 0),
                Err(ConvertError::NonPositiveStep { step: 0 })
            );
            assert_eq!((slit.offset(), slit.step()), (2000, 10));
        }

        #[test]
        #[cfg(debug_assertions)]
        #[should_panic(expected = "is not a multiple of step")]
        fn test_misaligned_convert_panics_in_debug() {
            let slit = Slit::<usize>::new(1000, 5);
            let _ = slit.convert(1003);
        }

        #[test]
        fn test_equality_and_debug() {
            let a = Slit::<usize>::new(1000, 5);
            let b = Slit::<usize>::new(1000, 5);
            assert_eq!(a, b);
            assert_ne!(a, Slit::new(1000, 10));
            assert_eq!(format!("{a:?}"), "Slit { offset: 1000, step: 5 }");
        }
    }

    proptest! {
        #[test]
        fn test_rebase_storage_round_trip(
            offset in -1_000_000_i64..1_000_000,
            k in 0_usize..100_000,
        ) {
            let rebase = Rebase::<i64, usize>::new(offset);
            prop_assert_eq!(rebase.convert(rebase.revert(k)), k);
            prop_assert_eq!(rebase.try_convert(rebase.revert(k)), Ok(k));
        }

        #[test]
        fn test_slit_storage_round_trip(
            offset in -1_000_000_i64..1_000_000,
            step in 1_i64..1000,
            k in 0_usize..100_000,
        ) {
            let slit = Slit::<i64, usize>::new(offset, step);
            prop_assert_eq!(slit.convert(slit.revert(k)), k);
            prop_assert_eq!(slit.try_revert(k), Ok(slit.revert(k)));
        }

        #[test]
        fn test_slit_user_round_trip(
            offset in 0_usize..1_000_000,
            step in 1_usize..1000,
            k in 0_usize..100_000,
        ) {
            let slit = Slit::<usize>::new(offset, step);
            let user = offset + k * step;
            prop_assert_eq!(slit.revert(slit.convert(user)), user);
        }

        #[test]
        fn test_slit_is_order_preserving(
            step in 1_usize..100,
            a in 0_usize..10_000,
            b in 0_usize..10_000,
        ) {
            let slit = Slit::<usize>::new(7, step);
            prop_assert_eq!(a.cmp(&b), slit.revert(a).cmp(&slit.revert(b)));
        }
    }
}
