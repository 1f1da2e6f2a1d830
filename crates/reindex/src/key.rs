//! Integer key domains.
//!
//! [`Key`] is the arithmetic a converter needs from its key types: the
//! ordinary operators for the unchecked fast path, `checked_*` counterparts
//! for the checked path, and casts between key types.
//!
//! Casts go through `i128`, which holds every implementing type losslessly.
//!
//! # Examples
//!
//! ```
//! use reindex::Key;
//!
//! assert_eq!(42_i64.cast::<usize>(), 42);
//! assert_eq!(42_i64.try_cast::<usize>(), Some(42));
//! // Negative values have no `usize` representation
//! assert_eq!((-1_i64).try_cast::<usize>(), None);
//! ```

use std::{
    fmt::{Debug, Display},
    hash::Hash,
    ops::{Add, Div, Mul, Rem, Sub},
};

/// An integer type usable as a user or storage key.
pub trait Key:
    Copy
    + Ord
    + Hash
    + Debug
    + Display
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Rem<Output = Self>
{
    /// The additive identity.
    const ZERO: Self;
    /// The multiplicative identity.
    const ONE: Self;

    /// Checked addition; `None` on overflow.
    fn checked_add(self, rhs: Self) -> Option<Self>;
    /// Checked subtraction; `None` on overflow or underflow.
    fn checked_sub(self, rhs: Self) -> Option<Self>;
    /// Checked multiplication; `None` on overflow.
    fn checked_mul(self, rhs: Self) -> Option<Self>;
    /// Checked division; `None` if `rhs` is zero or on overflow.
    fn checked_div(self, rhs: Self) -> Option<Self>;
    /// Checked remainder; `None` if `rhs` is zero or on overflow.
    fn checked_rem(self, rhs: Self) -> Option<Self>;

    /// Widens the key to `i128`.
    fn to_i128(self) -> i128;
    /// Narrows an `i128`, returning `None` if the value does not fit.
    fn try_from_i128(value: i128) -> Option<Self>;

    /// Casts to another key type.
    ///
    /// # Panics
    ///
    /// Panics if the value is not representable in `T`.
    #[inline]
    #[must_use]
    #[track_caller]
    fn cast<T: Key>(self) -> T {
        self.try_cast()
            .unwrap_or_else(|| panic!("key {self} does not fit the target key domain"))
    }

    /// Casts to another key type, returning `None` if the value does not fit.
    #[inline]
    fn try_cast<T: Key>(self) -> Option<T> {
        T::try_from_i128(self.to_i128())
    }
}

macro_rules! impl_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Key for $ty {
                const ZERO: Self = 0;
                const ONE: Self = 1;

                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$ty>::checked_add(self, rhs)
                }

                #[inline]
                fn checked_sub(self, rhs: Self) -> Option<Self> {
                    <$ty>::checked_sub(self, rhs)
                }

                #[inline]
                fn checked_mul(self, rhs: Self) -> Option<Self> {
                    <$ty>::checked_mul(self, rhs)
                }

                #[inline]
                fn checked_div(self, rhs: Self) -> Option<Self> {
                    <$ty>::checked_div(self, rhs)
                }

                #[inline]
                fn checked_rem(self, rhs: Self) -> Option<Self> {
                    <$ty>::checked_rem(self, rhs)
                }

                #[inline]
                #[allow(clippy::cast_lossless, clippy::cast_possible_wrap)]
                fn to_i128(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn try_from_i128(value: i128) -> Option<Self> {
                    <$ty>::try_from(value).ok()
                }
            }
        )*
    };
}

impl_key!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
