//! Key-translating adapters over standard containers.
//!
//! This crate lets a container be addressed through a key domain other than its
//! native storage keys, such as "index 1000" instead of "slot 0", or a strided
//! key space where only every 5th integer is valid, without reimplementing the
//! container's storage or mutation logic.
//!
//! # Overview
//!
//! The crate is organized around four concepts:
//!
//! 1. **Keys** - [`key`]: the integer key domains ([`Key`]) converters compute
//!    in.
//!
//! 2. **Converters** - [`converter`]: policies translating user keys to storage
//!    keys and back, including [`Rebase`] (offset only) and [`Slit`] (offset
//!    and stride).
//!
//! 3. **Container contracts** - [`container`]: the [`Container`],
//!    [`Sequence`] and [`Associative`] traits, implemented for arrays, `Vec`,
//!    `VecDeque`, `HashMap` and `BTreeMap`.
//!
//! 4. **Adapters** - [`adapter`]: [`Reindex`] over positional containers and
//!    [`Remap`] over associative ones. An adapter owns its container
//!    ([`Owned`]) or borrows it (`&mut C`, `&C`), see [`handle`].
//!
//! Checked operations (`at`, `try_*`) return [`Error`]; the unchecked fast
//! paths (`adapter[key]`, `insert`, `erase`, ...) panic under the container's
//! own contract instead.
//!
//! # Examples
//!
//! ```
//! use reindex::{Reindex, Slit};
//!
//! // 500 slots addressed by keys 1000, 1005, 1010, ...
//! let mut slit = Reindex::new(Slit::<usize>::new(1000, 5), vec![0_i32; 500]);
//! assert_eq!(slit.begin_index(), 1000);
//! assert_eq!(slit.end_index(), 3500);
//!
//! slit[2000] = 42;
//! assert_eq!(slit.container()[200], 42);
//!
//! // Re-seating the mapping moves no element
//! slit.reindex(0, 1);
//! assert_eq!(slit[200], 42);
//! ```

pub mod adapter;
pub mod container;
pub mod converter;
pub mod error;
pub mod handle;
pub mod key;

// Re-export commonly used types
pub use self::{
    adapter::{Adapter, Keyed, Positional, Reindex, Remap},
    container::{Associative, Container, Sequence},
    converter::{Bijective, Converter, Monotonic, Rebase, Slit},
    error::{AccessError, ConvertError, Error},
    handle::{Handle, HandleMut, Owned},
    key::Key,
};
