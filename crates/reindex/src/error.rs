//! Error types for checked key conversion and container access.
//!
//! Every fallible adapter operation comes in two flavours: a checked `try_*` /
//! `at` form that reports one of the errors below, and an unchecked fast path
//! that panics with the container's own contract instead. The errors here are
//! only produced by the checked forms.
//!
//! Keys are widened to `i128` for reporting, so a single error type covers
//! every [`Key`](crate::Key) domain.

/// An error produced while translating a key between user and storage domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConvertError {
    /// Key arithmetic (`user - offset`, `storage * step + offset`, ...) overflowed.
    #[display("key arithmetic overflowed while converting key {key}")]
    Overflow {
        /// The key being converted.
        key: i128,
    },
    /// The converted key cannot be represented in the target key type.
    #[display("key {key} is not representable in the target key domain")]
    OutOfDomain {
        /// The intermediate value that did not fit.
        key: i128,
    },
    /// A strided key does not lie on the stride grid.
    #[display("key {key} is not a multiple of step {step} away from offset {offset}")]
    Misaligned {
        /// The user key.
        key: i128,
        /// The converter offset.
        offset: i128,
        /// The converter step.
        step: i128,
    },
    /// A strided converter was configured with a zero or negative step.
    #[display("step must be positive, got {step}")]
    NonPositiveStep {
        /// The rejected step.
        step: i128,
    },
}

/// An error reported by a container for a storage key it cannot serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum AccessError {
    /// A positional key is past the end of a sequence.
    #[display("index {index} is out of range for length {len}")]
    OutOfRange {
        /// The storage position.
        index: usize,
        /// The container length at the time of access.
        len: usize,
    },
    /// A positional range ends before it starts.
    #[display("range starts at {first} but ends at {last}")]
    InvalidRange {
        /// The storage position the range starts at.
        first: usize,
        /// The storage position the range ends at (exclusive).
        last: usize,
    },
    /// An associative container holds no entry for the key.
    #[display("key not found")]
    KeyNotFound,
}

/// Any error returned by a checked adapter operation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum Error {
    /// The user key could not be translated into a storage key.
    #[display("{_0}")]
    Convert(ConvertError),
    /// The storage key was rejected by the container.
    #[display("{_0}")]
    Access(AccessError),
}

impl Error {
    /// Returns `true` if the storage key was past the end of the container.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::Access(AccessError::OutOfRange { .. }))
    }
}
