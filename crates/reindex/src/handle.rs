//! Ownership of an adapter's container.
//!
//! An adapter either owns its container or borrows one. The choice is part of
//! the adapter type through its handle parameter:
//!
//! | Handle       | Ownership                       | Mutation |
//! |--------------|---------------------------------|----------|
//! | [`Owned<C>`] | exclusively owned by the adapter | yes      |
//! | `&mut C`     | borrowed from the caller         | yes      |
//! | `&C`         | shared borrow from the caller    | no       |
//!
//! Borrowing handles tie the adapter to the container's lifetime, so an adapter
//! can never outlive the container it views.

/// Read access to an adapter's container.
pub trait Handle {
    /// The wrapped container type.
    type Target;

    /// Returns the wrapped container.
    fn target(&self) -> &Self::Target;
}

/// Write access to an adapter's container.
pub trait HandleMut: Handle {
    /// Returns the wrapped container mutably.
    fn target_mut(&mut self) -> &mut Self::Target;
}

/// A container exclusively owned by an adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Owned<C>(C);

impl<C> Owned<C> {
    /// Takes ownership of `container`.
    #[must_use]
    pub const fn new(container: C) -> Self {
        Self(container)
    }

    /// Releases the container.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.0
    }
}

impl<C> From<C> for Owned<C> {
    fn from(container: C) -> Self {
        Self(container)
    }
}

impl<C> Handle for Owned<C> {
    type Target = C;

    #[inline]
    fn target(&self) -> &C {
        &self.0
    }
}

impl<C> HandleMut for Owned<C> {
    #[inline]
    fn target_mut(&mut self) -> &mut C {
        &mut self.0
    }
}

impl<C> Handle for &C {
    type Target = C;

    #[inline]
    fn target(&self) -> &C {
        self
    }
}

impl<C> Handle for &mut C {
    type Target = C;

    #[inline]
    fn target(&self) -> &C {
        self
    }
}

impl<C> HandleMut for &mut C {
    #[inline]
    fn target_mut(&mut self) -> &mut C {
        self
    }
}
